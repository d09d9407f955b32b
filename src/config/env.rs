// Copyright 2025 coScene
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Plugin environment variables
//
// Mapping keys are folded to lowercase while a document is decoded, which
// would turn `SCOPE` into `scope`. Environment variables are therefore kept
// as an ordered list of explicit pairs, and a lookup map is only built on
// demand with the authored casing intact.

use super::weak::Scalar;
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A single `NAME=value` pair with its name casing preserved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvVar {
    pub name: String,
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Parse a `NAME=value` string. The value may itself contain `=`.
    pub fn parse(pair: &str) -> Option<Self> {
        let (name, value) = pair.split_once('=')?;
        if name.is_empty() {
            return None;
        }
        Some(Self::new(name, value))
    }
}

impl fmt::Display for EnvVar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// Ordered list of environment variables for a plugin
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvVars(Vec<EnvVar>);

impl EnvVars {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(name, value)| EnvVar::new(name, value))
                .collect(),
        )
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.push(EnvVar::new(name, value));
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EnvVar> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `NAME=value` strings in authored order, suitable for a process environment
    pub fn pairs(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    /// Case-preserving lookup view. A repeated name resolves to its last entry.
    pub fn to_map(&self) -> HashMap<String, String> {
        self.0
            .iter()
            .map(|var| (var.name.clone(), var.value.clone()))
            .collect()
    }

    /// Value of the last entry named exactly `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .rev()
            .find(|var| var.name == name)
            .map(|var| var.value.as_str())
    }
}

impl<'a> IntoIterator for &'a EnvVars {
    type Item = &'a EnvVar;
    type IntoIter = std::slice::Iter<'a, EnvVar>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<EnvVar> for EnvVars {
    fn from_iter<T: IntoIterator<Item = EnvVar>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

// Serialized as a sequence of single-entry mappings:
//
//   env:
//     - COLLECT_ALL: "true"
//     - SCOPE: test
impl Serialize for EnvVars {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.0.len()))?;
        for var in &self.0 {
            seq.serialize_element(&SingleEntry(var))?;
        }
        seq.end()
    }
}

struct SingleEntry<'a>(&'a EnvVar);

impl Serialize for SingleEntry<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.0.name, &self.0.value)?;
        map.end()
    }
}

/// Accepts `{NAME: value, ...}`, `[{NAME: value}, ...]` or `["NAME=value", ...]`
impl<'de> Deserialize<'de> for EnvVars {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EnvVarsVisitor)
    }
}

struct EnvVarsVisitor;

impl<'de> Visitor<'de> for EnvVarsVisitor {
    type Value = EnvVars;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping or a list of environment variables")
    }

    fn visit_unit<E: de::Error>(self) -> Result<EnvVars, E> {
        Ok(EnvVars::new())
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<EnvVars, A::Error> {
        let mut vars = EnvVars::new();
        while let Some((name, value)) = map.next_entry::<Scalar, Scalar>()? {
            vars.push(name.into_string(), value.into_string());
        }
        Ok(vars)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<EnvVars, A::Error> {
        let mut vars = EnvVars::new();
        while let Some(entry) = seq.next_element::<EntryForm>()? {
            match entry {
                EntryForm::Pair(pair) => {
                    let var = EnvVar::parse(&pair).ok_or_else(|| {
                        de::Error::custom(format!(
                            "environment entry '{}' is not of the form NAME=value",
                            pair
                        ))
                    })?;
                    vars.0.push(var);
                }
                EntryForm::Entries(entries) => vars.0.extend(entries.0),
            }
        }
        Ok(vars)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum EntryForm {
    Pair(String),
    Entries(EnvVars),
}
