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

// Weakly typed scalar decoding
//
// Hand-written documents are loose about scalar types: `Version: 4.6` is a
// float to YAML and `Keys: "false"` is a string. These helpers coerce plain
// scalars into the field's declared type.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::collections::BTreeMap;

/// Any plain scalar a document may carry for a string or bool field
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Null(()),
}

impl Scalar {
    pub(crate) fn into_string(self) -> String {
        match self {
            Scalar::Bool(b) => b.to_string(),
            Scalar::Int(i) => i.to_string(),
            Scalar::Uint(u) => u.to_string(),
            Scalar::Float(f) => f.to_string(),
            Scalar::Str(s) => s,
            Scalar::Null(()) => String::new(),
        }
    }

    fn into_bool(self) -> Result<bool, String> {
        match self {
            Scalar::Bool(b) => Ok(b),
            Scalar::Int(i) => Ok(i != 0),
            Scalar::Uint(u) => Ok(u != 0),
            Scalar::Float(f) => Ok(f != 0.0),
            Scalar::Null(()) => Ok(false),
            Scalar::Str(s) => parse_bool(&s),
        }
    }
}

fn parse_bool(s: &str) -> Result<bool, String> {
    match s.trim().to_ascii_lowercase().as_str() {
        "" | "0" | "f" | "false" => Ok(false),
        "1" | "t" | "true" => Ok(true),
        other => Err(format!("cannot parse '{}' as a boolean", other)),
    }
}

/// Deserialize a string field from any scalar
pub(crate) fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Scalar::deserialize(deserializer)?.into_string())
}

/// Deserialize a bool field from a bool, an integer or a boolean-looking string
pub(crate) fn bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer)?
        .into_bool()
        .map_err(de::Error::custom)
}

/// Deserialize a map of string lists, coercing every element from any scalar
pub(crate) fn string_lists<'de, D>(deserializer: D) -> Result<BTreeMap<String, Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let lists = BTreeMap::<String, Vec<Scalar>>::deserialize(deserializer)?;
    Ok(lists
        .into_iter()
        .map(|(name, items)| (name, items.into_iter().map(Scalar::into_string).collect()))
        .collect())
}
