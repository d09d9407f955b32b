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

// Configuration source module
//
// Provides a trait-based abstraction over where a configuration document
// lives (local filesystem, HTTP(S), S3), selected by the locator's scheme.
//
// Sources are READ-ONCE: each fetch buffers one whole document.

pub mod auth;
pub mod backend;
pub mod factory;
pub mod file;
pub mod http;
pub mod locator;
pub mod s3;

pub use auth::{ClientConfig, CloudAuthenticator, Credentials, ObjectStoreSettings, Region};
pub use backend::{ConfigSource, RawSource};
pub use factory::{SourceContext, SourceFactory};
pub use file::FileSource;
pub use http::HttpSource;
pub use locator::{split_name_and_ext, Format, Locator, DEFAULT_EXTENSION};
pub use s3::S3Source;
