// Copyright 2025 Crrow
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Local key-value persistence.
//!
//! Values are stored as JSON text under short string keys. [`MemoryKvStore`]
//! keeps them in process; [`FileKvStore`] writes one file per key.

mod config;
mod err;
mod file;
mod kv;

pub use config::StoreConfig;
pub use err::{Error, Result};
pub use file::FileKvStore;
pub use kv::{KvStore, KvStoreExt, MemoryKvStore};
