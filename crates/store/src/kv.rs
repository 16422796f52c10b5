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

use std::collections::HashMap;

use parking_lot::RwLock;
use serde::{Serialize, de::DeserializeOwned};
use snafu::{ResultExt, ensure};

use crate::err::*;

/// Raw key-value storage of JSON text.
///
/// Implementations are synchronous; a theme document is small enough that
/// reading or writing it inline is fine.
pub trait KvStore: Send + Sync {
    /// Returns `None` if the key does not exist.
    fn get_raw(&self, key: &str) -> Result<Option<String>>;

    fn set_raw(&self, key: &str, value: &str) -> Result<()>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}

/// Typed access on top of any [`KvStore`].
pub trait KvStoreExt: KvStore {
    /// Serializes `value` to JSON and stores it under `key`.
    fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value_json = serde_json::to_string(value).context(CodecSnafu)?;
        self.set_raw(key, &value_json)
    }

    /// Loads and deserializes the value under `key`.
    fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get_raw(key)? {
            Some(value_json) => {
                let value = serde_json::from_str(&value_json).context(CodecSnafu)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

impl<S: KvStore + ?Sized> KvStoreExt for S {}

pub(crate) fn check_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && !key.starts_with('.')
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    ensure!(valid, InvalidKeySnafu { key });
    Ok(())
}

/// In-process store; contents are lost when it is dropped.
#[derive(Debug, Default)]
pub struct MemoryKvStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self { Self::default() }

    pub fn len(&self) -> usize { self.entries.read().len() }

    pub fn is_empty(&self) -> bool { self.entries.read().is_empty() }
}

impl KvStore for MemoryKvStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.entries.write().insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;
        self.entries.write().remove(key);
        Ok(())
    }
}
