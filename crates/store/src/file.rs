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

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use snafu::ResultExt;

use crate::{
    config::StoreConfig,
    err::*,
    kv::{KvStore, check_key},
};

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file that is then renamed over the target, so
/// a reader never observes a half-written document. The directory is created
/// on the first write.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self { Self { dir: dir.into() } }

    pub fn from_config(config: &StoreConfig) -> Self { Self::new(config.dir.clone()) }

    pub fn dir(&self) -> &Path { &self.dir }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Default for FileKvStore {
    fn default() -> Self { Self::from_config(&StoreConfig::default()) }
}

impl KvStore for FileKvStore {
    fn get_raw(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context(ReadSnafu { path }),
        }
    }

    #[tracing::instrument(
        level = "trace",
        skip(self, value),
        fields(dir = %self.dir.display()),
        err
    )]
    fn set_raw(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir).context(WriteSnafu { path: &self.dir })?;

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, value).context(WriteSnafu { path: &tmp })?;
        if let Err(err) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(err).context(WriteSnafu { path });
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context(WriteSnafu { path }),
        }
    }
}
