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

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;

/// File store configuration
#[derive(Debug, Clone, SmartDefault, Serialize, Deserialize, bon::Builder)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one `<key>.json` file per key
    /// (default: `<user config dir>/swatch`)
    #[default(_code = "default_dir()")]
    #[builder(default = default_dir(), into)]
    pub dir: PathBuf,
}

fn default_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("swatch")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_dir() {
        let config = StoreConfig::builder().dir("/tmp/themes").build();
        assert_eq!(config.dir, PathBuf::from("/tmp/themes"));
        assert!(StoreConfig::default().dir.ends_with("swatch"));
    }
}
