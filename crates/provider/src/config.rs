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

use std::time::Duration;

use serde::{Deserialize, Serialize};
use smart_default::SmartDefault;
use swatch_theme::Theme;

pub const DEFAULT_STORAGE_KEY: &str = "app-theme";

/// Provider configuration
#[derive(Debug, Clone, SmartDefault, Serialize, Deserialize, bon::Builder)]
#[serde(default)]
pub struct ProviderConfig {
    /// Theme used when nothing valid is restored from storage
    /// (default: the `default` preset)
    #[default(_code = "swatch_theme::default_theme()")]
    #[builder(default = swatch_theme::default_theme())]
    pub initial_theme: Theme,

    /// Remote theme loaded automatically on mount
    #[builder(into)]
    pub api_url: Option<String>,

    /// Restore the theme on mount and persist every change
    #[builder(default)]
    pub enable_local_storage: bool,

    /// Storage key holding the serialized theme
    #[default(_code = "DEFAULT_STORAGE_KEY.to_owned()")]
    #[builder(default = DEFAULT_STORAGE_KEY.to_owned(), into)]
    pub storage_key: String,

    /// Timeout for remote theme requests (default: 10 seconds)
    #[default(_code = "Duration::from_secs(10)")]
    #[builder(default = Duration::from_secs(10))]
    pub request_timeout: Duration,

    /// Custom User-Agent header for remote theme requests
    #[builder(into)]
    pub user_agent: Option<String>,
}
