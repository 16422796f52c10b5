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

use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{OptionExt, ResultExt, ensure};
use swatch_theme::{ThemePatch, patch_from_value};

use crate::{config::ProviderConfig, err::*};

/// Body of a remote theme endpoint.
///
/// `theme` stays undecoded so a missing theme and an invalid one are
/// reported differently. `lastUpdated` and `version` are informational and
/// kept as whatever JSON the server sent, string or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    #[serde(default)]
    pub theme:        Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version:      Option<Value>,
}

impl ThemeResponse {
    /// Decodes and validates the carried theme.
    pub fn into_patch(self) -> Result<ThemePatch> {
        let theme = self
            .theme
            .filter(|theme| !theme.is_null())
            .context(MissingThemeSnafu)?;
        patch_from_value(theme).context(InvalidThemeSnafu)
    }
}

/// Fetches themes over HTTP with a single GET per load.
#[derive(Debug, Clone)]
pub struct RemoteThemeClient {
    client: reqwest::Client,
}

impl RemoteThemeClient {
    pub const fn new(client: reqwest::Client) -> Self { Self { client } }

    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder().timeout(config.request_timeout);
        if let Some(ref ua) = config.user_agent {
            builder = builder.user_agent(ua);
        }
        let client = builder.build().context(ClientSnafu)?;
        Ok(Self::new(client))
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    pub async fn fetch(&self, url: &str) -> Result<ThemeResponse> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .context(NetworkSnafu { url })?;

        ensure!(
            response.status().is_success(),
            HttpSnafu {
                status: response.status().as_u16(),
                url,
            }
        );

        let body = response.bytes().await.context(NetworkSnafu { url })?;
        serde_json::from_slice(&body).context(MalformedResponseSnafu)
    }

    /// [`Self::fetch`] followed by [`ThemeResponse::into_patch`].
    pub async fn fetch_patch(&self, url: &str) -> Result<ThemePatch> {
        let response = self.fetch(url).await?;
        tracing::debug!(
            version = ?response.version,
            last_updated = ?response.last_updated,
            "Fetched remote theme"
        );
        response.into_patch()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(body: Value) -> ThemeResponse { serde_json::from_value(body).unwrap() }

    #[test]
    fn missing_and_null_theme_are_missing() {
        for body in [json!({}), json!({ "theme": null, "version": "1" })] {
            let err = response(body).into_patch().unwrap_err();
            assert!(matches!(err, Error::MissingTheme { .. }));
            assert_eq!(err.to_string(), "Invalid API response: missing theme data");
        }
    }

    #[test]
    fn invalid_theme_is_distinct_from_missing() {
        let err = response(json!({ "theme": { "mode": "purple" } }))
            .into_patch()
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTheme { .. }));
        assert_eq!(err.to_string(), "Invalid theme configuration from API");
    }

    #[test]
    fn metadata_is_optional() {
        let parsed = response(json!({
            "theme": { "mode": "dark" },
            "lastUpdated": "2024-01-01T00:00:00Z",
            "version": "3",
        }));
        assert_eq!(parsed.last_updated, Some(json!("2024-01-01T00:00:00Z")));
        assert_eq!(parsed.into_patch().unwrap(), swatch_theme::ThemeMode::Dark.into());
    }

    #[test]
    fn numeric_metadata_is_accepted() {
        let parsed = response(json!({
            "theme": { "mode": "dark" },
            "lastUpdated": 1_714_557_600,
            "version": 3,
        }));
        assert_eq!(parsed.version, Some(json!(3)));
        assert_eq!(parsed.last_updated, Some(json!(1_714_557_600)));
        assert_eq!(parsed.into_patch().unwrap(), swatch_theme::ThemeMode::Dark.into());
    }
}
