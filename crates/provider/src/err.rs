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

use snafu::Snafu;

pub type Result<T> = std::result::Result<T, Error>;

/// Remote-load failures display as the message a UI shows to the user, which
/// is also what [`crate::ThemeProvider::last_error`] records.
#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to build HTTP client: {source}"))]
    Client {
        source: reqwest::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Failed to load theme from {url}: {source}"))]
    Network {
        url:    String,
        source: reqwest::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("HTTP error! status: {status}"))]
    Http {
        status: u16,
        url:    String,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Invalid API response: {source}"))]
    MalformedResponse {
        source: serde_json::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Invalid API response: missing theme data"))]
    MissingTheme {
        #[snafu(implicit)]
        loc: snafu::Location,
    },

    #[snafu(display("Invalid theme configuration from API"))]
    InvalidTheme {
        source: swatch_theme::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Theme from API was rejected by the provider"))]
    Rejected {
        #[snafu(implicit)]
        loc: snafu::Location,
    },

    #[snafu(display("use_theme must be used within a ThemeProvider scope"))]
    OutsideProvider {
        #[snafu(implicit)]
        loc: snafu::Location,
    },
}
