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

#[derive(Snafu, Debug)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Invalid color value for {role}"))]
    InvalidColor {
        role: String,
        #[snafu(implicit)]
        loc:  snafu::Location,
    },

    #[snafu(display("Invalid theme mode {value}, expected \"light\" or \"dark\""))]
    InvalidMode {
        value: String,
        #[snafu(implicit)]
        loc:   snafu::Location,
    },

    #[snafu(display("Theme document must be a JSON object"))]
    NotAnObject {
        #[snafu(implicit)]
        loc: snafu::Location,
    },

    #[snafu(display("Malformed theme document: {source}"))]
    Malformed {
        source: serde_json::Error,
        #[snafu(implicit)]
        loc:    snafu::Location,
    },

    #[snafu(display("Invalid hex color {value:?}, expected #rrggbb"))]
    InvalidHex {
        value: String,
        #[snafu(implicit)]
        loc:   snafu::Location,
    },
}
