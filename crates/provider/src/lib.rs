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

//! Runtime theme provider.
//!
//! A [`ThemeProvider`] owns the current theme. It restores a persisted theme
//! on mount, projects every committed theme onto a [`StyleSurface`] as CSS
//! custom properties, persists it, and can pull a theme from a remote
//! endpoint. Consumers inside a provider scope reach it via [`use_theme`].
//!
//! ```no_run
//! # async fn demo() {
//! use swatch_provider::{ProviderConfig, ProviderOptions, ThemeProvider, use_theme};
//!
//! let provider = ThemeProvider::mount(
//!     ProviderOptions::builder()
//!         .config(ProviderConfig::builder().api_url("https://example.com/theme").build())
//!         .build(),
//! );
//! provider.wait_idle().await;
//! provider.scope(async { use_theme().toggle_mode() }).await;
//! # }
//! ```

mod accessor;
mod config;
mod err;
mod provider;
mod remote;
mod surface;

pub use accessor::{ThemeHandle, try_use_theme, use_theme};
pub use config::{DEFAULT_STORAGE_KEY, ProviderConfig};
pub use err::{Error, Result};
pub use provider::{LoadOutcome, ProviderOptions, ThemeChangeCallback, ThemeProvider};
pub use remote::{RemoteThemeClient, ThemeResponse};
pub use surface::{StyleRoot, StyleSurface, apply_theme};
