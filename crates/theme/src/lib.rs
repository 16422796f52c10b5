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

//! Theme engine core for swatch.
//!
//! A [`Theme`] is a total, validated set of design tokens (colors,
//! typography, spacing and a light/dark mode). Everything in this crate is
//! pure: merging partial overrides onto a base theme, validating external
//! documents, projecting a theme onto CSS custom properties and a handful of
//! color conversions. The stateful side (current theme, persistence, remote
//! loading) lives in `swatch-provider`.
//!
//! ```rust
//! use swatch_theme::{Preset, ThemePatch, ThemeMode, merge, project};
//!
//! let dark = merge(Preset::Default.theme(), &ThemePatch::from(ThemeMode::Dark));
//! let vars = project(&dark);
//! assert_eq!(vars["--radius"], "0.5rem");
//! ```

mod color;
mod err;
mod merge;
mod model;
mod presets;
mod project;
mod validate;

pub use color::{hex_to_hsl, parse_hex, rgb_to_hsl, theme_variations};
pub use err::{Error, Result};
pub use merge::merge;
pub use model::*;
pub use presets::{Preset, default_theme};
pub use project::{StyleVariables, clean_hsl, project};
pub use validate::{Validate, parse_patch, patch_from_value, validate, validate_value};
