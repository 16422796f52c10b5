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

//! Structural guards for themes.
//!
//! Validation is shallow. It rejects a mode outside
//! `light`/`dark` and color values that are not non-empty strings, the two
//! things that can corrupt the rendering surface. Typography and spacing are
//! only checked for JSON type when an external document is decoded.

use serde_json::Value;
use snafu::{ResultExt, ensure};

use crate::{
    err::{InvalidColorSnafu, InvalidModeSnafu, MalformedSnafu, NotAnObjectSnafu, Result},
    model::{Theme, ThemeColors, ThemeColorsPatch, ThemeMode, ThemePatch},
};

pub trait Validate {
    fn check(&self) -> Result<()>;
}

impl Validate for ThemeColors {
    fn check(&self) -> Result<()> { check_colors(self.entries()) }
}

impl Validate for ThemeColorsPatch {
    fn check(&self) -> Result<()> { check_colors(self.entries()) }
}

impl Validate for Theme {
    // `mode` is valid by construction.
    fn check(&self) -> Result<()> { self.colors.check() }
}

impl Validate for ThemePatch {
    fn check(&self) -> Result<()> { self.colors.as_ref().map_or(Ok(()), Validate::check) }
}

fn check_colors<'a>(entries: impl Iterator<Item = (&'static str, &'a String)>) -> Result<()> {
    for (role, value) in entries {
        ensure!(!value.trim().is_empty(), InvalidColorSnafu { role });
    }
    Ok(())
}

/// Returns whether `theme` passes [`Validate::check`], logging the
/// diagnostic when it does not.
pub fn validate<T: Validate + ?Sized>(theme: &T) -> bool {
    match theme.check() {
        Ok(()) => true,
        Err(err) => {
            tracing::error!(%err, "Invalid theme configuration");
            false
        }
    }
}

/// Like [`validate`], for an undecoded JSON document.
pub fn validate_value(value: &Value) -> bool {
    match patch_from_value(value.clone()) {
        Ok(_) => true,
        Err(err) => {
            tracing::error!(%err, "Invalid theme configuration");
            false
        }
    }
}

/// Decodes and validates a partial theme from JSON text.
pub fn parse_patch(json: &str) -> Result<ThemePatch> {
    let value: Value = serde_json::from_str(json).context(MalformedSnafu)?;
    patch_from_value(value)
}

/// Decodes and validates a partial theme from a JSON value.
///
/// Checks run on the raw document first so a bad `mode` or color yields a
/// precise diagnostic instead of a generic decode error.
pub fn patch_from_value(value: Value) -> Result<ThemePatch> {
    let Value::Object(fields) = &value else {
        return NotAnObjectSnafu.fail();
    };

    match fields.get("mode") {
        None | Some(Value::Null) => {}
        Some(Value::String(mode)) if mode.parse::<ThemeMode>().is_ok() => {}
        Some(other) => {
            return InvalidModeSnafu {
                value: other.to_string(),
            }
            .fail();
        }
    }

    if let Some(Value::Object(colors)) = fields.get("colors") {
        for (role, color) in colors {
            let valid = color.as_str().is_some_and(|color| !color.trim().is_empty());
            ensure!(valid, InvalidColorSnafu { role });
        }
    }

    let patch: ThemePatch = serde_json::from_value(value).context(MalformedSnafu)?;
    patch.check()?;
    Ok(patch)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::{Error, Preset, default_theme};

    #[test]
    fn presets_are_valid() {
        for preset in <Preset as strum::IntoEnumIterator>::iter() {
            assert!(validate(preset.theme()), "{preset} should validate");
        }
    }

    #[test]
    fn rejects_unknown_mode() {
        assert!(!validate_value(&json!({ "mode": "purple" })));
        assert!(matches!(
            parse_patch(r#"{"mode":"purple"}"#),
            Err(Error::InvalidMode { .. })
        ));
        assert!(matches!(
            parse_patch(r#"{"mode":1}"#),
            Err(Error::InvalidMode { .. })
        ));
    }

    #[test]
    fn rejects_empty_color() {
        assert!(!validate_value(&json!({ "colors": { "primary": "" } })));
        assert!(!validate_value(&json!({ "colors": { "primary": "   " } })));

        let mut theme = default_theme();
        theme.colors.ring = String::new();
        assert!(!validate(&theme));
        assert!(matches!(theme.check(), Err(Error::InvalidColor { role, .. }) if role == "ring"));
    }

    #[test]
    fn rejects_non_string_color() {
        let err = parse_patch(r#"{"colors":{"primary":12}}"#).unwrap_err();
        assert!(matches!(err, Error::InvalidColor { role, .. } if role == "primary"));
    }

    #[test]
    fn accepts_partial_documents() {
        let patch = parse_patch(r#"{"colors":{"accent":"10 20% 30%"},"extra":true}"#).unwrap();
        assert_eq!(patch.colors.unwrap().accent.as_deref(), Some("10 20% 30%"));
        assert!(patch.mode.is_none());

        assert!(validate_value(&json!({})));
        assert!(validate_value(&json!({ "mode": null, "colors": { "ring": "0 0% 0%" } })));
    }

    #[test]
    fn rejects_malformed_documents() {
        assert!(matches!(parse_patch("{not json"), Err(Error::Malformed { .. })));
        assert!(matches!(parse_patch("[1,2]"), Err(Error::NotAnObject { .. })));
        assert!(matches!(
            parse_patch(r#"{"typography":{"fontWeight":{"bold":"heavy"}}}"#),
            Err(Error::Malformed { .. })
        ));
    }

    #[test]
    fn full_theme_round_trips_through_validation() {
        let json = serde_json::to_string(Preset::ForestMinimal.theme()).unwrap();
        let patch = parse_patch(&json).unwrap();
        assert_eq!(
            crate::merge(&default_theme(), &patch),
            *Preset::ForestMinimal.theme()
        );
    }
}
