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

//! Theme data model.
//!
//! Field names serialise to the camelCase JSON shape used for persisted and
//! remote themes (`primaryForeground`, `fontFamily`, `fontSize."2xl"`, ...).
//! Every leaf record has a partial twin whose fields are all optional; the
//! partial types are what callers hand to [`crate::merge`].

use serde::{Deserialize, Serialize};

/// Declares a fixed-schema token record together with its partial twin.
macro_rules! token_record {
    (@key $field:ident $rename:literal) => { $rename };
    (@key $field:ident) => { stringify!($field) };

    (
        $(#[$meta:meta])*
        $name:ident / $patch:ident : $ty:ty {
            $( $(#[rename = $rename:literal])? $field:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $name {
            $(
                $(#[serde(rename = $rename)])?
                pub $field: $ty,
            )+
        }

        #[doc = concat!("Partial [`", stringify!($name), "`].")]
        ///
        /// Absent fields keep the base value on merge.
        #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase")]
        pub struct $patch {
            $(
                #[serde(default, skip_serializing_if = "Option::is_none")]
                $(#[serde(rename = $rename)])?
                pub $field: Option<$ty>,
            )+
        }

        impl $name {
            /// Overlays every supplied field of `patch` onto a copy of `self`.
            #[must_use]
            pub fn merged(&self, patch: &$patch) -> Self {
                Self {
                    $( $field: patch.$field.clone().unwrap_or_else(|| self.$field.clone()), )+
                }
            }

            /// `(step, value)` pairs in declaration order.
            pub fn entries(&self) -> impl Iterator<Item = (&'static str, &$ty)> {
                [ $( (token_record!(@key $field $($rename)?), &self.$field) ),+ ].into_iter()
            }
        }

        impl $patch {
            #[must_use]
            pub const fn is_empty(&self) -> bool { $( self.$field.is_none() )&&+ }

            /// Supplied `(step, value)` pairs in declaration order.
            pub fn entries(&self) -> impl Iterator<Item = (&'static str, &$ty)> {
                [ $( (token_record!(@key $field $($rename)?), self.$field.as_ref()) ),+ ]
                    .into_iter()
                    .filter_map(|(step, value)| value.map(|value| (step, value)))
            }
        }

        impl From<$name> for $patch {
            fn from(value: $name) -> Self {
                Self {
                    $( $field: Some(value.$field), )+
                }
            }
        }
    };
}

/// Light or dark rendering mode. Serialised as `"light"` / `"dark"`.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::AsRefStr,
    strum_macros::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

token_record! {
    /// Semantic color roles. Values are HSL component strings such as
    /// `"222.2 47.4% 11.2%"`, without the `hsl(...)` wrapper.
    ThemeColors / ThemeColorsPatch: String {
        primary,
        primary_foreground,
        secondary,
        secondary_foreground,
        accent,
        accent_foreground,
        background,
        foreground,
        muted,
        muted_foreground,
        card,
        card_foreground,
        popover,
        popover_foreground,
        border,
        input,
        ring,
        destructive,
        destructive_foreground,
        success,
        success_foreground,
        warning,
        warning_foreground,
    }
}

token_record! {
    /// Font stacks for the three families.
    FontFamily / FontFamilyPatch: String { sans, serif, mono }
}

token_record! {
    /// Named font size steps.
    FontSizes / FontSizesPatch: String {
        xs,
        sm,
        base,
        lg,
        xl,
        #[rename = "2xl"] xl2,
        #[rename = "3xl"] xl3,
        #[rename = "4xl"] xl4,
    }
}

token_record! {
    /// Named numeric font weights.
    FontWeights / FontWeightsPatch: u16 { normal, medium, semibold, bold }
}

token_record! {
    LineHeights / LineHeightsPatch: String { tight, normal, relaxed }
}

token_record! {
    /// Border radius steps. `md` doubles as the base `--radius`.
    RadiusScale / RadiusScalePatch: String { none, xs, sm, md, lg, xl, full }
}

token_record! {
    /// Spacing steps. Informational only, never projected onto the surface.
    SpacingScale / SpacingScalePatch: String {
        xs,
        sm,
        md,
        lg,
        xl,
        #[rename = "2xl"] xl2,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Typography {
    pub font_family: FontFamily,
    pub font_size:   FontSizes,
    pub font_weight: FontWeights,
    pub line_height: LineHeights,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypographyPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<FontFamilyPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size:   Option<FontSizesPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeightsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<LineHeightsPatch>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spacing {
    pub radius:  RadiusScale,
    pub spacing: SpacingScale,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius:  Option<RadiusScalePatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<SpacingScalePatch>,
}

/// A complete theme. Every token resolves to a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub mode:       ThemeMode,
    pub colors:     ThemeColors,
    pub typography: Typography,
    pub spacing:    Spacing,
}

impl Theme {
    /// See [`crate::merge`].
    #[must_use]
    pub fn merged(&self, patch: &ThemePatch) -> Self { crate::merge(self, patch) }
}

/// A partial theme, as accepted from storage, the network or callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode:       Option<ThemeMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors:     Option<ThemeColorsPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typography: Option<TypographyPatch>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing:    Option<SpacingPatch>,
}

impl ThemePatch {
    #[must_use]
    pub fn colors(colors: ThemeColorsPatch) -> Self {
        Self {
            colors: Some(colors),
            ..Self::default()
        }
    }
}

impl From<ThemeMode> for ThemePatch {
    fn from(mode: ThemeMode) -> Self {
        Self {
            mode: Some(mode),
            ..Self::default()
        }
    }
}

impl From<Theme> for ThemePatch {
    fn from(theme: Theme) -> Self {
        Self {
            mode:       Some(theme.mode),
            colors:     Some(theme.colors.into()),
            typography: Some(TypographyPatch {
                font_family: Some(theme.typography.font_family.into()),
                font_size:   Some(theme.typography.font_size.into()),
                font_weight: Some(theme.typography.font_weight.into()),
                line_height: Some(theme.typography.line_height.into()),
            }),
            spacing:    Some(SpacingPatch {
                radius:  Some(theme.spacing.radius.into()),
                spacing: Some(theme.spacing.spacing.into()),
            }),
        }
    }
}

/// A requested change to the current theme.
///
/// `Replace` swaps the whole theme; `Merge` overlays a partial theme onto the
/// current one, so fields it leaves out survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ThemeUpdate {
    Replace(Theme),
    Merge(ThemePatch),
}

impl ThemeUpdate {
    /// The theme this update produces when applied on top of `current`.
    #[must_use]
    pub fn resolve(self, current: &Theme) -> Theme {
        match self {
            Self::Replace(theme) => theme,
            Self::Merge(patch) => crate::merge(current, &patch),
        }
    }
}

impl From<Theme> for ThemeUpdate {
    fn from(theme: Theme) -> Self { Self::Replace(theme) }
}

impl From<ThemePatch> for ThemeUpdate {
    fn from(patch: ThemePatch) -> Self { Self::Merge(patch) }
}

impl From<ThemeMode> for ThemeUpdate {
    fn from(mode: ThemeMode) -> Self { Self::Merge(mode.into()) }
}

impl From<ThemeColorsPatch> for ThemeUpdate {
    fn from(colors: ThemeColorsPatch) -> Self { Self::Merge(ThemePatch::colors(colors)) }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn font_size_steps_use_numeric_keys() {
        let patch: FontSizesPatch = serde_json::from_value(json!({ "2xl": "2rem" })).unwrap();
        assert_eq!(patch.xl2.as_deref(), Some("2rem"));
        assert_eq!(
            patch.entries().collect::<Vec<_>>(),
            vec![("2xl", &"2rem".to_string())]
        );
    }

    #[test]
    fn colors_use_camel_case_keys() {
        let patch: ThemeColorsPatch =
            serde_json::from_value(json!({ "primaryForeground": "0 0% 100%", "shadow": "x" }))
                .unwrap();
        assert_eq!(patch.primary_foreground.as_deref(), Some("0 0% 100%"));
        assert!(patch.primary.is_none());
    }

    #[test]
    fn empty_patch_is_empty() {
        assert!(ThemeColorsPatch::default().is_empty());
        let patch = RadiusScalePatch {
            md: Some("1rem".into()),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn mode_toggles_and_parses() {
        assert_eq!(ThemeMode::Light.toggle(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Dark.toggle().toggle(), ThemeMode::Dark);
        assert_eq!("dark".parse::<ThemeMode>().unwrap(), ThemeMode::Dark);
        assert_eq!(ThemeMode::Light.to_string(), "light");
    }

    #[test]
    fn update_resolves_against_current() {
        let current = crate::default_theme();
        let replaced = ThemeUpdate::from(crate::Preset::Blue.theme().clone()).resolve(&current);
        assert_eq!(&replaced, crate::Preset::Blue.theme());

        let merged = ThemeUpdate::from(ThemeMode::Dark).resolve(&current);
        assert_eq!(merged.mode, ThemeMode::Dark);
        assert_eq!(merged.colors, current.colors);
    }
}
