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

use crate::model::{Spacing, Theme, ThemePatch, Typography};

/// Merges a partial theme onto `base`.
///
/// `mode` is taken wholesale when present. Each leaf record (`colors`, the
/// four typography scales and the two spacing scales) is overlaid key by
/// key. The result is always total: every key of `base` is still present.
#[must_use]
pub fn merge(base: &Theme, overrides: &ThemePatch) -> Theme {
    let typography = overrides.typography.as_ref();
    let spacing = overrides.spacing.as_ref();

    Theme {
        mode:       overrides.mode.unwrap_or(base.mode),
        colors:     overrides
            .colors
            .as_ref()
            .map_or_else(|| base.colors.clone(), |colors| base.colors.merged(colors)),
        typography: Typography {
            font_family: overlay(
                &base.typography.font_family,
                typography.and_then(|t| t.font_family.as_ref()),
                |base, patch| base.merged(patch),
            ),
            font_size:   overlay(
                &base.typography.font_size,
                typography.and_then(|t| t.font_size.as_ref()),
                |base, patch| base.merged(patch),
            ),
            font_weight: overlay(
                &base.typography.font_weight,
                typography.and_then(|t| t.font_weight.as_ref()),
                |base, patch| base.merged(patch),
            ),
            line_height: overlay(
                &base.typography.line_height,
                typography.and_then(|t| t.line_height.as_ref()),
                |base, patch| base.merged(patch),
            ),
        },
        spacing:    Spacing {
            radius:  overlay(
                &base.spacing.radius,
                spacing.and_then(|s| s.radius.as_ref()),
                |base, patch| base.merged(patch),
            ),
            spacing: overlay(
                &base.spacing.spacing,
                spacing.and_then(|s| s.spacing.as_ref()),
                |base, patch| base.merged(patch),
            ),
        },
    }
}

fn overlay<T: Clone, P>(base: &T, patch: Option<&P>, apply: impl Fn(&T, &P) -> T) -> T {
    patch.map_or_else(|| base.clone(), |patch| apply(base, patch))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        FontWeightsPatch, Preset, RadiusScalePatch, SpacingPatch, ThemeColorsPatch, ThemeMode,
        TypographyPatch, default_theme,
    };

    #[test]
    fn primary_override_leaves_everything_else() {
        let base = default_theme();
        let merged = merge(
            &base,
            &ThemePatch::colors(ThemeColorsPatch {
                primary: Some("X".into()),
                ..Default::default()
            }),
        );

        assert_eq!(merged.colors.primary, "X");
        assert_eq!(merged.colors.primary_foreground, base.colors.primary_foreground);
        assert_eq!(merged.colors.warning, base.colors.warning);
        assert_eq!(merged.mode, base.mode);
        assert_eq!(merged.typography, base.typography);
        assert_eq!(merged.spacing, base.spacing);
    }

    #[test]
    fn empty_patch_is_identity() {
        for preset in [Preset::Default, Preset::Dark, Preset::NordicIce] {
            let base = preset.theme();
            assert_eq!(&merge(base, &ThemePatch::default()), base);
        }
    }

    #[test]
    fn nested_scales_merge_key_by_key() {
        let base = default_theme();
        let patch = ThemePatch {
            mode: Some(ThemeMode::Dark),
            typography: Some(TypographyPatch {
                font_weight: Some(FontWeightsPatch {
                    bold: Some(800),
                    ..Default::default()
                }),
                ..Default::default()
            }),
            spacing: Some(SpacingPatch {
                radius:  Some(RadiusScalePatch {
                    md: Some("1rem".into()),
                    ..Default::default()
                }),
                spacing: None,
            }),
            ..Default::default()
        };

        let merged = merge(&base, &patch);
        assert_eq!(merged.mode, ThemeMode::Dark);
        assert_eq!(merged.typography.font_weight.bold, 800);
        assert_eq!(merged.typography.font_weight.normal, 400);
        assert_eq!(merged.typography.font_family, base.typography.font_family);
        assert_eq!(merged.spacing.radius.md, "1rem");
        assert_eq!(merged.spacing.radius.full, "9999px");
        assert_eq!(merged.spacing.spacing, base.spacing.spacing);
        assert_eq!(merged.colors, base.colors);
    }

    #[test]
    fn complete_patch_replaces_everything() {
        let blue = Preset::Blue.theme().clone();
        let merged = merge(Preset::MidnightNeon.theme(), &ThemePatch::from(blue.clone()));
        assert_eq!(merged, blue);
    }
}
