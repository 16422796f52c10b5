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

use std::collections::BTreeMap;

use crate::model::Theme;

/// CSS custom properties keyed by their full name (`--primary`, ...).
pub type StyleVariables = BTreeMap<String, String>;

/// Projects a theme onto the style variables the presentation layer reads.
///
/// Emits `--<role>` for every color role (kebab-cased, value cleaned with
/// [`clean_hsl`]), `--font-sans`/`--font-serif`/`--font-mono`, a base
/// `--radius` equal to the `md` step and one `--radius-<step>` per radius
/// step. Spacing steps are not projected.
#[must_use]
pub fn project(theme: &Theme) -> StyleVariables {
    let mut vars = StyleVariables::new();

    for (role, value) in theme.colors.entries() {
        vars.insert(format!("--{}", role.replace('_', "-")), clean_hsl(value));
    }

    for (family, stack) in theme.typography.font_family.entries() {
        vars.insert(format!("--font-{family}"), stack.clone());
    }

    vars.insert("--radius".to_owned(), theme.spacing.radius.md.clone());
    for (step, value) in theme.spacing.radius.entries() {
        vars.insert(format!("--radius-{step}"), value.clone());
    }

    vars
}

/// Strips an enclosing `hsl(...)` and any commas, so `hsl(222, 47%, 11%)`
/// becomes `222 47% 11%`. Already-bare components pass through.
#[must_use]
pub fn clean_hsl(value: &str) -> String {
    let unwrapped = value.find("hsl(").and_then(|start| {
        value[start..].rfind(')').map(|close| {
            let end = start + close;
            format!("{}{}{}", &value[..start], &value[start + 4..end], &value[end + 1..])
        })
    });

    unwrapped.as_deref().unwrap_or(value).replace(',', "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Preset, ThemeColorsPatch, ThemePatch, default_theme, merge};

    #[test]
    fn emits_the_variable_contract() {
        let theme = default_theme();
        let vars = project(&theme);

        assert_eq!(vars["--primary"], theme.colors.primary);
        assert_eq!(vars["--primary-foreground"], theme.colors.primary_foreground);
        assert_eq!(vars["--destructive-foreground"], theme.colors.destructive_foreground);
        assert_eq!(vars["--font-sans"], theme.typography.font_family.sans);
        assert_eq!(vars["--font-mono"], theme.typography.font_family.mono);
        assert_eq!(vars["--radius"], theme.spacing.radius.md);
        assert_eq!(vars["--radius-full"], "9999px");
        assert_eq!(vars["--radius-none"], "0");

        // 23 colors, 3 font families, base radius and 7 radius steps.
        assert_eq!(vars.len(), 23 + 3 + 1 + 7);
        assert!(!vars.keys().any(|k| k.starts_with("--spacing")));
    }

    #[test]
    fn radius_tracks_md_step() {
        let vars = project(Preset::MidnightNeon.theme());
        assert_eq!(vars["--radius"], "0px");
        assert_eq!(vars["--radius-md"], "0px");
    }

    #[test]
    fn wrapped_colors_are_cleaned() {
        assert_eq!(clean_hsl("hsl(222, 47%, 11%)"), "222 47% 11%");
        assert_eq!(clean_hsl("hsl(0 0% 100%)"), "0 0% 100%");
        assert_eq!(clean_hsl("210 40% 98%"), "210 40% 98%");
        assert_eq!(clean_hsl("180 100% 50% / 0.2"), "180 100% 50% / 0.2");
        assert_eq!(clean_hsl("hsl(1 2% 3%"), "hsl(1 2% 3%");

        let theme = merge(
            &default_theme(),
            &ThemePatch::colors(ThemeColorsPatch {
                ring: Some("hsl(10, 20%, 30%)".into()),
                ..Default::default()
            }),
        );
        assert_eq!(project(&theme)["--ring"], "10 20% 30%");
    }

    #[test]
    fn projection_is_deterministic() {
        let theme = Preset::Blue.theme();
        assert_eq!(project(theme), project(theme));
    }
}
