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

//! The rendering surface a theme is projected onto.

use std::fmt::Write as _;

use parking_lot::RwLock;
use strum::IntoEnumIterator;
use swatch_theme::{StyleVariables, Theme, ThemeMode, project};

/// A document root that accepts custom properties and mode classes.
pub trait StyleSurface: Send + Sync {
    fn set_property(&self, name: &str, value: &str);

    fn remove_class(&self, class: &str);

    fn add_class(&self, class: &str);
}

/// Writes every projected variable of `theme` onto `surface` and leaves
/// exactly one mode class (`light` or `dark`) set.
///
/// Applying the same theme twice leaves the surface unchanged.
pub fn apply_theme(surface: &dyn StyleSurface, theme: &Theme) {
    for (name, value) in project(theme) {
        surface.set_property(&name, &value);
    }
    for mode in ThemeMode::iter() {
        surface.remove_class(mode.as_ref());
    }
    surface.add_class(theme.mode.as_ref());
}

#[derive(Debug, Default)]
struct RootState {
    properties: StyleVariables,
    classes:    Vec<String>,
}

/// In-memory stand-in for a document root.
#[derive(Debug, Default)]
pub struct StyleRoot {
    state: RwLock<RootState>,
}

impl StyleRoot {
    pub fn new() -> Self { Self::default() }

    pub fn property(&self, name: &str) -> Option<String> {
        self.state.read().properties.get(name).cloned()
    }

    pub fn properties(&self) -> StyleVariables { self.state.read().properties.clone() }

    /// Classes in the order they were added.
    pub fn classes(&self) -> Vec<String> { self.state.read().classes.clone() }

    pub fn has_class(&self, class: &str) -> bool {
        self.state.read().classes.iter().any(|c| c == class)
    }

    /// Renders the properties as a `:root { ... }` stylesheet block.
    pub fn to_css(&self) -> String {
        let state = self.state.read();
        let mut css = String::from(":root {\n");
        for (name, value) in &state.properties {
            let _ = writeln!(css, "  {name}: {value};");
        }
        css.push_str("}\n");
        css
    }
}

impl StyleSurface for StyleRoot {
    fn set_property(&self, name: &str, value: &str) {
        self.state
            .write()
            .properties
            .insert(name.to_owned(), value.to_owned());
    }

    fn remove_class(&self, class: &str) { self.state.write().classes.retain(|c| c != class); }

    fn add_class(&self, class: &str) {
        let mut state = self.state.write();
        if !state.classes.iter().any(|c| c == class) {
            state.classes.push(class.to_owned());
        }
    }
}

#[cfg(test)]
mod tests {
    use swatch_theme::{Preset, ThemeColorsPatch, ThemePatch};

    use super::*;

    #[test]
    fn apply_sets_variables_and_mode_class() {
        let root = StyleRoot::new();
        root.add_class("app");
        apply_theme(&root, Preset::Default.theme());

        assert_eq!(root.property("--primary").as_deref(), Some("234 58.8% 44.7%"));
        assert_eq!(
            root.property("--primary-foreground").as_deref(),
            Some("210 40% 98%")
        );
        assert_eq!(root.property("--radius").as_deref(), Some("0.5rem"));
        assert_eq!(root.property("--radius-full").as_deref(), Some("9999px"));
        assert_eq!(root.classes(), vec!["app".to_string(), "light".to_string()]);
    }

    #[test]
    fn apply_swaps_mode_class() {
        let root = StyleRoot::new();
        apply_theme(&root, Preset::Default.theme());
        apply_theme(&root, Preset::Dark.theme());
        assert!(root.has_class("dark"));
        assert!(!root.has_class("light"));
        assert_eq!(root.classes().len(), 1);
    }

    #[test]
    fn apply_is_idempotent() {
        let theme = Preset::NordicIce.theme();
        let root = StyleRoot::new();
        apply_theme(&root, theme);
        let css = root.to_css();
        let classes = root.classes();
        apply_theme(&root, theme);
        assert_eq!(root.to_css(), css);
        assert_eq!(root.classes(), classes);
    }

    #[test]
    fn wrapped_hsl_is_cleaned_on_apply() {
        let theme = Preset::Default.theme().merged(&ThemePatch::colors(ThemeColorsPatch {
            primary: Some("hsl(222, 47%, 11%)".into()),
            ..Default::default()
        }));
        let root = StyleRoot::new();
        apply_theme(&root, &theme);
        assert_eq!(root.property("--primary").as_deref(), Some("222 47% 11%"));
    }

    #[test]
    fn css_block_lists_every_property() {
        let root = StyleRoot::new();
        apply_theme(&root, Preset::Blue.theme());
        let css = root.to_css();
        assert!(css.starts_with(":root {\n"));
        assert!(css.contains("  --primary: 221 83% 53%;\n"));
        assert!(css.contains("  --font-sans: Roboto, system-ui, sans-serif;\n"));
        assert_eq!(css.lines().count(), root.properties().len() + 2);
    }
}
