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

//! Built-in theme presets.
//!
//! Presets are built once, on first use, and never mutated afterwards.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::EnumProperty;

use crate::model::{
    FontFamily, FontSizes, FontWeights, LineHeights, RadiusScale, Spacing, SpacingScale, Theme,
    ThemeColors, ThemeMode, ThemeUpdate, Typography,
};

/// Named built-in themes.
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
    strum_macros::EnumIter,
    strum_macros::EnumProperty,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Preset {
    #[default]
    #[strum(props(label = "Default Theme"))]
    Default,
    #[strum(props(label = "Dark Theme"))]
    Dark,
    #[strum(props(label = "Blue Theme"))]
    Blue,
    /// Sharp edges, mono fonts and glowing cyan on near-black.
    #[strum(props(label = "Midnight Neon"))]
    MidnightNeon,
    /// Deep greens, serif headers and extra soft corners.
    #[strum(props(label = "Forest Minimal"))]
    ForestMinimal,
    /// Navy on frozen white with geometric sans fonts.
    #[strum(props(label = "Nordic Ice"))]
    NordicIce,
}

impl Preset {
    /// The choices a theme switcher offers.
    pub const SWITCHER: [Self; 3] = [Self::Default, Self::Dark, Self::Blue];

    #[must_use]
    pub fn label(self) -> &'static str { self.get_str("label").unwrap_or_default() }

    #[must_use]
    pub fn theme(self) -> &'static Theme {
        match self {
            Self::Default => &DEFAULT,
            Self::Dark => &DARK,
            Self::Blue => &BLUE,
            Self::MidnightNeon => &MIDNIGHT_NEON,
            Self::ForestMinimal => &FOREST_MINIMAL,
            Self::NordicIce => &NORDIC_ICE,
        }
    }
}

impl From<Preset> for ThemeUpdate {
    fn from(preset: Preset) -> Self { Self::Replace(preset.theme().clone()) }
}

/// The built-in default (light) theme.
#[must_use]
pub fn default_theme() -> Theme { DEFAULT.clone() }

fn s(value: &str) -> String { value.to_owned() }

static DEFAULT: Lazy<Theme> = Lazy::new(|| Theme {
    mode:       ThemeMode::Light,
    colors:     ThemeColors {
        primary:                s("234 58.8% 44.7%"),
        primary_foreground:     s("210 40% 98%"),
        background:             s("0 0% 100%"),
        foreground:             s("222.2 84% 4.9%"),
        card:                   s("0 0% 100%"),
        card_foreground:        s("222.2 84% 4.9%"),
        popover:                s("0 0% 100%"),
        popover_foreground:     s("222.2 84% 4.9%"),
        success:                s("142.1 76.2% 36.3%"),
        success_foreground:     s("355.7 100% 97.3%"),
        warning:                s("38 92.2% 50%"),
        warning_foreground:     s("48 96% 8.9%"),
        destructive:            s("0 84.2% 60.2%"),
        destructive_foreground: s("210 40% 98%"),
        secondary:              s("210 40% 96.1%"),
        secondary_foreground:   s("222.2 47.4% 11.2%"),
        accent:                 s("210 40% 96.1%"),
        accent_foreground:      s("222.2 47.4% 11.2%"),
        muted:                  s("210 40% 96.1%"),
        muted_foreground:       s("215.4 16.3% 46.9%"),
        border:                 s("214.3 31.8% 91.4%"),
        input:                  s("214.3 31.8% 91.4%"),
        ring:                   s("222.2 84% 4.9%"),
    },
    typography: Typography {
        font_family: FontFamily {
            sans:  s("Inter, system-ui, -apple-system, sans-serif"),
            serif: s("Georgia, Cambria, \"Times New Roman\", serif"),
            mono:  s("\"Fira Code\", \"Courier New\", monospace"),
        },
        font_size:   FontSizes {
            xs:   s("0.75rem"),
            sm:   s("0.875rem"),
            base: s("1rem"),
            lg:   s("1.125rem"),
            xl:   s("1.25rem"),
            xl2:  s("1.5rem"),
            xl3:  s("1.875rem"),
            xl4:  s("2.25rem"),
        },
        font_weight: weights(700),
        line_height: line_heights("1.25", "1.5", "1.75"),
    },
    spacing:    Spacing {
        radius:  radii(["0", "0.125rem", "0.25rem", "0.5rem", "0.75rem", "1rem"]),
        spacing: SpacingScale {
            xs:  s("0.5rem"),
            sm:  s("1rem"),
            md:  s("1.5rem"),
            lg:  s("2rem"),
            xl:  s("3rem"),
            xl2: s("4rem"),
        },
    },
});

static DARK: Lazy<Theme> = Lazy::new(|| Theme {
    mode: ThemeMode::Dark,
    colors: ThemeColors {
        primary:                s("210 40% 98%"),
        primary_foreground:     s("222.2 47.4% 11.2%"),
        background:             s("222.2 84% 4.9%"),
        foreground:             s("210 40% 98%"),
        card:                   s("222.2 84% 4.9%"),
        card_foreground:        s("210 40% 98%"),
        popover:                s("222.2 84% 4.9%"),
        popover_foreground:     s("210 40% 98%"),
        success:                s("142.1 76.2% 36.3%"),
        success_foreground:     s("355.7 100% 97.3%"),
        warning:                s("38 92.2% 50%"),
        warning_foreground:     s("48 96% 8.9%"),
        destructive:            s("0 62.8% 30.6%"),
        destructive_foreground: s("210 40% 98%"),
        secondary:              s("217.2 32.6% 17.5%"),
        secondary_foreground:   s("210 40% 98%"),
        accent:                 s("217.2 32.6% 17.5%"),
        accent_foreground:      s("210 40% 98%"),
        muted:                  s("217.2 32.6% 17.5%"),
        muted_foreground:       s("215 20.2% 65.1%"),
        border:                 s("217.2 32.6% 17.5%"),
        input:                  s("217.2 32.6% 17.5%"),
        ring:                   s("212.7 26.8% 83.9%"),
    },
    ..DEFAULT.clone()
});

static BLUE: Lazy<Theme> = Lazy::new(|| Theme {
    mode:       ThemeMode::Light,
    colors:     ThemeColors {
        primary:           s("221 83% 53%"),
        accent:            s("210 100% 95%"),
        accent_foreground: s("221 83% 53%"),
        ring:              s("221 83% 53%"),
        ..DEFAULT.colors.clone()
    },
    typography: Typography {
        font_family: FontFamily {
            sans:  s("Roboto, system-ui, sans-serif"),
            serif: s("Georgia, serif"),
            mono:  s("Fira Code, monospace"),
        },
        ..DEFAULT.typography.clone()
    },
    spacing:    Spacing {
        radius:  radii(["0", "0.25rem", "0.375rem", "0.5rem", "0.75rem", "1rem"]),
        spacing: DEFAULT.spacing.spacing.clone(),
    },
});

static MIDNIGHT_NEON: Lazy<Theme> = Lazy::new(|| Theme {
    mode:       ThemeMode::Dark,
    colors:     ThemeColors {
        primary:                s("180 100% 50%"),
        primary_foreground:     s("230 25% 5%"),
        background:             s("230 25% 5%"),
        foreground:             s("180 100% 90%"),
        card:                   s("230 25% 8%"),
        card_foreground:        s("180 100% 95%"),
        popover:                s("230 25% 8%"),
        popover_foreground:     s("180 100% 95%"),
        success:                s("145 100% 50%"),
        success_foreground:     s("145 100% 5%"),
        warning:                s("45 100% 50%"),
        warning_foreground:     s("45 100% 5%"),
        destructive:            s("0 100% 60%"),
        destructive_foreground: s("0 0% 100%"),
        muted:                  s("230 25% 15%"),
        muted_foreground:       s("180 20% 60%"),
        secondary:              s("230 25% 12%"),
        secondary_foreground:   s("180 100% 50%"),
        accent:                 s("220 30% 15%"),
        accent_foreground:      s("230 25% 100%"),
        border:                 s("180 100% 50% / 0.2"),
        input:                  s("230 25% 20%"),
        ring:                   s("180 100% 50%"),
    },
    typography: Typography {
        font_family: FontFamily {
            sans:  s("\"JetBrains Mono\", \"Fira Code\", monospace"),
            serif: s("ui-serif, Georgia, serif"),
            mono:  s("\"JetBrains Mono\", monospace"),
        },
        font_size:   DEFAULT.typography.font_size.clone(),
        font_weight: weights(700),
        line_height: line_heights("1.2", "1.6", "1.8"),
    },
    spacing:    Spacing {
        radius:  radii(["0px"; 6]),
        spacing: DEFAULT.spacing.spacing.clone(),
    },
});

static FOREST_MINIMAL: Lazy<Theme> = Lazy::new(|| Theme {
    mode:       ThemeMode::Light,
    colors:     ThemeColors {
        primary:                s("158 25% 18%"),
        primary_foreground:     s("45 25% 96%"),
        background:             s("45 20% 98%"),
        foreground:             s("158 20% 12%"),
        card:                   s("45 20% 96%"),
        card_foreground:        s("158 20% 12%"),
        popover:                s("45 20% 96%"),
        popover_foreground:     s("158 20% 12%"),
        success:                s("140 40% 40%"),
        success_foreground:     s("45 25% 96%"),
        warning:                s("35 60% 50%"),
        warning_foreground:     s("45 25% 96%"),
        destructive:            s("0 50% 45%"),
        destructive_foreground: s("0 0% 100%"),
        muted:                  s("158 10% 90%"),
        muted_foreground:       s("158 10% 40%"),
        secondary:              s("158 15% 92%"),
        secondary_foreground:   s("158 25% 18%"),
        accent:                 s("38 45% 85%"),
        accent_foreground:      s("158 25% 18%"),
        border:                 s("158 15% 85%"),
        input:                  s("158 15% 88%"),
        ring:                   s("158 25% 18%"),
    },
    typography: Typography {
        font_family: FontFamily {
            sans:  s("\"Public Sans\", system-ui, sans-serif"),
            serif: s("\"Playfair Display\", serif"),
            mono:  s("\"IBMPlexMono\", monospace"),
        },
        font_size:   DEFAULT.typography.font_size.clone(),
        font_weight: weights(700),
        line_height: line_heights("1.25", "1.7", "2.0"),
    },
    spacing:    Spacing {
        radius:  radii(["0px", "0.25rem", "0.5rem", "1rem", "1.5rem", "2rem"]),
        spacing: DEFAULT.spacing.spacing.clone(),
    },
});

static NORDIC_ICE: Lazy<Theme> = Lazy::new(|| Theme {
    mode:       ThemeMode::Light,
    colors:     ThemeColors {
        primary:                s("215 100% 20%"),
        primary_foreground:     s("210 40% 98%"),
        background:             s("210 40% 98%"),
        foreground:             s("215 50% 10%"),
        card:                   s("210 40% 96%"),
        card_foreground:        s("215 50% 10%"),
        popover:                s("210 40% 96%"),
        popover_foreground:     s("215 50% 10%"),
        success:                s("160 80% 30%"),
        success_foreground:     s("210 40% 98%"),
        warning:                s("40 90% 45%"),
        warning_foreground:     s("210 40% 98%"),
        destructive:            s("0 70% 50%"),
        destructive_foreground: s("0 0% 100%"),
        muted:                  s("214 20% 90%"),
        muted_foreground:       s("215 15% 45%"),
        secondary:              s("214 30% 92%"),
        secondary_foreground:   s("215 100% 20%"),
        accent:                 s("215 100% 92%"),
        accent_foreground:      s("215 100% 20%"),
        border:                 s("214 30% 88%"),
        input:                  s("214 30% 88%"),
        ring:                   s("215 100% 20%"),
    },
    typography: Typography {
        font_family: FontFamily {
            sans:  s("\"Plus Jakarta Sans\", sans-serif"),
            serif: s("serif"),
            mono:  s("\"Fira Code\", monospace"),
        },
        font_size:   DEFAULT.typography.font_size.clone(),
        font_weight: weights(800),
        line_height: line_heights("1.1", "1.5", "1.75"),
    },
    spacing:    Spacing {
        radius:  radii(["0px", "0.1rem", "0.2rem", "0.4rem", "0.6rem", "0.8rem"]),
        spacing: DEFAULT.spacing.spacing.clone(),
    },
});

const fn weights(bold: u16) -> FontWeights {
    FontWeights {
        normal:   400,
        medium:   500,
        semibold: 600,
        bold,
    }
}

fn line_heights(tight: &str, normal: &str, relaxed: &str) -> LineHeights {
    LineHeights {
        tight:   s(tight),
        normal:  s(normal),
        relaxed: s(relaxed),
    }
}

/// `none` through `xl`; `full` is always a pill.
fn radii([none, xs, sm, md, lg, xl]: [&str; 6]) -> RadiusScale {
    RadiusScale {
        none: s(none),
        xs:   s(xs),
        sm:   s(sm),
        md:   s(md),
        lg:   s(lg),
        xl:   s(xl),
        full: s("9999px"),
    }
}
