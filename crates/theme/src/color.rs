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

//! Color conversions into the HSL component format used by theme colors.

use snafu::ensure;

use crate::{
    err::{InvalidHexSnafu, Result},
    model::ThemeColorsPatch,
};

/// Converts 8-bit RGB to an `"H S% L%"` component string.
///
/// Hue is in whole degrees, saturation and lightness in whole percents.
#[must_use]
pub fn rgb_to_hsl(r: u8, g: u8, b: u8) -> String {
    let (h, s, l) = hsl_components(r, g, b);
    format!("{h} {s}% {l}%")
}

/// Converts `#rrggbb` (the `#` is optional) to an `"H S% L%"` string.
pub fn hex_to_hsl(hex: &str) -> Result<String> {
    let (r, g, b) = parse_hex(hex)?;
    Ok(rgb_to_hsl(r, g, b))
}

/// Parses `#rrggbb` / `rrggbb` into its channels.
pub fn parse_hex(hex: &str) -> Result<(u8, u8, u8)> {
    let digits = hex.trim().trim_start_matches('#');
    ensure!(
        digits.len() == 6 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        InvalidHexSnafu { value: hex }
    );

    let channel = |at: usize| u8::from_str_radix(&digits[at..at + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Ok((r, g, b)),
        _ => InvalidHexSnafu { value: hex }.fail(),
    }
}

#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn hsl_components(r: u8, g: u8, b: u8) -> (u16, u8, u8) {
    let r = f64::from(r) / 255.0;
    let g = f64::from(g) / 255.0;
    let b = f64::from(b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h / 6.0, s)
    };

    (
        (h * 360.0).round() as u16,
        (s * 100.0).round() as u8,
        (l * 100.0).round() as u8,
    )
}

/// Derives the brand colors of a palette from a single base color.
///
/// Primary, secondary and accent all take `base_color`; every other role is
/// left to the theme being patched.
#[must_use]
pub fn theme_variations(base_color: &str) -> ThemeColorsPatch {
    ThemeColorsPatch {
        primary: Some(base_color.to_owned()),
        secondary: Some(base_color.to_owned()),
        accent: Some(base_color.to_owned()),
        ..ThemeColorsPatch::default()
    }
}
