// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color conversion between hub formats and the cluster's ranges.
//!
//! Every hub-side representation is funneled through [`ColorValue`]
//! before anything is extracted, so each direction has exactly one
//! conversion path:
//!
//! ```text
//! hs / rgb / rgbw / rgbww / xy  ->  ColorValue  ->  entity HS (0-360 / 0-100)
//!                                              ->  cluster HS (0-254 / 0-254)
//! ```
//!
//! Value ranges per side:
//! - Cluster: hue 0-254, saturation 0-254, color temperature in mireds
//! - Hub: hue 0-360, saturation 0-100, rgb 0-255, color temperature in Kelvin

use crate::types::ColorValue;

/// Rounding applied after a kelvin-to-mireds conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rounding {
    /// No rounding; return the fractional mireds value.
    #[default]
    None,
    /// Round down.
    Floor,
    /// Round up.
    Ceil,
}

/// Default mireds bounds applied by [`kelvin_to_mireds`].
///
/// 65279 is the largest value the cluster's color temperature attribute
/// accepts.
pub const DEFAULT_MIREDS_BOUNDS: (f64, f64) = (0.0, 65279.0);

/// Creates a color value from the hub's `hs_color` attribute.
///
/// Hue is in degrees (0-360), saturation in percent (0-100).
#[must_use]
pub fn from_hs(hue: f64, saturation: f64) -> ColorValue {
    ColorValue::new(hue, saturation)
}

/// Creates a color value from the cluster's hue and saturation, both 0-254.
#[must_use]
pub fn from_cluster_hs(hue: u8, saturation: u8) -> ColorValue {
    ColorValue::new(
        (f64::from(hue) / 254.0 * 360.0).round(),
        (f64::from(saturation) / 254.0 * 100.0).round(),
    )
}

/// Creates a color value from the hub's `rgb_color` attribute (0-255 each).
#[must_use]
pub fn from_rgb(r: f64, g: f64, b: f64) -> ColorValue {
    let r = r.clamp(0.0, 255.0) / 255.0;
    let g = g.clamp(0.0, 255.0) / 255.0;
    let b = b.clamp(0.0, 255.0) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let hue = if delta <= f64::EPSILON {
        0.0
    } else if (max - r).abs() <= f64::EPSILON {
        60.0 * ((g - b) / delta).rem_euclid(6.0)
    } else if (max - g).abs() <= f64::EPSILON {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    let saturation = if max <= f64::EPSILON {
        0.0
    } else {
        delta / max * 100.0
    };

    ColorValue::new(hue, saturation)
}

/// Creates a color value from the hub's `rgbw_color` attribute.
///
/// The white channel is added into each color channel, clamped to 255.
#[must_use]
pub fn from_rgbw(r: f64, g: f64, b: f64, w: f64) -> ColorValue {
    from_rgb(
        (r + w).min(255.0),
        (g + w).min(255.0),
        (b + w).min(255.0),
    )
}

/// Creates a color value from the hub's `rgbww_color` attribute.
///
/// Cold and warm white are averaged into a single white channel.
#[must_use]
pub fn from_rgbww(r: f64, g: f64, b: f64, cold_white: f64, warm_white: f64) -> ColorValue {
    from_rgbw(r, g, b, (cold_white + warm_white) / 2.0)
}

/// Creates a color value from the hub's `xy_color` chromaticity attribute.
///
/// Converts CIE xy to XYZ (Y = 1), applies the XYZ to linear-sRGB D65
/// matrix and the inverse gamma curve. Negative channels are clamped to
/// zero BEFORE the proportional rescale of out-of-gamut values; reversing
/// that order would shift the hue of out-of-gamut points.
#[must_use]
pub fn from_xy(x: f64, y: f64) -> ColorValue {
    if !y.is_finite() || y <= 0.0 || !x.is_finite() {
        return ColorValue::new(0.0, 0.0);
    }

    let big_y = 1.0;
    let big_x = (big_y / y) * x;
    let big_z = (big_y / y) * (1.0 - x - y);

    let mut rgb = [
        big_x * 1.656_492 - big_y * 0.354_851 - big_z * 0.255_038,
        -big_x * 0.707_196 + big_y * 1.655_397 + big_z * 0.036_152,
        big_x * 0.051_713 - big_y * 0.121_364 + big_z * 1.011_53,
    ]
    .map(reverse_gamma)
    .map(|v| v.max(0.0));

    let max = rgb[0].max(rgb[1]).max(rgb[2]);
    if max > 1.0 {
        rgb = rgb.map(|v| v / max);
    }

    let [r, g, b] = rgb.map(|v| (v * 255.0).round());
    from_rgb(r, g, b)
}

fn reverse_gamma(v: f64) -> f64 {
    if v <= 0.003_130_8 {
        12.92 * v
    } else {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    }
}

/// Extracts hue (0-360) and saturation (0-100) for the hub.
#[must_use]
pub fn to_entity_hs(color: ColorValue) -> (f64, f64) {
    (color.hue(), color.saturation())
}

/// Extracts hue and saturation quantized into the cluster's 0-254 range.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_cluster_hs(color: ColorValue) -> (u8, u8) {
    let hue = (color.hue() / 360.0 * 254.0).round();
    let saturation = (color.saturation() / 100.0 * 254.0).round();
    (hue as u8, saturation as u8)
}

/// Converts a color temperature from mireds to Kelvin.
#[must_use]
pub fn mireds_to_kelvin(mireds: f64) -> f64 {
    1_000_000.0 / mireds
}

/// Converts a color temperature from Kelvin to mireds with the default
/// bounds of [`DEFAULT_MIREDS_BOUNDS`].
#[must_use]
pub fn kelvin_to_mireds(kelvin: f64, rounding: Rounding) -> f64 {
    kelvin_to_mireds_bounded(kelvin, rounding, DEFAULT_MIREDS_BOUNDS)
}

/// Converts a color temperature from Kelvin to mireds.
///
/// The result is clamped into `bounds` before the rounding is applied.
#[must_use]
pub fn kelvin_to_mireds_bounded(kelvin: f64, rounding: Rounding, bounds: (f64, f64)) -> f64 {
    let (min, max) = bounds;
    let mireds = (1_000_000.0 / kelvin).clamp(min, max);
    match rounding {
        Rounding::None => mireds,
        Rounding::Floor => mireds.floor(),
        Rounding::Ceil => mireds.ceil(),
    }
}
