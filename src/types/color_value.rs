// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Normalized internal color value.

use std::fmt;

use crate::error::ValueError;

/// The single internal color representation used by the bridge.
///
/// Every hub-side color format (hue/saturation, RGB, RGBW, RGBWW, XY
/// chromaticity) is normalized into a `ColorValue` before any output
/// conversion, so there is exactly one conversion path per direction
/// instead of a direct mapping between every pair of formats.
///
/// The value (brightness) component is pinned to 100 for all conversions;
/// brightness is handled by the level-control path, not the color path.
///
/// # Examples
///
/// ```
/// use matterlink_lib::types::ColorValue;
///
/// let green = ColorValue::new(120.0, 50.0);
/// assert_eq!(green.hue(), 120.0);
/// assert_eq!(green.saturation(), 50.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorValue {
    hue: f64,
    saturation: f64,
}

impl ColorValue {
    /// Maximum hue value (exclusive, wraps at 360).
    pub const MAX_HUE: f64 = 360.0;

    /// Maximum saturation value.
    pub const MAX_SATURATION: f64 = 100.0;

    /// Creates a normalized color value.
    ///
    /// The hue is wrapped into [0, 360) and the saturation clamped into
    /// [0, 100], so this constructor accepts any finite input. Non-finite
    /// components are treated as 0.
    #[must_use]
    pub fn new(hue: f64, saturation: f64) -> Self {
        let hue = if hue.is_finite() {
            hue.rem_euclid(Self::MAX_HUE)
        } else {
            0.0
        };
        let saturation = if saturation.is_finite() {
            saturation.clamp(0.0, Self::MAX_SATURATION)
        } else {
            0.0
        };
        Self { hue, saturation }
    }

    /// Creates a color value, rejecting out-of-range components.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::InvalidHue` if hue is not in [0, 360) and
    /// `ValueError::InvalidSaturation` if saturation is not in [0, 100].
    pub fn try_new(hue: f64, saturation: f64) -> Result<Self, ValueError> {
        if !hue.is_finite() || !(0.0..Self::MAX_HUE).contains(&hue) {
            return Err(ValueError::InvalidHue(hue));
        }
        if !saturation.is_finite() || !(0.0..=Self::MAX_SATURATION).contains(&saturation) {
            return Err(ValueError::InvalidSaturation(saturation));
        }
        Ok(Self { hue, saturation })
    }

    /// Returns the hue in degrees, [0, 360).
    #[must_use]
    pub const fn hue(&self) -> f64 {
        self.hue
    }

    /// Returns the saturation in percent, [0, 100].
    #[must_use]
    pub const fn saturation(&self) -> f64 {
        self.saturation
    }

    /// Returns the fixed value (brightness) component, always 100.
    #[must_use]
    pub const fn value(&self) -> f64 {
        100.0
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HSV({:.1}, {:.1}%, 100%)", self.hue, self.saturation)
    }
}
