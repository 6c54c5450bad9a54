// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Feature resolution for bound devices.
//!
//! Cluster configurations declare their capabilities as feature bitmaps.
//! The resolvers here turn those raw bits into named boolean flags once,
//! at bind time; everything downstream branches only on the named flags
//! and never on raw bits. Attribute groups whose flag is off are omitted
//! from projection entirely rather than defaulted.

/// Color-control feature bits as declared by the cluster configuration.
mod color_bits {
    pub const HUE_SATURATION: u32 = 0x01;
    pub const COLOR_TEMPERATURE: u32 = 0x10;
}

/// Thermostat feature bits as declared by the cluster configuration.
mod thermostat_bits {
    pub const HEATING: u32 = 0x01;
    pub const COOLING: u32 = 0x02;
    pub const AUTO_MODE: u32 = 0x20;
}

/// Hub-side climate capability bit for dual-setpoint (range) support.
const TARGET_TEMPERATURE_RANGE: u64 = 0x02;

/// Resolved feature set of a color-control device.
///
/// Immutable for the lifetime of a bound device.
///
/// # Examples
///
/// ```
/// use matterlink_lib::features::ColorFeatures;
///
/// let features = ColorFeatures::resolve(0x11);
/// assert!(features.hue_saturation);
/// assert!(features.color_temperature);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorFeatures {
    /// The device supports hue/saturation color control.
    pub hue_saturation: bool,
    /// The device supports color temperature control.
    pub color_temperature: bool,
}

impl ColorFeatures {
    /// Resolves the named flags from a raw feature bitmap.
    #[must_use]
    pub const fn resolve(bitmap: u32) -> Self {
        Self {
            hue_saturation: bitmap & color_bits::HUE_SATURATION != 0,
            color_temperature: bitmap & color_bits::COLOR_TEMPERATURE != 0,
        }
    }

    /// Features of a full-color bulb with tunable white.
    #[must_use]
    pub const fn full_color() -> Self {
        Self {
            hue_saturation: true,
            color_temperature: true,
        }
    }

    /// Features of a tunable-white-only bulb.
    #[must_use]
    pub const fn temperature_only() -> Self {
        Self {
            hue_saturation: false,
            color_temperature: true,
        }
    }
}

/// Resolved feature set of a thermostat device.
///
/// Immutable for the lifetime of a bound device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThermostatFeatures {
    /// The device can heat.
    pub heating: bool,
    /// The device can cool.
    pub cooling: bool,
    /// The device supports automatic switchover between heating and cooling.
    pub auto_mode: bool,
}

impl ThermostatFeatures {
    /// Resolves the named flags from a raw feature bitmap.
    #[must_use]
    pub const fn resolve(bitmap: u32) -> Self {
        Self {
            heating: bitmap & thermostat_bits::HEATING != 0,
            cooling: bitmap & thermostat_bits::COOLING != 0,
            auto_mode: bitmap & thermostat_bits::AUTO_MODE != 0,
        }
    }

    /// Features of a heating-only device.
    #[must_use]
    pub const fn heating_only() -> Self {
        Self {
            heating: true,
            cooling: false,
            auto_mode: false,
        }
    }

    /// Features of a cooling-only device.
    #[must_use]
    pub const fn cooling_only() -> Self {
        Self {
            heating: false,
            cooling: true,
            auto_mode: false,
        }
    }

    /// Features of a dual-mode device with automatic switchover.
    #[must_use]
    pub const fn heat_cool() -> Self {
        Self {
            heating: true,
            cooling: true,
            auto_mode: true,
        }
    }
}

/// Returns whether the hub entity supports a target temperature range
/// (independent low and high setpoints).
///
/// Taken from the entity's `supported_features` capability bitmap.
#[must_use]
pub const fn supports_temperature_range(supported_features: u64) -> bool {
    supported_features & TARGET_TEMPERATURE_RANGE != 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_features_resolve() {
        let none = ColorFeatures::resolve(0);
        assert!(!none.hue_saturation);
        assert!(!none.color_temperature);

        let hs_only = ColorFeatures::resolve(0x01);
        assert!(hs_only.hue_saturation);
        assert!(!hs_only.color_temperature);

        let both = ColorFeatures::resolve(0x11);
        assert_eq!(both, ColorFeatures::full_color());
    }

    #[test]
    fn color_features_ignore_unrelated_bits() {
        // Enhanced-hue, color-loop and xy bits do not map to a flag
        let features = ColorFeatures::resolve(0x0e);
        assert!(!features.hue_saturation);
        assert!(!features.color_temperature);
    }

    #[test]
    fn thermostat_features_resolve() {
        assert_eq!(
            ThermostatFeatures::resolve(0x01),
            ThermostatFeatures::heating_only()
        );
        assert_eq!(
            ThermostatFeatures::resolve(0x02),
            ThermostatFeatures::cooling_only()
        );
        assert_eq!(
            ThermostatFeatures::resolve(0x23),
            ThermostatFeatures::heat_cool()
        );
    }

    #[test]
    fn temperature_range_bit() {
        assert!(supports_temperature_range(0x02));
        assert!(supports_temperature_range(0x3ff));
        assert!(!supports_temperature_range(0x01));
        assert!(!supports_temperature_range(0));
    }
}
