// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color-control cluster attribute state.

/// The color mode the cluster currently reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum ColorMode {
    /// Color is driven by `currentHue`/`currentSaturation`.
    #[default]
    HueAndSaturation = 0,
    /// Color is driven by xy chromaticity.
    XAndY = 1,
    /// Color is driven by `colorTemperatureMireds`.
    ColorTemperatureMireds = 2,
}

/// Attribute state of a color-control device.
///
/// Owned exclusively by the color attribute projector; see
/// [`crate::cluster`] for the ownership rules.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorControlState {
    /// Which color representation is currently authoritative.
    pub color_mode: ColorMode,
    /// Current hue, 0-254.
    pub current_hue: u8,
    /// Current saturation, 0-254.
    pub current_saturation: u8,
    /// Current color temperature in mireds; unset until the entity
    /// reports a Kelvin value.
    pub color_temperature_mireds: Option<u16>,
    /// Color temperature applied at power-on.
    pub startup_color_temperature_mireds: Option<u16>,
    /// Coolest color temperature the device can produce.
    pub color_temp_physical_min_mireds: u16,
    /// Warmest color temperature the device can produce.
    pub color_temp_physical_max_mireds: u16,
    /// Lower mireds bound used when color temperature is coupled to the
    /// brightness level; mirrors the physical minimum.
    pub couple_color_temp_to_level_min_mireds: u16,
}

impl Default for ColorControlState {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::default(),
            current_hue: 0,
            current_saturation: 0,
            color_temperature_mireds: None,
            startup_color_temperature_mireds: None,
            color_temp_physical_min_mireds: 0,
            color_temp_physical_max_mireds: 65279,
            couple_color_temp_to_level_min_mireds: 0,
        }
    }
}

/// An atomic patch of [`ColorControlState`].
///
/// `None` fields leave the corresponding attribute untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ColorControlPatch {
    /// New color mode, if it should change.
    pub color_mode: Option<ColorMode>,
    /// New current hue.
    pub current_hue: Option<u8>,
    /// New current saturation.
    pub current_saturation: Option<u8>,
    /// New current color temperature.
    pub color_temperature_mireds: Option<u16>,
    /// New startup color temperature.
    pub startup_color_temperature_mireds: Option<u16>,
    /// New physical minimum.
    pub color_temp_physical_min_mireds: Option<u16>,
    /// New physical maximum.
    pub color_temp_physical_max_mireds: Option<u16>,
    /// New coupled minimum.
    pub couple_color_temp_to_level_min_mireds: Option<u16>,
}

impl ColorControlPatch {
    /// Applies the patch in one step.
    ///
    /// Returns `true` if any attribute actually changed.
    pub fn apply(&self, state: &mut ColorControlState) -> bool {
        let mut changed = false;
        if let Some(v) = self.color_mode
            && state.color_mode != v
        {
            state.color_mode = v;
            changed = true;
        }
        if let Some(v) = self.current_hue
            && state.current_hue != v
        {
            state.current_hue = v;
            changed = true;
        }
        if let Some(v) = self.current_saturation
            && state.current_saturation != v
        {
            state.current_saturation = v;
            changed = true;
        }
        if let Some(v) = self.color_temperature_mireds
            && state.color_temperature_mireds != Some(v)
        {
            state.color_temperature_mireds = Some(v);
            changed = true;
        }
        if let Some(v) = self.startup_color_temperature_mireds
            && state.startup_color_temperature_mireds != Some(v)
        {
            state.startup_color_temperature_mireds = Some(v);
            changed = true;
        }
        if let Some(v) = self.color_temp_physical_min_mireds
            && state.color_temp_physical_min_mireds != v
        {
            state.color_temp_physical_min_mireds = v;
            changed = true;
        }
        if let Some(v) = self.color_temp_physical_max_mireds
            && state.color_temp_physical_max_mireds != v
        {
            state.color_temp_physical_max_mireds = v;
            changed = true;
        }
        if let Some(v) = self.couple_color_temp_to_level_min_mireds
            && state.couple_color_temp_to_level_min_mireds != v
        {
            state.couple_color_temp_to_level_min_mireds = v;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_patch_changes_nothing() {
        let mut state = ColorControlState::default();
        let before = state.clone();
        assert!(!ColorControlPatch::default().apply(&mut state));
        assert_eq!(state, before);
    }

    #[test]
    fn patch_is_applied_atomically() {
        let mut state = ColorControlState::default();
        let patch = ColorControlPatch {
            color_mode: Some(ColorMode::ColorTemperatureMireds),
            color_temperature_mireds: Some(250),
            color_temp_physical_min_mireds: Some(153),
            color_temp_physical_max_mireds: Some(500),
            ..ColorControlPatch::default()
        };
        assert!(patch.apply(&mut state));
        assert_eq!(state.color_mode, ColorMode::ColorTemperatureMireds);
        assert_eq!(state.color_temperature_mireds, Some(250));
        // Untouched attributes keep their defaults
        assert_eq!(state.current_hue, 0);
        assert_eq!(state.couple_color_temp_to_level_min_mireds, 0);
    }

    #[test]
    fn reapplying_identical_patch_reports_no_change() {
        let mut state = ColorControlState::default();
        let patch = ColorControlPatch {
            current_hue: Some(85),
            current_saturation: Some(127),
            ..ColorControlPatch::default()
        };
        assert!(patch.apply(&mut state));
        assert!(!patch.apply(&mut state));
    }
}
