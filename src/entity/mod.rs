// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub-side entity model.
//!
//! The hub delivers device state as whole-snapshot replacements: a status
//! string plus a loosely typed attribute map. The bridge never mutates a
//! snapshot and never applies deltas; every projection re-derives its
//! output from the latest full snapshot.

mod config;
mod gateway;

pub use config::HubConfig;
pub use gateway::{ActionCall, HubGateway};

use serde_json::{Map, Value};

use crate::types::{HvacAction, HvacMode};

/// Well-known hub attribute names.
pub mod attr {
    /// Hue/saturation color, `[hue 0-360, saturation 0-100]`.
    pub const HS_COLOR: &str = "hs_color";
    /// RGB color, `[r, g, b]` each 0-255.
    pub const RGB_COLOR: &str = "rgb_color";
    /// RGBW color, `[r, g, b, w]` each 0-255.
    pub const RGBW_COLOR: &str = "rgbw_color";
    /// RGBWW color, `[r, g, b, cold white, warm white]` each 0-255.
    pub const RGBWW_COLOR: &str = "rgbww_color";
    /// CIE xy chromaticity, `[x, y]` each 0-1.
    pub const XY_COLOR: &str = "xy_color";
    /// The color mode the light currently reports (`hs`, `color_temp`, ...).
    pub const COLOR_MODE: &str = "color_mode";
    /// Current color temperature in Kelvin.
    pub const COLOR_TEMP_KELVIN: &str = "color_temp_kelvin";
    /// Coolest supported color temperature in Kelvin.
    pub const MIN_COLOR_TEMP_KELVIN: &str = "min_color_temp_kelvin";
    /// Warmest supported color temperature in Kelvin.
    pub const MAX_COLOR_TEMP_KELVIN: &str = "max_color_temp_kelvin";
    /// Measured temperature of a climate device.
    pub const CURRENT_TEMPERATURE: &str = "current_temperature";
    /// Lower target of a dual-setpoint climate device.
    pub const TARGET_TEMP_LOW: &str = "target_temp_low";
    /// Upper target of a dual-setpoint climate device.
    pub const TARGET_TEMP_HIGH: &str = "target_temp_high";
    /// Single target temperature (preferred spelling).
    pub const TARGET_TEMPERATURE: &str = "target_temperature";
    /// Single target temperature (legacy spelling).
    pub const TEMPERATURE: &str = "temperature";
    /// Minimum settable temperature.
    pub const MIN_TEMP: &str = "min_temp";
    /// Maximum settable temperature.
    pub const MAX_TEMP: &str = "max_temp";
    /// What the climate device is currently doing.
    pub const HVAC_ACTION: &str = "hvac_action";
    /// Hub-side capability bitmap of the entity.
    pub const SUPPORTED_FEATURES: &str = "supported_features";
}

/// Entity status string the hub uses for devices it cannot reach.
pub const STATE_UNAVAILABLE: &str = "unavailable";

/// A full hub entity snapshot.
///
/// # Examples
///
/// ```
/// use matterlink_lib::entity::EntityState;
/// use serde_json::json;
///
/// let state = EntityState::new("light.kitchen", "on")
///     .with_attribute("hs_color", json!([120.0, 50.0]));
/// assert_eq!(state.pair("hs_color"), Some((120.0, 50.0)));
/// ```
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct EntityState {
    /// The hub's entity identifier, e.g. `light.kitchen`.
    pub entity_id: String,
    /// Free-form status string (`on`, `off`, an hvac mode, `unavailable`, ...).
    pub state: String,
    /// Attribute map; values may be numbers, strings, arrays or null.
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

impl EntityState {
    /// Creates a snapshot with an empty attribute map.
    #[must_use]
    pub fn new(entity_id: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            entity_id: entity_id.into(),
            state: state.into(),
            attributes: Map::new(),
        }
    }

    /// Returns a copy with the given attribute set (builder style, for tests
    /// and embedders constructing snapshots by hand).
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    /// Returns whether the hub reports this entity as unreachable.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.state == STATE_UNAVAILABLE
    }

    /// Reads a numeric attribute.
    ///
    /// The hub is unit-ambiguous and occasionally delivers numbers as
    /// strings; those are parsed too. Returns `None` for absent, null or
    /// non-numeric values.
    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        match self.attributes.get(name)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// Reads a string attribute.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<&str> {
        self.attributes.get(name)?.as_str()
    }

    /// Reads a fixed-size numeric tuple attribute (a JSON array).
    ///
    /// Returns `None` if the attribute is absent, is not an array of at
    /// least `N` numbers, or any element is non-numeric.
    #[must_use]
    pub fn tuple<const N: usize>(&self, name: &str) -> Option<[f64; N]> {
        let items = self.attributes.get(name)?.as_array()?;
        if items.len() < N {
            return None;
        }
        let mut out = [0.0; N];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item.as_f64()?;
        }
        Some(out)
    }

    /// Reads a two-element numeric tuple attribute.
    #[must_use]
    pub fn pair(&self, name: &str) -> Option<(f64, f64)> {
        self.tuple::<2>(name).map(|[a, b]| (a, b))
    }

    /// Reads an unsigned integer attribute (capability bitmaps).
    #[must_use]
    pub fn bitmap(&self, name: &str) -> Option<u64> {
        self.attributes.get(name)?.as_u64()
    }

    /// Parses the status string as an hvac mode.
    ///
    /// Unknown tokens (including `unavailable`) yield `None`; consumers
    /// degrade those to `Off`.
    #[must_use]
    pub fn hvac_mode(&self) -> Option<HvacMode> {
        self.state.parse().ok()
    }

    /// Parses the `hvac_action` attribute.
    #[must_use]
    pub fn hvac_action(&self) -> Option<HvacAction> {
        self.text(attr::HVAC_ACTION)?.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn snapshot() -> EntityState {
        EntityState::new("climate.living_room", "heat")
            .with_attribute(attr::CURRENT_TEMPERATURE, json!(21.5))
            .with_attribute(attr::TEMPERATURE, json!("22.0"))
            .with_attribute(attr::HS_COLOR, json!([120.0, 50.0]))
            .with_attribute(attr::RGBWW_COLOR, json!([255, 0, 0, 100, 50]))
            .with_attribute(attr::HVAC_ACTION, json!("heating"))
            .with_attribute(attr::SUPPORTED_FEATURES, json!(386))
            .with_attribute("broken", json!({"nested": true}))
    }

    #[test]
    fn number_reads_numbers_and_numeric_strings() {
        let state = snapshot();
        assert_eq!(state.number(attr::CURRENT_TEMPERATURE), Some(21.5));
        assert_eq!(state.number(attr::TEMPERATURE), Some(22.0));
        assert_eq!(state.number("missing"), None);
        assert_eq!(state.number("broken"), None);
    }

    #[test]
    fn tuple_reads_arrays() {
        let state = snapshot();
        assert_eq!(state.pair(attr::HS_COLOR), Some((120.0, 50.0)));
        assert_eq!(
            state.tuple::<5>(attr::RGBWW_COLOR),
            Some([255.0, 0.0, 0.0, 100.0, 50.0])
        );
        // Too few elements
        assert_eq!(state.tuple::<5>(attr::HS_COLOR), None);
    }

    #[test]
    fn hvac_parsing() {
        let state = snapshot();
        assert_eq!(state.hvac_mode(), Some(HvacMode::Heat));
        assert_eq!(state.hvac_action(), Some(HvacAction::Heating));

        let unavailable = EntityState::new("climate.x", STATE_UNAVAILABLE);
        assert!(unavailable.is_unavailable());
        assert_eq!(unavailable.hvac_mode(), None);
        assert_eq!(unavailable.hvac_action(), None);
    }

    #[test]
    fn bitmap_reads_integers() {
        let state = snapshot();
        assert_eq!(state.bitmap(attr::SUPPORTED_FEATURES), Some(386));
        assert_eq!(state.bitmap(attr::CURRENT_TEMPERATURE), None);
    }

    #[test]
    fn snapshot_round_trips_through_json() {
        let state = snapshot();
        let json = serde_json::to_string(&state).unwrap();
        let back: EntityState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
