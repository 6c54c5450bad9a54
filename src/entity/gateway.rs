// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Outbound action seam toward the hub.

use serde_json::{Map, Value, json};

use crate::error::ActionError;
use crate::types::HvacMode;

/// An action invocation toward the hub.
///
/// All outbound commands the bridge issues flow through this type:
/// `light.turn_on`, `climate.set_hvac_mode` and `climate.set_temperature`.
///
/// # Examples
///
/// ```
/// use matterlink_lib::entity::ActionCall;
///
/// let call = ActionCall::turn_on_hs(120.0, 50.0);
/// assert_eq!(call.action, "light.turn_on");
/// assert_eq!(call.payload["hs_color"][0], 120.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ActionCall {
    /// Action name in the hub's `domain.action` form.
    pub action: String,
    /// Action payload.
    pub payload: Map<String, Value>,
}

impl ActionCall {
    /// Creates an action call with an arbitrary payload.
    #[must_use]
    pub fn new(action: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            action: action.into(),
            payload,
        }
    }

    /// `light.turn_on` with a hue/saturation color.
    #[must_use]
    pub fn turn_on_hs(hue: f64, saturation: f64) -> Self {
        let mut payload = Map::new();
        payload.insert("hs_color".into(), json!([hue, saturation]));
        Self::new("light.turn_on", payload)
    }

    /// `light.turn_on` with a color temperature in Kelvin.
    #[must_use]
    pub fn turn_on_color_temperature(kelvin: f64) -> Self {
        let mut payload = Map::new();
        payload.insert("color_temp_kelvin".into(), json!(kelvin));
        Self::new("light.turn_on", payload)
    }

    /// `climate.set_hvac_mode`.
    #[must_use]
    pub fn set_hvac_mode(mode: HvacMode) -> Self {
        let mut payload = Map::new();
        payload.insert("hvac_mode".into(), json!(mode.as_str()));
        Self::new("climate.set_hvac_mode", payload)
    }

    /// `climate.set_temperature` with a single target temperature.
    #[must_use]
    pub fn set_temperature(temperature: f64) -> Self {
        let mut payload = Map::new();
        payload.insert("temperature".into(), json!(temperature));
        Self::new("climate.set_temperature", payload)
    }

    /// `climate.set_temperature` with a dual-setpoint range.
    #[must_use]
    pub fn set_temperature_range(low: f64, high: f64) -> Self {
        let mut payload = Map::new();
        payload.insert("target_temp_low".into(), json!(low));
        payload.insert("target_temp_high".into(), json!(high));
        Self::new("climate.set_temperature", payload)
    }
}

/// Trait for the hub collaborator that executes action calls.
///
/// The bridge treats calls as fire-and-forget: it awaits delivery but
/// never waits for the hub-side side effects to propagate back. The
/// resulting entity-change echo is tolerated by the guard logic in the
/// command translators, not prevented here. Failures are not retried —
/// the next change notification re-derives the desired state anyway.
#[allow(async_fn_in_trait)]
pub trait HubGateway {
    /// Invokes an action on the hub.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub rejects the call or is unreachable.
    async fn call_action(&self, call: ActionCall) -> Result<(), ActionError>;
}
