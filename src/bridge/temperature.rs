// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature sensor projector.
//!
//! Read-only device class: there is no command translation, no watched
//! attribute and no hub gateway, only projection of the measured value.

use tracing::trace;

use crate::cluster::{TemperatureMeasurementPatch, TemperatureMeasurementState, WatchedAttribute};
use crate::convert::temperature::entity_to_cluster_temperature;
use crate::entity::{EntityState, attr};
use crate::error::ActionError;
use crate::sync::{ClusterCommand, DeviceHandler, ObserverRegistry};
use crate::types::TemperatureUnit;

/// Where a sensor entity keeps its reading and unit.
///
/// Plain sensors report the value as the status string and the unit in
/// an attribute; other device classes embed a temperature in a named
/// attribute instead. The getters close over that difference so one
/// bridge covers both shapes.
pub struct TemperatureSensorConfig {
    value: Box<dyn Fn(&EntityState) -> Option<f64> + Send + Sync>,
    unit: Box<dyn Fn(&EntityState) -> TemperatureUnit + Send + Sync>,
}

impl TemperatureSensorConfig {
    /// A plain temperature sensor: the reading is the status string, the
    /// unit comes from the `unit_of_measurement` attribute. Unknown unit
    /// tokens are treated as Celsius.
    #[must_use]
    pub fn sensor() -> Self {
        Self {
            value: Box::new(|entity| entity.state.trim().parse().ok()),
            unit: Box::new(|entity| {
                entity
                    .text("unit_of_measurement")
                    .and_then(TemperatureUnit::parse)
                    .unwrap_or_default()
            }),
        }
    }

    /// A sensor reading embedded in a named attribute, always in the
    /// given unit.
    #[must_use]
    pub fn attribute(name: &'static str, unit: TemperatureUnit) -> Self {
        Self {
            value: Box::new(move |entity| entity.number(name)),
            unit: Box::new(move |_| unit),
        }
    }

    /// The `current_temperature` attribute of a climate entity, in
    /// Celsius.
    #[must_use]
    pub fn climate_current_temperature() -> Self {
        Self::attribute(attr::CURRENT_TEMPERATURE, TemperatureUnit::Celsius)
    }

    /// Custom getters for both the value and the unit.
    #[must_use]
    pub fn custom(
        value: impl Fn(&EntityState) -> Option<f64> + Send + Sync + 'static,
        unit: impl Fn(&EntityState) -> TemperatureUnit + Send + Sync + 'static,
    ) -> Self {
        Self {
            value: Box::new(value),
            unit: Box::new(unit),
        }
    }
}

/// Bridges a hub temperature reading to the measurement cluster.
///
/// # Examples
///
/// ```
/// use matterlink_lib::bridge::{TemperatureBridge, TemperatureSensorConfig};
/// use matterlink_lib::entity::EntityState;
/// use serde_json::json;
///
/// let initial = EntityState::new("sensor.outside", "21.5")
///     .with_attribute("unit_of_measurement", json!("°C"));
/// let bridge = TemperatureBridge::bind(TemperatureSensorConfig::sensor(), initial);
/// assert_eq!(bridge.state().measured_value, Some(2150));
/// ```
pub struct TemperatureBridge {
    config: TemperatureSensorConfig,
    entity: EntityState,
    state: TemperatureMeasurementState,
    observers: ObserverRegistry<TemperatureMeasurementState>,
}

impl TemperatureBridge {
    /// Binds a sensor entity, projecting the initial snapshot immediately.
    #[must_use]
    pub fn bind(config: TemperatureSensorConfig, initial: EntityState) -> Self {
        let mut bridge = Self {
            config,
            entity: initial,
            state: TemperatureMeasurementState::default(),
            observers: ObserverRegistry::new(),
        };
        bridge.refresh();
        bridge
    }

    /// The current cluster attribute state.
    #[must_use]
    pub fn state(&self) -> &TemperatureMeasurementState {
        &self.state
    }

    /// Handle for registering cluster-state observers.
    #[must_use]
    pub fn observers(&self) -> ObserverRegistry<TemperatureMeasurementState> {
        self.observers.clone()
    }

    fn refresh(&mut self) {
        let value = if self.entity.is_unavailable() {
            None
        } else {
            (self.config.value)(&self.entity)
        };
        let unit = (self.config.unit)(&self.entity);
        let patch = TemperatureMeasurementPatch {
            measured_value: entity_to_cluster_temperature(value, unit),
        };
        if patch.apply(&mut self.state) {
            self.observers.notify(&self.state);
        }
    }
}

impl DeviceHandler for TemperatureBridge {
    fn entity_changed(&mut self, snapshot: &EntityState) {
        self.entity = snapshot.clone();
        self.refresh();
    }

    async fn handle_command(&mut self, command: ClusterCommand) -> Result<(), ActionError> {
        trace!(?command, "command not applicable to temperature sensor");
        Ok(())
    }

    fn watched_attributes(&self) -> &[WatchedAttribute] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::STATE_UNAVAILABLE;
    use serde_json::json;

    fn sensor(state: &str, unit: &str) -> EntityState {
        EntityState::new("sensor.outside", state)
            .with_attribute("unit_of_measurement", json!(unit))
    }

    #[test]
    fn projects_celsius_reading() {
        let bridge = TemperatureBridge::bind(TemperatureSensorConfig::sensor(), sensor("21.5", "°C"));
        assert_eq!(bridge.state().measured_value, Some(2150));
    }

    #[test]
    fn converts_fahrenheit_reading() {
        let bridge = TemperatureBridge::bind(TemperatureSensorConfig::sensor(), sensor("70", "°F"));
        assert_eq!(bridge.state().measured_value, Some(2111));
    }

    #[test]
    fn unknown_unit_is_treated_as_celsius() {
        let bridge =
            TemperatureBridge::bind(TemperatureSensorConfig::sensor(), sensor("18.0", "furlongs"));
        assert_eq!(bridge.state().measured_value, Some(1800));
    }

    #[test]
    fn non_numeric_state_projects_null() {
        let bridge =
            TemperatureBridge::bind(TemperatureSensorConfig::sensor(), sensor("unknown", "°C"));
        assert_eq!(bridge.state().measured_value, None);
    }

    #[test]
    fn unavailable_entity_clears_the_reading() {
        let mut bridge =
            TemperatureBridge::bind(TemperatureSensorConfig::sensor(), sensor("21.5", "°C"));
        assert_eq!(bridge.state().measured_value, Some(2150));

        bridge.entity_changed(&sensor(STATE_UNAVAILABLE, "°C"));
        assert_eq!(bridge.state().measured_value, None);
    }

    #[test]
    fn attribute_backed_reading() {
        let entity = EntityState::new("climate.living_room", "heat")
            .with_attribute(attr::CURRENT_TEMPERATURE, json!(23.4));
        let bridge =
            TemperatureBridge::bind(TemperatureSensorConfig::climate_current_temperature(), entity);
        assert_eq!(bridge.state().measured_value, Some(2340));
    }

    #[test]
    fn observers_fire_only_on_change() {
        use std::sync::{Arc, Mutex};

        let mut bridge =
            TemperatureBridge::bind(TemperatureSensorConfig::sensor(), sensor("21.5", "°C"));
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_cb = Arc::clone(&seen);
        bridge
            .observers()
            .subscribe(move |s: &TemperatureMeasurementState| {
                seen_cb.lock().unwrap().push(s.measured_value);
            });

        bridge.entity_changed(&sensor("21.5", "°C"));
        bridge.entity_changed(&sensor("22.0", "°C"));
        assert_eq!(*seen.lock().unwrap(), vec![Some(2200)]);
    }
}
