// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat attribute projector and command translator.

use tracing::{debug, info, trace};

use crate::cluster::{
    ControlSequenceOfOperation, RunningMode, RunningState, SetpointMode, SystemMode,
    ThermostatPatch, ThermostatState, WatchedAttribute,
};
use crate::convert::temperature::{entity_to_cluster_temperature, from_celsius};
use crate::entity::{ActionCall, EntityState, HubConfig, HubGateway, attr};
use crate::error::ActionError;
use crate::features::{self, ThermostatFeatures};
use crate::sync::{AttributeWrite, ClusterCommand, DeviceHandler, ObserverRegistry};
use crate::types::{HvacAction, HvacMode, TemperatureUnit};

/// Bridges a hub climate entity to the thermostat cluster.
///
/// All cluster-side temperatures are centi-Celsius regardless of the
/// hub's display unit; the hub unit is re-read from the shared
/// [`HubConfig`] on every projection and every outbound setpoint call,
/// so a unit change takes effect on the next event without rebinding.
/// The bridge keeps the last unit it observed and logs the switch for
/// its entity when the hub changes it.
pub struct ThermostatBridge<H> {
    gateway: H,
    features: ThermostatFeatures,
    hub: HubConfig,
    unit: TemperatureUnit,
    entity: EntityState,
    state: ThermostatState,
    observers: ObserverRegistry<ThermostatState>,
    watched: Vec<WatchedAttribute>,
}

impl<H: HubGateway> ThermostatBridge<H> {
    /// Binds a climate entity, projecting the initial snapshot immediately.
    #[must_use]
    pub fn bind(
        gateway: H,
        features: ThermostatFeatures,
        hub: HubConfig,
        initial: EntityState,
    ) -> Self {
        let mut watched = vec![WatchedAttribute::SystemMode];
        if features.heating {
            watched.push(WatchedAttribute::OccupiedHeatingSetpoint);
        }
        if features.cooling {
            watched.push(WatchedAttribute::OccupiedCoolingSetpoint);
        }
        let unit = hub.temperature_unit();
        let mut bridge = Self {
            gateway,
            features,
            hub,
            unit,
            entity: initial,
            state: ThermostatState::default(),
            observers: ObserverRegistry::new(),
            watched,
        };
        bridge.refresh();
        bridge
    }

    /// The current cluster attribute state.
    #[must_use]
    pub fn state(&self) -> &ThermostatState {
        &self.state
    }

    /// The resolved feature set of this device.
    #[must_use]
    pub fn features(&self) -> ThermostatFeatures {
        self.features
    }

    /// Handle for registering cluster-state observers.
    #[must_use]
    pub fn observers(&self) -> ObserverRegistry<ThermostatState> {
        self.observers.clone()
    }

    fn refresh(&mut self) {
        let unit = self.hub.temperature_unit();
        if unit != self.unit {
            info!(
                entity = %self.entity.entity_id,
                from = self.unit.as_str(), to = unit.as_str(),
                "switching temperature unit"
            );
            self.unit = unit;
        }
        let patch = self.project();
        if patch.apply(&mut self.state) {
            self.observers.notify(&self.state);
        }
    }

    fn project(&self) -> ThermostatPatch {
        let unit = self.unit;
        let running_state = running_state(self.entity.hvac_action(), self.entity.hvac_mode());

        let mut patch = ThermostatPatch {
            local_temperature: Some(entity_to_cluster_temperature(
                self.entity.number(attr::CURRENT_TEMPERATURE),
                unit,
            )),
            system_mode: Some(self.cluster_system_mode()),
            running_state: Some(running_state),
            control_sequence_of_operation: Some(self.control_sequence()),
            ..ThermostatPatch::default()
        };

        let min_limit = entity_to_cluster_temperature(self.entity.number(attr::MIN_TEMP), unit);
        let max_limit = entity_to_cluster_temperature(self.entity.number(attr::MAX_TEMP), unit);

        if self.features.heating {
            // Absent targets leave the previous setpoint in place rather
            // than snapping back to the cluster default.
            patch.occupied_heating_setpoint =
                entity_to_cluster_temperature(self.heating_target(), unit);
            patch.min_heat_setpoint_limit = min_limit;
            patch.max_heat_setpoint_limit = max_limit;
            patch.abs_min_heat_setpoint_limit = min_limit;
            patch.abs_max_heat_setpoint_limit = max_limit;
        }
        if self.features.cooling {
            patch.occupied_cooling_setpoint =
                entity_to_cluster_temperature(self.cooling_target(), unit);
            patch.min_cool_setpoint_limit = min_limit;
            patch.max_cool_setpoint_limit = max_limit;
            patch.abs_min_cool_setpoint_limit = min_limit;
            patch.abs_max_cool_setpoint_limit = max_limit;
        }
        if self.features.auto_mode {
            patch.running_mode = Some(running_mode(self.entity.hvac_action()));
        }

        patch
    }

    /// Maps the entity's hvac mode into the cluster mode. Heat-cool
    /// requests on devices without automatic switchover degrade to the
    /// one direction the feature set supports; unknown or unavailable
    /// states degrade to `Off`.
    fn cluster_system_mode(&self) -> SystemMode {
        match self.entity.hvac_mode() {
            Some(HvacMode::Heat) => SystemMode::Heat,
            Some(HvacMode::Cool) => SystemMode::Cool,
            Some(HvacMode::HeatCool | HvacMode::Auto) => {
                if self.features.auto_mode {
                    SystemMode::Auto
                } else if self.features.heating {
                    SystemMode::Heat
                } else if self.features.cooling {
                    SystemMode::Cool
                } else {
                    SystemMode::Sleep
                }
            }
            Some(HvacMode::Dry) => SystemMode::Dry,
            Some(HvacMode::FanOnly) => SystemMode::FanOnly,
            _ => SystemMode::Off,
        }
    }

    /// Derived solely from the feature set, never from entity state.
    fn control_sequence(&self) -> ControlSequenceOfOperation {
        if self.features.heating && self.features.cooling {
            ControlSequenceOfOperation::CoolingAndHeating
        } else if self.features.cooling {
            ControlSequenceOfOperation::CoolingOnly
        } else {
            ControlSequenceOfOperation::HeatingOnly
        }
    }

    /// The entity's heating target: dual-setpoint low first, then the
    /// single-target spellings.
    fn heating_target(&self) -> Option<f64> {
        self.entity
            .number(attr::TARGET_TEMP_LOW)
            .or_else(|| self.single_target())
    }

    /// The entity's cooling target: dual-setpoint high first, then the
    /// single-target spellings.
    fn cooling_target(&self) -> Option<f64> {
        self.entity
            .number(attr::TARGET_TEMP_HIGH)
            .or_else(|| self.single_target())
    }

    fn single_target(&self) -> Option<f64> {
        self.entity
            .number(attr::TARGET_TEMPERATURE)
            .or_else(|| self.entity.number(attr::TEMPERATURE))
    }

    fn supports_range(&self) -> bool {
        features::supports_temperature_range(
            self.entity.bitmap(attr::SUPPORTED_FEATURES).unwrap_or(0),
        )
    }

    /// A `systemMode` write from the protocol side.
    ///
    /// The guard compares in cluster space: the written mode against the
    /// mode the live entity snapshot currently projects to.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn write_system_mode(&self, mode: SystemMode) -> Result<(), ActionError> {
        if self.cluster_system_mode() == mode {
            debug!(
                entity = %self.entity.entity_id,
                ?mode, "system mode already current, suppressing action"
            );
            return Ok(());
        }
        let target = match mode {
            SystemMode::Off | SystemMode::Sleep => HvacMode::Off,
            SystemMode::Auto => HvacMode::HeatCool,
            SystemMode::Cool | SystemMode::Precooling => HvacMode::Cool,
            SystemMode::Heat | SystemMode::EmergencyHeat => HvacMode::Heat,
            SystemMode::FanOnly => HvacMode::FanOnly,
            SystemMode::Dry => HvacMode::Dry,
        };
        self.gateway
            .call_action(ActionCall::set_hvac_mode(target))
            .await
    }

    /// An `occupiedHeatingSetpoint` write from the protocol side.
    ///
    /// Range-capable devices get the current cluster cooling setpoint as
    /// the counterpart; single-setpoint devices get the one value only,
    /// never a stale counterpart.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn write_heating_setpoint(&self, centi: i16) -> Result<(), ActionError> {
        let unit = self.hub.temperature_unit();
        if entity_to_cluster_temperature(self.heating_target(), unit) == Some(centi) {
            debug!(
                entity = %self.entity.entity_id,
                centi, "heating setpoint already current, suppressing action"
            );
            return Ok(());
        }
        let cool = self
            .supports_range()
            .then(|| f64::from(self.state.occupied_cooling_setpoint));
        self.send_setpoints(Some(f64::from(centi)), cool).await
    }

    /// An `occupiedCoolingSetpoint` write from the protocol side.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn write_cooling_setpoint(&self, centi: i16) -> Result<(), ActionError> {
        let unit = self.hub.temperature_unit();
        if entity_to_cluster_temperature(self.cooling_target(), unit) == Some(centi) {
            debug!(
                entity = %self.entity.entity_id,
                centi, "cooling setpoint already current, suppressing action"
            );
            return Ok(());
        }
        let heat = self
            .supports_range()
            .then(|| f64::from(self.state.occupied_heating_setpoint));
        self.send_setpoints(heat, Some(f64::from(centi))).await
    }

    /// `setpointRaiseLower`: adjusts the setpoint(s) selected by `mode`
    /// relative to the entity's current targets and sends the result in
    /// one combined call.
    ///
    /// The adjustment is `amount / 10` applied to the centi-Celsius
    /// value. A direction whose target the entity does not report is
    /// left out; if neither is present nothing is sent.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn setpoint_raise_lower(
        &self,
        mode: SetpointMode,
        amount: i8,
    ) -> Result<(), ActionError> {
        let unit = self.hub.temperature_unit();
        let mut heat = entity_to_cluster_temperature(self.heating_target(), unit).map(f64::from);
        let mut cool = entity_to_cluster_temperature(self.cooling_target(), unit).map(f64::from);

        if mode != SetpointMode::Cool
            && let Some(h) = heat
        {
            heat = Some(h + f64::from(amount) / 10.0);
        }
        if mode != SetpointMode::Heat
            && let Some(c) = cool
        {
            cool = Some(c + f64::from(amount) / 10.0);
        }

        self.send_setpoints(heat, cool).await
    }

    /// Sends a combined `climate.set_temperature` built from
    /// centi-Celsius setpoints: the dual-setpoint payload when both are
    /// present, the single `temperature` payload for one, nothing for
    /// none.
    async fn send_setpoints(
        &self,
        heat_centi: Option<f64>,
        cool_centi: Option<f64>,
    ) -> Result<(), ActionError> {
        let unit = self.hub.temperature_unit();
        let to_entity = |centi: f64| from_celsius(centi / 100.0, unit);
        let call = match (heat_centi, cool_centi) {
            (Some(heat), Some(cool)) => {
                let (Some(low), Some(high)) = (to_entity(heat), to_entity(cool)) else {
                    return Ok(());
                };
                ActionCall::set_temperature_range(low, high)
            }
            (Some(value), None) | (None, Some(value)) => {
                let Some(value) = to_entity(value) else {
                    return Ok(());
                };
                ActionCall::set_temperature(value)
            }
            (None, None) => {
                trace!(entity = %self.entity.entity_id, "no setpoint to send");
                return Ok(());
            }
        };
        self.gateway.call_action(call).await
    }
}

impl<H: HubGateway> DeviceHandler for ThermostatBridge<H> {
    fn entity_changed(&mut self, snapshot: &EntityState) {
        self.entity = snapshot.clone();
        self.refresh();
    }

    async fn handle_command(&mut self, command: ClusterCommand) -> Result<(), ActionError> {
        match command {
            ClusterCommand::SetpointRaiseLower { mode, amount } => {
                self.setpoint_raise_lower(mode, amount).await
            }
            ClusterCommand::AttributeWritten(write) => match write {
                AttributeWrite::SystemMode(mode) => self.write_system_mode(mode).await,
                AttributeWrite::OccupiedHeatingSetpoint(centi) => {
                    self.write_heating_setpoint(centi).await
                }
                AttributeWrite::OccupiedCoolingSetpoint(centi) => {
                    self.write_cooling_setpoint(centi).await
                }
            },
            _ => {
                trace!(?command, "command not applicable to thermostat");
                Ok(())
            }
        }
    }

    fn watched_attributes(&self) -> &[WatchedAttribute] {
        &self.watched
    }
}

/// Maps the hub's hvac action into the running-state bitset, falling
/// back to the hvac mode when the entity reports no action. Defrosting
/// and preheating count as heating; drying runs heat and fan together.
fn running_state(action: Option<HvacAction>, mode: Option<HvacMode>) -> RunningState {
    match action {
        Some(HvacAction::Heating | HvacAction::Preheating | HvacAction::Defrosting) => {
            RunningState::HEAT
        }
        Some(HvacAction::Cooling) => RunningState::COOL,
        Some(HvacAction::Drying) => RunningState::HEAT_AND_FAN,
        Some(HvacAction::Fan) => RunningState::FAN,
        Some(HvacAction::Idle | HvacAction::Off) => RunningState::ALL_OFF,
        None => match mode {
            Some(HvacMode::Heat) => RunningState::HEAT,
            Some(HvacMode::Cool) => RunningState::COOL,
            Some(HvacMode::Dry) => RunningState::HEAT_AND_FAN,
            Some(HvacMode::FanOnly) => RunningState::FAN,
            _ => RunningState::ALL_OFF,
        },
    }
}

/// Narrower than the running state: mode fallback does not apply, and
/// a lone fan counts as off.
fn running_mode(action: Option<HvacAction>) -> RunningMode {
    match action {
        Some(
            HvacAction::Heating
            | HvacAction::Preheating
            | HvacAction::Defrosting
            | HvacAction::Drying,
        ) => RunningMode::Heat,
        Some(HvacAction::Cooling) => RunningMode::Cool,
        _ => RunningMode::Off,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct MockGateway {
        calls: Arc<Mutex<Vec<ActionCall>>>,
    }

    impl MockGateway {
        fn calls(&self) -> Vec<ActionCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl HubGateway for MockGateway {
        async fn call_action(&self, call: ActionCall) -> Result<(), ActionError> {
            self.calls.lock().unwrap().push(call);
            Ok(())
        }
    }

    fn heater_entity() -> EntityState {
        EntityState::new("climate.radiator", "heat")
            .with_attribute(attr::CURRENT_TEMPERATURE, json!(21.5))
            .with_attribute(attr::TEMPERATURE, json!(22.0))
            .with_attribute(attr::MIN_TEMP, json!(7.0))
            .with_attribute(attr::MAX_TEMP, json!(35.0))
            .with_attribute(attr::HVAC_ACTION, json!("heating"))
    }

    fn dual_entity() -> EntityState {
        EntityState::new("climate.hvac", "heat_cool")
            .with_attribute(attr::CURRENT_TEMPERATURE, json!(23.0))
            .with_attribute(attr::TARGET_TEMP_LOW, json!(19.0))
            .with_attribute(attr::TARGET_TEMP_HIGH, json!(24.0))
            .with_attribute(attr::SUPPORTED_FEATURES, json!(0x02))
            .with_attribute(attr::HVAC_ACTION, json!("cooling"))
    }

    fn bind(
        features: ThermostatFeatures,
        initial: EntityState,
    ) -> (ThermostatBridge<MockGateway>, MockGateway) {
        let gateway = MockGateway::default();
        let bridge = ThermostatBridge::bind(
            gateway.clone(),
            features,
            HubConfig::default(),
            initial,
        );
        (bridge, gateway)
    }

    #[test]
    fn projects_heating_only_device() {
        let (bridge, _) = bind(ThermostatFeatures::heating_only(), heater_entity());
        let state = bridge.state();
        assert_eq!(state.local_temperature, Some(2150));
        assert_eq!(state.system_mode, SystemMode::Heat);
        assert_eq!(state.running_state, RunningState::HEAT);
        assert_eq!(
            state.control_sequence_of_operation,
            ControlSequenceOfOperation::HeatingOnly
        );
        assert_eq!(state.occupied_heating_setpoint, 2200);
        assert_eq!(state.min_heat_setpoint_limit, Some(700));
        assert_eq!(state.max_heat_setpoint_limit, Some(3500));
        // Cooling attributes stay untouched on a heating-only device.
        assert_eq!(state.occupied_cooling_setpoint, 2600);
        assert_eq!(state.min_cool_setpoint_limit, None);
    }

    #[test]
    fn projects_dual_setpoint_device() {
        let (bridge, _) = bind(ThermostatFeatures::heat_cool(), dual_entity());
        let state = bridge.state();
        assert_eq!(state.system_mode, SystemMode::Auto);
        assert_eq!(state.occupied_heating_setpoint, 1900);
        assert_eq!(state.occupied_cooling_setpoint, 2400);
        assert_eq!(
            state.control_sequence_of_operation,
            ControlSequenceOfOperation::CoolingAndHeating
        );
        assert_eq!(state.running_state, RunningState::COOL);
        assert_eq!(state.running_mode, RunningMode::Cool);
    }

    #[test]
    fn heat_cool_clamps_to_supported_direction() {
        let entity = EntityState::new("climate.radiator", "heat_cool")
            .with_attribute(attr::TEMPERATURE, json!(22.0))
            .with_attribute(attr::HVAC_ACTION, json!("heating"));
        let (bridge, _) = bind(ThermostatFeatures::heating_only(), entity);
        assert_eq!(bridge.state().system_mode, SystemMode::Heat);
    }

    #[test]
    fn heat_cool_without_any_direction_falls_back_to_sleep() {
        let entity = EntityState::new("climate.radiator", "heat_cool");
        let (bridge, _) = bind(ThermostatFeatures::resolve(0), entity);
        assert_eq!(bridge.state().system_mode, SystemMode::Sleep);
    }

    #[test]
    fn unknown_state_degrades_to_off() {
        let entity = EntityState::new("climate.radiator", "defrosting_widely");
        let (bridge, _) = bind(ThermostatFeatures::heating_only(), entity);
        assert_eq!(bridge.state().system_mode, SystemMode::Off);
        assert_eq!(bridge.state().running_state, RunningState::ALL_OFF);
        assert_eq!(bridge.state().local_temperature, None);
    }

    #[test]
    fn fahrenheit_hub_unit_is_converted() {
        let gateway = MockGateway::default();
        let hub = HubConfig::new(TemperatureUnit::Fahrenheit);
        let entity = EntityState::new("climate.radiator", "heat")
            .with_attribute(attr::CURRENT_TEMPERATURE, json!(70.0))
            .with_attribute(attr::TEMPERATURE, json!(72.0));
        let bridge =
            ThermostatBridge::bind(gateway, ThermostatFeatures::heating_only(), hub, entity);
        // 70 °F -> 21.11 °C, 72 °F -> 22.22 °C
        assert_eq!(bridge.state().local_temperature, Some(2111));
        assert_eq!(bridge.state().occupied_heating_setpoint, 2222);
    }

    #[test]
    fn unit_change_applies_on_next_snapshot() {
        let gateway = MockGateway::default();
        let hub = HubConfig::default();
        let entity = EntityState::new("climate.radiator", "heat")
            .with_attribute(attr::CURRENT_TEMPERATURE, json!(21.0));
        let mut bridge = ThermostatBridge::bind(
            gateway,
            ThermostatFeatures::heating_only(),
            hub.clone(),
            entity.clone(),
        );
        assert_eq!(bridge.state().local_temperature, Some(2100));

        hub.set_temperature_unit(TemperatureUnit::Fahrenheit);
        bridge.entity_changed(&entity);
        // The same 21.0 now reads as Fahrenheit: -6.11 °C
        assert_eq!(bridge.state().local_temperature, Some(-611));
        // The bridge tracked the switch as its new last-observed unit.
        assert_eq!(bridge.unit, TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn drying_runs_heat_and_fan() {
        assert_eq!(
            running_state(Some(HvacAction::Drying), None),
            RunningState::HEAT_AND_FAN
        );
        assert_eq!(
            running_state(Some(HvacAction::Idle), Some(HvacMode::Heat)),
            RunningState::ALL_OFF
        );
        assert_eq!(running_state(None, None), RunningState::ALL_OFF);
    }

    #[test]
    fn running_state_falls_back_to_mode_without_action() {
        assert_eq!(
            running_state(None, Some(HvacMode::Heat)),
            RunningState::HEAT
        );
        assert_eq!(running_state(None, Some(HvacMode::FanOnly)), RunningState::FAN);
        // Auto says nothing about the current direction.
        assert_eq!(
            running_state(None, Some(HvacMode::HeatCool)),
            RunningState::ALL_OFF
        );
    }

    #[test]
    fn watched_attributes_follow_features() {
        let (heating, _) = bind(ThermostatFeatures::heating_only(), heater_entity());
        assert_eq!(
            heating.watched_attributes(),
            [
                WatchedAttribute::SystemMode,
                WatchedAttribute::OccupiedHeatingSetpoint
            ]
        );

        let (dual, _) = bind(ThermostatFeatures::heat_cool(), dual_entity());
        assert_eq!(dual.watched_attributes().len(), 3);
    }

    #[tokio::test]
    async fn system_mode_write_guard() {
        let (bridge, gateway) = bind(ThermostatFeatures::heating_only(), heater_entity());

        // The entity already projects Heat; writing it back is a no-op.
        bridge.write_system_mode(SystemMode::Heat).await.unwrap();
        assert!(gateway.calls().is_empty());

        bridge.write_system_mode(SystemMode::Off).await.unwrap();
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].action, "climate.set_hvac_mode");
        assert_eq!(calls[0].payload["hvac_mode"], json!("off"));
    }

    #[tokio::test]
    async fn emergency_heat_is_not_the_projected_heat() {
        let (bridge, gateway) = bind(ThermostatFeatures::heating_only(), heater_entity());
        // EmergencyHeat differs from the projected Heat, so the write
        // goes out even though it maps to the same hub mode.
        bridge
            .write_system_mode(SystemMode::EmergencyHeat)
            .await
            .unwrap();
        assert_eq!(gateway.calls()[0].payload["hvac_mode"], json!("heat"));
    }

    #[tokio::test]
    async fn sleep_mode_writes_off() {
        let (bridge, gateway) = bind(ThermostatFeatures::heating_only(), heater_entity());
        bridge.write_system_mode(SystemMode::Sleep).await.unwrap();
        assert_eq!(gateway.calls()[0].payload["hvac_mode"], json!("off"));
    }

    #[tokio::test]
    async fn heating_setpoint_write_on_single_setpoint_device() {
        let (bridge, gateway) = bind(ThermostatFeatures::heating_only(), heater_entity());

        // Entity target is 22.0; the same value is suppressed.
        bridge.write_heating_setpoint(2200).await.unwrap();
        assert!(gateway.calls().is_empty());

        bridge.write_heating_setpoint(2350).await.unwrap();
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].action, "climate.set_temperature");
        assert_eq!(calls[0].payload["temperature"], json!(23.5));
        assert!(!calls[0].payload.contains_key("target_temp_high"));
    }

    #[tokio::test]
    async fn heating_setpoint_write_keeps_cooling_counterpart() {
        let (bridge, gateway) = bind(ThermostatFeatures::heat_cool(), dual_entity());
        bridge.write_heating_setpoint(2000).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].payload["target_temp_low"], json!(20.0));
        assert_eq!(calls[0].payload["target_temp_high"], json!(24.0));
    }

    #[tokio::test]
    async fn cooling_setpoint_write_keeps_heating_counterpart() {
        let (bridge, gateway) = bind(ThermostatFeatures::heat_cool(), dual_entity());
        bridge.write_cooling_setpoint(2550).await.unwrap();

        let calls = gateway.calls();
        assert_eq!(calls[0].payload["target_temp_low"], json!(19.0));
        assert_eq!(calls[0].payload["target_temp_high"], json!(25.5));
    }

    #[tokio::test]
    async fn raise_lower_adjusts_only_the_selected_direction() {
        // A single-target entity resolves both directions from the same
        // temperature field; only the heat side moves, and both go out
        // as one combined call.
        let (bridge, gateway) = bind(ThermostatFeatures::heating_only(), heater_entity());
        bridge
            .setpoint_raise_lower(SetpointMode::Heat, 10)
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        // Entity target 22.0 -> 2200 centi; amount 10 adds one centi-degree.
        assert_eq!(calls[0].payload["target_temp_low"], json!(22.01));
        assert_eq!(calls[0].payload["target_temp_high"], json!(22.0));
    }

    #[tokio::test]
    async fn raise_lower_without_any_target_sends_nothing() {
        let entity = EntityState::new("climate.radiator", "heat");
        let (bridge, gateway) = bind(ThermostatFeatures::heating_only(), entity);
        bridge
            .setpoint_raise_lower(SetpointMode::Both, 10)
            .await
            .unwrap();
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn raise_lower_both_on_dual_device() {
        let (bridge, gateway) = bind(ThermostatFeatures::heat_cool(), dual_entity());
        bridge
            .setpoint_raise_lower(SetpointMode::Both, -10)
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].payload["target_temp_low"], json!(18.99));
        assert_eq!(calls[0].payload["target_temp_high"], json!(23.99));
    }

    #[tokio::test]
    async fn raise_lower_only_heat_moves_on_dual_device() {
        let (bridge, gateway) = bind(ThermostatFeatures::heat_cool(), dual_entity());
        bridge
            .setpoint_raise_lower(SetpointMode::Heat, 20)
            .await
            .unwrap();

        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].payload["target_temp_low"], json!(19.02));
        assert_eq!(calls[0].payload["target_temp_high"], json!(24.0));
    }
}
