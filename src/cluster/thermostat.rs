// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Thermostat cluster attribute state.
//!
//! All temperatures are in the cluster's centi-Celsius encoding; see
//! [`crate::convert::temperature`].

/// The thermostat's configured operating mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum SystemMode {
    /// The thermostat is off.
    #[default]
    Off = 0,
    /// Automatic switchover between heating and cooling.
    Auto = 1,
    /// Cooling to the cooling setpoint.
    Cool = 3,
    /// Heating to the heating setpoint.
    Heat = 4,
    /// Emergency heating.
    EmergencyHeat = 5,
    /// Pre-cooling ahead of expected demand.
    Precooling = 6,
    /// Fan only, no conditioning.
    FanOnly = 7,
    /// Dehumidifying.
    Dry = 8,
    /// Sleep/away mode. Has no hub equivalent; writes map to `off`.
    Sleep = 9,
}

/// The running mode reported when automatic switchover is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum RunningMode {
    /// Not conditioning.
    #[default]
    Off = 0,
    /// Currently cooling.
    Cool = 3,
    /// Currently heating.
    Heat = 4,
}

/// Which conditioning directions the device supports.
///
/// Derived solely from the resolved feature set, never from entity state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum ControlSequenceOfOperation {
    /// Cooling only.
    CoolingOnly = 0,
    /// Heating only.
    #[default]
    HeatingOnly = 2,
    /// Both heating and cooling.
    CoolingAndHeating = 4,
}

/// Setpoint selector of the `setpointRaiseLower` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u8)]
pub enum SetpointMode {
    /// Adjust the heating setpoint.
    Heat = 0,
    /// Adjust the cooling setpoint.
    Cool = 1,
    /// Adjust both setpoints.
    Both = 2,
}

/// The thermostat's running state bitset.
///
/// Stage-two and stage-three bits exist on the wire but this bridge never
/// sets them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RunningState {
    /// Heating is active.
    pub heat: bool,
    /// Cooling is active.
    pub cool: bool,
    /// The fan is running.
    pub fan: bool,
}

impl RunningState {
    /// Nothing is running.
    pub const ALL_OFF: Self = Self {
        heat: false,
        cool: false,
        fan: false,
    };

    /// Only heating.
    pub const HEAT: Self = Self {
        heat: true,
        cool: false,
        fan: false,
    };

    /// Only cooling.
    pub const COOL: Self = Self {
        heat: false,
        cool: true,
        fan: false,
    };

    /// Only the fan.
    pub const FAN: Self = Self {
        heat: false,
        cool: false,
        fan: true,
    };

    /// Heating with the fan running (drying).
    pub const HEAT_AND_FAN: Self = Self {
        heat: true,
        cool: false,
        fan: true,
    };

    /// Returns the wire encoding (bit 0 heat, bit 1 cool, bit 2 fan).
    #[must_use]
    pub const fn bits(&self) -> u16 {
        (self.heat as u16) | ((self.cool as u16) << 1) | ((self.fan as u16) << 2)
    }
}

/// Attribute state of a thermostat device.
///
/// Setpoints and limits are only meaningful for the directions the
/// resolved feature set enables; the projector leaves the others at
/// their defaults and never patches them.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ThermostatState {
    /// Measured temperature; null when the entity reports none.
    pub local_temperature: Option<i16>,
    /// Configured operating mode.
    pub system_mode: SystemMode,
    /// What the device is doing right now.
    pub running_state: RunningState,
    /// Supported conditioning directions.
    pub control_sequence_of_operation: ControlSequenceOfOperation,
    /// Heating target.
    pub occupied_heating_setpoint: i16,
    /// Cooling target.
    pub occupied_cooling_setpoint: i16,
    /// Operational lower bound of the heating setpoint.
    pub min_heat_setpoint_limit: Option<i16>,
    /// Operational upper bound of the heating setpoint.
    pub max_heat_setpoint_limit: Option<i16>,
    /// Absolute lower bound of the heating setpoint.
    pub abs_min_heat_setpoint_limit: Option<i16>,
    /// Absolute upper bound of the heating setpoint.
    pub abs_max_heat_setpoint_limit: Option<i16>,
    /// Operational lower bound of the cooling setpoint.
    pub min_cool_setpoint_limit: Option<i16>,
    /// Operational upper bound of the cooling setpoint.
    pub max_cool_setpoint_limit: Option<i16>,
    /// Absolute lower bound of the cooling setpoint.
    pub abs_min_cool_setpoint_limit: Option<i16>,
    /// Absolute upper bound of the cooling setpoint.
    pub abs_max_cool_setpoint_limit: Option<i16>,
    /// Minimum separation between the two setpoints (tenths of a degree).
    pub min_setpoint_dead_band: i8,
    /// Running mode; only projected when auto mode is supported.
    pub running_mode: RunningMode,
}

impl Default for ThermostatState {
    fn default() -> Self {
        Self {
            local_temperature: None,
            system_mode: SystemMode::default(),
            running_state: RunningState::ALL_OFF,
            control_sequence_of_operation: ControlSequenceOfOperation::default(),
            // Cluster defaults: 20.00 °C heating, 26.00 °C cooling
            occupied_heating_setpoint: 2000,
            occupied_cooling_setpoint: 2600,
            min_heat_setpoint_limit: None,
            max_heat_setpoint_limit: None,
            abs_min_heat_setpoint_limit: None,
            abs_max_heat_setpoint_limit: None,
            min_cool_setpoint_limit: None,
            max_cool_setpoint_limit: None,
            abs_min_cool_setpoint_limit: None,
            abs_max_cool_setpoint_limit: None,
            min_setpoint_dead_band: 25,
            running_mode: RunningMode::default(),
        }
    }
}

/// An atomic patch of [`ThermostatState`].
///
/// `None` fields leave the corresponding attribute untouched;
/// `local_temperature` uses a nested `Option` because null is a real
/// projected value for it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermostatPatch {
    /// New measured temperature (outer `None` = untouched, inner = value).
    pub local_temperature: Option<Option<i16>>,
    /// New system mode.
    pub system_mode: Option<SystemMode>,
    /// New running state.
    pub running_state: Option<RunningState>,
    /// New control sequence.
    pub control_sequence_of_operation: Option<ControlSequenceOfOperation>,
    /// New heating setpoint.
    pub occupied_heating_setpoint: Option<i16>,
    /// New cooling setpoint.
    pub occupied_cooling_setpoint: Option<i16>,
    /// New heating limits (operational low, high mirror the absolutes).
    pub min_heat_setpoint_limit: Option<i16>,
    /// New heating upper limit.
    pub max_heat_setpoint_limit: Option<i16>,
    /// New absolute heating lower limit.
    pub abs_min_heat_setpoint_limit: Option<i16>,
    /// New absolute heating upper limit.
    pub abs_max_heat_setpoint_limit: Option<i16>,
    /// New cooling lower limit.
    pub min_cool_setpoint_limit: Option<i16>,
    /// New cooling upper limit.
    pub max_cool_setpoint_limit: Option<i16>,
    /// New absolute cooling lower limit.
    pub abs_min_cool_setpoint_limit: Option<i16>,
    /// New absolute cooling upper limit.
    pub abs_max_cool_setpoint_limit: Option<i16>,
    /// New setpoint dead band.
    pub min_setpoint_dead_band: Option<i8>,
    /// New running mode.
    pub running_mode: Option<RunningMode>,
}

impl ThermostatPatch {
    /// Applies the patch in one step.
    ///
    /// Returns `true` if any attribute actually changed.
    #[allow(clippy::too_many_lines)]
    pub fn apply(&self, state: &mut ThermostatState) -> bool {
        let mut changed = false;
        if let Some(v) = self.local_temperature
            && state.local_temperature != v
        {
            state.local_temperature = v;
            changed = true;
        }
        if let Some(v) = self.system_mode
            && state.system_mode != v
        {
            state.system_mode = v;
            changed = true;
        }
        if let Some(v) = self.running_state
            && state.running_state != v
        {
            state.running_state = v;
            changed = true;
        }
        if let Some(v) = self.control_sequence_of_operation
            && state.control_sequence_of_operation != v
        {
            state.control_sequence_of_operation = v;
            changed = true;
        }
        if let Some(v) = self.occupied_heating_setpoint
            && state.occupied_heating_setpoint != v
        {
            state.occupied_heating_setpoint = v;
            changed = true;
        }
        if let Some(v) = self.occupied_cooling_setpoint
            && state.occupied_cooling_setpoint != v
        {
            state.occupied_cooling_setpoint = v;
            changed = true;
        }
        if let Some(v) = self.min_heat_setpoint_limit
            && state.min_heat_setpoint_limit != Some(v)
        {
            state.min_heat_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.max_heat_setpoint_limit
            && state.max_heat_setpoint_limit != Some(v)
        {
            state.max_heat_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.abs_min_heat_setpoint_limit
            && state.abs_min_heat_setpoint_limit != Some(v)
        {
            state.abs_min_heat_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.abs_max_heat_setpoint_limit
            && state.abs_max_heat_setpoint_limit != Some(v)
        {
            state.abs_max_heat_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.min_cool_setpoint_limit
            && state.min_cool_setpoint_limit != Some(v)
        {
            state.min_cool_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.max_cool_setpoint_limit
            && state.max_cool_setpoint_limit != Some(v)
        {
            state.max_cool_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.abs_min_cool_setpoint_limit
            && state.abs_min_cool_setpoint_limit != Some(v)
        {
            state.abs_min_cool_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.abs_max_cool_setpoint_limit
            && state.abs_max_cool_setpoint_limit != Some(v)
        {
            state.abs_max_cool_setpoint_limit = Some(v);
            changed = true;
        }
        if let Some(v) = self.min_setpoint_dead_band
            && state.min_setpoint_dead_band != v
        {
            state.min_setpoint_dead_band = v;
            changed = true;
        }
        if let Some(v) = self.running_mode
            && state.running_mode != v
        {
            state.running_mode = v;
            changed = true;
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_state_bits() {
        assert_eq!(RunningState::ALL_OFF.bits(), 0);
        assert_eq!(RunningState::HEAT.bits(), 0b001);
        assert_eq!(RunningState::COOL.bits(), 0b010);
        assert_eq!(RunningState::FAN.bits(), 0b100);
        assert_eq!(RunningState::HEAT_AND_FAN.bits(), 0b101);
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut state = ThermostatState::default();
        let before = state.clone();
        assert!(!ThermostatPatch::default().apply(&mut state));
        assert_eq!(state, before);
    }

    #[test]
    fn local_temperature_can_be_patched_to_null() {
        let mut state = ThermostatState {
            local_temperature: Some(2150),
            ..ThermostatState::default()
        };
        let patch = ThermostatPatch {
            local_temperature: Some(None),
            ..ThermostatPatch::default()
        };
        assert!(patch.apply(&mut state));
        assert_eq!(state.local_temperature, None);
        assert!(!patch.apply(&mut state));
    }

    #[test]
    fn untouched_direction_keeps_defaults() {
        let mut state = ThermostatState::default();
        let patch = ThermostatPatch {
            occupied_heating_setpoint: Some(2100),
            min_heat_setpoint_limit: Some(700),
            max_heat_setpoint_limit: Some(3000),
            ..ThermostatPatch::default()
        };
        assert!(patch.apply(&mut state));
        assert_eq!(state.occupied_cooling_setpoint, 2600);
        assert_eq!(state.min_cool_setpoint_limit, None);
    }
}
