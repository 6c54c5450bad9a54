// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Cluster-side typed attribute state.
//!
//! Each device class owns one state struct here. The attribute projector
//! for the device is the only writer; protocol clients observe the state
//! (through the observer registry the bridge exposes) and can only
//! mutate it by invoking commands, which the command translator
//! intercepts.
//!
//! Projectors never write fields directly: they build a patch and apply
//! it in one step, so a single update is all-or-nothing and observers
//! never see partial/interleaved visibility of one projection.

pub mod color_control;
pub mod temperature_measurement;
pub mod thermostat;

pub use color_control::{ColorControlPatch, ColorControlState, ColorMode};
pub use temperature_measurement::{TemperatureMeasurementPatch, TemperatureMeasurementState};
pub use thermostat::{
    ControlSequenceOfOperation, RunningMode, RunningState, SetpointMode, SystemMode,
    ThermostatPatch, ThermostatState,
};

/// Writable cluster attributes the bridge watches for protocol-side writes.
///
/// Only attributes a command path explicitly handles are ever subscribed
/// to. The projector's own patches are applied directly to the state and
/// never surface as one of these, which keeps a state-patch write
/// distinguishable from a protocol-initiated write at the collaborator
/// boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WatchedAttribute {
    /// The thermostat's `systemMode` attribute.
    SystemMode,
    /// The thermostat's `occupiedHeatingSetpoint` attribute.
    OccupiedHeatingSetpoint,
    /// The thermostat's `occupiedCoolingSetpoint` attribute.
    OccupiedCoolingSetpoint,
}
