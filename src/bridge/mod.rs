// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Attribute projectors and command translators, one per device class.
//!
//! A bridge binds one hub entity to one cluster:
//!
//! - projection: entity snapshot in, atomic cluster-state patch out;
//! - command translation: cluster command in, hub action call out,
//!   suppressed when the live snapshot already reflects the target.
//!
//! The suppression guard is what keeps the echo of our own commands from
//! re-triggering: a command changes the hub, the hub sends a new
//! snapshot, the snapshot is projected, and any command the projection
//! round-trip would re-issue now compares equal against the snapshot.
//!
//! Guards compare against the *live entity snapshot*, not against the
//! bridge's own last-written cluster values — the cluster state may be
//! quantized and would make the comparison lie.

mod color;
mod temperature;
mod thermostat;

pub use color::{ColorBridge, ColorBridgeConfig};
pub use temperature::{TemperatureBridge, TemperatureSensorConfig};
pub use thermostat::ThermostatBridge;
