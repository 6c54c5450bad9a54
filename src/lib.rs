// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `MatterLink` Lib - A Rust library bridging smart-home hub entities to
//! Matter-style cluster attributes.
//!
//! The hub delivers loosely typed entity snapshots; protocol clients
//! expect typed cluster attribute state and send typed commands back.
//! This library does the translation in both directions, per device
//! class:
//!
//! - **Color lights**: hue/saturation and color temperature, with the
//!   hub's color formats (HS, RGB, RGBW, RGBWW, CIE xy) funneled through
//!   a single color model
//! - **Thermostats**: modes, running state, setpoints and limits in the
//!   cluster's centi-Celsius encoding, whatever unit the hub displays
//! - **Temperature sensors**: plain readings with unit normalization
//!
//! Each bound device resolves its feature set once, projects every
//! entity snapshot into an atomic cluster-state patch, and translates
//! cluster commands into hub action calls. Command translation is
//! guarded: a command whose target the live entity snapshot already
//! reports is suppressed, which keeps the echo of our own actions from
//! bouncing back and forth.
//!
//! # Quick Start
//!
//! ```
//! use matterlink_lib::bridge::{ColorBridge, ColorBridgeConfig};
//! use matterlink_lib::entity::{ActionCall, EntityState, HubGateway};
//! use matterlink_lib::error::ActionError;
//! use matterlink_lib::features::ColorFeatures;
//! use serde_json::json;
//!
//! struct Gateway;
//!
//! impl HubGateway for Gateway {
//!     async fn call_action(&self, call: ActionCall) -> Result<(), ActionError> {
//!         // forward to the hub's API
//!         Ok(())
//!     }
//! }
//!
//! let initial = EntityState::new("light.kitchen", "on")
//!     .with_attribute("hs_color", json!([120.0, 50.0]));
//! let bridge = ColorBridge::bind(
//!     Gateway,
//!     ColorFeatures::full_color(),
//!     ColorBridgeConfig::default(),
//!     initial,
//! );
//! assert_eq!(bridge.state().current_hue, 85);
//! ```
//!
//! # Driving a device
//!
//! Wrap a bridge in a [`sync::SyncRuntime`] to process entity changes
//! and protocol commands sequentially from one channel:
//!
//! ```no_run
//! use matterlink_lib::sync::SyncRuntime;
//! # async fn drive(bridge: impl matterlink_lib::sync::DeviceHandler) {
//! let (events, runtime) = SyncRuntime::channel(bridge);
//! // The hub transport forwards snapshots and commands into `events`;
//! // the loop handles them in order and hands the bridge back once
//! // every sender is dropped.
//! let bridge = runtime.run().await;
//! # }
//! ```

pub mod bridge;
pub mod cluster;
pub mod convert;
pub mod entity;
pub mod error;
pub mod features;
pub mod storage;
pub mod sync;
pub mod types;

pub use bridge::{
    ColorBridge, ColorBridgeConfig, TemperatureBridge, TemperatureSensorConfig, ThermostatBridge,
};
pub use entity::{ActionCall, EntityState, HubConfig, HubGateway};
pub use error::{ActionError, Error, MigrationError, Result, ValueError};
pub use features::{ColorFeatures, ThermostatFeatures};
pub use storage::{BridgeRecord, BridgeStore, MigrationChain};
pub use sync::{BridgeEvent, ClusterCommand, DeviceHandler, SyncRuntime};
pub use types::{ColorValue, HvacAction, HvacMode, TemperatureUnit};
