// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the bridge.
//!
//! This module provides the typed representations that sit between the
//! hub's loosely typed attribute maps and the cluster's range-constrained
//! attributes.
//!
//! # Types
//!
//! - [`ColorValue`] - Normalized internal color (hue 0-360, saturation 0-100)
//! - [`TemperatureUnit`] - Hub-side unit of measurement (°C, °F, K)
//! - [`HvacMode`] - Hub-side climate operating mode
//! - [`HvacAction`] - Hub-side climate activity (what the device is doing now)

mod color_value;
mod hvac;
mod temperature;

pub use color_value::ColorValue;
pub use hvac::{HvacAction, HvacMode};
pub use temperature::TemperatureUnit;
