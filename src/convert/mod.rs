// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Pure conversion functions between hub-side and cluster-side values.
//!
//! All functions in this module report failure through `Option` rather
//! than errors. Callers treat an absent converted value as "leave the
//! attribute unset / skip this projection", never as a fatal condition.
//!
//! # Modules
//!
//! - [`temperature`] - Celsius/Fahrenheit/Kelvin scalars and the
//!   cluster's integer centi-Celsius encoding
//! - [`color`] - hub color formats, the normalized [`ColorValue`], the
//!   cluster's 0-254 hue/saturation range, and kelvin/mireds
//!
//! [`ColorValue`]: crate::types::ColorValue

pub mod color;
pub mod temperature;
