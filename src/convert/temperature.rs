// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature unit conversion.
//!
//! Scalar conversion between Celsius, Fahrenheit and Kelvin always pivots
//! through Celsius, so there is a single conversion path per unit pair.
//! No rounding happens at this layer; the only place fractional
//! information is discarded is [`entity_to_cluster_temperature`], which
//! encodes into the cluster's integer centi-Celsius.

use crate::types::TemperatureUnit;

/// Converts a temperature from the given unit to Celsius.
///
/// Returns `None` for non-finite input.
#[must_use]
pub fn to_celsius(value: f64, unit: TemperatureUnit) -> Option<f64> {
    if !value.is_finite() {
        return None;
    }
    Some(match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Fahrenheit => (value - 32.0) * (5.0 / 9.0),
        TemperatureUnit::Kelvin => value - 273.15,
    })
}

/// Converts a temperature in Celsius to the given unit.
///
/// Returns `None` for non-finite input.
#[must_use]
pub fn from_celsius(celsius: f64, unit: TemperatureUnit) -> Option<f64> {
    if !celsius.is_finite() {
        return None;
    }
    Some(match unit {
        TemperatureUnit::Celsius => celsius,
        TemperatureUnit::Fahrenheit => celsius * (9.0 / 5.0) + 32.0,
        TemperatureUnit::Kelvin => celsius + 273.15,
    })
}

/// Converts a temperature between any two supported units.
#[must_use]
pub fn convert_temperature(
    value: f64,
    source: TemperatureUnit,
    target: TemperatureUnit,
) -> Option<f64> {
    to_celsius(value, source).and_then(|celsius| from_celsius(celsius, target))
}

/// Converts a hub-side temperature to the cluster's centi-Celsius encoding.
///
/// The value is converted to Celsius, multiplied by 100 and rounded to
/// the nearest integer. This is the single rounding site for
/// temperatures. Returns `None` when the input is absent, non-finite, or
/// does not fit the cluster's `i16` range.
#[must_use]
pub fn entity_to_cluster_temperature(value: Option<f64>, unit: TemperatureUnit) -> Option<i16> {
    let celsius = to_celsius(value?, unit)?;
    let centi = (celsius * 100.0).round();
    if centi < f64::from(i16::MIN) || centi > f64::from(i16::MAX) {
        return None;
    }
    #[allow(clippy::cast_possible_truncation)]
    Some(centi as i16)
}

/// Converts a cluster-side centi-Celsius value to a hub-side temperature.
///
/// Divides by 100 first, then converts Celsius into the hub's unit.
#[must_use]
pub fn cluster_to_entity_temperature(centi: Option<i16>, unit: TemperatureUnit) -> Option<f64> {
    from_celsius(f64::from(centi?) / 100.0, unit)
}
