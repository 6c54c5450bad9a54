// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature unit of measurement.

use std::fmt;

/// Unit of measurement for hub-side temperatures.
///
/// The hub reports its unit as a string token (`"°C"`, `"F"`, `"K"`, ...).
/// [`TemperatureUnit::parse`] recognizes the tokens the hub uses; an empty
/// token is treated as Celsius, and anything else is unrecognized.
///
/// # Examples
///
/// ```
/// use matterlink_lib::types::TemperatureUnit;
///
/// assert_eq!(TemperatureUnit::parse("°F"), Some(TemperatureUnit::Fahrenheit));
/// assert_eq!(TemperatureUnit::parse(""), Some(TemperatureUnit::Celsius));
/// assert_eq!(TemperatureUnit::parse("R"), None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum TemperatureUnit {
    /// Degrees Celsius. Also the fallback when the hub reports no unit.
    #[default]
    Celsius,
    /// Degrees Fahrenheit.
    Fahrenheit,
    /// Kelvin.
    Kelvin,
}

impl TemperatureUnit {
    /// Parses a hub unit token.
    ///
    /// Recognized tokens: `°C`/`C`/`""` (Celsius), `°F`/`F` (Fahrenheit),
    /// `°K`/`K` (Kelvin). Returns `None` for anything else.
    #[must_use]
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "°C" | "C" | "" => Some(Self::Celsius),
            "°F" | "F" => Some(Self::Fahrenheit),
            "°K" | "K" => Some(Self::Kelvin),
            _ => None,
        }
    }

    /// Returns the canonical hub token for this unit.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
