// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub-side climate mode and action enums.
//!
//! The hub reports climate state as free-form strings. These enums parse
//! the known tokens; unknown tokens parse to `None` and every consumer
//! degrades them to the safest value (`Off` / all-off) rather than
//! propagating an undefined cluster state.

use std::fmt;
use std::str::FromStr;

/// Hub-side climate operating mode (the entity's `state` value).
///
/// # Examples
///
/// ```
/// use matterlink_lib::types::HvacMode;
///
/// let mode: HvacMode = "heat_cool".parse().unwrap();
/// assert_eq!(mode, HvacMode::HeatCool);
/// assert_eq!(mode.as_str(), "heat_cool");
///
/// // Unknown tokens do not parse
/// assert!("defrost".parse::<HvacMode>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacMode {
    /// The device is off.
    Off,
    /// Heating to a single target temperature.
    Heat,
    /// Cooling to a single target temperature.
    Cool,
    /// Maintaining a temperature range (dual setpoint).
    HeatCool,
    /// Automatic operation following a schedule or algorithm.
    Auto,
    /// Dehumidifying.
    Dry,
    /// Circulating air only.
    FanOnly,
}

impl HvacMode {
    /// Returns the hub's string token for this mode.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Heat => "heat",
            Self::Cool => "cool",
            Self::HeatCool => "heat_cool",
            Self::Auto => "auto",
            Self::Dry => "dry",
            Self::FanOnly => "fan_only",
        }
    }
}

impl FromStr for HvacMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "off" => Ok(Self::Off),
            "heat" => Ok(Self::Heat),
            "cool" => Ok(Self::Cool),
            "heat_cool" => Ok(Self::HeatCool),
            "auto" => Ok(Self::Auto),
            "dry" => Ok(Self::Dry),
            "fan_only" => Ok(Self::FanOnly),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HvacMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hub-side climate activity (the `hvac_action` attribute).
///
/// Reports what the device is doing right now, as opposed to
/// [`HvacMode`] which reports what it is configured to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HvacAction {
    /// Warming up before heating.
    Preheating,
    /// Running a defrost cycle.
    Defrosting,
    /// Actively heating.
    Heating,
    /// Actively cooling.
    Cooling,
    /// Actively dehumidifying.
    Drying,
    /// Fan running without heating or cooling.
    Fan,
    /// Powered on but not actively conditioning.
    Idle,
    /// Powered off.
    Off,
}

impl HvacAction {
    /// Returns the hub's string token for this action.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Preheating => "preheating",
            Self::Defrosting => "defrosting",
            Self::Heating => "heating",
            Self::Cooling => "cooling",
            Self::Drying => "drying",
            Self::Fan => "fan",
            Self::Idle => "idle",
            Self::Off => "off",
        }
    }
}

impl FromStr for HvacAction {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preheating" => Ok(Self::Preheating),
            "defrosting" => Ok(Self::Defrosting),
            "heating" => Ok(Self::Heating),
            "cooling" => Ok(Self::Cooling),
            "drying" => Ok(Self::Drying),
            "fan" => Ok(Self::Fan),
            "idle" => Ok(Self::Idle),
            "off" => Ok(Self::Off),
            _ => Err(()),
        }
    }
}

impl fmt::Display for HvacAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_round_trips_through_str() {
        for mode in [
            HvacMode::Off,
            HvacMode::Heat,
            HvacMode::Cool,
            HvacMode::HeatCool,
            HvacMode::Auto,
            HvacMode::Dry,
            HvacMode::FanOnly,
        ] {
            assert_eq!(mode.as_str().parse::<HvacMode>(), Ok(mode));
        }
    }

    #[test]
    fn action_round_trips_through_str() {
        for action in [
            HvacAction::Preheating,
            HvacAction::Defrosting,
            HvacAction::Heating,
            HvacAction::Cooling,
            HvacAction::Drying,
            HvacAction::Fan,
            HvacAction::Idle,
            HvacAction::Off,
        ] {
            assert_eq!(action.as_str().parse::<HvacAction>(), Ok(action));
        }
    }

    #[test]
    fn unknown_tokens_do_not_parse() {
        assert!("unavailable".parse::<HvacMode>().is_err());
        assert!("".parse::<HvacAction>().is_err());
    }
}
