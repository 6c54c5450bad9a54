// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Hub-wide configuration shared across bound devices.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::types::TemperatureUnit;

/// Hub-wide settings read by the bridges on every projection.
///
/// Cheap to clone; all clones share the same storage, so the embedder
/// keeps one handle to push hub configuration updates while each bridge
/// holds its own.
///
/// # Examples
///
/// ```
/// use matterlink_lib::entity::HubConfig;
/// use matterlink_lib::types::TemperatureUnit;
///
/// let config = HubConfig::new(TemperatureUnit::Fahrenheit);
/// assert_eq!(config.temperature_unit(), TemperatureUnit::Fahrenheit);
/// config.set_temperature_unit(TemperatureUnit::Celsius);
/// assert_eq!(config.temperature_unit(), TemperatureUnit::Celsius);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HubConfig {
    inner: Arc<RwLock<TemperatureUnit>>,
}

impl HubConfig {
    /// Creates a config with the given temperature display unit.
    #[must_use]
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            inner: Arc::new(RwLock::new(unit)),
        }
    }

    /// The unit the hub reports climate temperatures in.
    #[must_use]
    pub fn temperature_unit(&self) -> TemperatureUnit {
        *self.inner.read()
    }

    /// Updates the hub's temperature unit.
    ///
    /// Each bound bridge notices the change on its next projection and
    /// logs the switch for its own entity.
    pub fn set_temperature_unit(&self, unit: TemperatureUnit) {
        *self.inner.write() = unit;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_celsius() {
        assert_eq!(HubConfig::default().temperature_unit(), TemperatureUnit::Celsius);
    }

    #[test]
    fn clones_share_the_unit() {
        let config = HubConfig::new(TemperatureUnit::Celsius);
        let handle = config.clone();
        handle.set_temperature_unit(TemperatureUnit::Kelvin);
        assert_eq!(config.temperature_unit(), TemperatureUnit::Kelvin);
    }
}
