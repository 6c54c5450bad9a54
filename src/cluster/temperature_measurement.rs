// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Temperature-measurement cluster attribute state.

/// Attribute state of a temperature sensor.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TemperatureMeasurementState {
    /// Measured temperature in centi-Celsius; null when no reading is
    /// available. There is no stale retention: a projection without a
    /// reading resets this to null.
    pub measured_value: Option<i16>,
}

/// An atomic patch of [`TemperatureMeasurementState`].
///
/// Unlike the other patches this one always carries the measured value;
/// `None` means "project null", not "leave untouched".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemperatureMeasurementPatch {
    /// The measured value to project.
    pub measured_value: Option<i16>,
}

impl TemperatureMeasurementPatch {
    /// Applies the patch. Returns `true` if the attribute changed.
    pub fn apply(&self, state: &mut TemperatureMeasurementState) -> bool {
        if state.measured_value == self.measured_value {
            return false;
        }
        state.measured_value = self.measured_value;
        true
    }
}
