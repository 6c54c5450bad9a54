// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for the `MatterLink` library.
//!
//! Conversion helpers in this library report failure through `Option`
//! rather than errors (see [`crate::convert`]); the error hierarchy here
//! covers the remaining fallible paths: hub action invocation, value
//! validation, and stored-record migration.

use thiserror::Error;

/// The main error type for this library.
#[derive(Debug, Error)]
pub enum Error {
    /// Error occurred during value validation.
    #[error("value error: {0}")]
    Value(#[from] ValueError),

    /// An outbound hub action call failed.
    #[error("action error: {0}")]
    Action(#[from] ActionError),

    /// A stored bridge record could not be migrated.
    #[error("migration error: {0}")]
    Migration(#[from] MigrationError),

    /// The bridge was not found in the store.
    #[error("bridge not found")]
    BridgeNotFound,
}

/// Errors related to value validation and constraints.
///
/// These errors occur when attempting to create constrained types
/// with invalid values.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValueError {
    /// A hue value is outside the valid range [0, 360).
    #[error("hue value {0} is out of range [0, 360)")]
    InvalidHue(f64),

    /// A saturation value is outside the valid range [0, 100].
    #[error("saturation value {0} is out of range [0, 100]")]
    InvalidSaturation(f64),
}

/// Errors related to outbound action calls toward the hub.
///
/// Action failures are the hub collaborator's concern; the bridge never
/// retries. The next entity-change notification re-derives the desired
/// state from scratch, so a missed command is self-healing.
#[derive(Debug, Error)]
pub enum ActionError {
    /// The hub rejected the action call.
    #[error("hub rejected action '{action}': {reason}")]
    Rejected {
        /// The action name that was invoked.
        action: String,
        /// The hub's rejection reason.
        reason: String,
    },

    /// The hub is unreachable.
    #[error("hub unreachable: {0}")]
    Unreachable(String),
}

/// Errors related to the persisted bridge configuration boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MigrationError {
    /// A migration step reported a version that did not increase.
    ///
    /// Every step must map `version -> version + n` with `n >= 1`,
    /// otherwise the migration loop would never terminate.
    #[error("migration step for version {from} produced non-increasing version {to}")]
    NotMonotonic {
        /// Version before the step ran.
        from: u32,
        /// Version the step reported.
        to: u32,
    },

    /// A migration step failed to transform the stored payload.
    #[error("migration step for version {version} failed: {reason}")]
    StepFailed {
        /// Version the failing step was registered for.
        version: u32,
        /// Description of the failure.
        reason: String,
    },
}

/// A convenient `Result` type alias for this library.
pub type Result<T> = std::result::Result<T, Error>;
