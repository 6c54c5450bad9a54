// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Persisted bridge configuration and its migration boundary.
//!
//! Stored records carry a schema version. Every record entering the
//! store is migrated to the current version first, one registered step at
//! a time, so everything behind the boundary only ever sees
//! current-version payloads.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Error, MigrationError, Result};

/// A persisted bridge configuration record.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BridgeRecord {
    /// Stable identifier of the bridge.
    pub id: Uuid,
    /// Schema version of `data`.
    pub version: u32,
    /// Human-readable bridge name.
    pub name: String,
    /// Port the bridge is commissioned on.
    pub port: u16,
    /// When the bridge was first created.
    pub created_at: DateTime<Utc>,
    /// Version-dependent configuration payload.
    pub data: Value,
}

impl BridgeRecord {
    /// Creates a record at the given schema version with a fresh ID.
    #[must_use]
    pub fn new(version: u32, name: impl Into<String>, port: u16, data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            version,
            name: name.into(),
            port,
            created_at: Utc::now(),
            data,
        }
    }
}

type MigrationStep = Box<dyn Fn(&mut BridgeRecord) -> Result<()> + Send + Sync>;

/// Ordered set of migration steps, keyed by the version they apply to.
///
/// A step registered for version `n` transforms a record *at* version `n`
/// and must leave it at a strictly higher version. Migration runs steps
/// repeatedly until no step matches the record's version, so a chain may
/// skip versions or bring several generations forward in sequence.
#[derive(Default)]
pub struct MigrationChain {
    steps: BTreeMap<u32, MigrationStep>,
}

impl MigrationChain {
    /// Creates an empty chain. Migrating through it is a no-op.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a step for records at `version` (builder style).
    ///
    /// The step must bump `record.version`; a step that leaves the
    /// version unchanged or lowers it fails the whole migration.
    #[must_use]
    pub fn with_step<F>(mut self, version: u32, step: F) -> Self
    where
        F: Fn(&mut BridgeRecord) -> Result<()> + Send + Sync + 'static,
    {
        self.steps.insert(version, Box::new(step));
        self
    }

    /// The version records end up at after a full migration.
    ///
    /// `None` for an empty chain.
    #[must_use]
    pub fn latest_version(&self) -> Option<u32> {
        // The last step's target is whatever it bumps to; all we know
        // statically is the highest version a step still applies to.
        self.steps.keys().max().map(|v| v + 1)
    }

    /// Migrates a record up to the current version.
    ///
    /// # Errors
    ///
    /// Returns [`MigrationError::NotMonotonic`] if a step does not
    /// increase the record's version, or the step's own error if it
    /// fails.
    pub fn migrate(&self, record: &mut BridgeRecord) -> Result<()> {
        while let Some(step) = self.steps.get(&record.version) {
            let from = record.version;
            step(record)?;
            if record.version <= from {
                return Err(MigrationError::NotMonotonic {
                    from,
                    to: record.version,
                }
                .into());
            }
            debug!(bridge = %record.id, from, to = record.version, "migrated bridge record");
        }
        Ok(())
    }
}

/// In-memory store of bridge records with migrate-on-add semantics.
pub struct BridgeStore {
    migrations: MigrationChain,
    records: Arc<RwLock<HashMap<Uuid, BridgeRecord>>>,
}

impl BridgeStore {
    /// Creates an empty store using the given migration chain.
    #[must_use]
    pub fn new(migrations: MigrationChain) -> Self {
        Self {
            migrations,
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Adds a record, migrating it to the current version first.
    ///
    /// A record that fails migration is not stored.
    ///
    /// # Errors
    ///
    /// Returns the migration error of the failing step.
    pub fn add(&self, mut record: BridgeRecord) -> Result<Uuid> {
        self.migrations.migrate(&mut record)?;
        let id = record.id;
        self.records.write().insert(id, record);
        Ok(id)
    }

    /// Looks up a record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BridgeNotFound`] for an unknown ID.
    pub fn get(&self, id: Uuid) -> Result<BridgeRecord> {
        self.records
            .read()
            .get(&id)
            .cloned()
            .ok_or(Error::BridgeNotFound)
    }

    /// Removes a record by ID.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BridgeNotFound`] for an unknown ID.
    pub fn remove(&self, id: Uuid) -> Result<BridgeRecord> {
        self.records.write().remove(&id).ok_or(Error::BridgeNotFound)
    }

    /// All stored records, ordered by creation time.
    #[must_use]
    pub fn list(&self) -> Vec<BridgeRecord> {
        let mut records: Vec<_> = self.records.read().values().cloned().collect();
        records.sort_by_key(|r| r.created_at);
        records
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }
}
