// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reactive sync runtime.
//!
//! Each bound device gets one [`SyncRuntime`] driving one
//! [`DeviceHandler`]. Entity-change notifications and protocol-side
//! commands arrive as discrete [`BridgeEvent`]s on a single channel and
//! are processed strictly in order: a handler body runs to completion
//! before the next event is dispatched, so no locking is needed inside
//! the handlers. The only suspension point is the outbound action call
//! toward the hub, which is fire-and-forget — the runtime never blocks
//! waiting for the hub-side echo; the translators' guard logic tolerates
//! it instead.

mod observers;

pub use observers::{ObserverRegistry, SubscriptionId};

use tokio::sync::mpsc;
use tracing::{trace, warn};

use crate::cluster::{SetpointMode, SystemMode, WatchedAttribute};
use crate::entity::EntityState;
use crate::error::ActionError;

/// Default event channel capacity per device.
const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// A discrete event delivered to a device's sync runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum BridgeEvent {
    /// The hub delivered a new full entity snapshot.
    EntityChanged(EntityState),
    /// A protocol client invoked a command or wrote a watched attribute.
    Command(ClusterCommand),
}

/// A protocol-side command or attribute-write intent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterCommand {
    /// `moveToHue` on the color-control cluster.
    MoveToHue {
        /// Target hue, 0-254.
        hue: u8,
    },
    /// `moveToSaturation` on the color-control cluster.
    MoveToSaturation {
        /// Target saturation, 0-254.
        saturation: u8,
    },
    /// `moveToHueAndSaturation` on the color-control cluster.
    MoveToHueAndSaturation {
        /// Target hue, 0-254.
        hue: u8,
        /// Target saturation, 0-254.
        saturation: u8,
    },
    /// `moveToColorTemperature` on the color-control cluster.
    MoveToColorTemperature {
        /// Target color temperature in mireds.
        mireds: u16,
    },
    /// `setpointRaiseLower` on the thermostat cluster.
    SetpointRaiseLower {
        /// Which setpoint(s) to adjust.
        mode: SetpointMode,
        /// Adjustment in tenths of the adjustment unit.
        amount: i8,
    },
    /// A write to a watched cluster attribute.
    AttributeWritten(AttributeWrite),
}

/// A protocol-side write to a watched attribute, with its new value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeWrite {
    /// `systemMode` was written.
    SystemMode(SystemMode),
    /// `occupiedHeatingSetpoint` was written (centi-Celsius).
    OccupiedHeatingSetpoint(i16),
    /// `occupiedCoolingSetpoint` was written (centi-Celsius).
    OccupiedCoolingSetpoint(i16),
}

impl AttributeWrite {
    /// The attribute this write targets.
    #[must_use]
    pub const fn attribute(&self) -> WatchedAttribute {
        match self {
            Self::SystemMode(_) => WatchedAttribute::SystemMode,
            Self::OccupiedHeatingSetpoint(_) => WatchedAttribute::OccupiedHeatingSetpoint,
            Self::OccupiedCoolingSetpoint(_) => WatchedAttribute::OccupiedCoolingSetpoint,
        }
    }
}

/// A device-class handler driven by a [`SyncRuntime`].
///
/// Implemented by the per-class bridges. `entity_changed` is synchronous
/// on purpose: projection never suspends. Only command translation may
/// await, and only for the outbound action call.
#[allow(async_fn_in_trait)]
pub trait DeviceHandler {
    /// Applies a new entity snapshot to the cluster state.
    fn entity_changed(&mut self, snapshot: &EntityState);

    /// Translates a protocol-side command into hub actions.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if an outbound hub call fails. The runtime
    /// logs and drops the error; there are no retries.
    async fn handle_command(&mut self, command: ClusterCommand) -> Result<(), ActionError>;

    /// The writable attributes this device class watches.
    ///
    /// Attribute writes for anything else are dropped before dispatch.
    fn watched_attributes(&self) -> &[WatchedAttribute];
}

/// Sequential event loop for one bound device.
///
/// # Examples
///
/// ```no_run
/// use matterlink_lib::sync::SyncRuntime;
/// # async fn example(bridge: impl matterlink_lib::sync::DeviceHandler) {
/// let (events, runtime) = SyncRuntime::channel(bridge);
///
/// // The hub transport forwards snapshots into the channel:
/// // events.send(BridgeEvent::EntityChanged(snapshot)).await;
/// let bridge = runtime.run().await;
/// # }
/// ```
pub struct SyncRuntime<D> {
    events: mpsc::Receiver<BridgeEvent>,
    handler: D,
}

impl<D: DeviceHandler> SyncRuntime<D> {
    /// Creates a runtime with its event sender, using the default
    /// channel capacity.
    #[must_use]
    pub fn channel(handler: D) -> (mpsc::Sender<BridgeEvent>, Self) {
        Self::channel_with_capacity(handler, DEFAULT_CHANNEL_CAPACITY)
    }

    /// Creates a runtime with the given channel capacity.
    #[must_use]
    pub fn channel_with_capacity(handler: D, capacity: usize) -> (mpsc::Sender<BridgeEvent>, Self) {
        let (tx, rx) = mpsc::channel(capacity);
        (tx, Self { events: rx, handler })
    }

    /// Returns the handler, consuming the runtime.
    #[must_use]
    pub fn into_handler(self) -> D {
        self.handler
    }

    /// Drains events until all senders are dropped.
    ///
    /// Events are handled one at a time; a handler body always runs to
    /// completion before the next event is dequeued.
    pub async fn run(mut self) -> D {
        while let Some(event) = self.events.recv().await {
            self.dispatch(event).await;
        }
        self.handler
    }

    async fn dispatch(&mut self, event: BridgeEvent) {
        match event {
            BridgeEvent::EntityChanged(snapshot) => {
                self.handler.entity_changed(&snapshot);
            }
            BridgeEvent::Command(command) => {
                if let ClusterCommand::AttributeWritten(write) = &command
                    && !self.handler.watched_attributes().contains(&write.attribute())
                {
                    trace!(?write, "dropping write to unwatched attribute");
                    return;
                }
                if let Err(err) = self.handler.handle_command(command).await {
                    // Not retried: the next entity change re-derives
                    // the desired state from the latest snapshot.
                    warn!(%err, "hub action failed");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Recorder {
        snapshots: Vec<String>,
        commands: Vec<ClusterCommand>,
        watched: Vec<WatchedAttribute>,
    }

    impl DeviceHandler for Recorder {
        fn entity_changed(&mut self, snapshot: &EntityState) {
            self.snapshots.push(snapshot.state.clone());
        }

        async fn handle_command(&mut self, command: ClusterCommand) -> Result<(), ActionError> {
            self.commands.push(command);
            Ok(())
        }

        fn watched_attributes(&self) -> &[WatchedAttribute] {
            &self.watched
        }
    }

    fn recorder(watched: Vec<WatchedAttribute>) -> Recorder {
        Recorder {
            snapshots: Vec::new(),
            commands: Vec::new(),
            watched,
        }
    }

    #[tokio::test]
    async fn events_are_dispatched_in_order() {
        let (tx, runtime) = SyncRuntime::channel(recorder(vec![]));

        tx.send(BridgeEvent::EntityChanged(EntityState::new("light.a", "on")))
            .await
            .unwrap();
        tx.send(BridgeEvent::Command(ClusterCommand::MoveToHue { hue: 10 }))
            .await
            .unwrap();
        tx.send(BridgeEvent::EntityChanged(EntityState::new("light.a", "off")))
            .await
            .unwrap();
        drop(tx);

        let handler = runtime.run().await;
        assert_eq!(handler.snapshots, vec!["on", "off"]);
        assert_eq!(handler.commands, vec![ClusterCommand::MoveToHue { hue: 10 }]);
    }

    #[tokio::test]
    async fn unwatched_attribute_writes_are_dropped() {
        let (tx, runtime) =
            SyncRuntime::channel(recorder(vec![WatchedAttribute::OccupiedHeatingSetpoint]));

        tx.send(BridgeEvent::Command(ClusterCommand::AttributeWritten(
            AttributeWrite::SystemMode(SystemMode::Heat),
        )))
        .await
        .unwrap();
        tx.send(BridgeEvent::Command(ClusterCommand::AttributeWritten(
            AttributeWrite::OccupiedHeatingSetpoint(2100),
        )))
        .await
        .unwrap();
        drop(tx);

        let handler = runtime.run().await;
        assert_eq!(
            handler.commands,
            vec![ClusterCommand::AttributeWritten(
                AttributeWrite::OccupiedHeatingSetpoint(2100)
            )]
        );
    }
}
