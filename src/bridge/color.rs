// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Color attribute projector and command translator.

use tracing::{debug, trace};

use crate::cluster::{ColorControlPatch, ColorControlState, ColorMode, WatchedAttribute};
use crate::convert::color::{
    self, Rounding, from_cluster_hs, kelvin_to_mireds, mireds_to_kelvin, to_cluster_hs,
    to_entity_hs,
};
use crate::entity::{ActionCall, EntityState, HubGateway, attr};
use crate::error::ActionError;
use crate::features::ColorFeatures;
use crate::sync::{ClusterCommand, DeviceHandler, ObserverRegistry};
use crate::types::ColorValue;

/// Fallback Kelvin bounds when the entity does not report its own.
const DEFAULT_MIN_KELVIN: f64 = 1500.0;
const DEFAULT_MAX_KELVIN: f64 = 8000.0;

/// Per-device configuration of the color bridge.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorBridgeConfig {
    /// Widen the reported min/max color temperature to include the
    /// current value when the entity reports one outside its own bounds.
    /// If the widening inverts the bounds they are swapped.
    pub expand_min_max_temperature: bool,
}

/// Bridges a hub light entity to the color-control cluster.
///
/// # Examples
///
/// ```no_run
/// use matterlink_lib::bridge::{ColorBridge, ColorBridgeConfig};
/// use matterlink_lib::entity::EntityState;
/// use matterlink_lib::features::ColorFeatures;
/// # fn bind(gateway: impl matterlink_lib::entity::HubGateway) {
/// let initial = EntityState::new("light.kitchen", "on");
/// let bridge = ColorBridge::bind(
///     gateway,
///     ColorFeatures::full_color(),
///     ColorBridgeConfig::default(),
///     initial,
/// );
/// # }
/// ```
pub struct ColorBridge<H> {
    gateway: H,
    features: ColorFeatures,
    config: ColorBridgeConfig,
    entity: EntityState,
    state: ColorControlState,
    observers: ObserverRegistry<ColorControlState>,
}

impl<H: HubGateway> ColorBridge<H> {
    /// Binds a light entity, projecting the initial snapshot immediately.
    ///
    /// The feature set is resolved once here and never changes for the
    /// lifetime of the bound device.
    #[must_use]
    pub fn bind(
        gateway: H,
        features: ColorFeatures,
        config: ColorBridgeConfig,
        initial: EntityState,
    ) -> Self {
        let mut bridge = Self {
            gateway,
            features,
            config,
            entity: initial,
            state: ColorControlState::default(),
            observers: ObserverRegistry::new(),
        };
        bridge.refresh();
        bridge
    }

    /// The current cluster attribute state.
    #[must_use]
    pub fn state(&self) -> &ColorControlState {
        &self.state
    }

    /// The resolved feature set of this device.
    #[must_use]
    pub fn features(&self) -> ColorFeatures {
        self.features
    }

    /// Handle for registering cluster-state observers.
    #[must_use]
    pub fn observers(&self) -> ObserverRegistry<ColorControlState> {
        self.observers.clone()
    }

    /// Re-projects the retained snapshot into the cluster state.
    fn refresh(&mut self) {
        let patch = self.project();
        if patch.apply(&mut self.state) {
            self.observers.notify(&self.state);
        }
    }

    fn project(&self) -> ColorControlPatch {
        let current_kelvin = self.entity.number(attr::COLOR_TEMP_KELVIN);
        let mut min_kelvin = self
            .entity
            .number(attr::MIN_COLOR_TEMP_KELVIN)
            .unwrap_or(DEFAULT_MIN_KELVIN);
        let mut max_kelvin = self
            .entity
            .number(attr::MAX_COLOR_TEMP_KELVIN)
            .unwrap_or(DEFAULT_MAX_KELVIN);
        if self.config.expand_min_max_temperature {
            if let Some(kelvin) = current_kelvin {
                min_kelvin = min_kelvin.min(kelvin);
                max_kelvin = max_kelvin.max(kelvin);
            }
            if min_kelvin > max_kelvin {
                std::mem::swap(&mut min_kelvin, &mut max_kelvin);
            }
        }

        let mut patch = ColorControlPatch {
            color_mode: Some(self.cluster_color_mode()),
            ..ColorControlPatch::default()
        };

        if self.features.hue_saturation {
            // "No color available" still projects (0, 0); the attributes
            // are mandatory once the feature is on.
            let (hue, saturation) = self.entity_cluster_hs().unwrap_or((0, 0));
            patch.current_hue = Some(hue);
            patch.current_saturation = Some(saturation);
        }

        if self.features.color_temperature {
            // The kelvin/mireds reciprocal swaps min and max: the
            // physical minimum in mireds comes from the maximum Kelvin.
            let physical_min = mireds_attr(kelvin_to_mireds(max_kelvin, Rounding::Floor));
            let physical_max = mireds_attr(kelvin_to_mireds(min_kelvin, Rounding::Ceil));
            patch.couple_color_temp_to_level_min_mireds = Some(physical_min);
            patch.color_temp_physical_min_mireds = Some(physical_min);
            patch.color_temp_physical_max_mireds = Some(physical_max);
            patch.startup_color_temperature_mireds = Some(mireds_attr(kelvin_to_mireds(
                current_kelvin.unwrap_or(max_kelvin),
                Rounding::None,
            )));
            patch.color_temperature_mireds =
                current_kelvin.map(|kelvin| mireds_attr(kelvin_to_mireds(kelvin, Rounding::None)));
        }

        patch
    }

    /// Derives the cluster color mode from the entity's declared mode and
    /// the resolved feature set.
    fn cluster_color_mode(&self) -> ColorMode {
        match self.entity.text(attr::COLOR_MODE) {
            Some("color_temp") if self.features.color_temperature => {
                ColorMode::ColorTemperatureMireds
            }
            _ if self.features.hue_saturation => ColorMode::HueAndSaturation,
            _ if self.features.color_temperature => ColorMode::ColorTemperatureMireds,
            _ => ColorMode::HueAndSaturation,
        }
    }

    /// Derives the entity's color, trying attributes in fixed precedence
    /// order: explicit hue/saturation, then RGBWW, RGBW, RGB, and finally
    /// XY chromaticity.
    fn entity_color(&self) -> Option<ColorValue> {
        if let Some((hue, saturation)) = self.entity.pair(attr::HS_COLOR) {
            Some(color::from_hs(hue, saturation))
        } else if let Some([r, g, b, cw, ww]) = self.entity.tuple::<5>(attr::RGBWW_COLOR) {
            Some(color::from_rgbww(r, g, b, cw, ww))
        } else if let Some([r, g, b, w]) = self.entity.tuple::<4>(attr::RGBW_COLOR) {
            Some(color::from_rgbw(r, g, b, w))
        } else if let Some([r, g, b]) = self.entity.tuple::<3>(attr::RGB_COLOR) {
            Some(color::from_rgb(r, g, b))
        } else if let Some((x, y)) = self.entity.pair(attr::XY_COLOR) {
            Some(color::from_xy(x, y))
        } else {
            None
        }
    }

    /// The entity's color quantized into cluster hue/saturation, derived
    /// from the live snapshot. Used both for projection and as the guard
    /// baseline for command translation.
    fn entity_cluster_hs(&self) -> Option<(u8, u8)> {
        self.entity_color().map(to_cluster_hs)
    }

    /// `moveToHueAndSaturation`: compares against the hue/saturation
    /// re-derived from the current entity snapshot and suppresses the
    /// action when they match.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn move_to_hue_and_saturation(
        &self,
        hue: u8,
        saturation: u8,
    ) -> Result<(), ActionError> {
        if self.entity_cluster_hs() == Some((hue, saturation)) {
            debug!(
                entity = %self.entity.entity_id,
                hue, saturation, "hue/saturation already current, suppressing action"
            );
            return Ok(());
        }
        let (entity_hue, entity_saturation) = to_entity_hs(from_cluster_hs(hue, saturation));
        self.gateway
            .call_action(ActionCall::turn_on_hs(entity_hue, entity_saturation))
            .await
    }

    /// `moveToHue`: delegates with the saturation currently held in the
    /// cluster state.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn move_to_hue(&self, hue: u8) -> Result<(), ActionError> {
        self.move_to_hue_and_saturation(hue, self.state.current_saturation)
            .await
    }

    /// `moveToSaturation`: delegates with the hue currently held in the
    /// cluster state.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn move_to_saturation(&self, saturation: u8) -> Result<(), ActionError> {
        self.move_to_hue_and_saturation(self.state.current_hue, saturation)
            .await
    }

    /// `moveToColorTemperature`: converts to Kelvin and suppresses the
    /// action when the entity already reports that value.
    ///
    /// # Errors
    ///
    /// Returns `ActionError` if the hub call fails.
    pub async fn move_to_color_temperature(&self, mireds: u16) -> Result<(), ActionError> {
        let kelvin = mireds_to_kelvin(f64::from(mireds));
        if self.entity.number(attr::COLOR_TEMP_KELVIN) == Some(kelvin) {
            debug!(
                entity = %self.entity.entity_id,
                mireds, "color temperature already current, suppressing action"
            );
            return Ok(());
        }
        self.gateway
            .call_action(ActionCall::turn_on_color_temperature(kelvin))
            .await
    }
}

impl<H: HubGateway> DeviceHandler for ColorBridge<H> {
    fn entity_changed(&mut self, snapshot: &EntityState) {
        self.entity = snapshot.clone();
        self.refresh();
    }

    async fn handle_command(&mut self, command: ClusterCommand) -> Result<(), ActionError> {
        match command {
            ClusterCommand::MoveToHue { hue } => self.move_to_hue(hue).await,
            ClusterCommand::MoveToSaturation { saturation } => {
                self.move_to_saturation(saturation).await
            }
            ClusterCommand::MoveToHueAndSaturation { hue, saturation } => {
                self.move_to_hue_and_saturation(hue, saturation).await
            }
            ClusterCommand::MoveToColorTemperature { mireds } => {
                self.move_to_color_temperature(mireds).await
            }
            ClusterCommand::SetpointRaiseLower { .. } | ClusterCommand::AttributeWritten(_) => {
                trace!(?command, "command not applicable to color control");
                Ok(())
            }
        }
    }

    fn watched_attributes(&self) -> &[WatchedAttribute] {
        &[]
    }
}

/// Rounds a bounded mireds value into the attribute encoding.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn mireds_attr(mireds: f64) -> u16 {
    mireds.round() as u16
}
