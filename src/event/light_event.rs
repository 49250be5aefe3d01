// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Light event types.

use crate::types::{LightId, LightState};

/// Events emitted by a light session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LightEvent {
    /// The first device list seeded an empty registry.
    LightsDiscovered {
        /// Number of lights now known.
        count: usize,
    },

    /// A later device list was merged into the registry.
    StateRefreshed {
        /// Number of lights whose state changed.
        updated: usize,
    },

    /// The device list could not be fetched; the registry is unchanged.
    RefreshFailed,

    /// The service acknowledged a state change.
    StateConfirmed {
        /// Target light.
        id: LightId,
        /// State now held by the registry.
        state: LightState,
    },

    /// A state change was not acknowledged; the registry is unchanged.
    ToggleRejected {
        /// Target light.
        id: LightId,
        /// State that was requested.
        requested: LightState,
    },

    /// A light was renamed locally.
    Renamed {
        /// Target light.
        id: LightId,
        /// New display name.
        name: String,
    },

    /// The registry was cleared because the endpoint changed.
    RegistryReset,
}

impl LightEvent {
    /// Returns the light this event concerns, if it concerns a single one.
    #[must_use]
    pub fn light_id(&self) -> Option<LightId> {
        match self {
            Self::StateConfirmed { id, .. }
            | Self::ToggleRejected { id, .. }
            | Self::Renamed { id, .. } => Some(*id),
            Self::LightsDiscovered { .. }
            | Self::StateRefreshed { .. }
            | Self::RefreshFailed
            | Self::RegistryReset => None,
        }
    }

    /// Returns `true` for the outcome of a device list request.
    #[must_use]
    pub fn is_refresh(&self) -> bool {
        matches!(
            self,
            Self::LightsDiscovered { .. } | Self::StateRefreshed { .. } | Self::RefreshFailed
        )
    }

    /// Returns `true` for the outcome of a toggle.
    #[must_use]
    pub fn is_toggle(&self) -> bool {
        matches!(
            self,
            Self::StateConfirmed { .. } | Self::ToggleRejected { .. }
        )
    }
}
