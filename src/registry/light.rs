// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A single tracked light.

use serde::{Deserialize, Serialize};

use crate::types::{LightId, LightState};

/// A light tracked by the [`Registry`](super::Registry).
///
/// The id is fixed at creation. Name and state are local fields that only
/// the registry operations change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Light {
    id: LightId,
    name: String,
    state: LightState,
}

impl Light {
    /// Creates a light.
    #[must_use]
    pub fn new(id: LightId, name: impl Into<String>, state: LightState) -> Self {
        Self {
            id,
            name: name.into(),
            state,
        }
    }

    /// Returns the server-assigned id.
    #[must_use]
    pub fn id(&self) -> LightId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last confirmed state.
    #[must_use]
    pub fn state(&self) -> LightState {
        self.state
    }

    /// Returns `true` if the light is on.
    #[must_use]
    pub fn is_on(&self) -> bool {
        self.state.is_on()
    }

    pub(super) fn with_name(&self, name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..self.clone()
        }
    }

    pub(super) fn with_state(&self, state: LightState) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }
}
