// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Binary light state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Represents the state of a light.
///
/// The device service reports state as a boolean and accepts state changes
/// as the path segments `on` and `off`.
///
/// # Examples
///
/// ```
/// use lampgrid::types::LightState;
///
/// assert_eq!(LightState::On.as_str(), "on");
/// assert_eq!(LightState::from(false), LightState::Off);
/// assert_eq!(LightState::On.toggled(), LightState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightState {
    /// Light is off.
    #[default]
    Off,
    /// Light is on.
    On,
}

impl LightState {
    /// Returns the path segment used by the device service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::On => "on",
        }
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Off => Self::On,
            Self::On => Self::Off,
        }
    }

    /// Returns `true` if the light is on.
    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, Self::On)
    }
}

impl fmt::Display for LightState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LightState {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "off" | "0" | "false" => Ok(Self::Off),
            "on" | "1" | "true" => Ok(Self::On),
            _ => Err(ValueError::InvalidLightState(s.to_string())),
        }
    }
}

impl From<bool> for LightState {
    fn from(value: bool) -> Self {
        if value { Self::On } else { Self::Off }
    }
}

impl From<LightState> for bool {
    fn from(state: LightState) -> Self {
        state.is_on()
    }
}
