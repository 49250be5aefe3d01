// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device list and switch commands.

use crate::command::{Command, Method};
use crate::types::{LightId, LightState};

/// Lists every device known to the service.
///
/// The service answers with a JSON array of `{"id": number, "value": bool}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListDevicesCommand;

impl Command for ListDevicesCommand {
    fn method(&self) -> Method {
        Method::Get
    }

    fn path(&self) -> String {
        "/devices".to_string()
    }
}

/// Requests a state change for one light.
///
/// The service acknowledges with status 200; the body is ignored.
///
/// # Examples
///
/// ```
/// use lampgrid::command::{Command, SwitchCommand};
/// use lampgrid::types::{LightId, LightState};
///
/// let off = SwitchCommand::off(LightId::new(2));
/// assert_eq!(off.path(), "/devices/2/off");
/// assert_eq!(off.state(), LightState::Off);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCommand {
    id: LightId,
    state: LightState,
}

impl SwitchCommand {
    /// Creates a command setting `id` to `state`.
    #[must_use]
    pub const fn new(id: LightId, state: LightState) -> Self {
        Self { id, state }
    }

    /// Creates a command to turn a light on.
    #[must_use]
    pub const fn on(id: LightId) -> Self {
        Self::new(id, LightState::On)
    }

    /// Creates a command to turn a light off.
    #[must_use]
    pub const fn off(id: LightId) -> Self {
        Self::new(id, LightState::Off)
    }

    /// Returns the target light.
    #[must_use]
    pub const fn id(&self) -> LightId {
        self.id
    }

    /// Returns the requested state.
    #[must_use]
    pub const fn state(&self) -> LightState {
        self.state
    }
}

impl Command for SwitchCommand {
    fn method(&self) -> Method {
        Method::Put
    }

    fn path(&self) -> String {
        format!("/devices/{}/{}", self.id, self.state.as_str())
    }
}
