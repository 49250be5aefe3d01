// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device list response parsing.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::types::{LightId, LightState};

/// Point-in-time state of one device as reported by the service.
///
/// # Examples
///
/// ```
/// use lampgrid::response::DeviceSnapshot;
/// use lampgrid::types::{LightId, LightState};
///
/// let json = r#"{"id": 4, "value": true}"#;
/// let snapshot: DeviceSnapshot = serde_json::from_str(json).unwrap();
/// assert_eq!(snapshot.id, LightId::new(4));
/// assert_eq!(snapshot.state(), LightState::On);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceSnapshot {
    /// Server-assigned id.
    pub id: LightId,
    /// `true` when the device is on.
    pub value: bool,
}

impl DeviceSnapshot {
    /// Creates a snapshot.
    #[must_use]
    pub fn new(id: i64, value: bool) -> Self {
        Self {
            id: LightId::new(id),
            value,
        }
    }

    /// Returns the reported state.
    #[must_use]
    pub fn state(&self) -> LightState {
        LightState::from(self.value)
    }
}

/// Parses the body of a `GET /devices` response.
///
/// Unknown fields on each entry are ignored.
///
/// # Errors
///
/// Returns `ParseError::Json` if the body is not an array of
/// `{"id": number, "value": bool}` objects.
pub fn parse_device_list(body: &str) -> Result<Vec<DeviceSnapshot>, ParseError> {
    serde_json::from_str(body).map_err(Into::into)
}
