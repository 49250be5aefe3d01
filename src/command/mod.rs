// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Requests understood by the device service.
//!
//! | Command | Request |
//! |---------|---------|
//! | [`ListDevicesCommand`] | `GET /devices` |
//! | [`SwitchCommand`] | `PUT /devices/{id}/{on\|off}` |
//!
//! # Examples
//!
//! ```
//! use lampgrid::command::{Command, Method, SwitchCommand};
//! use lampgrid::types::{LightId, LightState};
//!
//! let cmd = SwitchCommand::new(LightId::new(5), LightState::On);
//! assert_eq!(cmd.method(), Method::Put);
//! assert_eq!(cmd.path(), "/devices/5/on");
//! ```

mod devices;

use std::fmt;

pub use devices::{ListDevicesCommand, SwitchCommand};

/// HTTP method of a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// `GET`
    Get,
    /// `PUT`
    Put,
}

impl Method {
    /// Returns the method name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that can be sent to the device service.
pub trait Command {
    /// Returns the HTTP method.
    fn method(&self) -> Method;

    /// Returns the request path relative to the endpoint, starting with `/`.
    fn path(&self) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Put.to_string(), "PUT");
    }
}
