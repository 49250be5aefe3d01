// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Transport used to reach the device service.
//!
//! The [`Transport`] trait is the seam between the synchronization core and
//! the network. [`HttpClient`] is the bundled `reqwest` implementation;
//! tests and embedders may supply their own.

#[cfg(feature = "http")]
mod http;

#[cfg(feature = "http")]
pub use http::{HttpClient, HttpClientBuilder};

use crate::command::Command;
use crate::error::ProtocolError;
use crate::types::Endpoint;

/// Raw answer of the device service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResponse {
    status: u16,
    body: String,
}

impl CommandResponse {
    /// Status code the service acknowledges commands with.
    pub const OK: u16 = 200;

    /// Creates a response with the given status and body.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Returns the raw response body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns `true` for status 200 exactly.
    ///
    /// Other 2xx codes are not treated as acknowledgments.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == Self::OK
    }
}

/// Sends commands to the device service at a given endpoint.
#[allow(async_fn_in_trait)]
pub trait Transport {
    /// Sends a command and returns the raw response, whatever its status.
    ///
    /// # Errors
    ///
    /// Returns `ProtocolError` if no response was received.
    async fn send<C: Command + Sync>(
        &self,
        endpoint: &Endpoint,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError>;
}
