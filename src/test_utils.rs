// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! In-memory transport for unit tests.

use std::collections::HashMap;
use std::time::Duration;

use parking_lot::Mutex;

use crate::command::{Command, Method};
use crate::error::ProtocolError;
use crate::protocol::{CommandResponse, Transport};
use crate::types::Endpoint;

#[derive(Debug, Clone)]
struct Scripted {
    response: CommandResponse,
    delay: Duration,
}

/// Answers by request path, optionally after a delay.
///
/// Paths without a scripted answer fail as if the service were unreachable.
#[derive(Debug, Default)]
pub(crate) struct ScriptedTransport {
    responses: HashMap<String, Scripted>,
    requests: Mutex<Vec<(Method, String)>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(self, path: &str, status: u16, body: &str) -> Self {
        self.respond_after(path, status, body, Duration::ZERO)
    }

    pub(crate) fn respond_after(
        mut self,
        path: &str,
        status: u16,
        body: &str,
        delay: Duration,
    ) -> Self {
        self.responses.insert(
            path.to_string(),
            Scripted {
                response: CommandResponse::new(status, body),
                delay,
            },
        );
        self
    }

    /// Requests received so far, in arrival order.
    pub(crate) fn requests(&self) -> Vec<(Method, String)> {
        self.requests.lock().clone()
    }
}

impl Transport for ScriptedTransport {
    async fn send<C: Command + Sync>(
        &self,
        endpoint: &Endpoint,
        command: &C,
    ) -> Result<CommandResponse, ProtocolError> {
        let path = command.path();
        self.requests.lock().push((command.method(), path.clone()));

        let scripted = self
            .responses
            .get(&path)
            .cloned()
            .ok_or_else(|| ProtocolError::ConnectionFailed(endpoint.url(&path)))?;

        if !scripted.delay.is_zero() {
            tokio::time::sleep(scripted.delay).await;
        }

        Ok(scripted.response)
    }
}
