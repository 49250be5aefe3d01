// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Issues commands to the device service and classifies their outcome.
//!
//! The dispatcher never touches a [`Registry`](crate::registry::Registry).
//! It returns an outcome the caller applies: a [`ToggleOutcome::Confirmed`]
//! may be written into the registry, anything else must leave it as is.
//!
//! Without an endpoint nothing is sent and no outcome is produced.

use crate::command::{ListDevicesCommand, SwitchCommand};
use crate::error::{Error, ProtocolError};
use crate::protocol::Transport;
use crate::response::{DeviceSnapshot, parse_device_list};
use crate::types::{Endpoint, LightId, LightState};

/// Result of a toggle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The service acknowledged with status 200.
    Confirmed {
        /// Target light.
        id: LightId,
        /// State the registry may now adopt.
        state: LightState,
    },
    /// Non-200 status or transport failure.
    Rejected {
        /// Target light.
        id: LightId,
    },
}

impl ToggleOutcome {
    /// Returns the target light.
    #[must_use]
    pub fn id(&self) -> LightId {
        match self {
            Self::Confirmed { id, .. } | Self::Rejected { id } => *id,
        }
    }

    /// Returns `true` if the change was acknowledged.
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed { .. })
    }
}

/// Result of a device list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The service returned a device list.
    Snapshots(Vec<DeviceSnapshot>),
    /// Non-200 status, transport failure or unreadable body.
    Failed,
}

/// Sends toggle and refresh commands through a [`Transport`].
///
/// # Examples
///
/// ```no_run
/// use lampgrid::dispatcher::{Dispatcher, ToggleOutcome};
/// use lampgrid::protocol::HttpClient;
/// use lampgrid::types::{Endpoint, LightId, LightState};
///
/// # async fn example() -> lampgrid::Result<()> {
/// let dispatcher = Dispatcher::new(HttpClient::new()?);
/// let endpoint = Endpoint::parse("localhost:3000")?;
///
/// match dispatcher.toggle(Some(&endpoint), LightId::new(5), LightState::On).await {
///     Some(ToggleOutcome::Confirmed { id, state }) => println!("{id} is now {state}"),
///     Some(ToggleOutcome::Rejected { id }) => println!("{id} did not change"),
///     None => {}
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Dispatcher<T> {
    transport: T,
}

impl<T: Transport> Dispatcher<T> {
    /// Creates a dispatcher over the given transport.
    #[must_use]
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Returns the underlying transport.
    #[must_use]
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Requests that light `id` switch to `requested`.
    ///
    /// Returns `None` when `endpoint` is `None`. Failures are logged and
    /// reported as [`ToggleOutcome::Rejected`]; there is no retry.
    pub async fn toggle(
        &self,
        endpoint: Option<&Endpoint>,
        id: LightId,
        requested: LightState,
    ) -> Option<ToggleOutcome> {
        let endpoint = endpoint?;
        let command = SwitchCommand::new(id, requested);

        let outcome = match self.transport.send(endpoint, &command).await {
            Ok(response) if response.is_ok() => ToggleOutcome::Confirmed {
                id,
                state: requested,
            },
            Ok(response) => {
                tracing::warn!(
                    light = %id,
                    requested = %requested,
                    status = response.status(),
                    "Toggle rejected by device service"
                );
                ToggleOutcome::Rejected { id }
            }
            Err(e) => {
                tracing::warn!(
                    light = %id,
                    requested = %requested,
                    error = %e,
                    "Toggle request failed"
                );
                ToggleOutcome::Rejected { id }
            }
        };

        Some(outcome)
    }

    /// Fetches the current device list.
    ///
    /// Returns `None` when `endpoint` is `None`. Failures are logged and
    /// reported as [`RefreshOutcome::Failed`].
    pub async fn refresh(&self, endpoint: Option<&Endpoint>) -> Option<RefreshOutcome> {
        let endpoint = endpoint?;

        let outcome = match self.fetch_devices(endpoint).await {
            Ok(snapshots) => {
                tracing::debug!(count = snapshots.len(), "Fetched device list");
                RefreshOutcome::Snapshots(snapshots)
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %e, "Device list refresh failed");
                RefreshOutcome::Failed
            }
        };

        Some(outcome)
    }

    async fn fetch_devices(&self, endpoint: &Endpoint) -> Result<Vec<DeviceSnapshot>, Error> {
        let response = self.transport.send(endpoint, &ListDevicesCommand).await?;

        if !response.is_ok() {
            return Err(ProtocolError::UnexpectedStatus(response.status()).into());
        }

        Ok(parse_device_list(response.body())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::Method;
    use crate::test_utils::ScriptedTransport;

    fn endpoint() -> Endpoint {
        Endpoint::parse("localhost:3000").unwrap()
    }

    #[tokio::test]
    async fn toggle_confirmed_on_200() {
        let dispatcher =
            Dispatcher::new(ScriptedTransport::new().respond("/devices/5/on", 200, ""));

        let outcome = dispatcher
            .toggle(Some(&endpoint()), LightId::new(5), LightState::On)
            .await;

        assert_eq!(
            outcome,
            Some(ToggleOutcome::Confirmed {
                id: LightId::new(5),
                state: LightState::On
            })
        );
        assert_eq!(
            dispatcher.transport().requests(),
            vec![(Method::Put, "/devices/5/on".to_string())]
        );
    }

    #[tokio::test]
    async fn toggle_rejected_on_500() {
        let dispatcher =
            Dispatcher::new(ScriptedTransport::new().respond("/devices/5/off", 500, "boom"));

        let outcome = dispatcher
            .toggle(Some(&endpoint()), LightId::new(5), LightState::Off)
            .await;

        assert_eq!(outcome, Some(ToggleOutcome::Rejected { id: LightId::new(5) }));
    }

    #[tokio::test]
    async fn toggle_rejected_on_other_success_codes() {
        let dispatcher =
            Dispatcher::new(ScriptedTransport::new().respond("/devices/1/on", 204, ""));

        let outcome = dispatcher
            .toggle(Some(&endpoint()), LightId::new(1), LightState::On)
            .await
            .unwrap();

        assert!(!outcome.is_confirmed());
    }

    #[tokio::test]
    async fn toggle_rejected_on_transport_failure() {
        let dispatcher = Dispatcher::new(ScriptedTransport::new());

        let outcome = dispatcher
            .toggle(Some(&endpoint()), LightId::new(2), LightState::On)
            .await;

        assert_eq!(outcome, Some(ToggleOutcome::Rejected { id: LightId::new(2) }));
    }

    #[tokio::test]
    async fn toggle_without_endpoint_sends_nothing() {
        let dispatcher = Dispatcher::new(ScriptedTransport::new());

        let outcome = dispatcher.toggle(None, LightId::new(2), LightState::On).await;

        assert!(outcome.is_none());
        assert!(dispatcher.transport().requests().is_empty());
    }

    #[tokio::test]
    async fn refresh_returns_snapshots() {
        let dispatcher = Dispatcher::new(ScriptedTransport::new().respond(
            "/devices",
            200,
            r#"[{"id": 1, "value": true}, {"id": 2, "value": false}]"#,
        ));

        let outcome = dispatcher.refresh(Some(&endpoint())).await;

        assert_eq!(
            outcome,
            Some(RefreshOutcome::Snapshots(vec![
                DeviceSnapshot::new(1, true),
                DeviceSnapshot::new(2, false),
            ]))
        );
        assert_eq!(
            dispatcher.transport().requests(),
            vec![(Method::Get, "/devices".to_string())]
        );
    }

    #[tokio::test]
    async fn refresh_fails_on_bad_status() {
        let dispatcher =
            Dispatcher::new(ScriptedTransport::new().respond("/devices", 503, "[]"));

        assert_eq!(
            dispatcher.refresh(Some(&endpoint())).await,
            Some(RefreshOutcome::Failed)
        );
    }

    #[tokio::test]
    async fn refresh_fails_on_bad_body() {
        let dispatcher =
            Dispatcher::new(ScriptedTransport::new().respond("/devices", 200, "not json"));

        assert_eq!(
            dispatcher.refresh(Some(&endpoint())).await,
            Some(RefreshOutcome::Failed)
        );
    }

    #[tokio::test]
    async fn refresh_fails_on_transport_failure() {
        let dispatcher = Dispatcher::new(ScriptedTransport::new());

        assert_eq!(
            dispatcher.refresh(Some(&endpoint())).await,
            Some(RefreshOutcome::Failed)
        );
    }

    #[tokio::test]
    async fn refresh_without_endpoint_sends_nothing() {
        let dispatcher = Dispatcher::new(ScriptedTransport::new());

        assert!(dispatcher.refresh(None).await.is_none());
        assert!(dispatcher.transport().requests().is_empty());
    }

    #[test]
    fn outcome_accessors() {
        let confirmed = ToggleOutcome::Confirmed {
            id: LightId::new(3),
            state: LightState::Off,
        };
        assert_eq!(confirmed.id(), LightId::new(3));
        assert!(confirmed.is_confirmed());
        assert!(!ToggleOutcome::Rejected { id: LightId::new(3) }.is_confirmed());
    }
}
