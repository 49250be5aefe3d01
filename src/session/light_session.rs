// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Session holding the endpoint, registry and loading indicator.

use parking_lot::RwLock;
use tokio::sync::{broadcast, watch};

use crate::dispatcher::{Dispatcher, RefreshOutcome, ToggleOutcome};
use crate::event::{EventBus, LightEvent};
use crate::protocol::Transport;
use crate::registry::{Light, Registry};
use crate::types::{Endpoint, LightId, LightState, Locale};

#[cfg(feature = "http")]
use crate::{error::ProtocolError, protocol::HttpClient};

/// What a [`LightSession::refresh`] did to the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshReport {
    /// The registry was empty and has been seeded.
    Initialized {
        /// Number of lights now known.
        count: usize,
    },
    /// Known lights were refreshed.
    Merged {
        /// Number of lights whose state changed.
        updated: usize,
    },
    /// The device list could not be fetched; the registry is unchanged.
    Failed,
    /// The endpoint changed while the request was in flight; the answer was
    /// dropped.
    Discarded,
}

/// Holds the operator's view of the lights behind one endpoint.
///
/// The registry lives in a `watch` channel and is replaced wholesale when a
/// call resolves, so readers always see a complete value. All methods take
/// `&self`: several toggles may be awaited concurrently, each applying its
/// result to whatever registry is current when it resolves.
///
/// No per-light guard exists. Two toggles on the same light both reach the
/// service and the confirmation applied last decides the state.
#[derive(Debug)]
pub struct LightSession<T> {
    dispatcher: Dispatcher<T>,
    endpoint: RwLock<Option<Endpoint>>,
    registry_tx: watch::Sender<Registry>,
    /// Number of refreshes in flight.
    loading_tx: watch::Sender<usize>,
    event_bus: EventBus,
    locale: Locale,
}

#[cfg(feature = "http")]
impl LightSession<HttpClient> {
    /// Creates a session over the bundled HTTP client.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client cannot be created.
    pub fn over_http() -> Result<Self, ProtocolError> {
        Ok(Self::new(HttpClient::new()?))
    }
}

impl<T: Transport> LightSession<T> {
    /// Creates a session without an endpoint and with an empty registry.
    #[must_use]
    pub fn new(transport: T) -> Self {
        let (registry_tx, _) = watch::channel(Registry::new());
        let (loading_tx, _) = watch::channel(0);

        Self {
            dispatcher: Dispatcher::new(transport),
            endpoint: RwLock::new(None),
            registry_tx,
            loading_tx,
            event_bus: EventBus::new(),
            locale: Locale::default(),
        }
    }

    /// Sets the language of default light names.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Sets how many events the bus buffers per subscriber.
    #[must_use]
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_bus = EventBus::with_capacity(capacity);
        self
    }

    /// Starts the session with an endpoint already set.
    #[must_use]
    pub fn with_endpoint(self, endpoint: Endpoint) -> Self {
        *self.endpoint.write() = Some(endpoint);
        self
    }

    // =========================================================================
    // Endpoint
    // =========================================================================

    /// Returns the current endpoint.
    #[must_use]
    pub fn endpoint(&self) -> Option<Endpoint> {
        self.endpoint.read().clone()
    }

    /// Points the session at `endpoint`.
    ///
    /// Lights belong to the service they were discovered on: switching to a
    /// different endpoint clears the registry. Setting the current endpoint
    /// again keeps it. Returns `true` if the registry was cleared.
    pub fn set_endpoint(&self, endpoint: Endpoint) -> bool {
        let previous = self.endpoint.write().replace(endpoint.clone());

        match previous {
            Some(previous) if previous == endpoint => false,
            Some(previous) => {
                tracing::info!(from = %previous, to = %endpoint, "Endpoint changed");
                self.reset_registry()
            }
            None => {
                tracing::info!(endpoint = %endpoint, "Endpoint set");
                self.reset_registry()
            }
        }
    }

    /// Sets the endpoint from raw operator input.
    ///
    /// Empty or unparsable input is ignored and the current endpoint kept.
    /// Returns `true` if the input was accepted.
    pub fn set_host_input(&self, input: &str) -> bool {
        match Endpoint::parse(input) {
            Ok(endpoint) => {
                self.set_endpoint(endpoint);
                true
            }
            Err(e) => {
                tracing::debug!(input, error = %e, "Ignoring host input");
                false
            }
        }
    }

    /// Forgets the endpoint and clears the registry.
    pub fn clear_endpoint(&self) {
        if self.endpoint.write().take().is_some() {
            self.reset_registry();
        }
    }

    fn is_current(&self, endpoint: &Endpoint) -> bool {
        self.endpoint.read().as_ref() == Some(endpoint)
    }

    fn reset_registry(&self) -> bool {
        let cleared = self.registry_tx.send_if_modified(|registry| {
            if registry.is_empty() {
                return false;
            }
            *registry = Registry::new();
            true
        });

        if cleared {
            self.event_bus.publish(LightEvent::RegistryReset);
        }
        cleared
    }

    // =========================================================================
    // Network operations
    // =========================================================================

    /// Fetches the device list and applies it.
    ///
    /// An empty registry is seeded with every reported light; otherwise only
    /// the state of known lights is refreshed. Returns `None` without an
    /// endpoint. On failure the registry is left untouched.
    pub async fn refresh(&self) -> Option<RefreshReport> {
        let endpoint = self.endpoint()?;

        let outcome = {
            let _loading = LoadingGuard::begin(&self.loading_tx);
            self.dispatcher.refresh(Some(&endpoint)).await?
        };

        let snapshots = match outcome {
            RefreshOutcome::Snapshots(snapshots) => snapshots,
            RefreshOutcome::Failed => {
                self.event_bus.publish(LightEvent::RefreshFailed);
                return Some(RefreshReport::Failed);
            }
        };

        if !self.is_current(&endpoint) {
            tracing::debug!(endpoint = %endpoint, "Dropping device list from previous endpoint");
            return Some(RefreshReport::Discarded);
        }

        let mut report = RefreshReport::Failed;
        self.registry_tx.send_if_modified(|registry| {
            let next = registry.sync(&snapshots, self.locale);
            report = if registry.is_empty() {
                RefreshReport::Initialized { count: next.len() }
            } else {
                RefreshReport::Merged {
                    updated: count_state_changes(registry, &next),
                }
            };

            let modified = next != *registry;
            *registry = next;
            modified
        });

        match report {
            RefreshReport::Initialized { count } => {
                tracing::debug!(count, "Registry seeded");
                self.event_bus.publish(LightEvent::LightsDiscovered { count });
            }
            RefreshReport::Merged { updated } => {
                tracing::debug!(updated, "Registry refreshed");
                self.event_bus.publish(LightEvent::StateRefreshed { updated });
            }
            RefreshReport::Failed | RefreshReport::Discarded => {}
        }

        Some(report)
    }

    /// Asks the service to flip the state of light `id`.
    ///
    /// The requested state is the opposite of the state held when the call
    /// starts. Returns `None` without an endpoint or for an unknown id.
    pub async fn toggle(&self, id: LightId) -> Option<ToggleOutcome> {
        let current = self.registry_tx.borrow().get(id).map(Light::state)?;
        self.switch(id, current.toggled()).await
    }

    /// Asks the service to set light `id` to `requested`.
    ///
    /// A confirmed change is written into the registry current at the time
    /// the confirmation arrives, unless the endpoint has changed meanwhile.
    /// A rejected change leaves the registry untouched. Returns `None`
    /// without an endpoint or for an unknown id.
    pub async fn switch(&self, id: LightId, requested: LightState) -> Option<ToggleOutcome> {
        let endpoint = self.endpoint()?;
        if !self.registry_tx.borrow().contains(id) {
            tracing::debug!(light = %id, "Ignoring switch for unknown light");
            return None;
        }

        let outcome = self
            .dispatcher
            .toggle(Some(&endpoint), id, requested)
            .await?;

        match outcome {
            ToggleOutcome::Confirmed { id, state } => {
                if !self.is_current(&endpoint) {
                    tracing::debug!(light = %id, "Dropping confirmation from previous endpoint");
                    return Some(outcome);
                }

                self.registry_tx.send_if_modified(|registry| {
                    let next = registry.apply_confirmed_state(id, state);
                    let modified = next != *registry;
                    *registry = next;
                    modified
                });
                self.event_bus
                    .publish(LightEvent::StateConfirmed { id, state });
            }
            ToggleOutcome::Rejected { id } => {
                self.event_bus
                    .publish(LightEvent::ToggleRejected { id, requested });
            }
        }

        Some(outcome)
    }

    // =========================================================================
    // Local edits
    // =========================================================================

    /// Renames light `id`.
    ///
    /// Empty names and unknown ids are ignored. Returns `true` if the name
    /// changed.
    pub fn rename(&self, id: LightId, name: &str) -> bool {
        let renamed = self.registry_tx.send_if_modified(|registry| {
            let next = registry.rename(id, name);
            let modified = next != *registry;
            *registry = next;
            modified
        });

        if renamed {
            self.event_bus.publish(LightEvent::Renamed {
                id,
                name: name.to_string(),
            });
        }
        renamed
    }

    // =========================================================================
    // Observation
    // =========================================================================

    /// Returns a copy of the current registry.
    #[must_use]
    pub fn registry(&self) -> Registry {
        self.registry_tx.borrow().clone()
    }

    /// Returns a receiver notified whenever the registry is replaced.
    #[must_use]
    pub fn watch_registry(&self) -> watch::Receiver<Registry> {
        self.registry_tx.subscribe()
    }

    /// Returns `true` while a refresh is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        *self.loading_tx.borrow() > 0
    }

    /// Returns a receiver of the number of refreshes in flight.
    ///
    /// Zero means idle.
    #[must_use]
    pub fn watch_loading(&self) -> watch::Receiver<usize> {
        self.loading_tx.subscribe()
    }

    /// Subscribes to session events.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LightEvent> {
        self.event_bus.subscribe()
    }

    /// Returns the language of default light names.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.locale
    }
}

/// Counts one refresh in flight until dropped.
struct LoadingGuard<'a> {
    loading_tx: &'a watch::Sender<usize>,
}

impl<'a> LoadingGuard<'a> {
    fn begin(loading_tx: &'a watch::Sender<usize>) -> Self {
        loading_tx.send_modify(|in_flight| *in_flight += 1);
        Self { loading_tx }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.loading_tx
            .send_modify(|in_flight| *in_flight = in_flight.saturating_sub(1));
    }
}

// Merge keeps size and order, so lights line up pairwise.
fn count_state_changes(before: &Registry, after: &Registry) -> usize {
    before
        .iter()
        .zip(after.iter())
        .filter(|(old, new)| old.state() != new.state())
        .count()
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::command::Method;
    use crate::response::DeviceSnapshot;
    use crate::test_utils::ScriptedTransport;

    const DEVICES: &str = r#"[{"id": 1, "value": true}, {"id": 2, "value": false}]"#;

    fn endpoint() -> Endpoint {
        Endpoint::parse("localhost:3000").unwrap()
    }

    fn session(transport: ScriptedTransport) -> LightSession<ScriptedTransport> {
        LightSession::new(transport).with_endpoint(endpoint())
    }

    async fn seeded(transport: ScriptedTransport) -> LightSession<ScriptedTransport> {
        let session = session(transport.respond("/devices", 200, DEVICES));
        session.refresh().await;
        session
    }

    fn state_of(session: &LightSession<ScriptedTransport>, id: i64) -> LightState {
        session.registry().get(LightId::new(id)).unwrap().state()
    }

    // =========================================================================
    // refresh
    // =========================================================================

    #[tokio::test]
    async fn first_refresh_seeds_registry() {
        let session = session(ScriptedTransport::new().respond("/devices", 200, DEVICES));

        let report = session.refresh().await;

        assert_eq!(report, Some(RefreshReport::Initialized { count: 2 }));
        let registry = session.registry();
        assert_eq!(registry.ids(), vec![LightId::new(1), LightId::new(2)]);
        assert_eq!(registry.get(LightId::new(1)).unwrap().name(), "Lamp 1");
    }

    #[tokio::test]
    async fn refresh_seeds_lights_with_negative_ids() {
        let session = session(ScriptedTransport::new().respond(
            "/devices",
            200,
            r#"[{"id": -1, "value": true}, {"id": 2, "value": false}]"#,
        ));

        let report = session.refresh().await;

        assert_eq!(report, Some(RefreshReport::Initialized { count: 2 }));
        assert_eq!(
            session.registry().ids(),
            vec![LightId::new(-1), LightId::new(2)]
        );
        assert_eq!(state_of(&session, -1), LightState::On);
        assert_eq!(state_of(&session, 2), LightState::Off);
    }

    #[tokio::test]
    async fn later_refresh_merges_without_touching_names() {
        let session = seeded(ScriptedTransport::new()).await;
        session.rename(LightId::new(2), "Hallway");

        let report = session.refresh().await;

        assert_eq!(report, Some(RefreshReport::Merged { updated: 0 }));
        assert_eq!(
            session.registry().get(LightId::new(2)).unwrap().name(),
            "Hallway"
        );
    }

    #[tokio::test]
    async fn refresh_without_endpoint_is_noop() {
        let session = LightSession::new(ScriptedTransport::new());

        assert!(session.refresh().await.is_none());
        assert!(session.dispatcher.transport().requests().is_empty());
        assert!(!session.is_loading());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_registry() {
        let session = session(ScriptedTransport::new().respond("/devices", 500, ""));
        session.registry_tx.send_replace(Registry::initialize(
            &[DeviceSnapshot::new(1, true)],
            Locale::English,
        ));
        let before = session.registry();
        let mut events = session.subscribe();

        assert_eq!(session.refresh().await, Some(RefreshReport::Failed));
        assert_eq!(session.registry(), before);
        assert_eq!(events.try_recv().unwrap(), LightEvent::RefreshFailed);
    }

    #[tokio::test(start_paused = true)]
    async fn loading_is_reported_while_refreshing() {
        let session = session(ScriptedTransport::new().respond_after(
            "/devices",
            200,
            DEVICES,
            Duration::from_millis(100),
        ));

        assert!(!session.is_loading());

        let probe = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.is_loading()
        };
        let (report, loading_midway) = tokio::join!(session.refresh(), probe);

        assert!(loading_midway);
        assert!(report.is_some());
        assert!(!session.is_loading());
    }

    #[tokio::test(start_paused = true)]
    async fn refresh_from_previous_endpoint_is_discarded() {
        let session = session(ScriptedTransport::new().respond_after(
            "/devices",
            200,
            DEVICES,
            Duration::from_millis(100),
        ));

        let switch_endpoint = async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.set_endpoint(Endpoint::parse("other-host:3000").unwrap());
        };
        let (report, ()) = tokio::join!(session.refresh(), switch_endpoint);

        assert_eq!(report, Some(RefreshReport::Discarded));
        assert!(session.registry().is_empty());
    }

    // =========================================================================
    // toggle / switch
    // =========================================================================

    #[tokio::test]
    async fn confirmed_toggle_updates_registry() {
        let session = seeded(ScriptedTransport::new().respond("/devices/2/on", 200, "")).await;
        let mut events = session.subscribe();

        let outcome = session.toggle(LightId::new(2)).await;

        assert_eq!(
            outcome,
            Some(ToggleOutcome::Confirmed {
                id: LightId::new(2),
                state: LightState::On
            })
        );
        assert_eq!(state_of(&session, 2), LightState::On);
        assert_eq!(
            events.try_recv().unwrap(),
            LightEvent::StateConfirmed {
                id: LightId::new(2),
                state: LightState::On
            }
        );
    }

    #[tokio::test]
    async fn rejected_toggle_keeps_registry() {
        let session = seeded(ScriptedTransport::new().respond("/devices/1/off", 500, "")).await;
        let before = session.registry();

        let outcome = session.toggle(LightId::new(1)).await;

        assert_eq!(outcome, Some(ToggleOutcome::Rejected { id: LightId::new(1) }));
        assert_eq!(session.registry(), before);
    }

    #[tokio::test]
    async fn toggle_requests_opposite_state() {
        let session = seeded(ScriptedTransport::new().respond("/devices/1/off", 200, "")).await;

        session.toggle(LightId::new(1)).await;

        let requests = session.dispatcher.transport().requests();
        assert_eq!(
            requests.last(),
            Some(&(Method::Put, "/devices/1/off".to_string()))
        );
    }

    #[tokio::test]
    async fn toggle_unknown_light_is_ignored() {
        let session = seeded(ScriptedTransport::new()).await;

        assert!(session.toggle(LightId::new(9)).await.is_none());
        assert!(session.switch(LightId::new(9), LightState::On).await.is_none());
    }

    #[tokio::test]
    async fn toggle_without_endpoint_is_ignored() {
        let session = seeded(ScriptedTransport::new().respond("/devices/1/off", 200, "")).await;
        *session.endpoint.write() = None;

        assert!(session.toggle(LightId::new(1)).await.is_none());
        assert_eq!(state_of(&session, 1), LightState::On);
    }

    #[tokio::test(start_paused = true)]
    async fn last_applied_confirmation_wins() {
        let transport = ScriptedTransport::new()
            .respond_after("/devices/2/on", 200, "", Duration::from_millis(200))
            .respond_after("/devices/2/off", 200, "", Duration::from_millis(50));
        let session = seeded(transport).await;

        // On is issued first but its confirmation arrives last
        let (on, off) = tokio::join!(
            session.switch(LightId::new(2), LightState::On),
            session.switch(LightId::new(2), LightState::Off),
        );

        assert!(on.unwrap().is_confirmed());
        assert!(off.unwrap().is_confirmed());
        assert_eq!(state_of(&session, 2), LightState::On);
    }

    // =========================================================================
    // rename / endpoint
    // =========================================================================

    #[tokio::test]
    async fn rename_updates_name_and_publishes() {
        let session = seeded(ScriptedTransport::new()).await;
        let mut events = session.subscribe();

        assert!(session.rename(LightId::new(1), "Desk"));
        assert_eq!(session.registry().get(LightId::new(1)).unwrap().name(), "Desk");
        assert_eq!(
            events.try_recv().unwrap(),
            LightEvent::Renamed {
                id: LightId::new(1),
                name: "Desk".to_string()
            }
        );
    }

    #[tokio::test]
    async fn rename_ignores_empty_and_unknown() {
        let session = seeded(ScriptedTransport::new()).await;
        let before = session.registry();

        assert!(!session.rename(LightId::new(1), ""));
        assert!(!session.rename(LightId::new(7), "Garage"));
        assert_eq!(session.registry(), before);
    }

    #[tokio::test]
    async fn changing_endpoint_resets_registry() {
        let session = seeded(ScriptedTransport::new()).await;
        let mut events = session.subscribe();

        assert!(!session.set_endpoint(endpoint()));
        assert_eq!(session.registry().len(), 2);

        assert!(session.set_host_input("192.168.0.30:3000"));
        assert!(session.registry().is_empty());
        assert_eq!(events.try_recv().unwrap(), LightEvent::RegistryReset);
    }

    #[tokio::test]
    async fn empty_host_input_is_ignored() {
        let session = seeded(ScriptedTransport::new()).await;

        assert!(!session.set_host_input(""));
        assert_eq!(session.endpoint(), Some(endpoint()));
        assert_eq!(session.registry().len(), 2);
    }

    #[tokio::test]
    async fn clear_endpoint_resets_registry() {
        let session = seeded(ScriptedTransport::new()).await;

        session.clear_endpoint();

        assert!(session.endpoint().is_none());
        assert!(session.registry().is_empty());
    }

    #[tokio::test]
    async fn watchers_see_registry_changes() {
        let session = session(ScriptedTransport::new().respond("/devices", 200, DEVICES));
        let mut registry_rx = session.watch_registry();

        session.refresh().await;

        assert!(registry_rx.has_changed().unwrap());
        assert_eq!(registry_rx.borrow_and_update().len(), 2);
    }

    #[test]
    fn locale_is_configurable() {
        let session = LightSession::new(ScriptedTransport::new()).with_locale(Locale::Portuguese);
        assert_eq!(session.locale(), Locale::Portuguese);
    }
}
