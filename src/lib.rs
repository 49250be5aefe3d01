// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `lampgrid` - discover, rename and switch lights over a small HTTP API.
//!
//! The device service exposes two requests:
//!
//! - `GET {endpoint}/devices` returns `[{"id": 1, "value": true}, ...]`
//! - `PUT {endpoint}/devices/{id}/on` (or `/off`) answers 200 on success
//!
//! This library keeps a local [`Registry`] of those lights. The registry
//! carries names chosen by the operator, which the service knows nothing
//! about, so a refresh only ever updates the state of lights already known.
//! A state change is written locally only once the service acknowledges it.
//!
//! # Layers
//!
//! - [`registry`]: pure reducers over an immutable [`Registry`]
//! - [`dispatcher`]: sends commands and classifies outcomes
//! - [`session`]: holds the endpoint and current registry for a UI
//! - [`protocol`]: the [`Transport`](protocol::Transport) seam and the
//!   bundled HTTP client
//!
//! # Quick Start
//!
//! ```no_run
//! use lampgrid::{LightId, LightSession};
//!
//! #[tokio::main]
//! async fn main() -> lampgrid::Result<()> {
//!     let session = LightSession::over_http()?;
//!     session.set_host_input("localhost:3000");
//!
//!     // First refresh discovers the lights
//!     session.refresh().await;
//!
//!     session.rename(LightId::new(1), "Kitchen");
//!     session.toggle(LightId::new(1)).await;
//!
//!     for light in &session.registry() {
//!         println!("{:>12} {}", light.name(), light.state());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Using the reducers directly
//!
//! ```
//! use lampgrid::{DeviceSnapshot, LightId, LightState, Locale, Registry};
//!
//! let registry = Registry::initialize(&[DeviceSnapshot::new(1, false)], Locale::English);
//! let registry = registry.merge(&[DeviceSnapshot::new(1, true), DeviceSnapshot::new(9, true)]);
//!
//! assert_eq!(registry.len(), 1);
//! assert_eq!(registry.get(LightId::new(1)).unwrap().state(), LightState::On);
//! ```

pub mod command;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod protocol;
pub mod registry;
pub mod response;
pub mod session;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use dispatcher::{Dispatcher, RefreshOutcome, ToggleOutcome};
pub use error::{Error, ParseError, ProtocolError, Result, ValueError};
pub use event::{EventBus, LightEvent};
#[cfg(feature = "http")]
pub use protocol::{HttpClient, HttpClientBuilder};
pub use protocol::{CommandResponse, Transport};
pub use registry::{Light, Registry};
pub use response::DeviceSnapshot;
pub use session::{LightSession, RefreshReport};
pub use types::{Endpoint, EndpointConfig, LightId, LightState, Locale};
