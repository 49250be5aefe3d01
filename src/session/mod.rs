// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operator-facing state holder.
//!
//! A [`LightSession`] ties the pure [`Registry`](crate::registry::Registry)
//! reducers to the [`Dispatcher`](crate::dispatcher::Dispatcher): it holds the
//! current endpoint, replaces the registry when a network call resolves and
//! tells the UI whether a refresh is in flight.
//!
//! # Examples
//!
//! ```no_run
//! use lampgrid::session::LightSession;
//! use lampgrid::types::LightId;
//!
//! #[tokio::main]
//! async fn main() -> lampgrid::Result<()> {
//!     let session = LightSession::over_http()?;
//!
//!     session.set_host_input("http://192.168.0.20:3000");
//!     session.refresh().await;
//!
//!     for light in &session.registry() {
//!         println!("{}: {}", light.name(), light.state());
//!     }
//!
//!     session.rename(LightId::new(1), "Kitchen");
//!     session.toggle(LightId::new(1)).await;
//!     Ok(())
//! }
//! ```
//!
//! ## Watching the registry
//!
//! ```no_run
//! use lampgrid::session::LightSession;
//!
//! # fn example() -> lampgrid::Result<()> {
//! let session = LightSession::over_http()?;
//! let mut registry_rx = session.watch_registry();
//!
//! tokio::spawn(async move {
//!     while registry_rx.changed().await.is_ok() {
//!         let registry = registry_rx.borrow();
//!         println!("{} lights", registry.len());
//!     }
//! });
//! # Ok(())
//! # }
//! ```

mod light_session;

pub use light_session::{LightSession, RefreshReport};
