// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Local registry of known lights.
//!
//! The [`Registry`] is an immutable, ordered collection of [`Light`]s. Every
//! operation returns a new registry, so a caller can swap the value it holds
//! atomically once a network call resolves.
//!
//! # Seeding vs. refreshing
//!
//! The first device list seeds the registry with [`Registry::initialize`],
//! which also assigns default names. Later lists go through
//! [`Registry::merge`], which only refreshes the state of lights already
//! known: names typed by the operator are kept and devices that appeared
//! since are not added. [`Registry::sync`] picks between the two.
//!
//! # Examples
//!
//! ```
//! use lampgrid::registry::Registry;
//! use lampgrid::response::DeviceSnapshot;
//! use lampgrid::types::{LightId, LightState, Locale};
//!
//! let registry = Registry::initialize(
//!     &[DeviceSnapshot::new(1, true), DeviceSnapshot::new(2, false)],
//!     Locale::English,
//! );
//! let registry = registry.rename(LightId::new(1), "Kitchen");
//!
//! // A later refresh updates state but keeps the name
//! let registry = registry.merge(&[DeviceSnapshot::new(1, false)]);
//! let kitchen = registry.get(LightId::new(1)).unwrap();
//! assert_eq!(kitchen.name(), "Kitchen");
//! assert_eq!(kitchen.state(), LightState::Off);
//! ```

mod light;
mod light_registry;

pub use light::Light;
pub use light_registry::Registry;
