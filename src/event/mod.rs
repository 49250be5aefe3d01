// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Notifications about registry changes.
//!
//! A [`LightSession`](crate::session::LightSession) publishes a
//! [`LightEvent`] on its [`EventBus`] whenever a refresh, toggle or rename
//! resolves. Subscribers that only need the current lights can watch the
//! registry instead.
//!
//! # Examples
//!
//! ```
//! use lampgrid::event::{EventBus, LightEvent};
//!
//! let bus = EventBus::new();
//! let mut rx = bus.subscribe();
//!
//! bus.publish(LightEvent::LightsDiscovered { count: 2 });
//! assert!(matches!(rx.try_recv(), Ok(LightEvent::LightsDiscovered { count: 2 })));
//! ```

mod event_bus;
mod light_event;

pub use event_bus::EventBus;
pub use light_event::LightEvent;
