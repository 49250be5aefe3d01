// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Value types shared across the library.
//!
//! - [`LightId`]: server-assigned identity of a light
//! - [`LightState`]: on/off
//! - [`Endpoint`] / [`EndpointConfig`]: resolved address of the device service
//! - [`Locale`]: language of default light names

mod endpoint;
mod light_id;
mod light_state;
mod locale;

pub use endpoint::{Endpoint, EndpointConfig};
pub use light_id::LightId;
pub use light_state::LightState;
pub use locale::Locale;
