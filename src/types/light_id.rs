// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Server-assigned light identifier.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a light, assigned by the device service.
///
/// Identity of a [`Light`](crate::registry::Light) is its id: names and
/// states change, ids never do.
///
/// # Examples
///
/// ```
/// use lampgrid::types::LightId;
///
/// let id = LightId::new(5);
/// assert_eq!(id.value(), 5);
/// assert_eq!(id.to_string(), "5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LightId(i64);

impl LightId {
    /// Creates a light id from its numeric value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the numeric value.
    #[must_use]
    pub const fn value(&self) -> i64 {
        self.0
    }
}

impl From<i64> for LightId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl fmt::Display for LightId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
