// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Localized placeholder names for newly discovered lights.

use super::LightId;

/// Language used for default light names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Locale {
    /// `Lamp {id}`
    #[default]
    English,
    /// `Lâmpada {id}`
    Portuguese,
}

impl Locale {
    /// Returns the placeholder name given to a light on first sighting.
    ///
    /// # Examples
    ///
    /// ```
    /// use lampgrid::types::{LightId, Locale};
    ///
    /// assert_eq!(Locale::English.default_name(LightId::new(3)), "Lamp 3");
    /// assert_eq!(Locale::Portuguese.default_name(LightId::new(3)), "Lâmpada 3");
    /// ```
    #[must_use]
    pub fn default_name(self, id: LightId) -> String {
        match self {
            Self::English => format!("Lamp {id}"),
            Self::Portuguese => format!("Lâmpada {id}"),
        }
    }
}
