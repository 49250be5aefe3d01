// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Ordered, id-unique collection of lights.

use std::collections::{HashMap, HashSet};

use crate::response::DeviceSnapshot;
use crate::types::{LightId, LightState, Locale};

use super::Light;

/// Ordered collection of lights, unique by id.
///
/// Operations never mutate the receiver. Lights keep the position they were
/// first seen at and are never dropped by a refresh.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    lights: Vec<Light>,
}

impl Registry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Reducers ==========

    /// Seeds a registry from the first device list.
    ///
    /// Produces one light per snapshot in input order, named by `locale`.
    /// If the service repeats an id, the first occurrence wins.
    #[must_use]
    pub fn initialize(snapshots: &[DeviceSnapshot], locale: Locale) -> Self {
        let mut seen = HashSet::with_capacity(snapshots.len());
        let lights = snapshots
            .iter()
            .filter(|snapshot| seen.insert(snapshot.id))
            .map(|snapshot| {
                Light::new(
                    snapshot.id,
                    locale.default_name(snapshot.id),
                    snapshot.state(),
                )
            })
            .collect();

        Self { lights }
    }

    /// Refreshes the state of known lights from a later device list.
    ///
    /// Lights without a matching snapshot are left as they are. Snapshots for
    /// ids not in the registry are ignored. Names and ordering are preserved.
    #[must_use]
    pub fn merge(&self, snapshots: &[DeviceSnapshot]) -> Self {
        let mut reported: HashMap<LightId, LightState> = HashMap::with_capacity(snapshots.len());
        for snapshot in snapshots {
            reported.entry(snapshot.id).or_insert_with(|| snapshot.state());
        }

        let lights = self
            .lights
            .iter()
            .map(|light| match reported.get(&light.id()) {
                Some(&state) => light.with_state(state),
                None => light.clone(),
            })
            .collect();

        Self { lights }
    }

    /// Applies a device list, seeding an empty registry or merging otherwise.
    #[must_use]
    pub fn sync(&self, snapshots: &[DeviceSnapshot], locale: Locale) -> Self {
        if self.is_empty() {
            Self::initialize(snapshots, locale)
        } else {
            self.merge(snapshots)
        }
    }

    /// Renames a light.
    ///
    /// An empty name or an unknown id leaves the registry unchanged.
    #[must_use]
    pub fn rename(&self, id: LightId, new_name: &str) -> Self {
        if new_name.is_empty() {
            return self.clone();
        }
        self.map_light(id, |light| light.with_name(new_name))
    }

    /// Sets the state of a light after the service acknowledged a change.
    ///
    /// An unknown id leaves the registry unchanged.
    #[must_use]
    pub fn apply_confirmed_state(&self, id: LightId, new_state: LightState) -> Self {
        self.map_light(id, |light| light.with_state(new_state))
    }

    fn map_light(&self, id: LightId, f: impl Fn(&Light) -> Light) -> Self {
        let lights = self
            .lights
            .iter()
            .map(|light| if light.id() == id { f(light) } else { light.clone() })
            .collect();

        Self { lights }
    }

    // ========== Queries ==========

    /// Returns the light with the given id.
    #[must_use]
    pub fn get(&self, id: LightId) -> Option<&Light> {
        self.lights.iter().find(|light| light.id() == id)
    }

    /// Returns `true` if a light with the given id is known.
    #[must_use]
    pub fn contains(&self, id: LightId) -> bool {
        self.get(id).is_some()
    }

    /// Returns the number of lights.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lights.len()
    }

    /// Returns `true` if no light is known.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lights.is_empty()
    }

    /// Iterates over lights in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, Light> {
        self.lights.iter()
    }

    /// Returns all ids in display order.
    #[must_use]
    pub fn ids(&self) -> Vec<LightId> {
        self.lights.iter().map(Light::id).collect()
    }

    /// Returns the lights as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Light] {
        &self.lights
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Light;
    type IntoIter = std::slice::Iter<'a, Light>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
