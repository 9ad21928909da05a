use crate::vehicle::{VehicleId, VehicleState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One timestep of CPM data as seen by a single reporting vehicle.
///
/// Vehicles are kept in id order so iteration, and with it every seeded
/// attack, is reproducible. Top level keys other than `vehicles` are carried
/// through in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Frame {
    #[serde(default)]
    pub vehicles: BTreeMap<VehicleId, VehicleState>,
    /// Ids deleted by an attack, in removal order.
    #[serde(rename = "_removed", default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<VehicleId>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Frame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_vehicle(mut self, id: impl Into<VehicleId>, state: VehicleState) -> Self {
        self.vehicles.insert(id.into(), state);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn contains(&self, id: &VehicleId) -> bool {
        self.vehicles.contains_key(id)
    }

    /// Finds the key that names `id`, first exactly and then by string form.
    pub fn resolve_id(&self, id: &VehicleId) -> Option<VehicleId> {
        if self.vehicles.contains_key(id) {
            return Some(id.clone());
        }
        self.vehicles
            .keys()
            .find(|candidate| candidate.loosely_matches(id))
            .cloned()
    }

    /// Removes a vehicle and records it in `removed`.
    pub fn remove_vehicle(&mut self, id: &VehicleId) -> Option<VehicleState> {
        let state = self.vehicles.remove(id)?;
        self.removed.push(id.clone());
        Some(state)
    }
}
