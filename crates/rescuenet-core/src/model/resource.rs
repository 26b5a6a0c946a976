// ── Resource domain types ──

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use super::entity_id::EntityId;

/// Category of a response asset: vehicles and fixed facilities.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum ResourceType {
    Ambulance,
    FireTruck,
    FireStation,
    Hospital,
    Shelter,
    PoliceCar,
    PoliceStation,
}

impl ResourceType {
    /// Facilities report occupancy; vehicles report crew/patient slots.
    pub fn is_facility(self) -> bool {
        matches!(
            self,
            Self::FireStation | Self::Hospital | Self::Shelter | Self::PoliceStation
        )
    }
}

/// Availability state, mutated only via explicit operator edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ResourceStatus {
    Available,
    Busy,
    Offline,
}

/// A dispatchable or fixed emergency-response asset.
///
/// Identity and location (`id`, `name`, `resource_type`, `lat`, `lng`) are
/// set at ingestion and never touched by the edit path. `capacity` and
/// `current_load` are always present -- defaulting happens at the
/// ingestion boundary -- and satisfy `current_load <= capacity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub resource_type: ResourceType,
    pub status: ResourceStatus,
    pub lat: f64,
    pub lng: f64,
    pub contact: String,
    pub capacity: u32,
    pub current_load: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<EntityId>,
}

impl Resource {
    /// Load as a fraction of capacity (0.0 when capacity is zero).
    pub fn utilization(&self) -> f64 {
        if self.capacity == 0 {
            0.0
        } else {
            f64::from(self.current_load) / f64::from(self.capacity)
        }
    }
}

/// Typed update for a resource's mutable fields. `None` leaves the
/// current value in place; the combined result is validated before any
/// of it is applied.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResourceUpdate {
    pub status: Option<ResourceStatus>,
    pub capacity: Option<u32>,
    pub current_load: Option<u32>,
}
