use serde::Serialize;
use utoipa::ToSchema;

/// Spots still open on a roster. Saturates at zero when the backend
/// reports more enrollments than the capacity allows.
pub fn available_spots(capacity: u32, enrolled: u32) -> u32 {
    capacity.saturating_sub(enrolled)
}

/// Occupancy as a rounded percentage. A zero capacity can only come from
/// legacy backend records (the gateway refuses to create them) and counts
/// as 0% so roster views stay renderable.
pub fn occupancy_percent(capacity: u32, enrolled: u32) -> u32 {
    if capacity == 0 {
        return 0;
    }
    ((enrolled as f64 / capacity as f64) * 100.0).round() as u32
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Occupancy {
    pub capacity: u32,
    pub enrolled: u32,
    pub available: u32,
    pub percent: u32,
}

impl Occupancy {
    pub fn from_roster(capacity: u32, enrolled: u32) -> Self {
        Self {
            capacity,
            enrolled,
            available: available_spots(capacity, enrolled),
            percent: occupancy_percent(capacity, enrolled),
        }
    }
}
