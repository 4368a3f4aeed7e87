use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::capacity::Occupancy;
use crate::models::Participant;

/// Every roster entry carries this status. Attendance has no further
/// states in the booking flow; the badge is constant.
pub const STATUS_CONFIRMED: &str = "confirmed";

const NAMELESS: &str = "Sin nombre";

#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntry {
    pub id: String,
    pub display_name: String,
    /// First letter of the display name, for the avatar placeholder.
    pub initial: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrolled_at: Option<DateTime<Utc>>,
    pub status: String,
}

impl RosterEntry {
    pub fn from_participant(participant: Participant) -> Self {
        let display_name = display_name(&participant);
        let initial = display_name
            .chars()
            .next()
            .map(|first| first.to_uppercase().to_string())
            .unwrap_or_default();
        Self {
            id: participant.id,
            display_name,
            initial,
            email: participant.email,
            phone: participant.phone,
            enrolled_at: participant.enrolled_at,
            status: STATUS_CONFIRMED.to_string(),
        }
    }
}

fn display_name(participant: &Participant) -> String {
    for candidate in [
        &participant.name,
        &participant.username,
        &participant.email,
    ] {
        if let Some(value) = candidate {
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    NAMELESS.to_string()
}

/// Roster as shown when a class or workshop detail opens: occupancy math
/// over the live participant list, plus the projected entries.
#[derive(Debug, Clone, Serialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RosterView {
    pub occupancy: Occupancy,
    pub participants: Vec<RosterEntry>,
}

impl RosterView {
    pub fn assemble(capacity: u32, participants: Vec<Participant>) -> Self {
        let participants: Vec<RosterEntry> = participants
            .into_iter()
            .map(RosterEntry::from_participant)
            .collect();
        let occupancy = Occupancy::from_roster(capacity, participants.len() as u32);
        Self {
            occupancy,
            participants,
        }
    }
}
