//! Confirmed registrations, waitlist entries, and their stored row layouts.

use serde::{Deserialize, Serialize};

use crate::form::RegistrationForm;
use crate::store::Cell;
use crate::types::{Slot, Timestamp};

/// Prefix of every registration number.
pub const REGISTRATION_PREFIX: &str = "YACC";

/// Status recorded on every confirmed registration row.
pub const STATUS_CONFIRMED: &str = "confirmed";

/// Status recorded on every waitlist row.
pub const STATUS_PENDING: &str = "pending";

/// Header row of the `Registrations` collection.
pub const REGISTRATION_HEADER: [&str; 21] = [
    "Timestamp",
    "Registration Number",
    "Church Name",
    "Church Address",
    "Pastor Name",
    "Church Email",
    "Church Phone",
    "Band Name",
    "Member Count",
    "Band Leader",
    "Leader Email",
    "Leader Phone",
    "Primary Hymn",
    "Secondary Hymn",
    "Arrangement Description",
    "Performance Time",
    "Equipment Details",
    "Members List",
    "Digital Signature",
    "Status",
    "Performance Order",
];

/// Header row of the `Waitlist` collection.
pub const WAITLIST_HEADER: [&str; 9] = [
    "Timestamp",
    "Church Name",
    "Band Name",
    "Band Leader",
    "Leader Email",
    "Leader Phone",
    "Selected Hymn",
    "Performance Time",
    "Status",
];

/// Display identifier for a slot: `YACC-` followed by the slot zero-padded
/// to three digits.
///
/// ```
/// use yacc_core::registration::registration_number;
///
/// assert_eq!(registration_number(1), "YACC-001");
/// assert_eq!(registration_number(42), "YACC-042");
/// ```
pub fn registration_number(slot: Slot) -> String {
    format!("{REGISTRATION_PREFIX}-{slot:03}")
}

// ---------------------------------------------------------------------------
// Embedded sub-records
// ---------------------------------------------------------------------------

/// Stage equipment requested by a band. Stored as a JSON cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRequest {
    pub extra_mics: bool,
    pub extra_mic_count: u32,
    pub keyboard: bool,
    pub amp: bool,
    pub percussion: bool,
    pub other_equipment: bool,
    pub other_equipment_text: String,
    pub special_setup: String,
}

/// A named band member. Stored as part of the JSON members cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BandMember {
    pub name: String,
    pub role: String,
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// One confirmed entrant.
#[derive(Debug, Clone, PartialEq)]
pub struct Registration {
    pub created_at: Timestamp,
    pub registration_number: String,
    pub church_name: String,
    pub church_address: String,
    pub pastor_name: String,
    pub church_email: String,
    pub church_phone: String,
    pub band_name: String,
    pub member_count: u32,
    pub leader_name: String,
    pub leader_email: String,
    pub leader_phone: String,
    pub primary_hymn: String,
    pub secondary_hymn: String,
    pub arrangement: String,
    pub performance_time: String,
    pub equipment: EquipmentRequest,
    pub members: Vec<BandMember>,
    pub signature: String,
    /// Equals the slot number.
    pub performance_order: Slot,
}

impl Registration {
    pub fn from_form(form: &RegistrationForm, slot: Slot, created_at: Timestamp) -> Self {
        Self {
            created_at,
            registration_number: registration_number(slot),
            church_name: form.church_name.clone(),
            church_address: form.church_address.clone(),
            pastor_name: form.pastor_name.clone(),
            church_email: form.church_email.clone(),
            church_phone: form.church_phone.clone(),
            band_name: form.band_name.clone(),
            member_count: form.member_count,
            leader_name: form.leader_name.clone(),
            leader_email: form.leader_email.clone(),
            leader_phone: form.leader_phone.clone(),
            primary_hymn: form.primary_hymn.clone(),
            secondary_hymn: form.secondary_hymn.clone(),
            arrangement: form.arrangement.clone(),
            performance_time: form.performance_time.clone(),
            equipment: form.equipment.clone(),
            members: form.members.clone(),
            signature: form.signature.clone(),
            performance_order: slot,
        }
    }

    pub fn status(&self) -> &'static str {
        STATUS_CONFIRMED
    }

    /// Cells in [`REGISTRATION_HEADER`] order.
    pub fn to_row(&self) -> Result<Vec<Cell>, serde_json::Error> {
        Ok(vec![
            Cell::Timestamp(self.created_at),
            Cell::text(&self.registration_number),
            Cell::text(&self.church_name),
            Cell::text(&self.church_address),
            Cell::text(&self.pastor_name),
            Cell::text(&self.church_email),
            Cell::text(&self.church_phone),
            Cell::text(&self.band_name),
            Cell::Integer(i64::from(self.member_count)),
            Cell::text(&self.leader_name),
            Cell::text(&self.leader_email),
            Cell::text(&self.leader_phone),
            Cell::text(&self.primary_hymn),
            Cell::text(&self.secondary_hymn),
            Cell::text(&self.arrangement),
            Cell::text(&self.performance_time),
            Cell::Text(serde_json::to_string(&self.equipment)?),
            Cell::Text(serde_json::to_string(&self.members)?),
            Cell::text(&self.signature),
            Cell::text(self.status()),
            Cell::Integer(i64::from(self.performance_order)),
        ])
    }
}

// ---------------------------------------------------------------------------
// WaitlistEntry
// ---------------------------------------------------------------------------

/// One entrant who arrived after every slot was taken.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitlistEntry {
    pub created_at: Timestamp,
    pub church_name: String,
    pub band_name: String,
    pub leader_name: String,
    pub leader_email: String,
    pub leader_phone: String,
    pub selected_hymn: String,
    pub performance_time: String,
}

impl WaitlistEntry {
    pub fn from_form(form: &RegistrationForm, created_at: Timestamp) -> Self {
        Self {
            created_at,
            church_name: form.church_name.clone(),
            band_name: form.band_name.clone(),
            leader_name: form.leader_name.clone(),
            leader_email: form.leader_email.clone(),
            leader_phone: form.leader_phone.clone(),
            selected_hymn: form.primary_hymn.clone(),
            performance_time: form.performance_time.clone(),
        }
    }

    pub fn status(&self) -> &'static str {
        STATUS_PENDING
    }

    /// Cells in [`WAITLIST_HEADER`] order.
    pub fn to_row(&self) -> Vec<Cell> {
        vec![
            Cell::Timestamp(self.created_at),
            Cell::text(&self.church_name),
            Cell::text(&self.band_name),
            Cell::text(&self.leader_name),
            Cell::text(&self.leader_email),
            Cell::text(&self.leader_phone),
            Cell::text(&self.selected_hymn),
            Cell::text(&self.performance_time),
            Cell::text(self.status()),
        ]
    }
}
