//! Caller-facing results of `submit` and the public status snapshot.
//!
//! Every variant serializes to the flat camelCase object the front end
//! expects; `success` is always present.

use serde::Serialize;

use crate::types::{Slot, Timestamp};

/// Message shown to the submitter for any failure.
pub const GENERIC_FAILURE_MESSAGE: &str = "System error. Please try again or contact support.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SubmissionResult {
    Confirmed(Confirmation),
    Waitlisted(WaitlistPlacement),
    Failed(Failure),
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionResult::Confirmed(_))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub success: bool,
    pub transaction_id: String,
    pub registration_number: String,
    pub performance_order: Slot,
    pub slot_used: Slot,
    pub total_slots: u32,
    pub message: String,
    pub timestamp: Timestamp,
    pub details: ConfirmationDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationDetails {
    pub band_name: String,
    pub leader_email: String,
    pub church_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitlistPlacement {
    pub success: bool,
    pub is_waitlist: bool,
    pub transaction_id: String,
    pub message: String,
    /// 1-based position within the waitlist collection.
    pub waitlist_position: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Failure {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
    /// Stable error code; the raw error text is only sent to the operator.
    pub error: String,
}

impl Failure {
    pub fn new(transaction_id: impl Into<String>, code: &str) -> Self {
        Self {
            success: false,
            transaction_id: transaction_id.into(),
            message: GENERIC_FAILURE_MESSAGE.to_string(),
            error: code.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Public status
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Open,
    Waitlist,
    Error,
}

/// Read-only occupancy snapshot for the front end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicStatus {
    pub total_registrations: u64,
    pub waitlist_count: u64,
    pub max_slots: u32,
    pub slots_available: u64,
    pub registration_status: RegistrationStatus,
    pub last_updated: Timestamp,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PublicStatus {
    pub fn from_counts(registrations: u64, waitlist: u64, max_slots: u32, now: Timestamp) -> Self {
        let max = u64::from(max_slots);
        Self {
            total_registrations: registrations,
            waitlist_count: waitlist,
            max_slots,
            slots_available: max.saturating_sub(registrations),
            registration_status: if registrations >= max {
                RegistrationStatus::Waitlist
            } else {
                RegistrationStatus::Open
            },
            last_updated: now,
            error: None,
        }
    }

    pub fn unavailable(max_slots: u32, now: Timestamp, code: &str) -> Self {
        Self {
            total_registrations: 0,
            waitlist_count: 0,
            max_slots,
            slots_available: 0,
            registration_status: RegistrationStatus::Error,
            last_updated: now,
            error: Some(code.to_string()),
        }
    }
}
