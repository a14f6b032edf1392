//! Inbound registration form.
//!
//! The front end submits a flat, loosely typed object. [`RegistrationForm::from_fields`]
//! resolves it once into a typed value: no field is required, and anything
//! missing or unparseable falls back to `""`, `0`, or `false`.

use serde_json::{Map, Value};

use crate::registration::{BandMember, EquipmentRequest};

/// Sentinel hymn selection that defers to the free-text field.
pub const OTHER_HYMN: &str = "other";

/// Upper bound on the `memberName{i}` / `memberRole{i}` indices read.
pub const MAX_BAND_MEMBERS: u32 = 50;

/// A submission after coercion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub church_name: String,
    pub church_address: String,
    pub pastor_name: String,
    pub church_email: String,
    pub church_phone: String,
    pub band_name: String,
    /// Declared member count, stored as submitted.
    pub member_count: u32,
    pub leader_name: String,
    pub leader_email: String,
    pub leader_phone: String,
    /// Primary hymn with the `"other"` substitution applied.
    pub primary_hymn: String,
    /// Secondary hymn with the `"other"` substitution applied.
    pub secondary_hymn: String,
    pub arrangement: String,
    pub performance_time: String,
    pub equipment: EquipmentRequest,
    /// Members with non-blank names, in index order.
    pub members: Vec<BandMember>,
    pub signature: String,
}

impl RegistrationForm {
    pub fn from_fields(fields: &Map<String, Value>) -> Self {
        let member_count = integer(fields, "memberCount");

        Self {
            church_name: text(fields, "churchName"),
            church_address: text(fields, "churchAddress"),
            pastor_name: text(fields, "pastorName"),
            church_email: text(fields, "churchEmail"),
            church_phone: text(fields, "churchPhone"),
            band_name: text(fields, "bandName"),
            member_count,
            leader_name: text(fields, "leaderName"),
            leader_email: text(fields, "leaderEmail"),
            leader_phone: text(fields, "leaderPhone"),
            primary_hymn: resolve_hymn(text(fields, "primaryHymn"), || {
                text(fields, "otherHymn")
            }),
            secondary_hymn: resolve_hymn(text(fields, "secondaryHymn"), || {
                text(fields, "otherSecondaryHymn")
            }),
            arrangement: text(fields, "arrangement"),
            performance_time: text(fields, "performanceTime"),
            equipment: EquipmentRequest {
                extra_mics: flag(fields, "extraMics"),
                extra_mic_count: integer(fields, "extraMicCount"),
                keyboard: flag(fields, "keyboard"),
                amp: flag(fields, "amp"),
                percussion: flag(fields, "percussion"),
                other_equipment: flag(fields, "otherEquipment"),
                other_equipment_text: text(fields, "otherEquipmentText"),
                special_setup: text(fields, "specialSetup"),
            },
            members: extract_members(fields, member_count),
            signature: text(fields, "signature"),
        }
    }
}

/// Apply the `"other"` substitution to a hymn selection.
pub fn resolve_hymn(selected: String, other: impl FnOnce() -> String) -> String {
    if selected == OTHER_HYMN {
        other()
    } else {
        selected
    }
}

/// Collect members `1..=count` whose trimmed name is non-empty.
pub fn extract_members(fields: &Map<String, Value>, count: u32) -> Vec<BandMember> {
    (1..=count.min(MAX_BAND_MEMBERS))
        .filter_map(|i| {
            let name = text(fields, &format!("memberName{i}"));
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            Some(BandMember {
                name: name.to_string(),
                role: text(fields, &format!("memberRole{i}")),
            })
        })
        .collect()
}

/// Parse the leading non-negative integer of `raw`, ignoring leading
/// whitespace. Returns 0 when there is none or it does not fit.
pub fn parse_leading_int(raw: &str) -> u32 {
    let trimmed = raw.trim_start();
    if trimmed.starts_with('-') {
        return 0;
    }
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().unwrap_or(0)
}

// ---------------------------------------------------------------------------
// Field coercion
// ---------------------------------------------------------------------------

fn text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

fn integer(fields: &Map<String, Value>, key: &str) -> u32 {
    match fields.get(key) {
        Some(Value::String(s)) => parse_leading_int(s),
        Some(Value::Number(n)) => match (n.as_u64(), n.as_f64()) {
            (Some(v), _) => u32::try_from(v).unwrap_or(0),
            (None, Some(f)) if f.is_finite() && f >= 0.0 && f < f64::from(u32::MAX) => f as u32,
            _ => 0,
        },
        _ => 0,
    }
}

fn flag(fields: &Map<String, Value>, key: &str) -> bool {
    match fields.get(key) {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => s == "true",
        _ => false,
    }
}
