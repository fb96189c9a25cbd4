//! Eligibility predicates. Pure functions, no state.
//!
//! `is_restricted` and `is_female` run once at ingestion; their results
//! live on `Location::restricted` and `StaffMember::is_female`.

use crate::{
    config::RosterConfig,
    model::{DutyPreference, Rank, StaffMember},
};

/// True if the call sign matches a restricted signature exactly, or starts
/// with a restricted signature's leading token (`"Recovery -05"` restricts
/// every `"Recovery..."` call sign).
pub fn is_restricted(call_sign: &str, config: &RosterConfig) -> bool {
    let call_sign = call_sign.trim();
    if call_sign.is_empty() {
        return false;
    }
    config.restricted_call_signs.iter().any(|restricted| {
        if restricted == call_sign {
            return true;
        }
        match restricted.split(' ').next() {
            Some(token) if !token.is_empty() => call_sign.starts_with(token),
            _ => false,
        }
    })
}

/// True if the gender code says female, or the display name carries a
/// female rank marker. The name fallback must stay: older records only
/// encode gender there.
pub fn is_female(gender: &str, name: &str, config: &RosterConfig) -> bool {
    if config.female_gender_codes.iter().any(|code| code == gender) {
        return true;
    }
    config
        .female_name_markers
        .iter()
        .any(|marker| name.contains(marker.as_str()))
}

/// Available for field deployment: not pinned to a fixed post, and either
/// auxiliary tier (always field-available) or preferring field duty.
pub fn is_field_eligible(staff: &StaffMember) -> bool {
    !staff.has_fixed_duty
        && (staff.rank == Rank::HomeGuard || staff.preferred_duty == DutyPreference::Field)
}

/// Members of the driver pool: driver-capable staff on field duty proper.
/// Unlike `is_field_eligible`, static-preference Home Guards do not qualify.
pub fn is_field_driver(staff: &StaffMember) -> bool {
    staff.is_driver && staff.preferred_duty == DutyPreference::Field && !staff.has_fixed_duty
}
