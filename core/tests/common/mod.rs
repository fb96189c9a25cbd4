//! Shared fixtures for integration tests. Snapshots are built in code.
#![allow(dead_code)]

use roster_core::{
    engine::{GenerationRequest, RosterEngine, RosterOutcome},
    history::{ManualOverride, PriorCycle},
    model::{DutyPreference, LocationRecord, Rank, RequirementRecord, StaffRecord},
    snapshot::RosterSnapshot,
    types::{LocationId, StaffId, ZoneId},
};
use std::collections::BTreeMap;
use uuid::Uuid;

pub const RESTRICTED: &str = "Zebra-101";

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn staff(id: StaffId, rank: &str) -> StaffRecord {
    StaffRecord {
        id,
        name: format!("Officer {id}"),
        belt_no: format!("B-{id:04}"),
        rank: Rank::from(rank),
        gender: "M".into(),
        is_driver: false,
        preferred_duty: DutyPreference::Field,
        has_fixed_duty: false,
        fixed_location: None,
    }
}

pub fn driver(id: StaffId, rank: &str) -> StaffRecord {
    StaffRecord { is_driver: true, ..staff(id, rank) }
}

pub fn female(mut rec: StaffRecord) -> StaffRecord {
    rec.gender = "F".into();
    rec
}

pub fn location(id: LocationId, zone_id: ZoneId, call_sign: &str) -> LocationRecord {
    LocationRecord {
        id,
        name: format!("Post {id}"),
        zone_id,
        zone_name: format!("Zone {zone_id}"),
        call_sign: call_sign.into(),
    }
}

pub fn requirement(location_id: LocationId, ranks: &[(&str, u32)]) -> RequirementRecord {
    RequirementRecord {
        location_id,
        counts: ranks
            .iter()
            .map(|(code, n)| (Rank::from(*code), *n))
            .collect::<BTreeMap<_, _>>(),
        driver_count: 0,
        senior_count: 0,
        updated_at: None,
    }
}

pub fn with_drivers(mut rec: RequirementRecord, n: u32) -> RequirementRecord {
    rec.driver_count = n;
    rec
}

pub fn with_senior(mut rec: RequirementRecord, n: u32) -> RequirementRecord {
    rec.senior_count = n;
    rec
}

pub fn snapshot(
    staff: Vec<StaffRecord>,
    locations: Vec<LocationRecord>,
    requirements: Vec<RequirementRecord>,
) -> RosterSnapshot {
    RosterSnapshot {
        staff,
        locations,
        requirements,
        prior_cycle: None,
        overrides: Vec::new(),
    }
}

/// A prior cycle in the legacy archive shape.
pub fn prior(placements: &[(StaffId, LocationId)]) -> PriorCycle {
    PriorCycle {
        name: "previous".into(),
        archived_at: None,
        assignments: placements
            .iter()
            .map(|(s, l)| serde_json::json!({ "policeman": s, "area": l }))
            .collect(),
    }
}

pub fn correction(staff_id: StaffId, location_id: LocationId, minute: u32) -> ManualOverride {
    use chrono::TimeZone;
    ManualOverride {
        staff_id,
        location_id,
        recorded_at: chrono::Utc
            .with_ymd_and_hms(2026, 1, 1, 8, minute, 0)
            .single()
            .expect("valid timestamp"),
        notes: None,
    }
}

pub fn cycle_id(n: u128) -> Uuid {
    Uuid::from_u128(n)
}

pub fn generate(snapshot: &RosterSnapshot, seed: u64) -> RosterOutcome {
    init_logging();
    RosterEngine::with_default_config()
        .generate(snapshot, &GenerationRequest::new(cycle_id(1), seed))
        .expect("generation succeeds")
}

pub fn assigned_ids(outcome: &RosterOutcome) -> Vec<StaffId> {
    let mut ids: Vec<_> = outcome.assignments.iter().map(|a| a.staff_id).collect();
    ids.sort_unstable();
    ids
}

/// A mid-sized, mixed roster across three zones.
pub fn district() -> RosterSnapshot {
    let mut staff_list = Vec::new();
    let mut id = 1;
    for (rank, n) in [("SI", 4), ("ASI", 5), ("HC", 6), ("CONST", 20), ("HG", 10)] {
        for _ in 0..n {
            staff_list.push(staff(id, rank));
            id += 1;
        }
    }
    for rank in ["CONST", "CONST", "HC", "CONST", "HG", "CONST"] {
        staff_list.push(driver(id, rank));
        id += 1;
    }
    // A few female staff, one recognised only by name.
    staff_list.push(female(staff(id, "CONST")));
    id += 1;
    let mut lady = staff(id, "CONST");
    lady.name = "L/C Asha".into();
    lady.gender = String::new();
    staff_list.push(lady);
    id += 1;
    staff_list.push(female(driver(id, "CONST")));
    id += 1;
    // Not field-eligible.
    let mut static_const = staff(id, "CONST");
    static_const.preferred_duty = DutyPreference::Static;
    staff_list.push(static_const);
    id += 1;
    let mut fixed = staff(id, "HC");
    fixed.has_fixed_duty = true;
    fixed.fixed_location = Some(1);
    staff_list.push(fixed);

    let locations = vec![
        location(1, 10, "Zebra-101"),
        location(2, 10, "Alpha-1"),
        location(3, 20, "Eagle-05 M/C"),
        location(4, 20, "Bravo-2"),
        location(5, 30, "Charlie-3"),
        location(6, 30, "Rhino-01"),
    ];
    let requirements = vec![
        with_drivers(requirement(1, &[("SI", 1), ("CONST", 4)]), 2),
        with_senior(requirement(2, &[("CONST", 3), ("HG", 2)]), 1),
        with_drivers(requirement(3, &[("SI", 1), ("CONST", 3), ("HG", 2)]), 1),
        with_senior(requirement(4, &[("CONST", 4), ("HC", 1)]), 2),
        requirement(5, &[("SI", 1), ("CONST", 3), ("HG", 3)]),
        with_drivers(requirement(6, &[("CONST", 2), ("ASI", 1)]), 2),
    ];
    snapshot(staff_list, locations, requirements)
}
