//! Snapshot ingestion: contract violations fail, everything else is carried.

mod common;

use chrono::TimeZone;
use common::*;
use roster_core::{
    config::RosterConfig,
    engine::{GenerationRequest, RosterEngine},
    error::RosterError,
    model::Rank,
    snapshot::RosterSnapshot,
};

fn run(snap: &RosterSnapshot) -> Result<(), RosterError> {
    RosterEngine::with_default_config()
        .generate(snap, &GenerationRequest::new(cycle_id(1), 1))
        .map(|_| ())
}

#[test]
fn requirement_for_unknown_location_fails() {
    let snap = snapshot(
        vec![staff(1, "CONST")],
        vec![location(1, 1, "Alpha-1")],
        vec![requirement(2, &[("CONST", 1)])],
    );
    let err = run(&snap).expect_err("unknown location must fail");
    assert!(matches!(err, RosterError::UnknownRequirementLocation { location_id: 2 }));
}

#[test]
fn duplicate_staff_fails() {
    let snap = snapshot(
        vec![staff(1, "CONST"), staff(1, "HG")],
        vec![location(1, 1, "Alpha-1")],
        Vec::new(),
    );
    let err = run(&snap).expect_err("duplicate staff must fail");
    assert!(matches!(err, RosterError::DuplicateStaff { staff_id: 1 }));
}

#[test]
fn duplicate_location_fails() {
    let snap = snapshot(
        Vec::new(),
        vec![location(1, 1, "Alpha-1"), location(1, 2, "Bravo-2")],
        Vec::new(),
    );
    let err = run(&snap).expect_err("duplicate location must fail");
    assert!(matches!(err, RosterError::DuplicateLocation { location_id: 1 }));
}

#[test]
fn latest_requirement_wins() {
    let at = |hour| chrono::Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0).single();
    let mut old = requirement(1, &[("CONST", 5)]);
    old.updated_at = at(9);
    let mut new = requirement(1, &[("CONST", 2)]);
    new.updated_at = at(10);
    let mut tie = requirement(2, &[("HG", 1)]);
    tie.updated_at = at(8);
    let mut tie_later = requirement(2, &[("HG", 3)]);
    tie_later.updated_at = at(8);

    let snap = snapshot(
        Vec::new(),
        vec![location(1, 1, "Alpha-1"), location(2, 1, "Alpha-2")],
        vec![new, old, tie, tie_later],
    );
    let tables = snap.ingest(&RosterConfig::default()).expect("ingest");

    assert_eq!(tables.requirement(1).expect("req 1").rank_count(&Rank::Constable), 2);
    assert_eq!(tables.requirement(2).expect("req 2").rank_count(&Rank::HomeGuard), 3);
}

#[test]
fn snapshot_parses_from_json() {
    let json = r#"{
        "staff": [
            { "id": 1, "name": "L/Const Rani", "rank": "CONST", "is_driver": true },
            { "id": 2, "name": "Ram", "rank": "HG", "gender": "M", "preferred_duty": "STATIC" }
        ],
        "locations": [ { "id": 10, "zone_id": 1, "call_sign": "Rhino-02" } ],
        "requirements": [ { "location_id": 10, "counts": { "HG": 1, "ACP": 2 }, "driver_count": 1 } ],
        "prior_cycle": { "name": "last", "assignments": [ { "policeman": 2, "area": 10 } ] }
    }"#;
    let snap = RosterSnapshot::from_json(json).expect("parse");
    let tables = snap.ingest(&RosterConfig::default()).expect("ingest");

    assert!(tables.staff(1).expect("staff 1").is_female);
    assert!(!tables.staff(2).expect("staff 2").is_female);
    assert!(tables.location(10).expect("location").restricted);
    let req = tables.requirement(10).expect("requirement");
    assert_eq!(req.rank_count(&Rank::from("ACP")), 2);
    assert_eq!(req.driver_count, 1);

    let outcome = generate(&snap, 1);
    assert_eq!(assigned_ids(&outcome), vec![2]);
    let assignment = &outcome.assignments[0];
    assert!(assignment.repeated_location);
}

#[test]
fn custom_config_changes_restriction() {
    let config = RosterConfig::from_json(r#"{ "restricted_call_signs": ["Alpha-1"] }"#)
        .expect("config");
    let snap = snapshot(
        vec![female(staff(1, "CONST"))],
        vec![location(1, 1, "Alpha-1"), location(2, 1, "Zebra-101")],
        vec![requirement(1, &[("CONST", 1)]), requirement(2, &[("CONST", 1)])],
    );
    let outcome = RosterEngine::new(config)
        .generate(&snap, &GenerationRequest::new(cycle_id(2), 1))
        .expect("generate");

    assert_eq!(outcome.assignments.len(), 1);
    assert_eq!(outcome.assignments[0].location_id, 2);
}

#[test]
fn slot_codes_in_rank_counts_fold_into_slots() {
    let json = r#"{
        "locations": [ { "id": 1, "zone_id": 1, "call_sign": "Alpha-1" } ],
        "requirements": [
            { "location_id": 1, "counts": { "DRIVER": 2, "SENIOR": 1, "CONST": 3 }, "driver_count": 1 }
        ]
    }"#;
    let snap = RosterSnapshot::from_json(json).expect("parse");
    let tables = snap.ingest(&RosterConfig::default()).expect("ingest");

    let req = tables.requirement(1).expect("requirement");
    assert_eq!(req.driver_count, 3);
    assert_eq!(req.senior_count, 1);
    assert_eq!(req.ranks.len(), 1);
    assert_eq!(req.rank_count(&Rank::Constable), 3);
    assert_eq!(req.rank_count(&Rank::from("DRIVER")), 0);
}
