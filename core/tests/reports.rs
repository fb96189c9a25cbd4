//! Shortage report, unused-staff report and cycle statistics.

mod common;

use common::*;
use roster_core::{
    engine::{GenerationRequest, RosterEngine, RosterOutcome},
    model::{Category, Rank},
};

#[test]
fn district_is_fully_staffed() {
    let outcome = generate(&district(), 2024);

    assert!(outcome.shortage_report.is_empty());
    assert!(outcome.shortage_report.spillover.is_empty());
    assert_eq!(outcome.assignments.len(), 39);
    assert_eq!(outcome.stats.eligible_staff, 54);
    assert_eq!(outcome.stats.assigned_staff, 39);
    assert_eq!(outcome.unused_report.total, 15);
    assert_eq!(outcome.stats.field_drivers, 7);
    assert!((outcome.stats.utilization - 39.0 / 54.0 * 100.0).abs() < 1e-9);

    let constables = outcome
        .stats
        .category(&Category::Rank(Rank::Constable))
        .expect("constable stat");
    assert_eq!(constables.required, 19);
    assert_eq!(constables.committed, 19);
    assert_eq!(constables.difference, 0);
    let drivers = outcome.stats.category(&Category::Driver).expect("driver stat");
    assert_eq!((drivers.required, drivers.committed), (5, 5));
}

#[test]
fn shortage_lines_carry_location_and_labels() {
    let snap = snapshot(
        vec![staff(1, "CONST")],
        vec![location(5, 3, "Alpha-1")],
        vec![with_drivers(requirement(5, &[("CONST", 2), ("ACP", 1)]), 1)],
    );
    let outcome = generate(&snap, 6);

    let area = &outcome.shortage_report.areas[0];
    assert_eq!(area.location_id, 5);
    assert_eq!(area.location_name, "Post 5");
    assert_eq!(area.zone_id, 3);
    assert_eq!(area.zone_name, "Zone 3");

    let labels: Vec<(&str, u32)> = area
        .unfulfilled
        .iter()
        .map(|l| (l.display.as_str(), l.count))
        .collect();
    assert!(labels.contains(&("Driver", 1)));
    assert!(labels.contains(&("Constable", 1)));
    // Unknown rank codes pass through as their own label.
    assert!(labels.contains(&("ACP", 1)));
    assert_eq!(outcome.shortage_report.total(&Category::Rank(Rank::from("ACP"))), 1);

    let acp = outcome
        .stats
        .category(&Category::Rank(Rank::from("ACP")))
        .expect("acp stat");
    assert_eq!(acp.difference, -1);
}

#[test]
fn unused_staff_grouped_and_reduced() {
    let snap = snapshot(
        vec![staff(1, "CONST"), driver(2, "CONST"), staff(3, "HG"), driver(4, "HG")],
        vec![location(1, 1, "Alpha-1")],
        Vec::new(),
    );
    let outcome = generate(&snap, 6);

    let drivers = outcome.unused_report.group(&Category::Driver).expect("drivers");
    let mut ids: Vec<u64> = drivers.staff.iter().map(|s| s.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![2, 4]);
    assert!(drivers.staff.iter().all(|s| s.is_driver));
    assert_eq!(drivers.display, "Driver");

    let constables = outcome
        .unused_report
        .group(&Category::Rank(Rank::Constable))
        .expect("constables");
    assert_eq!(constables.count, 1);
    assert_eq!(constables.staff[0].belt_no, "B-0001");
    assert!(outcome.unused_report.contains(&Category::Rank(Rank::HomeGuard), 3));
}

#[test]
fn outcome_serializes_to_json() {
    init_logging();
    let engine = RosterEngine::with_default_config();
    let request = GenerationRequest::new(RosterEngine::new_cycle_id(), 17);
    let outcome = engine.generate(&district(), &request).expect("generate");

    let json = serde_json::to_string(&outcome).expect("serialize");
    let back: RosterOutcome = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(back.cycle_id, request.cycle_id);
    assert_eq!(back.assignments, outcome.assignments);
    assert!(json.contains("\"type\":\"pass_completed\""));
    assert!(outcome.assignments.iter().all(|a| a.cycle_id == request.cycle_id));
}
