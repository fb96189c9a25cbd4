//! Uniqueness, conservation and shortage monotonicity.

mod common;

use common::*;
use roster_core::{
    config::RosterConfig,
    context::AssignmentSource,
    engine::RosterOutcome,
    snapshot::RosterSnapshot,
};
use std::collections::HashSet;

/// Few staff, many posts: plenty of shortfalls.
fn understaffed() -> RosterSnapshot {
    let mut staff_list = vec![
        staff(1, "SI"),
        staff(2, "ASI"),
        staff(3, "CONST"),
        staff(4, "CONST"),
        staff(5, "HG"),
        female(staff(6, "HG")),
        driver(7, "CONST"),
        female(driver(8, "CONST")),
        driver(9, "HC"),
    ];
    staff_list.push(staff(10, "ACP"));
    snapshot(
        staff_list,
        vec![
            location(1, 1, RESTRICTED),
            location(2, 1, "Alpha-1"),
            location(3, 2, "Eagle-01"),
            location(4, 2, "Bravo-2"),
        ],
        vec![
            with_drivers(requirement(1, &[("SI", 1), ("CONST", 2), ("HG", 1)]), 2),
            with_senior(requirement(2, &[("CONST", 2), ("HG", 2)]), 1),
            with_drivers(requirement(3, &[("HC", 1), ("HG", 1)]), 1),
            with_senior(requirement(4, &[("CONST", 3), ("ACP", 1)]), 2),
        ],
    )
}

fn check_uniqueness(outcome: &RosterOutcome) {
    let mut seen = HashSet::new();
    for a in &outcome.assignments {
        assert!(seen.insert(a.staff_id), "staff {} assigned twice", a.staff_id);
    }
}

fn check_conservation(snap: &RosterSnapshot, outcome: &RosterOutcome) {
    let tables = snap.ingest(&RosterConfig::default()).expect("ingest");
    for (location, req) in tables.staffed_locations() {
        for (category, required) in req.categories() {
            let spilled = outcome.assignments.iter().any(|a| {
                a.location_id == location.id
                    && a.category == category
                    && a.source == AssignmentSource::Spillover
            });
            if spilled {
                continue;
            }
            let committed = outcome
                .assignments
                .iter()
                .filter(|a| a.location_id == location.id && a.category == category)
                .count() as u32;
            let missing = outcome.shortage_report.missing(location.id, &category);
            assert_eq!(
                committed + missing,
                required,
                "location {} {category}: {committed} committed + {missing} missing",
                location.id
            );
        }
    }
}

fn check_monotonic(outcome: &RosterOutcome) {
    for area in &outcome.shortage_report.areas {
        for line in &area.unfulfilled {
            let before = outcome
                .main_pass_shortages
                .missing(area.location_id, &line.category);
            assert!(
                line.count <= before,
                "location {} {}: {} after relaxation, {} after main pass",
                area.location_id,
                line.category,
                line.count,
                before
            );
        }
    }
    let total = |r: &roster_core::report::ShortageReport| -> u32 {
        r.totals.iter().map(|l| l.count).sum()
    };
    assert!(total(&outcome.shortage_report) <= total(&outcome.main_pass_shortages));
}

#[test]
fn invariants_hold_for_district() {
    let snap = district();
    for seed in 0..16 {
        let outcome = generate(&snap, seed);
        check_uniqueness(&outcome);
        check_conservation(&snap, &outcome);
        check_monotonic(&outcome);
    }
}

#[test]
fn invariants_hold_when_understaffed() {
    let snap = understaffed();
    for seed in 0..16 {
        let outcome = generate(&snap, seed);
        check_uniqueness(&outcome);
        check_conservation(&snap, &outcome);
        check_monotonic(&outcome);
        assert!(!outcome.shortage_report.is_empty());
    }
}

#[test]
fn assigned_and_unused_partition_the_eligible_pool() {
    let snap = understaffed();
    let outcome = generate(&snap, 77);

    let assigned: HashSet<u64> = outcome.assignments.iter().map(|a| a.staff_id).collect();
    let unused: HashSet<u64> = outcome
        .unused_report
        .groups
        .iter()
        .flat_map(|g| g.staff.iter().map(|s| s.id))
        .collect();
    assert!(assigned.is_disjoint(&unused));
    assert_eq!(
        (assigned.len() + unused.len()) as u32,
        outcome.stats.eligible_staff
    );
}

#[test]
fn empty_staff_yields_full_shortage() {
    let snap = snapshot(
        Vec::new(),
        vec![location(1, 1, "Alpha-1")],
        vec![with_senior(with_drivers(requirement(1, &[("CONST", 2)]), 1), 1)],
    );
    let outcome = generate(&snap, 0);

    assert!(outcome.assignments.is_empty());
    let totals: u32 = outcome.shortage_report.totals.iter().map(|l| l.count).sum();
    assert_eq!(totals, 4);
    assert_eq!(outcome.stats.utilization, 0.0);
}

#[test]
fn empty_requirements_leave_everyone_unused() {
    let snap = snapshot(
        vec![staff(1, "CONST"), driver(2, "HC")],
        vec![location(1, 1, "Alpha-1")],
        Vec::new(),
    );
    let outcome = generate(&snap, 0);

    assert!(outcome.assignments.is_empty());
    assert!(outcome.shortage_report.is_empty());
    assert_eq!(outcome.unused_report.total, 2);
}
