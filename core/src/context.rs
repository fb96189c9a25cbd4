//! The allocation context: all mutable state of one generation call.
//!
//! Owned exclusively by that call and handed by `&mut` to each pass.
//! Nothing here is global.

use crate::{
    history::HistoryMap,
    model::{Category, Location, StaffMember},
    pools::PoolSet,
    rng::RngBank,
    shortage::ShortageTracker,
    snapshot::RosterTables,
    types::{CycleId, LocationId, StaffId},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// How an assignment came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentSource {
    /// Ordered main pass.
    Primary,
    /// Same-category fill after the main pass.
    Relaxation,
    /// A leftover driver absorbed into a non-driver slot of their base rank.
    Spillover,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub cycle_id: CycleId,
    pub location_id: LocationId,
    pub staff_id: StaffId,
    /// The requirement slot this assignment counts against.
    pub category: Category,
    pub repeated_zone: bool,
    pub repeated_location: bool,
    pub source: AssignmentSource,
}

pub struct AllocationContext<'a> {
    pub cycle_id: CycleId,
    pub tables: &'a RosterTables,
    pub history: &'a HistoryMap,
    pub rng_bank: RngBank,
    pub pools: PoolSet,
    pub assigned: HashSet<StaffId>,
    pub assignments: Vec<Assignment>,
    pub shortages: ShortageTracker,
}

impl<'a> AllocationContext<'a> {
    pub fn new(
        cycle_id: CycleId,
        tables: &'a RosterTables,
        history: &'a HistoryMap,
        rng_bank: RngBank,
        pools: PoolSet,
    ) -> Self {
        Self {
            cycle_id,
            tables,
            history,
            rng_bank,
            pools,
            assigned: HashSet::new(),
            assignments: Vec::new(),
            shortages: ShortageTracker::new(),
        }
    }

    pub fn is_assigned(&self, staff_id: StaffId) -> bool {
        self.assigned.contains(&staff_id)
    }

    pub fn staff(&self, staff_id: StaffId) -> Option<&'a StaffMember> {
        self.tables.staff(staff_id)
    }

    /// May this staff member be placed at this location at all?
    pub fn permits(&self, staff_id: StaffId, location: &Location) -> bool {
        match self.staff(staff_id) {
            Some(member) => !(location.restricted && member.is_female),
            None => false,
        }
    }

    /// Record an assignment. Repetition flags come from the history tier.
    pub fn commit(
        &mut self,
        staff_id: StaffId,
        location: &Location,
        category: Category,
        source: AssignmentSource,
    ) -> Assignment {
        let tier = self.history.tier(staff_id, location);
        let assignment = Assignment {
            cycle_id: self.cycle_id,
            location_id: location.id,
            staff_id,
            category,
            repeated_zone: tier.repeated_zone(),
            repeated_location: tier.repeated_location(),
            source,
        };
        self.assigned.insert(staff_id);
        self.assignments.push(assignment.clone());
        assignment
    }

    pub fn committed_count(&self) -> usize {
        self.assignments.len()
    }
}
