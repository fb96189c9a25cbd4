//! Final verification: independent re-check of the restriction invariant.
//!
//! Any female-flagged staff member found at a restricted location is
//! removed, the slot goes back to the shortage tracker, and the removal is
//! reported. Allocation-time filtering should make this a no-op.

use crate::{
    context::AllocationContext,
    error::RosterResult,
    event::RosterEvent,
    pass::AllocationPass,
};

#[derive(Default)]
pub struct VerificationPass;

impl VerificationPass {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPass for VerificationPass {
    fn name(&self) -> &'static str {
        "verification"
    }

    fn run(&mut self, ctx: &mut AllocationContext<'_>) -> RosterResult<Vec<RosterEvent>> {
        let tables = ctx.tables;
        let mut events = Vec::new();
        let assignments = std::mem::take(&mut ctx.assignments);
        let mut kept = Vec::with_capacity(assignments.len());

        for assignment in assignments {
            let violation = match (
                tables.location(assignment.location_id),
                tables.staff(assignment.staff_id),
            ) {
                (Some(location), Some(member)) if location.restricted && member.is_female => {
                    Some(location)
                }
                _ => None,
            };
            match violation {
                Some(location) => {
                    log::warn!(
                        "cycle={} verification: removed female staff {} from restricted location {} ({})",
                        ctx.cycle_id,
                        assignment.staff_id,
                        location.id,
                        location.call_sign
                    );
                    ctx.assigned.remove(&assignment.staff_id);
                    ctx.shortages
                        .record(location.id, location.zone_id, assignment.category.clone(), 1);
                    events.push(RosterEvent::VerificationRemoval {
                        location_id: location.id,
                        category: assignment.category,
                        staff_id: assignment.staff_id,
                    });
                }
                None => kept.push(assignment),
            }
        }

        let removed = events.len();
        ctx.assignments = kept;
        if removed > 0 {
            log::warn!("cycle={} verification: {removed} assignments removed", ctx.cycle_id);
        }
        events.push(RosterEvent::PassCompleted { pass: self.name().into(), committed: 0 });
        Ok(events)
    }
}
