//! Senior pool pass.
//!
//! Forms the merged senior pool (unused SIs plus all ASIs and HCs), then
//! serves zones in descending order of their total senior requirement so
//! senior staffing is spread across zones before any one zone is topped up.

use crate::{
    allocator,
    context::AllocationContext,
    error::RosterResult,
    event::RosterEvent,
    model::Category,
    pass::AllocationPass,
    types::ZoneId,
};
use std::collections::BTreeMap;

#[derive(Default)]
pub struct SeniorPoolPass;

impl SeniorPoolPass {
    pub fn new() -> Self {
        Self
    }
}

impl AllocationPass for SeniorPoolPass {
    fn name(&self) -> &'static str {
        "senior_pool"
    }

    fn run(&mut self, ctx: &mut AllocationContext<'_>) -> RosterResult<Vec<RosterEvent>> {
        let tables = ctx.tables;
        let before = ctx.committed_count();
        let mut events = Vec::new();

        ctx.pools.form_senior_pool(&ctx.assigned, &ctx.rng_bank);
        log::debug!(
            "cycle={} senior_pool: merged pool holds {} candidates",
            ctx.cycle_id,
            ctx.pools.senior().len()
        );

        let mut zone_demand: BTreeMap<ZoneId, u32> = BTreeMap::new();
        for (location, req) in tables.staffed_locations() {
            if req.senior_count > 0 {
                *zone_demand.entry(location.zone_id).or_insert(0) += req.senior_count;
            }
        }
        let mut zones: Vec<(ZoneId, u32)> = zone_demand.into_iter().collect();
        zones.sort_by(|a, b| b.1.cmp(&a.1));

        for (zone_id, _) in zones {
            for (location, req) in tables.staffed_locations() {
                if location.zone_id != zone_id || req.senior_count == 0 {
                    continue;
                }
                let pool = ctx.pools.senior().to_vec();
                let allocation =
                    allocator::allocate(ctx, &pool, req.senior_count, location, &Category::Senior);
                ctx.pools.replace(&Category::Senior, allocation.leftover);
                events.extend(allocation.events);
            }
        }

        let committed = ctx.committed_count() - before;
        log::info!("cycle={} senior_pool: committed {committed} senior officers", ctx.cycle_id);
        events.push(RosterEvent::PassCompleted { pass: self.name().into(), committed });
        Ok(events)
    }
}
