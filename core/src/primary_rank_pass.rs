//! Primary senior rank pass (SI), ahead of everything else.
//!
//! Locations are served in descending order of their SI requirement.
//! SI shortfalls are reported per location but don't count toward the
//! zone totals that order the area pass.

use crate::{
    allocator::{self, ZoneTally},
    context::AllocationContext,
    error::RosterResult,
    event::RosterEvent,
    model::{Category, Rank},
    pass::AllocationPass,
};

pub struct PrimaryRankPass {
    rank: Rank,
}

impl PrimaryRankPass {
    pub fn new() -> Self {
        Self { rank: Rank::SubInspector }
    }
}

impl Default for PrimaryRankPass {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationPass for PrimaryRankPass {
    fn name(&self) -> &'static str {
        "primary_rank"
    }

    fn run(&mut self, ctx: &mut AllocationContext<'_>) -> RosterResult<Vec<RosterEvent>> {
        let tables = ctx.tables;
        let category = Category::Rank(self.rank.clone());
        let before = ctx.committed_count();
        let mut events = Vec::new();

        let mut locations: Vec<_> = tables
            .staffed_locations()
            .filter(|(_, req)| req.rank_count(&self.rank) > 0)
            .collect();
        // Stable: equal requirements keep location id order.
        locations.sort_by(|a, b| b.1.rank_count(&self.rank).cmp(&a.1.rank_count(&self.rank)));

        for (location, req) in locations {
            let pool = ctx.pools.pool(&category).to_vec();
            let allocation = allocator::allocate_tallied(
                ctx,
                &pool,
                req.rank_count(&self.rank),
                location,
                &category,
                ZoneTally::DetailOnly,
            );
            ctx.pools.replace(&category, allocation.leftover);
            events.extend(allocation.events);
        }

        let committed = ctx.committed_count() - before;
        log::info!(
            "cycle={} primary_rank: committed {committed} {}, {} left in pool",
            ctx.cycle_id,
            self.rank,
            ctx.pools.pool(&category).len()
        );
        events.push(RosterEvent::PassCompleted { pass: self.name().into(), committed });
        Ok(events)
    }
}
