//! Area pass: drivers, then the remaining rank categories, location by location.
//!
//! ORDER (fixed):
//!   1. Locations needing drivers, largest driver requirement first.
//!   2. Every other location, lowest zone shortage ratio first. The ratio
//!      (zone missing ÷ zone SI/ASI/HC/CONST requirement) is recomputed before each
//!      location, so shortages spread across zones as they accumulate.
//!
//! Within a location: drivers first, then each rank in category order.
//! The primary senior rank is skipped; its own pass already served it.

use crate::{
    allocator,
    context::AllocationContext,
    error::RosterResult,
    event::RosterEvent,
    model::{Category, Location, Rank, Requirement},
    pass::AllocationPass,
    shortage::ShortageTracker,
    types::ZoneId,
};
use std::collections::BTreeMap;

pub struct AreaPass {
    primary: Rank,
}

impl AreaPass {
    pub fn new() -> Self {
        Self { primary: Rank::SubInspector }
    }

    fn serve_location(
        &self,
        ctx: &mut AllocationContext<'_>,
        location: &Location,
        req: &Requirement,
        events: &mut Vec<RosterEvent>,
    ) {
        let mut categories = Vec::new();
        if req.driver_count > 0 {
            categories.push((Category::Driver, req.driver_count));
        }
        for (rank, count) in &req.ranks {
            if *rank != self.primary && *count > 0 {
                categories.push((Category::Rank(rank.clone()), *count));
            }
        }

        for (category, count) in categories {
            let pool = ctx.pools.pool(&category).to_vec();
            let allocation = allocator::allocate(ctx, &pool, count, location, &category);
            ctx.pools.replace(&category, allocation.leftover);
            events.extend(allocation.events);
        }
    }
}

impl Default for AreaPass {
    fn default() -> Self {
        Self::new()
    }
}

impl AllocationPass for AreaPass {
    fn name(&self) -> &'static str {
        "area"
    }

    fn run(&mut self, ctx: &mut AllocationContext<'_>) -> RosterResult<Vec<RosterEvent>> {
        let tables = ctx.tables;
        let before = ctx.committed_count();
        let zone_totals = tables.zone_rank_requirements();
        let mut events = Vec::new();

        let mut with_drivers: Vec<(&Location, &Requirement, f64)> = tables
            .staffed_locations()
            .filter(|(_, req)| req.driver_count > 0)
            .map(|(loc, req)| (loc, req, shortage_ratio(&ctx.shortages, &zone_totals, loc.zone_id)))
            .collect();
        with_drivers.sort_by(|a, b| {
            b.1.driver_count
                .cmp(&a.1.driver_count)
                .then_with(|| a.2.total_cmp(&b.2))
                .then_with(|| a.0.zone_id.cmp(&b.0.zone_id))
                .then_with(|| a.0.id.cmp(&b.0.id))
        });
        log::debug!(
            "cycle={} area: {} locations need drivers, {} drivers pooled",
            ctx.cycle_id,
            with_drivers.len(),
            ctx.pools.drivers().len()
        );
        for (location, req, _) in with_drivers {
            self.serve_location(ctx, location, req, &mut events);
        }

        let mut remaining: Vec<(&Location, &Requirement)> = tables
            .staffed_locations()
            .filter(|(_, req)| req.driver_count == 0)
            .collect();
        while !remaining.is_empty() {
            let next = remaining
                .iter()
                .enumerate()
                .min_by(|(_, a), (_, b)| {
                    let ra = shortage_ratio(&ctx.shortages, &zone_totals, a.0.zone_id);
                    let rb = shortage_ratio(&ctx.shortages, &zone_totals, b.0.zone_id);
                    ra.total_cmp(&rb)
                        .then_with(|| a.0.zone_id.cmp(&b.0.zone_id))
                        .then_with(|| a.0.id.cmp(&b.0.id))
                })
                .map(|(index, _)| index)
                .unwrap_or(0);
            let (location, req) = remaining.remove(next);
            self.serve_location(ctx, location, req, &mut events);
        }

        let committed = ctx.committed_count() - before;
        log::info!(
            "cycle={} area: committed {committed}, {} still missing after main pass",
            ctx.cycle_id,
            ctx.shortages.total_missing()
        );
        events.push(RosterEvent::PassCompleted { pass: self.name().into(), committed });
        Ok(events)
    }
}

/// Zone shortage so far divided by the zone's ratio base.
pub fn shortage_ratio(
    shortages: &ShortageTracker,
    zone_totals: &BTreeMap<ZoneId, u32>,
    zone_id: ZoneId,
) -> f64 {
    match zone_totals.get(&zone_id).copied().unwrap_or(0) {
        0 => 0.0,
        total => f64::from(shortages.zone_missing(zone_id)) / f64::from(total),
    }
}
