//! Relaxation and redistribution, after the main ordered pass.
//!
//!   1. Spare field drivers fill open driver shortfalls, largest first.
//!   2. Drivers still spare fill open shortfalls of their own base rank
//!      (spillover, flagged separately in reporting).
//!   3. Home Guard shortfalls take any unassigned Home Guard, least
//!      repetition first.
//!
//! Every fill re-applies the restriction check. Shortfalls only shrink here.

use crate::{
    context::{AllocationContext, AssignmentSource},
    error::RosterResult,
    event::RosterEvent,
    model::{Category, Location, Rank},
    pass::AllocationPass,
    types::{LocationId, StaffId},
};

#[derive(Default)]
pub struct RelaxationPass;

impl RelaxationPass {
    pub fn new() -> Self {
        Self
    }

    fn fill_one(
        ctx: &mut AllocationContext<'_>,
        staff_id: StaffId,
        location: &Location,
        category: &Category,
        source: AssignmentSource,
        events: &mut Vec<RosterEvent>,
    ) {
        ctx.commit(staff_id, location, category.clone(), source);
        ctx.shortages.fill(location.id, location.zone_id, category, 1);
        let event = match source {
            AssignmentSource::Spillover => RosterEvent::SpilloverFill {
                location_id: location.id,
                category: category.clone(),
                staff_id,
            },
            _ => RosterEvent::RelaxationFill {
                location_id: location.id,
                category: category.clone(),
                staff_id,
            },
        };
        events.push(event);
    }

    fn fill_driver_shortfalls(
        ctx: &mut AllocationContext<'_>,
        spare: &mut Vec<StaffId>,
        events: &mut Vec<RosterEvent>,
    ) {
        let tables = ctx.tables;
        let mut short: Vec<(LocationId, u32)> = ctx
            .shortages
            .open_locations()
            .into_iter()
            .map(|id| (id, ctx.shortages.missing(id, &Category::Driver)))
            .filter(|(_, missing)| *missing > 0)
            .collect();
        short.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

        for (location_id, missing) in short {
            let Some(location) = tables.location(location_id) else {
                continue;
            };
            for _ in 0..missing {
                let Some(pos) = spare.iter().position(|id| ctx.permits(*id, location)) else {
                    break;
                };
                let staff_id = spare.remove(pos);
                Self::fill_one(
                    ctx,
                    staff_id,
                    location,
                    &Category::Driver,
                    AssignmentSource::Relaxation,
                    events,
                );
            }
        }
    }

    fn spill_drivers_into_ranks(
        ctx: &mut AllocationContext<'_>,
        spare: &mut Vec<StaffId>,
        events: &mut Vec<RosterEvent>,
    ) {
        let tables = ctx.tables;
        for location_id in ctx.shortages.open_locations() {
            let Some(location) = tables.location(location_id) else {
                continue;
            };
            for (category, missing) in ctx.shortages.open_categories(location_id) {
                let Some(rank) = category.rank() else {
                    continue;
                };
                for _ in 0..missing {
                    let Some(pos) = spare.iter().position(|id| {
                        ctx.staff(*id).is_some_and(|m| &m.rank == rank) && ctx.permits(*id, location)
                    }) else {
                        break;
                    };
                    let staff_id = spare.remove(pos);
                    log::debug!(
                        "cycle={} relaxation: driver {staff_id} spills into {category} at location {location_id}",
                        ctx.cycle_id
                    );
                    Self::fill_one(
                        ctx,
                        staff_id,
                        location,
                        &category,
                        AssignmentSource::Spillover,
                        events,
                    );
                }
            }
        }
    }

    fn fill_home_guard_shortfalls(ctx: &mut AllocationContext<'_>, events: &mut Vec<RosterEvent>) {
        let tables = ctx.tables;
        let home_guard = Category::Rank(Rank::HomeGuard);

        for location_id in ctx.shortages.open_locations() {
            let missing = ctx.shortages.missing(location_id, &home_guard);
            if missing == 0 {
                continue;
            }
            let Some(location) = tables.location(location_id) else {
                continue;
            };
            let mut candidates: Vec<_> = ctx
                .pools
                .available(&home_guard, &ctx.assigned)
                .into_iter()
                .filter(|id| ctx.permits(*id, location))
                .map(|id| (ctx.history.tier(id, location), id))
                .collect();
            // Stable: pool order breaks ties within a tier.
            candidates.sort_by_key(|(tier, _)| *tier);

            for (_, staff_id) in candidates.into_iter().take(missing as usize) {
                Self::fill_one(
                    ctx,
                    staff_id,
                    location,
                    &home_guard,
                    AssignmentSource::Relaxation,
                    events,
                );
            }
        }
    }
}

impl AllocationPass for RelaxationPass {
    fn name(&self) -> &'static str {
        "relaxation"
    }

    fn run(&mut self, ctx: &mut AllocationContext<'_>) -> RosterResult<Vec<RosterEvent>> {
        let before = ctx.committed_count();
        let missing_before = ctx.shortages.total_missing();
        let mut events = Vec::new();

        let mut spare = ctx.pools.available(&Category::Driver, &ctx.assigned);
        if !spare.is_empty() && !ctx.shortages.is_empty() {
            log::debug!(
                "cycle={} relaxation: {} spare drivers for {} open locations",
                ctx.cycle_id,
                spare.len(),
                ctx.shortages.open_locations().len()
            );
            Self::fill_driver_shortfalls(ctx, &mut spare, &mut events);
            Self::spill_drivers_into_ranks(ctx, &mut spare, &mut events);
        }
        Self::fill_home_guard_shortfalls(ctx, &mut events);

        let committed = ctx.committed_count() - before;
        log::info!(
            "cycle={} relaxation: committed {committed}, missing {missing_before} -> {}",
            ctx.cycle_id,
            ctx.shortages.total_missing()
        );
        events.push(RosterEvent::PassCompleted { pass: self.name().into(), committed });
        Ok(events)
    }
}
