//! The priority allocator.
//!
//! For one (location, category, count) request:
//!   1. drop candidates already assigned this cycle
//!   2. at restricted locations, drop female-flagged candidates
//!   3. bucket the rest by repetition tier (fresh, zone repeat, location repeat)
//!   4. commit the first `requested` in tier order, keeping pool order within a tier
//!   5. critical categories top up from any remaining eligible candidate
//!   6. record any gap with the shortage tracker
//!
//! The caller's pool is never mutated; the leftover is returned.

use crate::{
    context::{AllocationContext, Assignment, AssignmentSource},
    event::RosterEvent,
    history::RepeatTier,
    model::{Category, Location},
    types::StaffId,
};

/// Whether a shortfall feeds the zone total that orders the area pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTally {
    Counted,
    /// Location detail only. Used for the primary senior rank.
    DetailOnly,
}

#[derive(Debug, Default)]
pub struct Allocation {
    pub committed: Vec<Assignment>,
    /// The input pool minus everyone now assigned. Candidates excluded by a
    /// restriction stay in it; they remain usable elsewhere.
    pub leftover: Vec<StaffId>,
    pub events: Vec<RosterEvent>,
}

impl Allocation {
    pub fn shortfall(&self, requested: u32) -> u32 {
        requested.saturating_sub(self.committed.len() as u32)
    }
}

pub fn allocate(
    ctx: &mut AllocationContext<'_>,
    pool: &[StaffId],
    requested: u32,
    location: &Location,
    category: &Category,
) -> Allocation {
    allocate_tallied(ctx, pool, requested, location, category, ZoneTally::Counted)
}

pub fn allocate_tallied(
    ctx: &mut AllocationContext<'_>,
    pool: &[StaffId],
    requested: u32,
    location: &Location,
    category: &Category,
    tally: ZoneTally,
) -> Allocation {
    let mut out = Allocation::default();

    let candidates: Vec<StaffId> = pool
        .iter()
        .copied()
        .filter(|id| !ctx.is_assigned(*id))
        .collect();

    if requested == 0 {
        out.leftover = candidates;
        return out;
    }

    let candidates = if location.restricted {
        let (excluded, kept): (Vec<StaffId>, Vec<StaffId>) = candidates
            .into_iter()
            .partition(|id| !ctx.permits(*id, location));
        if !excluded.is_empty() {
            log::debug!(
                "cycle={} allocator: restricted location {} ({}) excludes {} {} candidates",
                ctx.cycle_id,
                location.id,
                location.call_sign,
                excluded.len(),
                category
            );
            out.events.push(RosterEvent::RestrictionExclusion {
                location_id: location.id,
                category: category.clone(),
                excluded,
            });
        }
        kept
    } else {
        candidates
    };

    let mut fresh = Vec::new();
    let mut zone_repeat = Vec::new();
    let mut location_repeat = Vec::new();
    for id in &candidates {
        match ctx.history.tier(*id, location) {
            RepeatTier::Fresh => fresh.push(*id),
            RepeatTier::ZoneRepeat => zone_repeat.push(*id),
            RepeatTier::LocationRepeat => location_repeat.push(*id),
        }
    }

    let mut chosen: Vec<StaffId> = fresh
        .into_iter()
        .chain(zone_repeat)
        .chain(location_repeat)
        .take(requested as usize)
        .collect();

    // Tiers partition the candidates, so this only fires if they ever stop doing so.
    if category.is_critical() && (chosen.len() as u32) < requested {
        for id in &candidates {
            if chosen.len() as u32 >= requested {
                break;
            }
            if !chosen.contains(id) {
                log::warn!(
                    "cycle={} allocator: critical {} top-up at location {} with staff {}",
                    ctx.cycle_id,
                    category,
                    location.id,
                    id
                );
                chosen.push(*id);
            }
        }
    }

    for id in chosen {
        let assignment = ctx.commit(id, location, category.clone(), AssignmentSource::Primary);
        out.committed.push(assignment);
    }

    let shortfall = out.shortfall(requested);
    if shortfall > 0 {
        match tally {
            ZoneTally::Counted => {
                ctx.shortages
                    .record(location.id, location.zone_id, category.clone(), shortfall)
            }
            ZoneTally::DetailOnly => {
                ctx.shortages.record_detail(location.id, category.clone(), shortfall)
            }
        }
        log::debug!(
            "cycle={} allocator: location {} short {shortfall} {} ({} of {requested} committed)",
            ctx.cycle_id,
            location.id,
            category,
            out.committed.len()
        );
        out.events.push(RosterEvent::ShortfallRecorded {
            location_id: location.id,
            category: category.clone(),
            requested,
            committed: out.committed.len() as u32,
        });
    }

    out.leftover = pool
        .iter()
        .copied()
        .filter(|id| !ctx.is_assigned(*id))
        .collect();
    out
}
