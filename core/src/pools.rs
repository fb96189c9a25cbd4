//! Candidate pools, partitioned by capability.
//!
//! Pools are plain id lists in shuffled order. They are never the source
//! of truth for "already assigned": every consumer filters against the
//! context's assigned set. The driver pool overlaps the rank pools, and the
//! senior pool is a view over the SI/ASI/HC pools.

use crate::{
    eligibility,
    model::{Category, Rank},
    rng::{PoolSlot, RngBank},
    snapshot::RosterTables,
    types::StaffId,
};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, Default)]
pub struct PoolSet {
    by_rank: BTreeMap<Rank, Vec<StaffId>>,
    drivers: Vec<StaffId>,
    senior: Vec<StaffId>,
    eligible: Vec<StaffId>,
}

impl PoolSet {
    /// Partition field-eligible staff and shuffle every pool once.
    pub fn build(tables: &RosterTables, bank: &RngBank) -> Self {
        let mut pools = Self::default();

        for member in tables.staff.values() {
            if !eligibility::is_field_eligible(member) {
                continue;
            }
            pools.eligible.push(member.id);
            pools
                .by_rank
                .entry(member.rank.clone())
                .or_default()
                .push(member.id);
            if eligibility::is_field_driver(member) {
                pools.drivers.push(member.id);
            }
        }

        for (rank, pool) in pools.by_rank.iter_mut() {
            let mut rng = bank.for_pool(slot_for(rank));
            rng.shuffle(pool);
            log::debug!("pools: {} pool holds {} candidates", rng.name, pool.len());
        }
        bank.for_pool(PoolSlot::Driver).shuffle(&mut pools.drivers);

        pools
    }

    /// Build pools from explicit, already-ordered lists. No shuffling.
    pub fn from_parts(by_rank: BTreeMap<Rank, Vec<StaffId>>, drivers: Vec<StaffId>) -> Self {
        let mut eligible: Vec<StaffId> = by_rank.values().flatten().copied().collect();
        eligible.sort_unstable();
        Self {
            by_rank,
            drivers,
            senior: Vec::new(),
            eligible,
        }
    }

    /// Merge the unused SIs with every ASI and HC into the senior pool.
    /// Runs after the primary-rank pass.
    pub fn form_senior_pool(&mut self, assigned: &HashSet<StaffId>, bank: &RngBank) {
        let mut senior: Vec<StaffId> = self
            .rank(&Rank::SubInspector)
            .iter()
            .filter(|id| !assigned.contains(*id))
            .copied()
            .collect();
        senior.extend_from_slice(self.rank(&Rank::AsstSubInspector));
        senior.extend_from_slice(self.rank(&Rank::HeadConstable));
        bank.for_pool(PoolSlot::Senior).shuffle(&mut senior);
        self.senior = senior;
    }

    pub fn rank(&self, rank: &Rank) -> &[StaffId] {
        self.by_rank.get(rank).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn ranks(&self) -> impl Iterator<Item = (&Rank, &Vec<StaffId>)> {
        self.by_rank.iter()
    }

    pub fn drivers(&self) -> &[StaffId] {
        &self.drivers
    }

    pub fn senior(&self) -> &[StaffId] {
        &self.senior
    }

    /// Every field-eligible staff member, in id order.
    pub fn eligible(&self) -> &[StaffId] {
        &self.eligible
    }

    /// The pool a category draws from.
    pub fn pool(&self, category: &Category) -> &[StaffId] {
        match category {
            Category::Driver => &self.drivers,
            Category::Senior => &self.senior,
            Category::Rank(rank) => self.rank(rank),
        }
    }

    /// Replace a category's pool with its leftover after an allocation.
    pub fn replace(&mut self, category: &Category, pool: Vec<StaffId>) {
        match category {
            Category::Driver => self.drivers = pool,
            Category::Senior => self.senior = pool,
            Category::Rank(rank) => {
                if pool.is_empty() && !self.by_rank.contains_key(rank) {
                    return;
                }
                self.by_rank.insert(rank.clone(), pool);
            }
        }
    }

    /// Unassigned members of a pool, order preserved.
    pub fn available(&self, category: &Category, assigned: &HashSet<StaffId>) -> Vec<StaffId> {
        self.pool(category)
            .iter()
            .filter(|id| !assigned.contains(*id))
            .copied()
            .collect()
    }
}

fn slot_for(rank: &Rank) -> PoolSlot {
    match rank {
        Rank::SubInspector => PoolSlot::SubInspector,
        Rank::AsstSubInspector => PoolSlot::AsstSubInspector,
        Rank::HeadConstable => PoolSlot::HeadConstable,
        Rank::Constable => PoolSlot::Constable,
        Rank::HomeGuard => PoolSlot::HomeGuard,
        Rank::Other(code) => PoolSlot::Other(fnv1a(code.as_bytes()) % 1_000_000),
    }
}

/// Stable 64-bit FNV-1a. std's hasher is not guaranteed stable across releases.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ u64::from(*b)).wrapping_mul(0x0100_0000_01b3)
    })
}
