//! Deterministic random number generation.
//!
//! RULE: Nothing in the engine may call any platform RNG.
//! All randomness flows through PoolRng instances derived
//! from the single master seed supplied with the generation request.
//!
//! Each candidate pool gets its own RNG stream, seeded deterministically
//! from (master_seed XOR pool_index). This means:
//!   - Adding a new pool never changes existing pools' shuffle order.
//!   - Each pool's order is fully reproducible in isolation.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// A named, deterministic RNG for a single candidate pool.
pub struct PoolRng {
    pub name: &'static str,
    inner: Pcg64Mcg,
}

impl PoolRng {
    /// Create a pool RNG from the master seed and a stable
    /// pool index. The index must never change once assigned.
    pub fn new(master_seed: u64, pool_index: u64) -> Self {
        let derived_seed = master_seed ^ (pool_index.wrapping_mul(0x9e37_79b9_7f4a_7c15));
        Self {
            name: "unnamed",
            inner: Pcg64Mcg::seed_from_u64(derived_seed),
        }
    }

    pub fn with_name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }

    /// Shuffle a candidate list in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.inner);
    }
}

/// All pool RNGs for a single cycle, indexed by stable slot.
pub struct RngBank {
    master_seed: u64,
}

impl RngBank {
    pub fn new(master_seed: u64) -> Self {
        Self { master_seed }
    }

    pub fn for_pool(&self, slot: PoolSlot) -> PoolRng {
        PoolRng::new(self.master_seed, slot.index()).with_name(slot.name())
    }
}

/// Stable pool slot assignments.
/// NEVER reorder or remove entries, only append.
/// Reordering changes every pool's seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolSlot {
    SubInspector,
    AsstSubInspector,
    HeadConstable,
    Constable,
    HomeGuard,
    Driver,
    Senior,
    /// Opaque ranks get a slot derived from their code.
    Other(u64),
}

impl PoolSlot {
    pub fn index(&self) -> u64 {
        match self {
            Self::SubInspector => 0,
            Self::AsstSubInspector => 1,
            Self::HeadConstable => 2,
            Self::Constable => 3,
            Self::HomeGuard => 4,
            Self::Driver => 5,
            Self::Senior => 6,
            Self::Other(hash) => 1_000 + hash,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::SubInspector => "si",
            Self::AsstSubInspector => "asi",
            Self::HeadConstable => "hc",
            Self::Constable => "const",
            Self::HomeGuard => "hg",
            Self::Driver => "driver",
            Self::Senior => "senior",
            Self::Other(_) => "other",
        }
    }
}
