//! Diagnostic event log for one generation cycle.
//!
//! Events are audit records. No pass reads another pass's events
//! for control flow.

use crate::{
    model::Category,
    types::{LocationId, StaffId},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RosterEvent {
    // ── Ingestion ──────────────────────────────
    HistoryEntrySkipped {
        index: usize,
        reason: String,
    },
    HistoryOverrideSkipped {
        staff_id: StaffId,
        location_id: LocationId,
        reason: String,
    },
    HistoryLoaded {
        prior_entries: usize,
        overrides_applied: usize,
        resolved: usize,
    },
    PoolsBuilt {
        eligible: usize,
        drivers: usize,
    },

    // ── Allocation ─────────────────────────────
    RestrictionExclusion {
        location_id: LocationId,
        category: Category,
        excluded: Vec<StaffId>,
    },
    ShortfallRecorded {
        location_id: LocationId,
        category: Category,
        requested: u32,
        committed: u32,
    },

    // ── Relaxation ─────────────────────────────
    RelaxationFill {
        location_id: LocationId,
        category: Category,
        staff_id: StaffId,
    },
    SpilloverFill {
        location_id: LocationId,
        category: Category,
        staff_id: StaffId,
    },

    // ── Verification ───────────────────────────
    VerificationRemoval {
        location_id: LocationId,
        category: Category,
        staff_id: StaffId,
    },

    PassCompleted {
        pass: String,
        committed: usize,
    },
}
