//! The generation engine: one call, one complete roster cycle.
//!
//! EXECUTION ORDER (fixed, documented, never reordered):
//!   1. Primary rank pass     (SI, locations by SI demand)
//!   2. Senior pool pass      (SI + ASI + HC leftovers, zones by senior demand)
//!   3. Area pass             (drivers by need, then ranks by zone shortage ratio)
//!   -- main-pass shortages are captured here --
//!   4. Relaxation pass       (driver fill, driver spillover, HG fill)
//!   5. Verification pass     (restricted-post safety net)
//!
//! RULES:
//!   - Passes execute in registration order, once per cycle.
//!   - All mutable state lives in the AllocationContext owned by the call.
//!   - No pass calls another pass's functions directly.
//!   - All randomness flows through the RngBank.
//!   - Every noteworthy decision is recorded in the event log.

use crate::{
    config::RosterConfig,
    context::{AllocationContext, Assignment},
    error::RosterResult,
    event::RosterEvent,
    history::HistoryMap,
    area_pass::AreaPass,
    pass::AllocationPass,
    pools::PoolSet,
    primary_rank_pass::PrimaryRankPass,
    relaxation_pass::RelaxationPass,
    report::{ShortageReport, UnusedReport},
    rng::RngBank,
    senior_pool_pass::SeniorPoolPass,
    shortage::ShortageTracker,
    snapshot::RosterSnapshot,
    stats::RosterStats,
    types::CycleId,
    verification_pass::VerificationPass,
};
use serde::{Deserialize, Serialize};

/// What the caller pins for one cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub cycle_id: CycleId,
    pub seed: u64,
}

impl GenerationRequest {
    pub fn new(cycle_id: CycleId, seed: u64) -> Self {
        Self { cycle_id, seed }
    }
}

/// Everything one cycle produces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterOutcome {
    pub cycle_id: CycleId,
    pub seed: u64,
    pub assignments: Vec<Assignment>,
    pub shortage_report: ShortageReport,
    /// Shortages as they stood after the area pass, before relaxation.
    pub main_pass_shortages: ShortageReport,
    pub unused_report: UnusedReport,
    pub repeated_zone_count: u32,
    pub repeated_location_count: u32,
    pub stats: RosterStats,
    pub events: Vec<RosterEvent>,
}

pub struct RosterEngine {
    config: RosterConfig,
}

impl Default for RosterEngine {
    fn default() -> Self {
        Self::with_default_config()
    }
}

impl RosterEngine {
    pub fn new(config: RosterConfig) -> Self {
        Self { config }
    }

    pub fn with_default_config() -> Self {
        Self::new(RosterConfig::default())
    }

    pub fn config(&self) -> &RosterConfig {
        &self.config
    }

    /// Fresh random cycle id. Kept out of `generate` so that a pinned
    /// request stays reproducible.
    pub fn new_cycle_id() -> CycleId {
        uuid::Uuid::new_v4()
    }

    /// Run every pass over the snapshot and collect the outcome.
    pub fn generate(
        &self,
        snapshot: &RosterSnapshot,
        request: &GenerationRequest,
    ) -> RosterResult<RosterOutcome> {
        let cycle_id = request.cycle_id;
        let tables = snapshot.ingest(&self.config)?;
        log::info!(
            "cycle={cycle_id} engine: seed={} staff={} locations={} requirements={}",
            request.seed,
            tables.staff.len(),
            tables.locations.len(),
            tables.requirements.len()
        );

        let (history, mut events) = HistoryMap::resolve(
            snapshot.prior_cycle.as_ref(),
            &snapshot.overrides,
            &tables.locations,
        );

        let rng_bank = RngBank::new(request.seed);
        let pools = PoolSet::build(&tables, &rng_bank);
        log::debug!(
            "cycle={cycle_id} engine: {} field-eligible, {} drivers",
            pools.eligible().len(),
            pools.drivers().len()
        );
        events.push(RosterEvent::PoolsBuilt {
            eligible: pools.eligible().len(),
            drivers: pools.drivers().len(),
        });
        let initial_pools = pools.clone();

        let mut ctx = AllocationContext::new(cycle_id, &tables, &history, rng_bank, pools);

        for mut pass in main_passes() {
            events.extend(run_pass(pass.as_mut(), &mut ctx)?);
        }
        let main_pass_tracker: ShortageTracker = ctx.shortages.clone();

        for mut pass in finishing_passes() {
            events.extend(run_pass(pass.as_mut(), &mut ctx)?);
        }

        let assignments = ctx.assignments;
        let shortage_report = ShortageReport::build(&ctx.shortages, &tables, &assignments);
        let main_pass_shortages = ShortageReport::build(&main_pass_tracker, &tables, &[]);
        let unused_report = UnusedReport::build(&initial_pools, &ctx.assigned, &tables);
        let stats = RosterStats::compute(&tables, &initial_pools, &assignments);
        let repeated_zone_count = assignments.iter().filter(|a| a.repeated_zone).count() as u32;
        let repeated_location_count =
            assignments.iter().filter(|a| a.repeated_location).count() as u32;

        log::info!(
            "cycle={cycle_id} engine: {} assigned, {} unused, {} short, repeats zone={} location={}",
            assignments.len(),
            unused_report.total,
            ctx.shortages.total_missing(),
            repeated_zone_count,
            repeated_location_count
        );

        Ok(RosterOutcome {
            cycle_id,
            seed: request.seed,
            assignments,
            shortage_report,
            main_pass_shortages,
            unused_report,
            repeated_zone_count,
            repeated_location_count,
            stats,
            events,
        })
    }
}

/// Ordered main pass.
fn main_passes() -> Vec<Box<dyn AllocationPass>> {
    vec![
        Box::new(PrimaryRankPass::new()),
        Box::new(SeniorPoolPass::new()),
        Box::new(AreaPass::new()),
    ]
}

/// Passes that run after the main-pass shortages are captured.
fn finishing_passes() -> Vec<Box<dyn AllocationPass>> {
    vec![Box::new(RelaxationPass::new()), Box::new(VerificationPass::new())]
}

fn run_pass(
    pass: &mut dyn AllocationPass,
    ctx: &mut AllocationContext<'_>,
) -> RosterResult<Vec<RosterEvent>> {
    log::debug!("cycle={} engine: running {}", ctx.cycle_id, pass.name());
    pass.run(ctx)
}
