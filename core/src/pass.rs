//! Allocation pass trait.
//!
//! RULE: Every phase of generation implements AllocationPass.
//! The engine runs passes in registration order, once per cycle.
//! Execution order is fixed and documented in engine.rs.

use crate::{context::AllocationContext, error::RosterResult, event::RosterEvent};

/// The contract every pass must fulfill.
pub trait AllocationPass {
    /// Unique stable name for this pass.
    fn name(&self) -> &'static str;

    /// Run the pass against the cycle's shared context.
    ///
    /// Returns the diagnostic events it produced.
    fn run(&mut self, ctx: &mut AllocationContext<'_>) -> RosterResult<Vec<RosterEvent>>;
}
