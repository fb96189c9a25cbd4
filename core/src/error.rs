use crate::types::{LocationId, StaffId};
use thiserror::Error;

/// Fatal conditions for a generation cycle.
///
/// Staffing shortfalls are never errors. Only broken collaborator
/// contracts (data-integrity problems upstream) end up here.
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Requirement references unknown location {location_id}")]
    UnknownRequirementLocation { location_id: LocationId },

    #[error("Duplicate staff id {staff_id} in staff roster")]
    DuplicateStaff { staff_id: StaffId },

    #[error("Duplicate location id {location_id} in location roster")]
    DuplicateLocation { location_id: LocationId },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type RosterResult<T> = Result<T, RosterError>;
