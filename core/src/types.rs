//! Shared primitive types used across the entire engine.

/// A staff member's stable identifier.
pub type StaffId = u64;

/// A location (post/area) identifier.
pub type LocationId = u64;

/// A zone identifier. Every location belongs to exactly one zone.
pub type ZoneId = u64;

/// The canonical cycle identifier.
pub type CycleId = uuid::Uuid;
