//! History resolution: where was each staff member placed last cycle?
//!
//! Seeded from the archived assignment list of the prior cycle, then
//! overwritten by manual overrides (most recent override wins).
//! Malformed archived entries are skipped one by one. A missing prior
//! cycle is a normal, empty history.

use crate::{
    event::RosterEvent,
    model::Location,
    types::{LocationId, StaffId, ZoneId},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// The archived payload of the last cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriorCycle {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub archived_at: Option<DateTime<Utc>>,
    /// Raw archived entries. Expected shape:
    /// `{"staff_id": 12, "location_id": 4}` (legacy archives use
    /// `"policeman"` / `"area"`).
    #[serde(default)]
    pub assignments: Vec<Value>,
}

/// A post-hoc correction recorded against the prior cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManualOverride {
    pub staff_id: StaffId,
    pub location_id: LocationId,
    pub recorded_at: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub zone_id: ZoneId,
    pub location_id: LocationId,
}

/// Repetition-priority bucket. Lower tiers are committed first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepeatTier {
    /// No prior placement in this zone.
    Fresh,
    /// Same zone, different location.
    ZoneRepeat,
    /// Same zone and same location.
    LocationRepeat,
}

impl RepeatTier {
    pub fn repeated_zone(&self) -> bool {
        !matches!(self, Self::Fresh)
    }

    pub fn repeated_location(&self) -> bool {
        matches!(self, Self::LocationRepeat)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HistoryMap {
    placements: HashMap<StaffId, Placement>,
}

impl HistoryMap {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Rebuild the staff → (zone, location) map.
    pub fn resolve(
        prior: Option<&PriorCycle>,
        overrides: &[ManualOverride],
        locations: &BTreeMap<LocationId, Location>,
    ) -> (Self, Vec<RosterEvent>) {
        let mut map = Self::empty();
        let mut events = Vec::new();

        let prior_entries = match prior {
            Some(cycle) => {
                for (index, entry) in cycle.assignments.iter().enumerate() {
                    match parse_entry(entry) {
                        Ok((staff_id, location_id)) => match locations.get(&location_id) {
                            Some(loc) => {
                                map.placements.insert(
                                    staff_id,
                                    Placement { zone_id: loc.zone_id, location_id },
                                );
                            }
                            None => {
                                log::debug!("history: entry {index} names unknown location {location_id}");
                                events.push(RosterEvent::HistoryEntrySkipped {
                                    index,
                                    reason: format!("unknown location {location_id}"),
                                });
                            }
                        },
                        Err(reason) => {
                            log::debug!("history: entry {index} skipped: {reason}");
                            events.push(RosterEvent::HistoryEntrySkipped { index, reason });
                        }
                    }
                }
                cycle.assignments.len()
            }
            None => {
                log::info!("history: no prior cycle, starting with empty history");
                0
            }
        };

        // Apply oldest first so the most recent override for a staff member wins.
        let mut ordered: Vec<&ManualOverride> = overrides.iter().collect();
        ordered.sort_by_key(|o| o.recorded_at);

        let mut overrides_applied = 0usize;
        for o in ordered {
            match locations.get(&o.location_id) {
                Some(loc) => {
                    map.placements.insert(
                        o.staff_id,
                        Placement { zone_id: loc.zone_id, location_id: o.location_id },
                    );
                    overrides_applied += 1;
                }
                None => {
                    log::warn!(
                        "history: override for staff {} names unknown location {}",
                        o.staff_id,
                        o.location_id
                    );
                    events.push(RosterEvent::HistoryOverrideSkipped {
                        staff_id: o.staff_id,
                        location_id: o.location_id,
                        reason: "unknown location".into(),
                    });
                }
            }
        }

        log::info!(
            "history: {} placements resolved ({prior_entries} archived entries, {overrides_applied} overrides)",
            map.placements.len()
        );
        events.push(RosterEvent::HistoryLoaded {
            prior_entries,
            overrides_applied,
            resolved: map.placements.len(),
        });

        (map, events)
    }

    pub fn insert(&mut self, staff_id: StaffId, placement: Placement) {
        self.placements.insert(staff_id, placement);
    }

    pub fn placement(&self, staff_id: StaffId) -> Option<Placement> {
        self.placements.get(&staff_id).copied()
    }

    /// Repetition tier of placing `staff_id` at `location`.
    pub fn tier(&self, staff_id: StaffId, location: &Location) -> RepeatTier {
        match self.placements.get(&staff_id) {
            Some(prev) if prev.zone_id == location.zone_id => {
                if prev.location_id == location.id {
                    RepeatTier::LocationRepeat
                } else {
                    RepeatTier::ZoneRepeat
                }
            }
            _ => RepeatTier::Fresh,
        }
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

fn parse_entry(entry: &Value) -> Result<(StaffId, LocationId), String> {
    let obj = entry
        .as_object()
        .ok_or_else(|| "entry is not an object".to_string())?;
    let staff = obj.get("staff_id").or_else(|| obj.get("policeman"));
    let location = obj.get("location_id").or_else(|| obj.get("area"));
    match (staff, location) {
        (Some(s), Some(l)) => match (s.as_u64(), l.as_u64()) {
            (Some(s), Some(l)) => Ok((s, l)),
            _ => Err("non-numeric id".into()),
        },
        _ => Err("missing staff or location id".into()),
    }
}
