//! Input snapshot: everything one generation cycle consumes.
//!
//! The engine owns no persistent state. Collaborators hand over a
//! `RosterSnapshot`; ingestion resolves it into `RosterTables`, the
//! immutable lookup tables every pass reads.

use crate::{
    config::RosterConfig,
    eligibility,
    error::{RosterError, RosterResult},
    history::{ManualOverride, PriorCycle},
    model::{
        Category, Location, LocationRecord, Requirement, RequirementRecord, StaffMember, StaffRecord,
    },
    types::{LocationId, StaffId, ZoneId},
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RosterSnapshot {
    #[serde(default)]
    pub staff: Vec<StaffRecord>,
    #[serde(default)]
    pub locations: Vec<LocationRecord>,
    #[serde(default)]
    pub requirements: Vec<RequirementRecord>,
    #[serde(default)]
    pub prior_cycle: Option<PriorCycle>,
    #[serde(default)]
    pub overrides: Vec<ManualOverride>,
}

impl RosterSnapshot {
    pub fn from_json(content: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Load a snapshot file.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn to_json(&self) -> RosterResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Resolve records into lookup tables.
    ///
    /// Fails only on collaborator contract violations: duplicate ids, or a
    /// requirement naming a location that doesn't exist.
    pub fn ingest(&self, config: &RosterConfig) -> RosterResult<RosterTables> {
        let mut locations = BTreeMap::new();
        for rec in &self.locations {
            let location = Location {
                id: rec.id,
                name: rec.name.clone(),
                zone_id: rec.zone_id,
                zone_name: rec.zone_name.clone(),
                call_sign: rec.call_sign.trim().to_string(),
                restricted: eligibility::is_restricted(&rec.call_sign, config),
            };
            if locations.insert(rec.id, location).is_some() {
                return Err(RosterError::DuplicateLocation { location_id: rec.id });
            }
        }

        let mut staff = BTreeMap::new();
        for rec in &self.staff {
            let code = rec.rank.code();
            if code == Category::Driver.code() || code == Category::Senior.code() {
                log::warn!("ingest: staff {} carries slot code {code} as a rank", rec.id);
            }
            if let Some(fixed) = rec.fixed_location {
                if !locations.contains_key(&fixed) {
                    log::warn!("ingest: staff {} pinned to unknown location {fixed}", rec.id);
                }
            }
            let member = StaffMember {
                id: rec.id,
                name: rec.name.clone(),
                belt_no: rec.belt_no.clone(),
                rank: rec.rank.clone(),
                is_female: eligibility::is_female(&rec.gender, &rec.name, config),
                is_driver: rec.is_driver,
                preferred_duty: rec.preferred_duty,
                has_fixed_duty: rec.has_fixed_duty,
                // A fixed location only means something with fixed duty.
                fixed_location: rec.fixed_location.filter(|_| rec.has_fixed_duty),
            };
            if staff.insert(rec.id, member).is_some() {
                return Err(RosterError::DuplicateStaff { staff_id: rec.id });
            }
        }

        // One active requirement per location: latest updated_at wins,
        // later records win ties.
        let mut latest: BTreeMap<LocationId, &RequirementRecord> = BTreeMap::new();
        for rec in &self.requirements {
            if !locations.contains_key(&rec.location_id) {
                return Err(RosterError::UnknownRequirementLocation {
                    location_id: rec.location_id,
                });
            }
            match latest.get(&rec.location_id) {
                Some(current) if current.updated_at > rec.updated_at => {}
                _ => {
                    latest.insert(rec.location_id, rec);
                }
            }
        }
        let requirements = latest
            .into_iter()
            .map(|(location_id, rec)| (location_id, resolve_requirement(rec)))
            .collect();

        Ok(RosterTables { staff, locations, requirements })
    }
}

/// `DRIVER` and `SENIOR` keys in the per-rank counts name the dedicated
/// slots, never opaque ranks. They are folded into the slot counts.
fn resolve_requirement(rec: &RequirementRecord) -> Requirement {
    let mut req = Requirement {
        location_id: rec.location_id,
        ranks: BTreeMap::new(),
        driver_count: rec.driver_count,
        senior_count: rec.senior_count,
    };
    for (rank, n) in &rec.counts {
        let code = rank.code();
        if code == Category::Driver.code() {
            req.driver_count += n;
        } else if code == Category::Senior.code() {
            req.senior_count += n;
        } else {
            *req.ranks.entry(rank.clone()).or_insert(0) += n;
            continue;
        }
        log::warn!(
            "ingest: requirement for location {} lists {code} as a rank, counted as {code} slots",
            rec.location_id
        );
    }
    req
}

/// Resolved, read-only tables for one cycle.
#[derive(Debug, Clone, Default)]
pub struct RosterTables {
    pub staff: BTreeMap<StaffId, StaffMember>,
    pub locations: BTreeMap<LocationId, Location>,
    pub requirements: BTreeMap<LocationId, Requirement>,
}

impl RosterTables {
    pub fn staff(&self, id: StaffId) -> Option<&StaffMember> {
        self.staff.get(&id)
    }

    pub fn location(&self, id: LocationId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn requirement(&self, location_id: LocationId) -> Option<&Requirement> {
        self.requirements.get(&location_id)
    }

    /// Requirements paired with their locations, in location id order.
    pub fn staffed_locations(&self) -> impl Iterator<Item = (&Location, &Requirement)> {
        self.requirements
            .iter()
            .filter_map(|(id, req)| self.locations.get(id).map(|loc| (loc, req)))
    }

    /// Per-zone sum of `Requirement::ratio_base`.
    pub fn zone_rank_requirements(&self) -> BTreeMap<ZoneId, u32> {
        let mut totals = BTreeMap::new();
        for (loc, req) in self.staffed_locations() {
            *totals.entry(loc.zone_id).or_insert(0) += req.ratio_base();
        }
        totals
    }
}
