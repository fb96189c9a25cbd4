//! Report formatting: shortages and unused staff as ordered, serializable
//! records. Only identifying fields leave the engine.

use crate::{
    context::{Assignment, AssignmentSource},
    eligibility,
    model::Category,
    pools::PoolSet,
    shortage::ShortageTracker,
    snapshot::RosterTables,
    types::{LocationId, StaffId, ZoneId},
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageLine {
    pub category: Category,
    pub display: String,
    pub count: u32,
}

impl ShortageLine {
    fn new(category: &Category, count: u32) -> Self {
        Self {
            category: category.clone(),
            display: category.display().to_string(),
            count,
        }
    }
}

/// One location's open categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocationShortage {
    pub location_id: LocationId,
    pub location_name: String,
    pub zone_id: ZoneId,
    pub zone_name: String,
    pub unfulfilled: Vec<ShortageLine>,
}

/// A driver absorbed into a non-driver slot after the main pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpilloverLine {
    pub location_id: LocationId,
    pub staff_id: StaffId,
    pub category: Category,
    pub display: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortageReport {
    pub areas: Vec<LocationShortage>,
    pub totals: Vec<ShortageLine>,
    pub spillover: Vec<SpilloverLine>,
}

impl ShortageReport {
    pub fn build(
        tracker: &ShortageTracker,
        tables: &RosterTables,
        assignments: &[Assignment],
    ) -> Self {
        let areas = tracker
            .iter()
            .map(|(location_id, open)| {
                let (location_name, zone_id, zone_name) = match tables.location(*location_id) {
                    Some(loc) => (loc.name.clone(), loc.zone_id, loc.zone_name.clone()),
                    None => (String::new(), 0, String::new()),
                };
                LocationShortage {
                    location_id: *location_id,
                    location_name,
                    zone_id,
                    zone_name,
                    unfulfilled: open.iter().map(|(c, n)| ShortageLine::new(c, *n)).collect(),
                }
            })
            .collect();

        let totals = tracker
            .totals()
            .iter()
            .map(|(c, n)| ShortageLine::new(c, *n))
            .collect();

        let spillover = assignments
            .iter()
            .filter(|a| a.source == AssignmentSource::Spillover)
            .map(|a| SpilloverLine {
                location_id: a.location_id,
                staff_id: a.staff_id,
                category: a.category.clone(),
                display: a.category.display().to_string(),
            })
            .collect();

        Self { areas, totals, spillover }
    }

    pub fn missing(&self, location_id: LocationId, category: &Category) -> u32 {
        self.areas
            .iter()
            .find(|a| a.location_id == location_id)
            .and_then(|a| a.unfulfilled.iter().find(|l| &l.category == category))
            .map(|l| l.count)
            .unwrap_or(0)
    }

    pub fn total(&self, category: &Category) -> u32 {
        self.totals
            .iter()
            .find(|l| &l.category == category)
            .map(|l| l.count)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedStaff {
    pub id: StaffId,
    pub name: String,
    pub belt_no: String,
    pub is_driver: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedGroup {
    pub category: Category,
    pub display: String,
    pub count: u32,
    pub staff: Vec<UnusedStaff>,
}

/// Everyone field-eligible but not committed, grouped by category.
/// Field drivers are listed under `DRIVER`, everyone else under their rank.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnusedReport {
    pub groups: Vec<UnusedGroup>,
    pub total: u32,
}

impl UnusedReport {
    pub fn build(pools: &PoolSet, assigned: &HashSet<StaffId>, tables: &RosterTables) -> Self {
        let mut grouped: BTreeMap<Category, Vec<UnusedStaff>> = BTreeMap::new();
        for id in pools.eligible() {
            if assigned.contains(id) {
                continue;
            }
            let Some(member) = tables.staff(*id) else {
                continue;
            };
            let category = if eligibility::is_field_driver(member) {
                Category::Driver
            } else {
                Category::Rank(member.rank.clone())
            };
            grouped.entry(category).or_default().push(UnusedStaff {
                id: member.id,
                name: member.name.clone(),
                belt_no: member.belt_no.clone(),
                is_driver: member.is_driver,
            });
        }

        let groups: Vec<UnusedGroup> = grouped
            .into_iter()
            .map(|(category, staff)| UnusedGroup {
                display: category.display().to_string(),
                count: staff.len() as u32,
                category,
                staff,
            })
            .collect();
        let total = groups.iter().map(|g| g.count).sum();
        Self { groups, total }
    }

    pub fn group(&self, category: &Category) -> Option<&UnusedGroup> {
        self.groups.iter().find(|g| &g.category == category)
    }

    pub fn contains(&self, category: &Category, staff_id: StaffId) -> bool {
        self.group(category)
            .is_some_and(|g| g.staff.iter().any(|s| s.id == staff_id))
    }
}
