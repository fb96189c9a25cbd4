//! Cycle statistics: requirement versus commitment per category, and
//! utilization of the field-eligible pool.

use crate::{
    context::Assignment,
    eligibility,
    model::Category,
    pools::PoolSet,
    snapshot::RosterTables,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStat {
    pub category: Category,
    pub display: String,
    pub required: u32,
    pub committed: u32,
    /// committed − required. Negative is a shortage, positive a surplus.
    pub difference: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterStats {
    pub categories: Vec<CategoryStat>,
    pub eligible_staff: u32,
    pub assigned_staff: u32,
    /// assigned ÷ eligible, as a percentage.
    pub utilization: f64,
    pub field_drivers: u32,
    /// Driver-capable staff committed in any category.
    pub drivers_assigned: u32,
}

impl RosterStats {
    pub fn compute(tables: &RosterTables, pools: &PoolSet, assignments: &[Assignment]) -> Self {
        let mut required: BTreeMap<Category, u32> = BTreeMap::new();
        for req in tables.requirements.values() {
            for (category, n) in req.categories() {
                *required.entry(category).or_insert(0) += n;
            }
        }
        let mut committed: BTreeMap<Category, u32> = BTreeMap::new();
        for a in assignments {
            *committed.entry(a.category.clone()).or_insert(0) += 1;
        }

        let mut keys: Vec<Category> = required.keys().chain(committed.keys()).cloned().collect();
        keys.sort();
        keys.dedup();

        let categories = keys
            .into_iter()
            .map(|category| {
                let req = required.get(&category).copied().unwrap_or(0);
                let got = committed.get(&category).copied().unwrap_or(0);
                CategoryStat {
                    display: category.display().to_string(),
                    category,
                    required: req,
                    committed: got,
                    difference: i64::from(got) - i64::from(req),
                }
            })
            .collect();

        let eligible_staff = pools.eligible().len() as u32;
        let assigned_staff = assignments.len() as u32;
        let utilization = if eligible_staff == 0 {
            0.0
        } else {
            f64::from(assigned_staff) / f64::from(eligible_staff) * 100.0
        };
        let field_drivers = pools
            .eligible()
            .iter()
            .filter_map(|id| tables.staff(*id))
            .filter(|m| eligibility::is_field_driver(m))
            .count() as u32;
        let drivers_assigned = assignments
            .iter()
            .filter_map(|a| tables.staff(a.staff_id))
            .filter(|m| m.is_driver)
            .count() as u32;

        Self {
            categories,
            eligible_staff,
            assigned_staff,
            utilization,
            field_drivers,
            drivers_assigned,
        }
    }

    pub fn category(&self, category: &Category) -> Option<&CategoryStat> {
        self.categories.iter().find(|s| &s.category == category)
    }
}
