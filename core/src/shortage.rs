//! Shortage bookkeeping.
//!
//! Per location: category → missing count. Per zone: cumulative missing
//! count, used only to order the area pass. Relaxation may only reduce
//! entries; an entry that reaches zero is dropped.

use crate::{
    model::Category,
    types::{LocationId, ZoneId},
};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShortageTracker {
    by_location: BTreeMap<LocationId, BTreeMap<Category, u32>>,
    by_zone: BTreeMap<ZoneId, u32>,
}

impl ShortageTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, location_id: LocationId, zone_id: ZoneId, category: Category, missing: u32) {
        if missing == 0 {
            return;
        }
        self.record_detail(location_id, category, missing);
        *self.by_zone.entry(zone_id).or_insert(0) += missing;
    }

    /// Record a shortfall in the per-location detail only. The zone total
    /// (and so the area pass order) is left untouched.
    pub fn record_detail(&mut self, location_id: LocationId, category: Category, missing: u32) {
        if missing == 0 {
            return;
        }
        *self
            .by_location
            .entry(location_id)
            .or_default()
            .entry(category)
            .or_insert(0) += missing;
    }

    /// Reduce a shortfall by up to `filled`. Returns how much was actually
    /// absorbed. Empty categories and empty locations are dropped.
    pub fn fill(&mut self, location_id: LocationId, zone_id: ZoneId, category: &Category, filled: u32) -> u32 {
        let Some(open) = self.by_location.get_mut(&location_id) else {
            return 0;
        };
        let Some(missing) = open.get_mut(category) else {
            return 0;
        };
        let absorbed = filled.min(*missing);
        *missing -= absorbed;
        if *missing == 0 {
            open.remove(category);
        }
        if open.is_empty() {
            self.by_location.remove(&location_id);
        }
        if let Some(zone) = self.by_zone.get_mut(&zone_id) {
            *zone = zone.saturating_sub(absorbed);
        }
        absorbed
    }

    pub fn missing(&self, location_id: LocationId, category: &Category) -> u32 {
        self.by_location
            .get(&location_id)
            .and_then(|open| open.get(category))
            .copied()
            .unwrap_or(0)
    }

    pub fn zone_missing(&self, zone_id: ZoneId) -> u32 {
        self.by_zone.get(&zone_id).copied().unwrap_or(0)
    }

    /// Locations with at least one open category, in id order.
    pub fn open_locations(&self) -> Vec<LocationId> {
        self.by_location.keys().copied().collect()
    }

    pub fn open_categories(&self, location_id: LocationId) -> Vec<(Category, u32)> {
        self.by_location
            .get(&location_id)
            .map(|open| open.iter().map(|(c, n)| (c.clone(), *n)).collect())
            .unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&LocationId, &BTreeMap<Category, u32>)> {
        self.by_location.iter()
    }

    /// Missing counts summed per category.
    pub fn totals(&self) -> BTreeMap<Category, u32> {
        let mut totals = BTreeMap::new();
        for open in self.by_location.values() {
            for (category, n) in open {
                *totals.entry(category.clone()).or_insert(0) += n;
            }
        }
        totals
    }

    pub fn total_missing(&self) -> u32 {
        self.by_location.values().flat_map(|open| open.values()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_location.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rank;

    #[test]
    fn fill_never_goes_negative_and_drops_empty_entries() {
        let mut t = ShortageTracker::new();
        let hg = Category::Rank(Rank::HomeGuard);
        t.record(1, 7, hg.clone(), 2);
        t.record(1, 7, Category::Driver, 1);

        assert_eq!(t.fill(1, 7, &hg, 5), 2);
        assert_eq!(t.missing(1, &hg), 0);
        assert_eq!(t.open_locations(), vec![1]);

        assert_eq!(t.fill(1, 7, &Category::Driver, 1), 1);
        assert!(t.is_empty());
        assert_eq!(t.zone_missing(7), 0);
        assert_eq!(t.fill(1, 7, &Category::Driver, 1), 0);
    }

    #[test]
    fn detail_only_shortfall_leaves_zone_total() {
        let mut t = ShortageTracker::new();
        let si = Category::Rank(Rank::SubInspector);
        t.record_detail(4, si.clone(), 2);
        t.record(5, 2, Category::Driver, 1);

        assert_eq!(t.missing(4, &si), 2);
        assert_eq!(t.zone_missing(2), 1);
        assert_eq!(t.total_missing(), 3);
    }

    #[test]
    fn zero_shortfall_is_not_recorded() {
        let mut t = ShortageTracker::new();
        t.record(3, 1, Category::Senior, 0);
        assert!(t.is_empty());
        assert_eq!(t.zone_missing(1), 0);
    }
}
