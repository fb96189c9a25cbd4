//! Domain records: ranks, categories, staff, locations and requirements.
//!
//! Input records (`*Record`) are what collaborators hand us. They are
//! resolved once at ingestion into the engine-side types, which carry
//! explicit derived flags (`is_female`, `restricted`) so no filtering site
//! ever re-derives them.

use crate::types::{LocationId, StaffId, ZoneId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ── Ranks ──────────────────────────────────────────────────────────

/// Staff rank. Serialized as its short code (`"SI"`, `"CONST"`, ...).
///
/// Variant order is the fixed category processing order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Rank {
    /// Primary senior rank. Allocated first, on its own.
    SubInspector,
    AsstSubInspector,
    HeadConstable,
    /// Generalist rank.
    Constable,
    /// Auxiliary tier (Home Guard). Always field-available.
    HomeGuard,
    /// Any code we don't recognise. Carried through as an opaque label.
    Other(String),
}

impl Rank {
    pub fn code(&self) -> &str {
        match self {
            Self::SubInspector => "SI",
            Self::AsstSubInspector => "ASI",
            Self::HeadConstable => "HC",
            Self::Constable => "CONST",
            Self::HomeGuard => "HG",
            Self::Other(code) => code,
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Self::SubInspector => "Sub Inspector",
            Self::AsstSubInspector => "Asst. Sub Inspector",
            Self::HeadConstable => "Head Constable",
            Self::Constable => "Constable",
            Self::HomeGuard => "Home Guard",
            Self::Other(code) => code,
        }
    }

    /// Ranks that feed the merged senior pool.
    pub fn is_senior(&self) -> bool {
        matches!(
            self,
            Self::SubInspector | Self::AsstSubInspector | Self::HeadConstable
        )
    }
}

impl From<String> for Rank {
    fn from(code: String) -> Self {
        match code.trim() {
            "SI" => Self::SubInspector,
            "ASI" => Self::AsstSubInspector,
            "HC" => Self::HeadConstable,
            "CONST" => Self::Constable,
            "HG" => Self::HomeGuard,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<&str> for Rank {
    fn from(code: &str) -> Self {
        Self::from(code.to_string())
    }
}

impl From<Rank> for String {
    fn from(rank: Rank) -> Self {
        rank.code().to_string()
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── Categories ─────────────────────────────────────────────────────

/// A staffing classification a requirement counts against.
/// Serialized as `"DRIVER"`, `"SENIOR"` or the rank code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Driver,
    Senior,
    Rank(Rank),
}

impl Category {
    pub fn code(&self) -> &str {
        match self {
            Self::Driver => "DRIVER",
            Self::Senior => "SENIOR",
            Self::Rank(rank) => rank.code(),
        }
    }

    pub fn display(&self) -> &str {
        match self {
            Self::Driver => "Driver",
            Self::Senior => "Senior Officer",
            Self::Rank(rank) => rank.display(),
        }
    }

    /// Critical categories may be filled even at the cost of repetition.
    pub fn is_critical(&self) -> bool {
        matches!(
            self,
            Self::Driver | Self::Rank(Rank::SubInspector) | Self::Rank(Rank::HomeGuard)
        )
    }

    pub fn rank(&self) -> Option<&Rank> {
        match self {
            Self::Rank(rank) => Some(rank),
            _ => None,
        }
    }
}

impl From<String> for Category {
    fn from(code: String) -> Self {
        match code.trim() {
            "DRIVER" => Self::Driver,
            "SENIOR" => Self::Senior,
            other => Self::Rank(Rank::from(other)),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.code().to_string()
    }
}

impl From<Rank> for Category {
    fn from(rank: Rank) -> Self {
        Self::Rank(rank)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ── Staff ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DutyPreference {
    #[default]
    Field,
    Static,
}

/// A staff member as delivered by the personnel roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffRecord {
    pub id: StaffId,
    pub name: String,
    #[serde(default)]
    pub belt_no: String,
    pub rank: Rank,
    /// Raw gender code. Historically free-form (`"F"`, `"female"`, ...).
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub is_driver: bool,
    #[serde(default)]
    pub preferred_duty: DutyPreference,
    #[serde(default)]
    pub has_fixed_duty: bool,
    #[serde(default)]
    pub fixed_location: Option<LocationId>,
}

/// A staff member resolved for one cycle. Immutable for the cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: StaffId,
    pub name: String,
    pub belt_no: String,
    pub rank: Rank,
    /// Resolved once from the gender code and the name markers.
    pub is_female: bool,
    pub is_driver: bool,
    pub preferred_duty: DutyPreference,
    pub has_fixed_duty: bool,
    pub fixed_location: Option<LocationId>,
}

// ── Locations ──────────────────────────────────────────────────────

/// A location (area/post) as delivered by the location roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationRecord {
    pub id: LocationId,
    #[serde(default)]
    pub name: String,
    pub zone_id: ZoneId,
    #[serde(default)]
    pub zone_name: String,
    /// Restriction signature. Matched against the restricted call-sign set.
    #[serde(default)]
    pub call_sign: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: LocationId,
    pub name: String,
    pub zone_id: ZoneId,
    pub zone_name: String,
    pub call_sign: String,
    /// Female-flagged staff may never be assigned here.
    pub restricted: bool,
}

// ── Requirements ───────────────────────────────────────────────────

/// Staffing requirement for one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub location_id: LocationId,
    /// Per-rank counts keyed by rank code.
    #[serde(default)]
    pub counts: BTreeMap<Rank, u32>,
    #[serde(default)]
    pub driver_count: u32,
    #[serde(default)]
    pub senior_count: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// The single active requirement for a location this cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Requirement {
    pub location_id: LocationId,
    pub ranks: BTreeMap<Rank, u32>,
    pub driver_count: u32,
    pub senior_count: u32,
}

impl Requirement {
    pub fn rank_count(&self, rank: &Rank) -> u32 {
        self.ranks.get(rank).copied().unwrap_or(0)
    }

    pub fn count(&self, category: &Category) -> u32 {
        match category {
            Category::Driver => self.driver_count,
            Category::Senior => self.senior_count,
            Category::Rank(rank) => self.rank_count(rank),
        }
    }

    /// SI + ASI + HC + CONST. Denominator of the zone shortage ratio;
    /// Home Guard and opaque ranks don't count toward it.
    pub fn ratio_base(&self) -> u32 {
        self.ranks
            .iter()
            .filter(|(rank, _)| !matches!(rank, Rank::HomeGuard | Rank::Other(_)))
            .map(|(_, n)| *n)
            .sum()
    }

    /// Every category this requirement asks for, in processing order.
    pub fn categories(&self) -> Vec<(Category, u32)> {
        let mut out = Vec::new();
        if self.driver_count > 0 {
            out.push((Category::Driver, self.driver_count));
        }
        if self.senior_count > 0 {
            out.push((Category::Senior, self.senior_count));
        }
        out.extend(
            self.ranks
                .iter()
                .filter(|(_, n)| **n > 0)
                .map(|(rank, n)| (Category::Rank(rank.clone()), *n)),
        );
        out
    }
}
