use serde::{Deserialize, Serialize};

/// Call signs from which female-flagged staff are excluded.
/// Matched exactly, or by the leading token (text before the first space).
const RESTRICTED_CALL_SIGNS: &[&str] = &[
    "Zebra-101", "Zebra-102", "Zebra-103", "Zebra-104", "Zebra-105", "Zebra-106",
    "Zebra-107", "Zebra-108", "Zebra-109", "Zebra-111", "Zebra-112", "Zebra-201",
    "Zebra-202", "Zebra-203", "Zebra-204", "Zebra-205", "Zebra-207", "Zebra-208",
    "Zebra-210", "Zebra-211", "Zebra-212", "Zebra-213", "Zebra-301", "Zebra-303",
    "Zebra-304", "Zebra-306", "Zebra-308", "Zebra-309", "Zeb-310", "Zeb-311",
    "Zebra-401", "Zebra-403", "Zebra-404", "Zebra-406", "Zebra-407", "Zebra-408",
    "Zebra-409", "Zebra-410", "Zullu-01", "Zullu-02", "Eagle-05 M/C", "Eagle-01",
    "Eagle-02", "Eagle-03", "Eagle-04", "Eagle-05", "Eagle-06", "Eagle-07", "Eagle-08",
    "Eagle-09", "Eagle-10", "Eagle-11", "Eagle-12", "Towing-01", "Towing-02",
    "Towing-03", "Towing-04", "Rec-01", "Rec-02", "Rec-03", "Rec-04", "Recovery -05",
    "Rhino-01", "Rhino-02",
];

/// Gender codes treated as female.
const FEMALE_GENDER_CODES: &[&str] = &["F", "Female", "female", "f"];

/// Rank markers that historical records embed in the display name
/// when the gender field was never filled in (Lady Constable).
const FEMALE_NAME_MARKERS: &[&str] = &["L/C", "L/Const", "Lady Const"];

/// Engine configuration. Fields missing from a loaded file keep
/// their production defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
    pub restricted_call_signs: Vec<String>,
    pub female_gender_codes: Vec<String>,
    pub female_name_markers: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        Self {
            restricted_call_signs: to_owned(RESTRICTED_CALL_SIGNS),
            female_gender_codes: to_owned(FEMALE_GENDER_CODES),
            female_name_markers: to_owned(FEMALE_NAME_MARKERS),
        }
    }
}

impl RosterConfig {
    /// Load an override file. In tests, use RosterConfig::default().
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        Self::from_json(&content)
    }

    pub fn from_json(content: &str) -> anyhow::Result<Self> {
        let config: RosterConfig = serde_json::from_str(content)?;
        if config.restricted_call_signs.iter().any(|s| s.trim().is_empty()) {
            anyhow::bail!("restricted_call_signs must not contain blank entries");
        }
        Ok(config)
    }
}

fn to_owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
