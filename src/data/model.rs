use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::de::{self, Unexpected};
use serde::{Deserialize, Deserializer, Serialize};

/// Column headers of the source table.
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER: &str = "Booster Version Category";

/// Catalog value standing for "every site".
pub const ALL_SITES_VALUE: &str = "ALL";
pub const ALL_SITES_LABEL: &str = "All Sites";

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LaunchRecord {
    #[serde(rename = "Launch Site")]
    pub site: String,
    #[serde(rename = "Payload Mass (kg)")]
    pub payload_mass_kg: f64,
    /// 0 = failure, 1 = success.
    #[serde(rename = "class", deserialize_with = "deserialize_class")]
    pub outcome_class: u8,
    #[serde(rename = "Booster Version Category")]
    pub booster_version_category: String,
}

/// Outcome class from a number; `1.0` is accepted since pandas writes
/// float-typed columns that way.
pub fn class_from_f64(v: f64) -> Option<u8> {
    if v.fract() == 0.0 && (0.0..=u8::MAX as f64).contains(&v) {
        Some(v as u8)
    } else {
        None
    }
}

fn deserialize_class<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let v = f64::deserialize(deserializer)?;
    class_from_f64(v)
        .ok_or_else(|| de::Error::invalid_value(Unexpected::Float(v), &"an integer class"))
}

// ---------------------------------------------------------------------------
// SiteSelection – value of the site selector
// ---------------------------------------------------------------------------

/// Either the "all sites" sentinel or one concrete launch site.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum SiteSelection {
    #[default]
    All,
    Site(String),
}

impl SiteSelection {
    /// Parse a selector value; `"ALL"` maps to the sentinel.
    pub fn from_value(value: &str) -> Self {
        if value == ALL_SITES_VALUE {
            SiteSelection::All
        } else {
            SiteSelection::Site(value.to_string())
        }
    }

    /// The selector value as the UI sees it.
    pub fn value(&self) -> &str {
        match self {
            SiteSelection::All => ALL_SITES_VALUE,
            SiteSelection::Site(s) => s,
        }
    }
}

impl From<String> for SiteSelection {
    fn from(value: String) -> Self {
        SiteSelection::from_value(&value)
    }
}

impl From<SiteSelection> for String {
    fn from(sel: SiteSelection) -> Self {
        sel.value().to_string()
    }
}

impl fmt::Display for SiteSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ---------------------------------------------------------------------------
// SiteCatalog – options of the site selector
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteOption {
    pub label: String,
    pub value: String,
}

impl SiteOption {
    pub fn selection(&self) -> SiteSelection {
        SiteSelection::from_value(&self.value)
    }
}

/// "All Sites" followed by every distinct site in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteCatalog {
    pub options: Vec<SiteOption>,
}

impl SiteCatalog {
    pub fn from_records(records: &[LaunchRecord]) -> Self {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut options = vec![SiteOption {
            label: ALL_SITES_LABEL.to_string(),
            value: ALL_SITES_VALUE.to_string(),
        }];
        for rec in records {
            if seen.insert(rec.site.as_str()) {
                options.push(SiteOption {
                    label: rec.site.clone(),
                    value: rec.site.clone(),
                });
            }
        }
        SiteCatalog { options }
    }

    /// Concrete sites only (without the "All Sites" entry).
    pub fn sites(&self) -> impl Iterator<Item = &str> {
        self.options
            .iter()
            .filter(|o| o.value != ALL_SITES_VALUE)
            .map(|o| o.value.as_str())
    }

    pub fn contains(&self, selection: &SiteSelection) -> bool {
        self.options.iter().any(|o| o.value == selection.value())
    }

    pub fn label_for(&self, selection: &SiteSelection) -> Option<&str> {
        self.options
            .iter()
            .find(|o| o.value == selection.value())
            .map(|o| o.label.as_str())
    }
}

// ---------------------------------------------------------------------------
// PayloadBounds / PayloadRange
// ---------------------------------------------------------------------------

/// Observed min/max payload across the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PayloadBounds {
    pub min: f64,
    pub max: f64,
}

impl PayloadBounds {
    /// `None` for an empty table.
    pub fn from_records(records: &[LaunchRecord]) -> Option<Self> {
        let mut iter = records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Some(PayloadBounds { min, max })
    }
}

/// Inclusive payload interval picked on the range slider.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PayloadRange {
    pub low: f64,
    pub high: f64,
}

impl PayloadRange {
    pub fn new(low: f64, high: f64) -> Self {
        PayloadRange { low, high }
    }

    pub fn contains(&self, mass_kg: f64) -> bool {
        self.low <= mass_kg && mass_kg <= self.high
    }
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded table
// ---------------------------------------------------------------------------

/// The parsed table plus the lookups computed once at load time.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    pub records: Vec<LaunchRecord>,
    pub sites: SiteCatalog,
    pub payload_bounds: Option<PayloadBounds>,
    /// Sorted distinct booster categories (stable colour assignment).
    pub booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let sites = SiteCatalog::from_records(&records);
        let payload_bounds = PayloadBounds::from_records(&records);
        let booster_categories = records
            .iter()
            .map(|r| r.booster_version_category.clone())
            .collect();
        LaunchDataset {
            records,
            sites,
            payload_bounds,
            booster_categories,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn record(site: &str, mass: f64, class: u8, booster: &str) -> LaunchRecord {
    LaunchRecord {
        site: site.to_string(),
        payload_mass_kg: mass,
        outcome_class: class,
        booster_version_category: booster.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_starts_with_all_and_keeps_first_appearance_order() {
        let records = vec![
            record("CCAFS LC-40", 0.0, 0, "v1.0"),
            record("VAFB SLC-4E", 500.0, 1, "v1.1"),
            record("CCAFS LC-40", 2000.0, 1, "FT"),
            record("KSC LC-39A", 3000.0, 1, "FT"),
        ];
        let catalog = SiteCatalog::from_records(&records);
        let values: Vec<&str> = catalog.options.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(
            values,
            vec!["ALL", "CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A"]
        );
        assert_eq!(catalog.options[0].label, "All Sites");
        assert_eq!(catalog.sites().count(), 3);
    }

    #[test]
    fn catalog_membership_and_labels() {
        let catalog = SiteCatalog::from_records(&[record("A", 1.0, 1, "FT")]);
        assert!(catalog.contains(&SiteSelection::All));
        assert!(catalog.contains(&SiteSelection::from_value("A")));
        assert!(!catalog.contains(&SiteSelection::from_value("Z")));
        assert_eq!(catalog.label_for(&SiteSelection::All), Some("All Sites"));
    }

    #[test]
    fn payload_bounds_cover_all_records() {
        let records = vec![
            record("A", 2500.0, 1, "FT"),
            record("A", 0.0, 0, "v1.0"),
            record("B", 9600.0, 1, "B5"),
        ];
        let bounds = PayloadBounds::from_records(&records).unwrap();
        assert_eq!(bounds, PayloadBounds { min: 0.0, max: 9600.0 });
        assert!(records
            .iter()
            .all(|r| bounds.min <= r.payload_mass_kg && r.payload_mass_kg <= bounds.max));
    }

    #[test]
    fn empty_table_has_no_bounds() {
        assert_eq!(PayloadBounds::from_records(&[]), None);
        let ds = LaunchDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert_eq!(ds.sites.options.len(), 1);
    }

    #[test]
    fn site_selection_sentinel() {
        assert_eq!(SiteSelection::from_value("ALL"), SiteSelection::All);
        assert_eq!(
            SiteSelection::from_value("KSC LC-39A"),
            SiteSelection::Site("KSC LC-39A".into())
        );
        assert_eq!(SiteSelection::All.value(), "ALL");
        let json = serde_json::to_string(&SiteSelection::Site("A".into())).unwrap();
        assert_eq!(json, "\"A\"");
    }

    #[test]
    fn range_is_inclusive() {
        let range = PayloadRange::new(1000.0, 5000.0);
        assert!(range.contains(1000.0));
        assert!(range.contains(5000.0));
        assert!(!range.contains(999.9));
        assert!(!PayloadRange::new(5000.0, 1000.0).contains(3000.0));
    }
}
