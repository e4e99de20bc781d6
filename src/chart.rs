use serde::Serialize;

use crate::data::aggregate::{OutcomeCount, SiteCount};
use crate::data::model::{
    LaunchRecord, SiteSelection, COL_BOOSTER, COL_CLASS, COL_PAYLOAD, COL_SITE,
};

// ---------------------------------------------------------------------------
// Declarative chart specifications
// ---------------------------------------------------------------------------

/// One wedge of a proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieChart {
    pub title: String,
    /// Column the slice names come from.
    pub names: String,
    /// Column the slice sizes come from.
    pub values: String,
    pub slices: Vec<PieSlice>,
}

impl PieChart {
    pub fn total(&self) -> f64 {
        self.slices.iter().map(|s| s.value).sum()
    }
}

/// A single plotted record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub x: f64,
    pub y: f64,
    /// Colour key.
    pub group: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color_label: String,
    pub points: Vec<ScatterPoint>,
}

// ---------------------------------------------------------------------------
// Titles
// ---------------------------------------------------------------------------

pub const SITE_SHARE_TITLE: &str = "Total Success Launches By Site";
pub const ALL_SITES_SCATTER_TITLE: &str = "Correlation between Payload and Success for all Sites";

pub fn outcome_share_title(site: &str) -> String {
    format!("Total Success Launches for site {site}")
}

pub fn site_scatter_title(site: &str) -> String {
    format!("Correlation between Payload and Success for the Site {site}")
}

// ---------------------------------------------------------------------------
// Aggregation result → chart
// ---------------------------------------------------------------------------

/// "All Sites" pie: one slice per site.
pub fn site_share_chart(share: &[SiteCount]) -> PieChart {
    PieChart {
        title: SITE_SHARE_TITLE.to_string(),
        names: COL_SITE.to_string(),
        values: COL_CLASS.to_string(),
        slices: share
            .iter()
            .map(|s| PieSlice {
                name: s.site.clone(),
                value: s.count as f64,
            })
            .collect(),
    }
}

/// Single-site pie: one slice per outcome class.
pub fn outcome_share_chart(site: &str, share: &[OutcomeCount]) -> PieChart {
    PieChart {
        title: outcome_share_title(site),
        names: COL_CLASS.to_string(),
        values: COL_SITE.to_string(),
        slices: share
            .iter()
            .map(|s| PieSlice {
                name: s.outcome_class.to_string(),
                value: s.count as f64,
            })
            .collect(),
    }
}

/// Payload (x) against outcome class (y), coloured by booster category.
pub fn payload_scatter_chart(site: &SiteSelection, points: &[&LaunchRecord]) -> ScatterChart {
    let title = match site {
        SiteSelection::All => ALL_SITES_SCATTER_TITLE.to_string(),
        SiteSelection::Site(s) => site_scatter_title(s),
    };
    ScatterChart {
        title,
        x_label: COL_PAYLOAD.to_string(),
        y_label: COL_CLASS.to_string(),
        color_label: COL_BOOSTER.to_string(),
        points: points
            .iter()
            .map(|r| ScatterPoint {
                x: r.payload_mass_kg,
                y: f64::from(r.outcome_class),
                group: r.booster_version_category.clone(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::record;

    #[test]
    fn site_share_chart_has_one_slice_per_site() {
        let share = vec![
            SiteCount { site: "A".into(), count: 2 },
            SiteCount { site: "B".into(), count: 1 },
        ];
        let chart = site_share_chart(&share);
        assert_eq!(chart.title, "Total Success Launches By Site");
        assert_eq!(chart.slices.len(), 2);
        assert_eq!(chart.slices[0], PieSlice { name: "A".into(), value: 2.0 });
        assert_eq!(chart.total(), 3.0);
    }

    #[test]
    fn outcome_chart_interpolates_site_verbatim() {
        let share = vec![OutcomeCount { outcome_class: 1, count: 2 }];
        let chart = outcome_share_chart("KSC LC-39A", &share);
        assert_eq!(chart.title, "Total Success Launches for site KSC LC-39A");
        assert_eq!(chart.slices, vec![PieSlice { name: "1".into(), value: 2.0 }]);
    }

    #[test]
    fn scatter_titles_depend_on_site() {
        let all = payload_scatter_chart(&SiteSelection::All, &[]);
        assert_eq!(all.title, "Correlation between Payload and Success for all Sites");
        assert!(all.points.is_empty());

        let one = payload_scatter_chart(&SiteSelection::from_value("VAFB SLC-4E"), &[]);
        assert_eq!(
            one.title,
            "Correlation between Payload and Success for the Site VAFB SLC-4E"
        );
    }

    #[test]
    fn scatter_assigns_axes_and_colour_without_transforming() {
        let rec = record("A", 2490.0, 1, "FT");
        let chart = payload_scatter_chart(&SiteSelection::All, &[&rec]);
        assert_eq!(chart.x_label, "Payload Mass (kg)");
        assert_eq!(chart.y_label, "class");
        assert_eq!(chart.color_label, "Booster Version Category");
        assert_eq!(
            chart.points,
            vec![ScatterPoint { x: 2490.0, y: 1.0, group: "FT".into() }]
        );
    }

    #[test]
    fn charts_serialize_to_json() {
        let chart = site_share_chart(&[SiteCount { site: "A".into(), count: 1 }]);
        let json = serde_json::to_value(&chart).unwrap();
        assert_eq!(json["title"], "Total Success Launches By Site");
        assert_eq!(json["slices"][0]["name"], "A");
    }
}
