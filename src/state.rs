use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::chart::{self, PieChart, ScatterChart};
use crate::data::aggregate::{outcome_share_for_site, payload_outcome_points, success_share_by_site};
use crate::data::model::{LaunchDataset, LaunchRecord, PayloadRange, SiteSelection};

// ---------------------------------------------------------------------------
// Selection state and control events
// ---------------------------------------------------------------------------

/// What the two controls currently say. Owned by one session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected_site: SiteSelection,
    pub payload_range: PayloadRange,
}

impl SelectionState {
    pub fn new(selected_site: SiteSelection, payload_range: PayloadRange) -> Self {
        Self {
            selected_site,
            payload_range,
        }
    }
}

/// A user interaction with one of the controls.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    SiteChanged(SiteSelection),
    RangeChanged(PayloadRange),
}

// ---------------------------------------------------------------------------
// Handlers: (table, selection) → chart
// ---------------------------------------------------------------------------

/// Site-share pie for "All Sites", outcome-share pie otherwise.
pub fn pie_chart_for(records: &[LaunchRecord], site: &SiteSelection) -> PieChart {
    match site {
        SiteSelection::All => chart::site_share_chart(&success_share_by_site(records)),
        SiteSelection::Site(s) => chart::outcome_share_chart(s, &outcome_share_for_site(records, s)),
    }
}

pub fn scatter_chart_for(
    records: &[LaunchRecord],
    site: &SiteSelection,
    range: PayloadRange,
) -> ScatterChart {
    let points = payload_outcome_points(records, range, site);
    chart::payload_scatter_chart(site, &points)
}

// ---------------------------------------------------------------------------
// Published charts
// ---------------------------------------------------------------------------

/// A chart plus a counter bumped every time it is republished.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Published<T> {
    pub chart: T,
    pub revision: u64,
}

impl<T> Published<T> {
    fn new(chart: T) -> Self {
        Self { chart, revision: 0 }
    }

    fn republish(&mut self, chart: T) {
        self.chart = chart;
        self.revision += 1;
    }
}

/// Which charts a dispatch republished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Republished {
    pub pie: bool,
    pub scatter: bool,
}

/// Snapshot written by "Export charts…" and `--export`.
#[derive(Debug, Serialize)]
pub struct ChartExport<'a> {
    pub selection: &'a SelectionState,
    pub pie: &'a Published<PieChart>,
    pub scatter: &'a Published<ScatterChart>,
}

// ---------------------------------------------------------------------------
// Dashboard session
// ---------------------------------------------------------------------------

/// One user's view of the shared, read-only dataset.
///
/// Events are handled synchronously to completion; `&mut self` guarantees no
/// two recomputations overlap.
#[derive(Debug, Clone)]
pub struct DashboardSession {
    dataset: Arc<LaunchDataset>,
    selection: SelectionState,
    pie: Published<PieChart>,
    scatter: Published<ScatterChart>,
}

impl DashboardSession {
    /// Start a session and publish both charts for the initial selection.
    pub fn new(dataset: Arc<LaunchDataset>, selection: SelectionState) -> Self {
        let pie = pie_chart_for(&dataset.records, &selection.selected_site);
        let scatter = scatter_chart_for(
            &dataset.records,
            &selection.selected_site,
            selection.payload_range,
        );
        Self {
            dataset,
            selection,
            pie: Published::new(pie),
            scatter: Published::new(scatter),
        }
    }

    pub fn dataset(&self) -> &LaunchDataset {
        &self.dataset
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn pie(&self) -> &Published<PieChart> {
        &self.pie
    }

    pub fn scatter(&self) -> &Published<ScatterChart> {
        &self.scatter
    }

    /// Records currently shown in the scatter chart.
    pub fn scatter_records(&self) -> Vec<&LaunchRecord> {
        payload_outcome_points(
            &self.dataset.records,
            self.selection.payload_range,
            &self.selection.selected_site,
        )
    }

    /// Apply one control event and republish the charts that depend on it.
    pub fn dispatch(&mut self, event: ControlEvent) -> Republished {
        log::debug!("dispatch {event:?}");
        match event {
            ControlEvent::SiteChanged(site) => {
                self.selection.selected_site = site;
                self.refresh_pie();
                self.refresh_scatter();
                Republished {
                    pie: true,
                    scatter: true,
                }
            }
            ControlEvent::RangeChanged(range) => {
                self.selection.payload_range = range;
                self.refresh_scatter();
                Republished {
                    pie: false,
                    scatter: true,
                }
            }
        }
    }

    fn refresh_pie(&mut self) {
        let chart = pie_chart_for(&self.dataset.records, &self.selection.selected_site);
        log::debug!("pie '{}': {} slices", chart.title, chart.slices.len());
        self.pie.republish(chart);
    }

    fn refresh_scatter(&mut self) {
        let chart = scatter_chart_for(
            &self.dataset.records,
            &self.selection.selected_site,
            self.selection.payload_range,
        );
        log::debug!("scatter '{}': {} points", chart.title, chart.points.len());
        self.scatter.republish(chart);
    }

    pub fn export(&self) -> ChartExport<'_> {
        ChartExport {
            selection: &self.selection,
            pie: &self.pie,
            scatter: &self.scatter,
        }
    }

    /// Write the current selection and both charts as pretty JSON.
    pub fn export_to_file(&self, path: &Path) -> Result<()> {
        let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, &self.export())
            .with_context(|| format!("writing charts to {}", path.display()))?;
        writer.flush().context("flushing chart export")?;
        log::info!("Exported charts to {}", path.display());
        Ok(())
    }
}
