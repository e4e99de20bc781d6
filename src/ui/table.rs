use eframe::egui::Ui;
use egui_extras::{Column, TableBuilder};

use crate::data::model::LaunchRecord;

// ---------------------------------------------------------------------------
// Records table (bottom panel)
// ---------------------------------------------------------------------------

/// List the launches currently plotted in the scatter chart.
pub fn records_table(ui: &mut Ui, records: &[&LaunchRecord]) {
    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(140.0))
        .column(Column::auto().at_least(120.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.strong("Launch Site");
            });
            header.col(|ui| {
                ui.strong("Payload Mass (kg)");
            });
            header.col(|ui| {
                ui.strong("class");
            });
            header.col(|ui| {
                ui.strong("Booster Version Category");
            });
        })
        .body(|body| {
            body.rows(18.0, records.len(), |mut row| {
                let rec = records[row.index()];
                row.col(|ui| {
                    ui.label(rec.site.as_str());
                });
                row.col(|ui| {
                    ui.label(format!("{:.1}", rec.payload_mass_kg));
                });
                row.col(|ui| {
                    ui.label(rec.outcome_class.to_string());
                });
                row.col(|ui| {
                    ui.label(rec.booster_version_category.as_str());
                });
            });
        });
}
