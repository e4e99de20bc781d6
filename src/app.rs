use eframe::egui::{self, Ui};

use crate::config::DashboardConfig;
use crate::data::model::SiteSelection;
use crate::state::DashboardSession;
use crate::ui::{panels, plot, table, ViewState};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct LaunchDashApp {
    pub session: DashboardSession,
    pub view: ViewState,
}

impl LaunchDashApp {
    pub fn new(session: DashboardSession, config: &DashboardConfig) -> Self {
        let view = ViewState::new(
            session.dataset(),
            config.slider,
            session.selection().payload_range,
        );
        Self { session, view }
    }
}

impl eframe::App for LaunchDashApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &self.session, &mut self.view);
        });

        // ---- Left side panel: controls ----
        egui::SidePanel::left("control_panel")
            .default_width(260.0)
            .resizable(true)
            .show(ctx, |ui| {
                ui.heading("SpaceX Launch Records Dashboard");
                ui.separator();
                panels::controls(ui, &mut self.session, &mut self.view);
            });

        // ---- Bottom panel: records in the scatter chart ----
        if self.view.show_table {
            egui::TopBottomPanel::bottom("records_panel")
                .resizable(true)
                .default_height(200.0)
                .show(ctx, |ui| {
                    let records = self.session.scatter_records();
                    table::records_table(ui, &records);
                });
        }

        // ---- Central panel: both charts ----
        egui::CentralPanel::default().show(ctx, |ui: &mut Ui| {
            let chart_height = (ui.available_height() / 2.0 - 40.0).max(150.0);

            let pie_colors = match self.session.selection().selected_site {
                SiteSelection::All => &self.view.site_colors,
                SiteSelection::Site(_) => &self.view.outcome_colors,
            };
            plot::pie_chart(ui, &self.session.pie().chart, pie_colors, chart_height);

            ui.separator();

            plot::scatter_chart(
                ui,
                &self.session.scatter().chart,
                &self.view.booster_colors,
                chart_height,
            );
        });
    }
}
