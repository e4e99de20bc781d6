use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::model::PayloadRange;
use crate::state::{ControlEvent, DashboardSession};
use crate::ui::ViewState;

// ---------------------------------------------------------------------------
// Control panel – site selector and payload range
// ---------------------------------------------------------------------------

/// Render both controls and dispatch an event for each one that changed.
pub fn controls(ui: &mut Ui, session: &mut DashboardSession, view: &mut ViewState) {
    ui.strong("Launch Sites:");
    if let Some(event) = site_selector(ui, session, view) {
        if session.dispatch(event).pie {
            view.site_query.clear();
        }
    }

    ui.add_space(8.0);

    ui.strong("Payload range (Kg):");
    if let Some(event) = payload_slider(ui, view) {
        if session.dispatch(event).scatter {
            view.range = session.selection().payload_range;
        }
    }
}

/// Searchable single-choice dropdown over the site catalog.
fn site_selector(
    ui: &mut Ui,
    session: &DashboardSession,
    view: &mut ViewState,
) -> Option<ControlEvent> {
    let catalog = &session.dataset().sites;
    let current = &session.selection().selected_site;
    let selected_text = catalog
        .label_for(current)
        .unwrap_or(current.value())
        .to_string();

    let mut event = None;
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(selected_text)
        .width(ui.available_width() * 0.5)
        .show_ui(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::singleline(&mut view.site_query)
                    .hint_text("Select a Launch Site here"),
            );
            let query = view.site_query.to_lowercase();
            for option in &catalog.options {
                if !query.is_empty() && !option.label.to_lowercase().contains(&query) {
                    continue;
                }
                let selection = option.selection();
                if ui
                    .selectable_label(*current == selection, option.label.as_str())
                    .clicked()
                    && *current != selection
                {
                    event = Some(ControlEvent::SiteChanged(selection));
                }
            }
        });
    event
}

/// Two stepped sliders kept in `low ≤ high` order.
fn payload_slider(ui: &mut Ui, view: &mut ViewState) -> Option<ControlEvent> {
    let slider = view.slider;
    let mut changed = false;

    ui.horizontal(|ui: &mut Ui| {
        changed |= ui
            .add(
                egui::Slider::new(&mut view.range.low, slider.min..=slider.max)
                    .step_by(slider.step)
                    .text("min"),
            )
            .changed();
        changed |= ui
            .add(
                egui::Slider::new(&mut view.range.high, slider.min..=slider.max)
                    .step_by(slider.step)
                    .text("max"),
            )
            .changed();
    });

    if !changed {
        return None;
    }

    view.range = PayloadRange::new(slider.snap(view.range.low), slider.snap(view.range.high));
    if view.range.low > view.range.high {
        view.range.high = view.range.low;
    }
    Some(ControlEvent::RangeChanged(view.range))
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, session: &DashboardSession, view: &mut ViewState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Export charts…").clicked() {
                export_dialog(session, view);
                ui.close_menu();
            }
        });

        ui.separator();

        let ds = session.dataset();
        ui.label(format!(
            "{} launches loaded, {} in scatter",
            ds.len(),
            session.scatter().chart.points.len()
        ));

        if let Some(bounds) = ds.payload_bounds {
            ui.separator();
            ui.label(format!("Payload {:.0}–{:.0} kg", bounds.min, bounds.max));
        }

        ui.separator();

        if ui.selectable_label(view.show_table, "Records").clicked() {
            view.show_table = !view.show_table;
        }

        if let Some(msg) = &view.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Export dialog
// ---------------------------------------------------------------------------

pub fn export_dialog(session: &DashboardSession, view: &mut ViewState) {
    let file = rfd::FileDialog::new()
        .set_title("Export charts")
        .set_file_name("charts.json")
        .add_filter("JSON", &["json"])
        .save_file();

    if let Some(path) = file {
        match session.export_to_file(&path) {
            Ok(()) => view.status_message = None,
            Err(e) => {
                log::error!("Failed to export charts: {e:#}");
                view.status_message = Some(format!("Error: {e:#}"));
            }
        }
    }
}
