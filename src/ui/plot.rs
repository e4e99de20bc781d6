use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{PieChart, ScatterChart, ScatterPoint};
use crate::color::ColorMap;

/// Widest wedge drawn as one polygon; egui only fills convex shapes.
const MAX_WEDGE_RAD: f64 = TAU / 4.0;
/// Slices below this share get no percentage label.
const MIN_LABEL_SHARE: f64 = 0.03;

// ---------------------------------------------------------------------------
// Proportion chart
// ---------------------------------------------------------------------------

/// Render a pie chart, one coloured wedge per slice, clockwise from 12 o'clock.
pub fn pie_chart(ui: &mut Ui, chart: &PieChart, colors: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title.as_str());
    });

    let total = chart.total();

    Plot::new("pie_chart")
        .height(height)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.2)
        .include_x(1.2)
        .include_y(-1.2)
        .include_y(1.2)
        .show(ui, |plot_ui| {
            if total <= 0.0 {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), RichText::new("No data").italics()));
                return;
            }

            let mut start = 0.0;
            for slice in &chart.slices {
                let sweep = slice.value / total * TAU;
                let color = colors.color_for(&slice.name);

                for points in wedge_segments(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(PlotPoints::new(points))
                            .name(slice.name.as_str())
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color)),
                    );
                }

                let share = slice.value / total;
                if share >= MIN_LABEL_SHARE {
                    let mid = start + sweep / 2.0;
                    let (x, y) = polar(0.65, mid);
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(x, y),
                            RichText::new(format!("{:.1}%", share * 100.0)).strong(),
                        )
                        .color(Color32::WHITE),
                    );
                }
                start += sweep;
            }
        });
}

/// Point on the unit-radius pie at angle `theta`, measured clockwise from the top.
fn polar(radius: f64, theta: f64) -> (f64, f64) {
    (radius * theta.sin(), radius * theta.cos())
}

/// Split one wedge into convex fan polygons no wider than [`MAX_WEDGE_RAD`].
fn wedge_segments(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    let n_segments = (sweep / MAX_WEDGE_RAD).ceil().max(1.0) as usize;
    let seg_sweep = sweep / n_segments as f64;
    (0..n_segments)
        .map(|seg| {
            let seg_start = start + seg as f64 * seg_sweep;
            let steps = ((seg_sweep / TAU) * 128.0).ceil().max(2.0) as usize;
            let mut pts = Vec::with_capacity(steps + 2);
            pts.push([0.0, 0.0]);
            for k in 0..=steps {
                let (x, y) = polar(1.0, seg_start + seg_sweep * k as f64 / steps as f64);
                pts.push([x, y]);
            }
            pts
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter chart
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter chart, one series per colour group.
pub fn scatter_chart(ui: &mut Ui, chart: &ScatterChart, colors: &ColorMap, height: f32) {
    ui.vertical_centered(|ui: &mut Ui| {
        ui.heading(chart.title.as_str());
    });

    let mut groups: BTreeMap<&str, Vec<&ScatterPoint>> = BTreeMap::new();
    for p in &chart.points {
        groups.entry(p.group.as_str()).or_default().push(p);
    }

    Plot::new("scatter_chart")
        .height(height)
        .legend(Legend::default())
        .x_axis_label(chart.x_label.as_str())
        .y_axis_label(chart.y_label.as_str())
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            if groups.is_empty() {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.5), RichText::new("No data").italics()));
                return;
            }
            for (group, pts) in groups {
                let series: PlotPoints = pts.iter().map(|p| [p.x, p.y]).collect();
                plot_ui.points(
                    Points::new(series)
                        .name(group)
                        .color(colors.color_for(group))
                        .radius(4.0)
                        .filled(true),
                );
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wedges_never_exceed_quarter_turn() {
        for segs in [wedge_segments(0.0, TAU), wedge_segments(1.0, 0.2)] {
            for pts in &segs {
                assert_eq!(pts[0], [0.0, 0.0]);
                assert!(pts.len() >= 4);
            }
        }
        assert_eq!(wedge_segments(0.0, TAU).len(), 4);
        assert_eq!(wedge_segments(0.0, 0.1).len(), 1);
    }

    #[test]
    fn polar_starts_at_twelve_o_clock() {
        let (x, y) = polar(1.0, 0.0);
        assert!((x - 0.0).abs() < 1e-12);
        assert!((y - 1.0).abs() < 1e-12);
    }
}
