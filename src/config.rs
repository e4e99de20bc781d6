use std::path::PathBuf;

use crate::data::model::{PayloadRange, SiteSelection};

/// Dataset file name used when none is given on the command line.
pub const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

// ---------------------------------------------------------------------------
// Payload range slider domain
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderConfig {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 10_000.0,
            step: 1_000.0,
        }
    }
}

impl SliderConfig {
    /// Clamp to the domain and snap to the nearest step.
    pub fn snap(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let snapped = self.min + ((clamped - self.min) / self.step).round() * self.step;
        snapped.min(self.max)
    }
}

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Everything the dashboard needs to start a session.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub slider: SliderConfig,
    pub default_range: PayloadRange,
    pub default_site: SiteSelection,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            slider: SliderConfig::default(),
            default_range: PayloadRange::new(1_000.0, 5_000.0),
            default_site: SiteSelection::All,
            window_size: [1200.0, 900.0],
            min_window_size: [700.0, 500.0],
        }
    }
}

impl DashboardConfig {
    pub fn with_data_path(path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: path.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_control_domain() {
        let cfg = DashboardConfig::default();
        assert_eq!(cfg.slider, SliderConfig { min: 0.0, max: 10_000.0, step: 1_000.0 });
        assert_eq!(cfg.default_range, PayloadRange::new(1_000.0, 5_000.0));
        assert_eq!(cfg.default_site, SiteSelection::All);
        assert_eq!(cfg.data_path, PathBuf::from("spacex_launch_dash.csv"));
    }

    #[test]
    fn snap_clamps_and_rounds_to_step() {
        let slider = SliderConfig::default();
        assert_eq!(slider.snap(1_400.0), 1_000.0);
        assert_eq!(slider.snap(1_600.0), 2_000.0);
        assert_eq!(slider.snap(-50.0), 0.0);
        assert_eq!(slider.snap(12_000.0), 10_000.0);
    }
}
