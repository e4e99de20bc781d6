pub mod panels;
pub mod plot;
pub mod table;

use crate::color::ColorMap;
use crate::config::SliderConfig;
use crate::data::model::{LaunchDataset, PayloadRange};

/// Widget-level state that is not part of the selection itself.
pub struct ViewState {
    pub slider: SliderConfig,
    /// Slider positions; mirrors the session's payload range.
    pub range: PayloadRange,
    /// Text typed into the site dropdown's search box.
    pub site_query: String,
    /// Whether the records table is shown.
    pub show_table: bool,
    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
    pub booster_colors: ColorMap,
    pub site_colors: ColorMap,
    pub outcome_colors: ColorMap,
}

impl ViewState {
    pub fn new(dataset: &LaunchDataset, slider: SliderConfig, range: PayloadRange) -> Self {
        Self {
            slider,
            range,
            site_query: String::new(),
            show_table: false,
            status_message: None,
            booster_colors: ColorMap::new(dataset.booster_categories.iter().map(String::as_str)),
            site_colors: ColorMap::new(dataset.sites.sites()),
            outcome_colors: ColorMap::new(["0", "1"]),
        }
    }
}
