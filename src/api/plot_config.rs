use serde::{Deserialize, Serialize};

use crate::core::{Frequency, SubplotLimitDirection, SubplotOwner, SubplotSpacing, Viewport};
use crate::error::{PlotError, PlotResult};

/// Colors and widths used by the trace factories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotStyle {
    #[serde(default = "default_realization_line_width")]
    pub realization_line_width: f64,
    #[serde(default = "default_statistics_line_width")]
    pub statistics_line_width: f64,
    #[serde(default = "default_emphasized_statistics_line_width")]
    pub emphasized_statistics_line_width: f64,
    #[serde(default = "default_realization_lightness_scale")]
    pub realization_lightness_scale: f64,
    #[serde(default = "default_history_color")]
    pub history_color: String,
    #[serde(default = "default_history_line_width")]
    pub history_line_width: f64,
    #[serde(default = "default_observation_color")]
    pub observation_color: String,
    #[serde(default = "default_parameter_fallback_color")]
    pub parameter_fallback_color: String,
    #[serde(default = "default_p10_p90_band_alpha")]
    pub p10_p90_band_alpha: f64,
    #[serde(default = "default_min_max_band_alpha")]
    pub min_max_band_alpha: f64,
    #[serde(default = "default_time_cursor_color")]
    pub time_cursor_color: String,
    #[serde(default = "default_time_cursor_label_offset")]
    pub time_cursor_label_offset: f64,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            realization_line_width: default_realization_line_width(),
            statistics_line_width: default_statistics_line_width(),
            emphasized_statistics_line_width: default_emphasized_statistics_line_width(),
            realization_lightness_scale: default_realization_lightness_scale(),
            history_color: default_history_color(),
            history_line_width: default_history_line_width(),
            observation_color: default_observation_color(),
            parameter_fallback_color: default_parameter_fallback_color(),
            p10_p90_band_alpha: default_p10_p90_band_alpha(),
            min_max_band_alpha: default_min_max_band_alpha(),
            time_cursor_color: default_time_cursor_color(),
            time_cursor_label_offset: default_time_cursor_label_offset(),
        }
    }
}

impl PlotStyle {
    fn validate(&self) -> PlotResult<()> {
        for (value, name) in [
            (self.realization_line_width, "realization_line_width"),
            (self.statistics_line_width, "statistics_line_width"),
            (
                self.emphasized_statistics_line_width,
                "emphasized_statistics_line_width",
            ),
            (self.realization_lightness_scale, "realization_lightness_scale"),
            (self.history_line_width, "history_line_width"),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(PlotError::Configuration(format!(
                    "style `{name}` must be finite and > 0"
                )));
            }
        }
        for (value, name) in [
            (self.p10_p90_band_alpha, "p10_p90_band_alpha"),
            (self.min_max_band_alpha, "min_max_band_alpha"),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(PlotError::Configuration(format!(
                    "style `{name}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

/// Per-render configuration of the plot builder.
///
/// Serializable so host applications can persist a view setup without
/// inventing their own format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotBuilderConfig {
    #[serde(default = "default_subplot_owner")]
    pub subplot_owner: SubplotOwner,
    #[serde(default = "default_resample_frequency")]
    pub resample_frequency: Option<Frequency>,
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_limit_direction")]
    pub limit_direction: SubplotLimitDirection,
    #[serde(default = "default_max_direction_elements")]
    pub max_direction_elements: usize,
    #[serde(default)]
    pub spacing: SubplotSpacing,
    #[serde(default)]
    pub color_by_parameter: bool,
    #[serde(default)]
    pub style: PlotStyle,
}

impl Default for PlotBuilderConfig {
    fn default() -> Self {
        Self::new(default_viewport())
    }
}

impl PlotBuilderConfig {
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            subplot_owner: default_subplot_owner(),
            resample_frequency: default_resample_frequency(),
            viewport,
            limit_direction: default_limit_direction(),
            max_direction_elements: default_max_direction_elements(),
            spacing: SubplotSpacing::default(),
            color_by_parameter: false,
            style: PlotStyle::default(),
        }
    }

    #[must_use]
    pub fn with_subplot_owner(mut self, owner: SubplotOwner) -> Self {
        self.subplot_owner = owner;
        self
    }

    #[must_use]
    pub fn with_resample_frequency(mut self, frequency: Option<Frequency>) -> Self {
        self.resample_frequency = frequency;
        self
    }

    /// Limits the number of subplots along one direction.
    #[must_use]
    pub fn with_subplot_limit(
        mut self,
        direction: SubplotLimitDirection,
        max_direction_elements: usize,
    ) -> Self {
        self.limit_direction = direction;
        self.max_direction_elements = max_direction_elements;
        self
    }

    #[must_use]
    pub fn with_spacing(mut self, spacing: SubplotSpacing) -> Self {
        self.spacing = spacing;
        self
    }

    #[must_use]
    pub fn with_color_by_parameter(mut self, enabled: bool) -> Self {
        self.color_by_parameter = enabled;
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: PlotStyle) -> Self {
        self.style = style;
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        for (value, name) in [
            (self.spacing.horizontal, "horizontal"),
            (self.spacing.vertical, "vertical"),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(PlotError::Configuration(format!(
                    "{name} subplot spacing must be finite and in [0, 1)"
                )));
            }
        }
        self.style.validate()
    }
}

fn default_subplot_owner() -> SubplotOwner {
    SubplotOwner::Vector
}

fn default_resample_frequency() -> Option<Frequency> {
    Some(Frequency::Monthly)
}

fn default_viewport() -> Viewport {
    Viewport::new(1200, 800)
}

fn default_limit_direction() -> SubplotLimitDirection {
    SubplotLimitDirection::None
}

fn default_max_direction_elements() -> usize {
    2
}

fn default_realization_line_width() -> f64 {
    1.0
}

fn default_statistics_line_width() -> f64 {
    2.0
}

fn default_emphasized_statistics_line_width() -> f64 {
    3.0
}

fn default_realization_lightness_scale() -> f64 {
    1.3
}

fn default_history_color() -> String {
    "#000000".to_owned()
}

fn default_history_line_width() -> f64 {
    2.0
}

fn default_observation_color() -> String {
    "#000000".to_owned()
}

fn default_parameter_fallback_color() -> String {
    "#808080".to_owned()
}

fn default_p10_p90_band_alpha() -> f64 {
    0.5
}

fn default_min_max_band_alpha() -> f64 {
    0.2
}

fn default_time_cursor_color() -> String {
    "#505050".to_owned()
}

fn default_time_cursor_label_offset() -> f64 {
    0.03
}
