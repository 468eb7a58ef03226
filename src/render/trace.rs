use serde::{Deserialize, Serialize};

use crate::core::SubplotPosition;
use crate::error::{PlotError, PlotResult};

/// Interpolation between consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineShape {
    Linear,
    /// Vertical-then-horizontal step, used for rate quantities.
    Vh,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DashStyle {
    Solid,
    Dot,
    Dash,
    LongDash,
    DashDot,
    LongDashDot,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub width: f64,
    pub dash: DashStyle,
    pub shape: LineShape,
}

impl LineStyle {
    #[must_use]
    pub fn solid(color: impl Into<String>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
            dash: DashStyle::Solid,
            shape: LineShape::Linear,
        }
    }

    #[must_use]
    pub fn with_dash(mut self, dash: DashStyle) -> Self {
        self.dash = dash;
        self
    }

    #[must_use]
    pub fn with_shape(mut self, shape: LineShape) -> Self {
        self.shape = shape;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TraceGeometry {
    Line {
        x: Vec<i64>,
        y: Vec<f64>,
    },
    /// Area filled between `lower` and `upper`.
    Band {
        x: Vec<i64>,
        lower: Vec<f64>,
        upper: Vec<f64>,
        fill_color: String,
    },
    /// Single marker with a symmetric vertical error bar.
    Marker {
        x: i64,
        y: f64,
        error: f64,
    },
}

/// Drawable series placed in one subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub subplot: SubplotPosition,
    pub name: String,
    pub legend_group: String,
    pub show_legend: bool,
    pub line: LineStyle,
    pub geometry: TraceGeometry,
    pub hover_label: Option<String>,
}

impl Trace {
    #[must_use]
    pub fn new(
        subplot: SubplotPosition,
        name: impl Into<String>,
        legend_group: impl Into<String>,
        line: LineStyle,
        geometry: TraceGeometry,
    ) -> Self {
        Self {
            subplot,
            name: name.into(),
            legend_group: legend_group.into(),
            show_legend: false,
            line,
            geometry,
            hover_label: None,
        }
    }

    #[must_use]
    pub fn with_hover_label(mut self, hover_label: impl Into<String>) -> Self {
        self.hover_label = Some(hover_label.into());
        self
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.line.width.is_finite() || self.line.width <= 0.0 {
            return Err(PlotError::InvalidData(format!(
                "trace `{}` line width must be finite and > 0",
                self.name
            )));
        }
        match &self.geometry {
            TraceGeometry::Line { x, y } if x.len() != y.len() => {
                Err(PlotError::InvalidData(format!(
                    "trace `{}` has {} x and {} y values",
                    self.name,
                    x.len(),
                    y.len()
                )))
            }
            TraceGeometry::Band { x, lower, upper, .. }
                if x.len() != lower.len() || x.len() != upper.len() =>
            {
                Err(PlotError::InvalidData(format!(
                    "band `{}` bounds do not match its {} x values",
                    self.name,
                    x.len()
                )))
            }
            TraceGeometry::Marker { error, .. } if !error.is_finite() || *error < 0.0 => {
                Err(PlotError::InvalidData(format!(
                    "marker `{}` error must be finite and >= 0",
                    self.name
                )))
            }
            _ => Ok(()),
        }
    }
}
