use serde::{Deserialize, Serialize};

use crate::core::{ColorStop, SubplotPosition};

use super::DashStyle;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LegendSwatch {
    Line { dash: DashStyle },
    Marker,
    ColorScale {
        stops: Vec<ColorStop>,
        min: f64,
        max: f64,
    },
}

/// One entry of the figure legend, interpreted by the rendering surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub name: String,
    pub color: String,
    pub group: String,
    pub rank: usize,
    pub swatch: LegendSwatch,
    pub subplot: SubplotPosition,
}
