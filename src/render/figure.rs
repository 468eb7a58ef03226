use serde::{Deserialize, Serialize};

use crate::core::{SubplotGrid, SubplotPosition, SubplotSpacing, Viewport};
use crate::error::{PlotError, PlotResult};
use crate::render::{LegendEntry, TimeCursorLabel, TimeCursorLine, Trace};

/// Backend-agnostic scene for one assembled subplot grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub viewport: Viewport,
    pub grid: SubplotGrid,
    pub spacing: SubplotSpacing,
    /// Titles in subplot index order.
    pub subplot_titles: Vec<String>,
    pub traces: Vec<Trace>,
    pub legend: Vec<LegendEntry>,
    pub cursor_lines: Vec<TimeCursorLine>,
    pub cursor_labels: Vec<TimeCursorLabel>,
    /// Message shown instead of subplots when nothing is selected.
    pub placeholder: Option<String>,
}

impl Figure {
    #[must_use]
    pub fn new(viewport: Viewport, grid: SubplotGrid, spacing: SubplotSpacing) -> Self {
        Self {
            viewport,
            grid,
            spacing,
            subplot_titles: Vec::new(),
            traces: Vec::new(),
            legend: Vec::new(),
            cursor_lines: Vec::new(),
            cursor_labels: Vec::new(),
            placeholder: None,
        }
    }

    #[must_use]
    pub fn traces_in(&self, subplot: SubplotPosition) -> Vec<&Trace> {
        self.traces
            .iter()
            .filter(|trace| trace.subplot == subplot)
            .collect()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.legend.is_empty() && self.cursor_lines.is_empty()
    }

    pub fn validate(&self) -> PlotResult<()> {
        if !self.viewport.is_valid() {
            return Err(PlotError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        if self.subplot_titles.len() != self.grid.num_subplots {
            return Err(PlotError::InvalidData(format!(
                "figure has {} subplot titles for {} subplots",
                self.subplot_titles.len(),
                self.grid.num_subplots
            )));
        }

        for trace in &self.traces {
            self.check_subplot(trace.subplot)?;
            trace.validate()?;
        }
        for entry in &self.legend {
            self.check_subplot(entry.subplot)?;
        }
        for line in &self.cursor_lines {
            self.check_subplot(line.subplot)?;
        }
        for label in &self.cursor_labels {
            self.check_subplot(label.subplot)?;
        }
        Ok(())
    }

    fn check_subplot(&self, subplot: SubplotPosition) -> PlotResult<()> {
        self.grid.index_of(subplot).map(|_| ())
    }
}
