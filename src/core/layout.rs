use serde::{Deserialize, Serialize};

use crate::core::SubplotLimitDirection;
use crate::error::{PlotError, PlotResult};

/// 1-based grid position of one subplot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubplotPosition {
    pub row: usize,
    pub col: usize,
}

impl SubplotPosition {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Normalized figure-space extent of one subplot cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubplotDomain {
    pub x0: f64,
    pub x1: f64,
    pub y0: f64,
    pub y1: f64,
}

/// Gaps between neighbouring cells as a fraction of the figure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubplotSpacing {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Default for SubplotSpacing {
    fn default() -> Self {
        Self {
            horizontal: 0.05,
            vertical: 0.08,
        }
    }
}

/// Grid geometry for one render pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubplotGrid {
    pub num_rows: usize,
    pub num_cols: usize,
    pub num_subplots: usize,
    pub limit_direction: SubplotLimitDirection,
    pub max_direction_elements: usize,
}

impl SubplotGrid {
    /// Plans grid dimensions for `num_subplots` cells.
    ///
    /// With zero subplots the grid degenerates to a single empty cell.
    #[must_use]
    pub fn plan(
        num_subplots: usize,
        limit_direction: SubplotLimitDirection,
        max_direction_elements: usize,
    ) -> Self {
        let max_direction_elements = max_direction_elements.max(1);
        let (num_rows, num_cols) = match (num_subplots, limit_direction) {
            (0 | 1, _) => (1, 1),
            (n, SubplotLimitDirection::Rows) => {
                let rows = max_direction_elements.min(n);
                (rows, n.div_ceil(rows))
            }
            (n, SubplotLimitDirection::Columns) => {
                let cols = max_direction_elements.min(n);
                (n.div_ceil(cols), cols)
            }
            (n, SubplotLimitDirection::None) => {
                let rows = (n as f64).sqrt().ceil() as usize;
                (rows, n.div_ceil(rows))
            }
        };

        Self {
            num_rows,
            num_cols,
            num_subplots,
            limit_direction,
            max_direction_elements,
        }
    }

    #[must_use]
    pub fn has_data(&self) -> bool {
        self.num_subplots > 0
    }

    /// Maps a 0-based subplot index to its grid position.
    ///
    /// Row-limited grids fill column by column, all others row by row.
    pub fn position_of(&self, index: usize) -> PlotResult<SubplotPosition> {
        let (row, col) = match self.limit_direction {
            SubplotLimitDirection::Rows => (index % self.num_rows + 1, index / self.num_rows + 1),
            SubplotLimitDirection::Columns | SubplotLimitDirection::None => {
                (index / self.num_cols + 1, index % self.num_cols + 1)
            }
        };
        self.check_bounds(row, col)?;
        Ok(SubplotPosition::new(row, col))
    }

    /// Inverse of [`SubplotGrid::position_of`].
    pub fn index_of(&self, position: SubplotPosition) -> PlotResult<usize> {
        self.check_bounds(position.row, position.col)?;
        let index = match self.limit_direction {
            SubplotLimitDirection::Rows => (position.col - 1) * self.num_rows + position.row - 1,
            SubplotLimitDirection::Columns | SubplotLimitDirection::None => {
                (position.row - 1) * self.num_cols + position.col - 1
            }
        };
        Ok(index)
    }

    /// Positions of every planned subplot in index order.
    pub fn positions(&self) -> PlotResult<Vec<SubplotPosition>> {
        (0..self.num_subplots)
            .map(|index| self.position_of(index))
            .collect()
    }

    /// Top-right cell, used as the anchor for legend entries.
    #[must_use]
    pub fn reference_position(&self) -> SubplotPosition {
        SubplotPosition::new(1, self.num_cols)
    }

    pub fn cell_domain(
        &self,
        position: SubplotPosition,
        spacing: SubplotSpacing,
    ) -> PlotResult<SubplotDomain> {
        self.check_bounds(position.row, position.col)?;
        let (x0, x1) = axis_span(position.col, self.num_cols, spacing.horizontal);
        // Row 1 is the top row, figure space grows upwards.
        let (top_offset, bottom_offset) = axis_span(position.row, self.num_rows, spacing.vertical);
        Ok(SubplotDomain {
            x0,
            x1,
            y0: 1.0 - bottom_offset,
            y1: 1.0 - top_offset,
        })
    }

    fn check_bounds(&self, row: usize, col: usize) -> PlotResult<()> {
        if row == 0 || col == 0 || row > self.num_rows || col > self.num_cols {
            return Err(PlotError::OutOfBounds {
                row,
                col,
                num_rows: self.num_rows,
                num_cols: self.num_cols,
            });
        }
        Ok(())
    }
}

fn axis_span(one_based: usize, count: usize, gap: f64) -> (f64, f64) {
    let gap = if count > 1 {
        gap.clamp(0.0, 1.0 / (count - 1) as f64)
    } else {
        0.0
    };
    let extent = (1.0 - gap * (count.saturating_sub(1)) as f64) / count as f64;
    let start = (one_based - 1) as f64 * (extent + gap);
    (start, (start + extent).min(1.0))
}
