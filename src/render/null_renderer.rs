use crate::error::PlotResult;
use crate::render::{Figure, Renderer};

/// Headless renderer that checks a figure and records what it would draw.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub last_subplot_count: usize,
    pub last_trace_count: usize,
    pub last_legend_count: usize,
    pub last_cursor_line_count: usize,
    pub showed_placeholder: bool,
}

impl Renderer for NullRenderer {
    fn render(&mut self, figure: &Figure) -> PlotResult<()> {
        figure.validate()?;
        self.last_subplot_count = figure.grid.num_subplots;
        self.last_trace_count = figure.traces.len();
        self.last_legend_count = figure.legend.len();
        self.last_cursor_line_count = figure.cursor_lines.len();
        self.showed_placeholder = figure.placeholder.is_some();
        Ok(())
    }
}
