mod annotation;
mod figure;
mod json_contract;
mod legend;
mod null_renderer;
mod trace;

pub use annotation::{TimeCursorLabel, TimeCursorLine};
pub use figure::Figure;
pub use json_contract::{FIGURE_JSON_SCHEMA_V1, FigureJsonContractV1};
pub use legend::{LegendEntry, LegendSwatch};
pub use null_renderer::NullRenderer;
pub use trace::{DashStyle, LineShape, LineStyle, Trace, TraceGeometry};

use crate::error::PlotResult;

/// Contract implemented by any charting surface.
///
/// Surfaces receive a fully assembled, deterministic `Figure` so drawing code
/// stays isolated from data joining and grouping logic.
pub trait Renderer {
    fn render(&mut self, figure: &Figure) -> PlotResult<()>;
}
