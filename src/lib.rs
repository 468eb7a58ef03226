//! summary-plot-rs: subplot assembly engine for ensemble summary vectors.
//!
//! Joins per-vector query results with their specifications, groups them into
//! a subplot grid and produces a deterministic `Figure` with traces, legend
//! and time-cursor annotations for any charting surface.

pub mod api;
pub mod core;
pub mod error;
pub mod render;
pub mod telemetry;

pub use api::{PlotBuilder, PlotBuilderConfig, ViewSettings, assemble_summary_view};
pub use error::{PlotError, PlotResult};
