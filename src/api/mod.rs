mod annotation_assembler;
mod fanchart_traces;
mod legend_assembler;
mod overlay_traces;
mod parameter_coloring;
mod plot_accumulator;
mod plot_builder;
mod plot_config;
mod publishing;
mod realization_traces;
mod statistics_traces;
mod summary_view;
mod time_cursor;

pub use annotation_assembler::{assemble_time_cursors, compact_iso_string};
pub use fanchart_traces::{FanchartElement, add_fanchart_traces, resolve_fanchart_elements};
pub use legend_assembler::{PARAMETER_LEGEND_GROUP, assemble_legend};
pub use overlay_traces::{
    HISTORY_LEGEND_GROUP, OBSERVATION_LEGEND_GROUP, add_history_traces, add_observation_traces,
};
pub use parameter_coloring::ParameterColoring;
pub use plot_accumulator::{PlotAccumulator, PlotContext, UsedLegendGroup};
pub use plot_builder::{NO_DATA_PLACEHOLDER, PlotBuilder, PlotBuilderState};
pub use plot_config::{PlotBuilderConfig, PlotStyle};
pub use publishing::{PublishedVectorChannel, RealizationValue, publish_vector_channels};
pub use realization_traces::{RealizationStyling, add_realization_traces, line_shape_for};
pub use statistics_traces::{add_statistics_traces, statistic_dash_style};
pub use summary_view::{
    AssembledView, QuerySnapshot, SummaryQueryPlan, VectorQueryKey, ViewSettings,
    assemble_summary_view, historical_specifications,
};
pub use time_cursor::{PlotClickEvent, active_timestamp_from_click, realization_timestamps};
