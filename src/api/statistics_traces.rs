use tracing::debug;

use crate::core::{LoadedPair, StatisticFunction, VectorStatisticData};
use crate::error::PlotResult;
use crate::render::{DashStyle, LineStyle, Trace, TraceGeometry};

use super::{PlotAccumulator, PlotContext, line_shape_for};

/// Dash pattern per statistic; only the mean is drawn solid.
#[must_use]
pub fn statistic_dash_style(statistic: StatisticFunction) -> DashStyle {
    match statistic {
        StatisticFunction::Mean => DashStyle::Solid,
        StatisticFunction::P50 => DashStyle::Dot,
        StatisticFunction::P10 => DashStyle::Dash,
        StatisticFunction::P90 => DashStyle::DashDot,
        StatisticFunction::Min => DashStyle::LongDash,
        StatisticFunction::Max => DashStyle::LongDashDot,
    }
}

/// Adds one line per selected statistic present in each fetched set.
///
/// `emphasized` widens the lines when realizations are drawn underneath.
pub fn add_statistics_traces(
    mut accumulator: PlotAccumulator,
    context: &PlotContext,
    pairs: &[LoadedPair<VectorStatisticData>],
    selected: &[StatisticFunction],
    emphasized: bool,
) -> PlotResult<PlotAccumulator> {
    let style = &context.config.style;
    let width = if emphasized {
        style.emphasized_statistics_line_width
    } else {
        style.statistics_line_width
    };
    let before = accumulator.traces.len();

    for pair in pairs {
        let specification = &pair.vector_specification;
        let Some((subplot_index, subplot)) = context.placement(specification)? else {
            continue;
        };
        let data = &pair.data;
        if let Err(err) = data.validate() {
            debug!(
                vector = %specification.vector_name,
                error = %err,
                "invalid statistics, pair skipped"
            );
            continue;
        }

        let grouping = context.grouping();
        let legend_group = grouping.legend_group(specification);
        let trace_name = grouping.trace_name(specification);
        let shape = line_shape_for(data.is_rate);

        let traces: Vec<Trace> = StatisticFunction::ALL
            .into_iter()
            .filter(|statistic| selected.contains(statistic))
            .filter_map(|statistic| {
                data.values_for(statistic).map(|values| {
                    let line = LineStyle::solid(specification.color.clone(), width)
                        .with_dash(statistic_dash_style(statistic))
                        .with_shape(shape);
                    Trace::new(
                        subplot,
                        trace_name.clone(),
                        legend_group.clone(),
                        line,
                        TraceGeometry::Line {
                            x: data.timestamps_utc_ms.clone(),
                            y: values.to_vec(),
                        },
                    )
                    .with_hover_label(statistic.label())
                })
            })
            .collect();

        if traces.is_empty() {
            continue;
        }
        for trace in traces {
            accumulator.push_trace(trace);
        }
        accumulator.mark_group_legend_trace(&legend_group);
        accumulator.record_unit(context, subplot_index, &data.unit);
        accumulator.register_legend_group(legend_group, trace_name, &specification.color);
    }

    debug!(
        added = accumulator.traces.len() - before,
        pairs = pairs.len(),
        emphasized,
        "added statistics traces"
    );
    Ok(accumulator)
}
