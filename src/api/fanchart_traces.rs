use smallvec::SmallVec;
use tracing::debug;

use crate::core::{
    FanchartStatisticOption, LoadedPair, StatisticFunction, VectorStatisticData, hex_to_rgba,
};
use crate::error::PlotResult;
use crate::render::{LineStyle, Trace, TraceGeometry};

use super::{PlotAccumulator, PlotContext, line_shape_for};

/// Derived fanchart element for one vector.
#[derive(Debug, Clone, PartialEq)]
pub enum FanchartElement<'a> {
    Band {
        label: &'static str,
        lower: &'a [f64],
        upper: &'a [f64],
        alpha: f64,
    },
    Line {
        values: &'a [f64],
    },
}

/// Resolves the fanchart elements to draw for one statistic set.
///
/// Bands require both members of their pair; a lone member yields nothing.
#[must_use]
pub fn resolve_fanchart_elements<'a>(
    data: &'a VectorStatisticData,
    options: &[FanchartStatisticOption],
    p10_p90_alpha: f64,
    min_max_alpha: f64,
) -> SmallVec<[FanchartElement<'a>; 3]> {
    let mut elements = SmallVec::new();

    let mut push_band = |label: &'static str,
                         low: StatisticFunction,
                         high: StatisticFunction,
                         alpha: f64| {
        match (data.values_for(low), data.values_for(high)) {
            (Some(lower), Some(upper)) => elements.push(FanchartElement::Band {
                label,
                lower,
                upper,
                alpha,
            }),
            _ => debug!(label, "incomplete statistic pair, band skipped"),
        }
    };

    if options.contains(&FanchartStatisticOption::MinMax) {
        push_band(
            "Min - Max",
            StatisticFunction::Min,
            StatisticFunction::Max,
            min_max_alpha,
        );
    }
    if options.contains(&FanchartStatisticOption::P10P90) {
        push_band(
            "P10 - P90",
            StatisticFunction::P10,
            StatisticFunction::P90,
            p10_p90_alpha,
        );
    }
    if options.contains(&FanchartStatisticOption::Mean) {
        if let Some(values) = data.values_for(StatisticFunction::Mean) {
            elements.push(FanchartElement::Line { values });
        }
    }
    elements
}

/// Adds filled percentile bands and the free mean line per specification.
pub fn add_fanchart_traces(
    mut accumulator: PlotAccumulator,
    context: &PlotContext,
    pairs: &[LoadedPair<VectorStatisticData>],
    options: &[FanchartStatisticOption],
) -> PlotResult<PlotAccumulator> {
    let style = &context.config.style;
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
                "invalid fanchart statistics, pair skipped"
            );
            continue;
        }

        let grouping = context.grouping();
        let legend_group = grouping.legend_group(specification);
        let trace_name = grouping.trace_name(specification);
        let shape = line_shape_for(data.is_rate);

        let elements = resolve_fanchart_elements(
            data,
            options,
            style.p10_p90_band_alpha,
            style.min_max_band_alpha,
        );
        if elements.is_empty() {
            continue;
        }

        for element in elements {
            let trace = match element {
                FanchartElement::Band {
                    label,
                    lower,
                    upper,
                    alpha,
                } => Trace::new(
                    subplot,
                    trace_name.clone(),
                    legend_group.clone(),
                    LineStyle::solid(specification.color.clone(), style.realization_line_width)
                        .with_shape(shape),
                    TraceGeometry::Band {
                        x: data.timestamps_utc_ms.clone(),
                        lower: lower.to_vec(),
                        upper: upper.to_vec(),
                        fill_color: hex_to_rgba(&specification.color, alpha),
                    },
                )
                .with_hover_label(label),
                FanchartElement::Line { values } => Trace::new(
                    subplot,
                    trace_name.clone(),
                    legend_group.clone(),
                    LineStyle::solid(specification.color.clone(), style.statistics_line_width)
                        .with_shape(shape),
                    TraceGeometry::Line {
                        x: data.timestamps_utc_ms.clone(),
                        y: values.to_vec(),
                    },
                )
                .with_hover_label(StatisticFunction::Mean.label()),
            };
            accumulator.push_trace(trace);
        }
        accumulator.record_unit(context, subplot_index, &data.unit);
        accumulator.register_legend_group(legend_group, trace_name, &specification.color);
    }

    debug!(
        added = accumulator.traces.len() - before,
        pairs = pairs.len(),
        "added fanchart traces"
    );
    Ok(accumulator)
}
