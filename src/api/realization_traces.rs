use tracing::debug;

use crate::core::{LoadedPair, VectorRealizationData, scale_hex_color_lightness};
use crate::error::PlotResult;
use crate::render::{LineShape, LineStyle, Trace, TraceGeometry};

use super::{PlotAccumulator, PlotContext};

/// How realization lines are styled for the current visualization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RealizationStyling {
    /// Legend-group color, or parameter color when coloring is active.
    Plain,
    /// Lightened legend-group color, drawn underneath statistics.
    BehindStatistics,
}

#[must_use]
pub fn line_shape_for(is_rate: bool) -> LineShape {
    if is_rate {
        LineShape::Vh
    } else {
        LineShape::Linear
    }
}

/// Adds one line per specification and realization.
pub fn add_realization_traces(
    mut accumulator: PlotAccumulator,
    context: &PlotContext,
    pairs: &[LoadedPair<Vec<VectorRealizationData>>],
    styling: RealizationStyling,
) -> PlotResult<PlotAccumulator> {
    let style = &context.config.style;
    let parameter_coloring = match styling {
        RealizationStyling::Plain => context.active_parameter_coloring(),
        RealizationStyling::BehindStatistics => None,
    };
    let before = accumulator.traces.len();

    for pair in pairs {
        let specification = &pair.vector_specification;
        let Some((subplot_index, subplot)) = context.placement(specification)? else {
            continue;
        };

        let grouping = context.grouping();
        let legend_group = grouping.legend_group(specification);
        let trace_name = grouping.trace_name(specification);
        let group_color = match styling {
            RealizationStyling::Plain => specification.color.clone(),
            RealizationStyling::BehindStatistics => scale_hex_color_lightness(
                &specification.color,
                style.realization_lightness_scale,
            ),
        };

        for realization in &pair.data {
            if let Err(err) = realization.validate() {
                debug!(
                    vector = %specification.vector_name,
                    realization = realization.realization,
                    error = %err,
                    "invalid realization skipped"
                );
                continue;
            }
            let color = match parameter_coloring {
                Some(coloring) => coloring
                    .color_for(&specification.ensemble_ident, realization.realization)
                    .unwrap_or_else(|| style.parameter_fallback_color.clone()),
                None => group_color.clone(),
            };
            let line = LineStyle::solid(color, style.realization_line_width)
                .with_shape(line_shape_for(realization.is_rate));
            let geometry = TraceGeometry::Line {
                x: realization.timestamps_utc_ms.clone(),
                y: realization.values.clone(),
            };
            accumulator.push_trace(
                Trace::new(subplot, trace_name.clone(), legend_group.clone(), line, geometry)
                    .with_hover_label(format!("Real: {}", realization.realization)),
            );
            accumulator.record_unit(context, subplot_index, &realization.unit);
        }

        if parameter_coloring.is_some() {
            accumulator.uses_parameter_coloring = true;
        } else {
            accumulator.register_legend_group(legend_group, trace_name, &specification.color);
        }
    }

    debug!(
        added = accumulator.traces.len() - before,
        pairs = pairs.len(),
        "added realization traces"
    );
    Ok(accumulator)
}
