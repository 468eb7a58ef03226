use tracing::debug;

use crate::core::{LoadedPair, ObservationMap, VectorHistoricalData};
use crate::error::PlotResult;
use crate::render::{LineStyle, Trace, TraceGeometry};

use super::{PlotAccumulator, PlotContext, line_shape_for};

pub const HISTORY_LEGEND_GROUP: &str = "History";
pub const OBSERVATION_LEGEND_GROUP: &str = "Observation";

/// Adds one fixed-color history line per vector and subplot.
///
/// Specifications without a historical vector are ignored.
pub fn add_history_traces(
    mut accumulator: PlotAccumulator,
    context: &PlotContext,
    pairs: &[LoadedPair<VectorHistoricalData>],
) -> PlotResult<PlotAccumulator> {
    let style = &context.config.style;
    let before = accumulator.traces.len();

    for pair in pairs {
        let specification = &pair.vector_specification;
        if !specification.has_historical_vector {
            continue;
        }
        let Some((subplot_index, subplot)) = context.placement(specification)? else {
            continue;
        };
        let data = &pair.data;
        if let Err(err) = data.validate() {
            debug!(
                vector = %specification.vector_name,
                error = %err,
                "invalid history, pair skipped"
            );
            continue;
        }
        if !accumulator
            .history_keys
            .insert((subplot_index, specification.vector_name.clone()))
        {
            continue;
        }

        let line = LineStyle::solid(style.history_color.clone(), style.history_line_width)
            .with_shape(line_shape_for(data.is_rate));
        accumulator.push_trace(
            Trace::new(
                subplot,
                HISTORY_LEGEND_GROUP,
                HISTORY_LEGEND_GROUP,
                line,
                TraceGeometry::Line {
                    x: data.timestamps_utc_ms.clone(),
                    y: data.values.clone(),
                },
            )
            .with_hover_label(specification.vector_name.clone()),
        );
        accumulator.record_unit(context, subplot_index, &data.unit);
        accumulator.has_history_traces = true;
    }

    debug!(
        added = accumulator.traces.len() - before,
        pairs = pairs.len(),
        "added history traces"
    );
    Ok(accumulator)
}

/// Adds one marker with an error bar per dated observation.
///
/// Ensembles without summary observations are ignored.
pub fn add_observation_traces(
    mut accumulator: PlotAccumulator,
    context: &PlotContext,
    observations: &ObservationMap,
) -> PlotResult<PlotAccumulator> {
    let style = &context.config.style;
    let before = accumulator.traces.len();

    for ensemble_observations in observations.values() {
        if !ensemble_observations.has_summary_observations {
            continue;
        }
        for pair in &ensemble_observations.vectors_observation_data {
            let Some((_, subplot)) = context.placement(&pair.vector_specification)? else {
                continue;
            };
            for observation in &pair.data.observations {
                if let Err(err) = observation.validate() {
                    debug!(error = %err, "invalid observation skipped");
                    continue;
                }
                let line = LineStyle::solid(style.observation_color.clone(), 1.0);
                accumulator.push_trace(
                    Trace::new(
                        subplot,
                        OBSERVATION_LEGEND_GROUP,
                        OBSERVATION_LEGEND_GROUP,
                        line,
                        TraceGeometry::Marker {
                            x: observation.timestamp_utc_ms,
                            y: observation.value,
                            error: observation.error.abs(),
                        },
                    )
                    .with_hover_label(observation.label.clone()),
                );
                accumulator.has_observation_traces = true;
            }
        }
    }

    debug!(
        added = accumulator.traces.len() - before,
        ensembles = observations.len(),
        "added observation traces"
    );
    Ok(accumulator)
}
