use crate::render::{DashStyle, LegendEntry, LegendSwatch};

use super::{HISTORY_LEGEND_GROUP, OBSERVATION_LEGEND_GROUP, PlotAccumulator, PlotContext};

pub const PARAMETER_LEGEND_GROUP: &str = "Parameter";

/// Builds one legend entry per used group, anchored in the reference subplot.
///
/// Order: vector or ensemble groups as first added, then history, then
/// observations, then the parameter color scale. The result depends only on
/// the accumulator's bookkeeping, so repeated calls give the same entries.
#[must_use]
pub fn assemble_legend(accumulator: &PlotAccumulator, context: &PlotContext) -> Vec<LegendEntry> {
    let subplot = context.grid().reference_position();
    let style = &context.config().style;
    let mut entries: Vec<LegendEntry> = accumulator
        .legend_groups
        .iter()
        .map(|(group, used)| LegendEntry {
            name: used.name.clone(),
            color: used.color.clone(),
            group: group.clone(),
            rank: 0,
            swatch: LegendSwatch::Line {
                dash: DashStyle::Solid,
            },
            subplot,
        })
        .collect();

    if accumulator.has_history_traces {
        entries.push(LegendEntry {
            name: HISTORY_LEGEND_GROUP.to_owned(),
            color: style.history_color.clone(),
            group: HISTORY_LEGEND_GROUP.to_owned(),
            rank: 0,
            swatch: LegendSwatch::Line {
                dash: DashStyle::Solid,
            },
            subplot,
        });
    }

    if accumulator.has_observation_traces {
        entries.push(LegendEntry {
            name: OBSERVATION_LEGEND_GROUP.to_owned(),
            color: style.observation_color.clone(),
            group: OBSERVATION_LEGEND_GROUP.to_owned(),
            rank: 0,
            swatch: LegendSwatch::Marker,
            subplot,
        });
    }

    if accumulator.uses_parameter_coloring {
        if let Some(coloring) = context.active_parameter_coloring() {
            let scale = coloring.color_scale();
            let (min, max) = scale.range();
            entries.push(LegendEntry {
                name: coloring.parameter_name().to_owned(),
                color: scale.color_for_value(max),
                group: PARAMETER_LEGEND_GROUP.to_owned(),
                rank: 0,
                swatch: LegendSwatch::ColorScale {
                    stops: scale.stops().to_vec(),
                    min,
                    max,
                },
                subplot,
            });
        }
    }

    for (rank, entry) in entries.iter_mut().enumerate() {
        entry.rank = rank;
    }
    entries
}
