use indexmap::{IndexMap, IndexSet};
use tracing::trace;

use crate::core::{
    GroupingStrategy, SubplotGrid, SubplotOwner, SubplotPosition, VectorSpecification,
    grouping_for,
};
use crate::error::{PlotError, PlotResult};
use crate::render::Trace;

use super::{ParameterColoring, PlotBuilderConfig};

/// Legend group seen while adding traces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsedLegendGroup {
    pub name: String,
    pub color: String,
}

/// Everything the trace factories produce, threaded through each `add_*`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlotAccumulator {
    pub traces: Vec<Trace>,
    /// Keyed by legend group, in first-added order.
    pub legend_groups: IndexMap<String, UsedLegendGroup>,
    pub has_history_traces: bool,
    pub has_observation_traces: bool,
    pub uses_parameter_coloring: bool,
    /// Subplot index to title, set when a unit is first seen.
    pub unit_titles: IndexMap<usize, String>,
    /// (subplot index, vector name) pairs that already have a history line.
    pub history_keys: IndexSet<(usize, String)>,
    /// Legend group to the index of its one trace with `show_legend` set.
    pub legend_traces: IndexMap<String, usize>,
}

impl PlotAccumulator {
    pub(crate) fn push_trace(&mut self, trace: Trace) {
        self.traces.push(trace);
    }

    /// Moves the group's visible legend flag to the last pushed trace.
    pub(crate) fn mark_group_legend_trace(&mut self, group: &str) {
        let Some(last) = self.traces.len().checked_sub(1) else {
            return;
        };
        if let Some(previous) = self.legend_traces.insert(group.to_owned(), last) {
            if let Some(trace) = self.traces.get_mut(previous) {
                trace.show_legend = false;
            }
        }
        if let Some(trace) = self.traces.last_mut() {
            trace.show_legend = true;
        }
    }

    pub(crate) fn register_legend_group(&mut self, group: String, name: String, color: &str) {
        self.legend_groups
            .entry(group)
            .or_insert_with(|| UsedLegendGroup {
                name,
                color: color.to_owned(),
            });
    }

    /// Records the `<description> [<unit>]` title for a vector-owned subplot.
    pub(crate) fn record_unit(
        &mut self,
        context: &PlotContext,
        subplot_index: usize,
        unit: &str,
    ) {
        if context.owner() != SubplotOwner::Vector || self.unit_titles.contains_key(&subplot_index)
        {
            return;
        }
        let Some(description) = context.base_titles.get(subplot_index) else {
            return;
        };
        trace!(subplot_index, unit, "subplot unit resolved");
        self.unit_titles
            .insert(subplot_index, format!("{description} [{unit}]"));
    }
}

/// Immutable per-render inputs shared by all trace factories.
#[derive(Debug)]
pub struct PlotContext {
    pub(crate) config: PlotBuilderConfig,
    pub(crate) grouping: Box<dyn GroupingStrategy>,
    pub(crate) grid: SubplotGrid,
    pub(crate) base_titles: Vec<String>,
    pub(crate) parameter_coloring: Option<ParameterColoring>,
}

impl PlotContext {
    pub fn new(
        config: PlotBuilderConfig,
        specifications: &[VectorSpecification],
        parameter_coloring: Option<ParameterColoring>,
    ) -> PlotResult<Self> {
        config.validate()?;
        if config.color_by_parameter && parameter_coloring.is_none() {
            return Err(PlotError::Configuration(
                "parameter coloring requested without a parameter coloring helper".to_owned(),
            ));
        }

        let grouping = grouping_for(config.subplot_owner, specifications);
        let grid = SubplotGrid::plan(
            grouping.subplot_count(),
            config.limit_direction,
            config.max_direction_elements,
        );
        let base_titles = grouping.subplot_titles(config.resample_frequency);

        Ok(Self {
            config,
            grouping,
            grid,
            base_titles,
            parameter_coloring,
        })
    }

    #[must_use]
    pub fn config(&self) -> &PlotBuilderConfig {
        &self.config
    }

    #[must_use]
    pub fn grid(&self) -> SubplotGrid {
        self.grid
    }

    #[must_use]
    pub fn owner(&self) -> SubplotOwner {
        self.grouping.owner()
    }

    #[must_use]
    pub fn grouping(&self) -> &dyn GroupingStrategy {
        self.grouping.as_ref()
    }

    /// Parameter coloring when it is enabled for this render.
    #[must_use]
    pub fn active_parameter_coloring(&self) -> Option<&ParameterColoring> {
        if self.config.color_by_parameter {
            self.parameter_coloring.as_ref()
        } else {
            None
        }
    }

    /// Subplot index and grid position of `specification`.
    ///
    /// Returns `Ok(None)` for specifications the grouping does not know.
    pub fn placement(
        &self,
        specification: &VectorSpecification,
    ) -> PlotResult<Option<(usize, SubplotPosition)>> {
        let Some(index) = self.grouping.subplot_index(specification) else {
            trace!(
                vector = %specification.vector_name,
                ensemble = %specification.ensemble_ident,
                "specification has no subplot, skipping"
            );
            return Ok(None);
        };
        Ok(Some((index, self.grid.position_of(index)?)))
    }

    /// Final subplot titles with unit information applied.
    #[must_use]
    pub fn subplot_titles(&self, accumulator: &PlotAccumulator) -> Vec<String> {
        self.base_titles
            .iter()
            .enumerate()
            .map(|(index, base)| {
                accumulator
                    .unit_titles
                    .get(&index)
                    .cloned()
                    .unwrap_or_else(|| base.clone())
            })
            .collect()
    }
}
