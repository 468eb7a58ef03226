use tracing::debug;

use crate::core::{
    FanchartStatisticOption, LoadedPair, ObservationMap, StatisticFunction, SubplotGrid,
    VectorHistoricalData, VectorRealizationData, VectorSpecification, VectorStatisticData,
};
use crate::error::{PlotError, PlotResult};
use crate::render::{Figure, Renderer};

use super::{
    ParameterColoring, PlotAccumulator, PlotBuilderConfig, PlotContext, RealizationStyling,
    add_fanchart_traces, add_history_traces, add_observation_traces, add_realization_traces,
    add_statistics_traces, assemble_legend, assemble_time_cursors,
};

pub const NO_DATA_PLACEHOLDER: &str = "Select vectors to visualize";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotBuilderState {
    Collecting,
    Finalized,
}

/// Sequences one build pass: configure, add traces, finalize, render.
///
/// Each `add_*` call delegates to a pure factory function over the
/// accumulator; after [`PlotBuilder::finalize`] no further traces are accepted.
#[derive(Debug)]
pub struct PlotBuilder {
    context: PlotContext,
    accumulator: PlotAccumulator,
    state: PlotBuilderState,
    figure: Option<Figure>,
}

impl PlotBuilder {
    /// Plans the subplot grid and grouping for `specifications`.
    ///
    /// Fails with a configuration error when parameter coloring is enabled
    /// without a [`ParameterColoring`].
    pub fn configure(
        config: PlotBuilderConfig,
        specifications: &[VectorSpecification],
        parameter_coloring: Option<ParameterColoring>,
    ) -> PlotResult<Self> {
        let context = PlotContext::new(config, specifications, parameter_coloring)?;
        let grid = context.grid();
        debug!(
            owner = ?context.owner(),
            subplots = grid.num_subplots,
            rows = grid.num_rows,
            cols = grid.num_cols,
            "configured plot builder"
        );
        Ok(Self {
            context,
            accumulator: PlotAccumulator::default(),
            state: PlotBuilderState::Collecting,
            figure: None,
        })
    }

    #[must_use]
    pub fn state(&self) -> PlotBuilderState {
        self.state
    }

    #[must_use]
    pub fn grid(&self) -> SubplotGrid {
        self.context.grid()
    }

    #[must_use]
    pub fn accumulator(&self) -> &PlotAccumulator {
        &self.accumulator
    }

    pub fn add_realizations(
        &mut self,
        pairs: &[LoadedPair<Vec<VectorRealizationData>>],
        styling: RealizationStyling,
    ) -> PlotResult<()> {
        self.apply(|accumulator, context| {
            add_realization_traces(accumulator, context, pairs, styling)
        })
    }

    pub fn add_statistics(
        &mut self,
        pairs: &[LoadedPair<VectorStatisticData>],
        selected: &[StatisticFunction],
        emphasized: bool,
    ) -> PlotResult<()> {
        self.apply(|accumulator, context| {
            add_statistics_traces(accumulator, context, pairs, selected, emphasized)
        })
    }

    pub fn add_fanchart(
        &mut self,
        pairs: &[LoadedPair<VectorStatisticData>],
        options: &[FanchartStatisticOption],
    ) -> PlotResult<()> {
        self.apply(|accumulator, context| add_fanchart_traces(accumulator, context, pairs, options))
    }

    pub fn add_history(&mut self, pairs: &[LoadedPair<VectorHistoricalData>]) -> PlotResult<()> {
        self.apply(|accumulator, context| add_history_traces(accumulator, context, pairs))
    }

    pub fn add_observations(&mut self, observations: &ObservationMap) -> PlotResult<()> {
        self.apply(|accumulator, context| {
            add_observation_traces(accumulator, context, observations)
        })
    }

    /// Commits legend, subplot titles and time cursors into the figure.
    ///
    /// Calling it again rebuilds the same figure from the same bookkeeping.
    pub fn finalize(&mut self, active_timestamps_utc_ms: &[i64]) -> PlotResult<&Figure> {
        let context = &self.context;
        let config = context.config();
        let grid = context.grid();

        let mut figure = Figure::new(config.viewport, grid, config.spacing);
        figure.subplot_titles = context.subplot_titles(&self.accumulator);
        figure.traces = self.accumulator.traces.clone();
        figure.legend = assemble_legend(&self.accumulator, context);

        if grid.has_data() {
            let (lines, labels) = assemble_time_cursors(
                &grid,
                config.spacing,
                active_timestamps_utc_ms,
                &config.style.time_cursor_color,
                config.style.time_cursor_label_offset,
            )?;
            figure.cursor_lines = lines;
            figure.cursor_labels = labels;
        } else {
            figure.placeholder = Some(NO_DATA_PLACEHOLDER.to_owned());
        }

        debug!(
            traces = figure.traces.len(),
            legend_entries = figure.legend.len(),
            cursor_lines = figure.cursor_lines.len(),
            "finalized figure"
        );
        self.state = PlotBuilderState::Finalized;
        Ok(self.figure.insert(figure))
    }

    /// Finalized figure, if [`PlotBuilder::finalize`] has run.
    #[must_use]
    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Finalizes and hands the figure over, ending the build pass.
    pub fn finish(mut self, active_timestamps_utc_ms: &[i64]) -> PlotResult<Figure> {
        self.finalize(active_timestamps_utc_ms)?;
        self.figure
            .take()
            .ok_or_else(|| PlotError::InvalidState("finalize produced no figure".to_owned()))
    }

    pub fn render<R: Renderer>(&self, renderer: &mut R) -> PlotResult<()> {
        let figure = self.figure.as_ref().ok_or_else(|| {
            PlotError::InvalidState("render requires a finalized figure".to_owned())
        })?;
        renderer.render(figure)
    }

    fn apply(
        &mut self,
        add: impl FnOnce(PlotAccumulator, &PlotContext) -> PlotResult<PlotAccumulator>,
    ) -> PlotResult<()> {
        if self.state == PlotBuilderState::Finalized {
            return Err(PlotError::InvalidState(
                "cannot add traces after finalize".to_owned(),
            ));
        }
        // A failed add leaves the collected traces untouched.
        self.accumulator = add(self.accumulator.clone(), &self.context)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{PlotBuilder, PlotBuilderState};
    use crate::api::{PlotBuilderConfig, RealizationStyling};
    use crate::core::{EnsembleIdent, LoadedPair, VectorRealizationData, VectorSpecification};
    use crate::error::PlotError;

    #[test]
    fn failed_add_keeps_previous_traces() {
        let specification =
            VectorSpecification::new(EnsembleIdent::regular("case", "iter-0"), "FOPT", "#1f77b4");
        let mut builder =
            PlotBuilder::configure(PlotBuilderConfig::default(), &[specification.clone()], None)
                .expect("configure builder");
        let realization = VectorRealizationData::new(0, vec![0, 1], vec![1.0, 2.0], "SM3", false)
            .expect("valid realization");
        builder
            .add_realizations(
                &[LoadedPair {
                    vector_specification: specification,
                    data: vec![realization],
                }],
                RealizationStyling::Plain,
            )
            .expect("add realizations");

        let err = builder
            .apply(|_, _| Err(PlotError::InvalidData("broken factory".to_owned())))
            .expect_err("factory error propagates");
        assert!(matches!(err, PlotError::InvalidData(_)));
        assert_eq!(builder.state(), PlotBuilderState::Collecting);
        assert_eq!(builder.accumulator().traces.len(), 1);

        let figure = builder.finalize(&[]).expect("finalize");
        assert_eq!(figure.traces.len(), 1);
        assert_eq!(figure.legend.len(), 1);
    }
}
