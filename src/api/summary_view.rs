use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::core::{
    EnsembleIdent, Frequency, QueryResult, QueryStatus, StatisticsSelection,
    SummaryVectorObservations, VectorHistoricalData, VectorRealizationData, VectorSpecification,
    VectorStatisticData, VisualizationMode, aggregate_observations,
    join_specifications_with_results, unique_observation_ensembles,
};
use crate::error::PlotResult;
use crate::render::Figure;

use super::{
    ParameterColoring, PlotBuilder, PlotBuilderConfig, PublishedVectorChannel,
    RealizationStyling, publish_vector_channels,
};

/// Everything the settings layer hands over for one render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    pub specifications: Vec<VectorSpecification>,
    pub mode: VisualizationMode,
    #[serde(default)]
    pub statistics: StatisticsSelection,
    #[serde(default)]
    pub show_historical: bool,
    #[serde(default)]
    pub show_observations: bool,
    #[serde(default)]
    pub config: PlotBuilderConfig,
    #[serde(default)]
    pub active_timestamp_utc_ms: Option<i64>,
}

impl ViewSettings {
    #[must_use]
    pub fn new(specifications: Vec<VectorSpecification>, mode: VisualizationMode) -> Self {
        Self {
            specifications,
            mode,
            statistics: StatisticsSelection::default(),
            show_historical: false,
            show_observations: false,
            config: PlotBuilderConfig::default(),
            active_timestamp_utc_ms: None,
        }
    }

    #[must_use]
    pub fn with_config(mut self, config: PlotBuilderConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn with_statistics(mut self, statistics: StatisticsSelection) -> Self {
        self.statistics = statistics;
        self
    }

    #[must_use]
    pub fn with_overlays(mut self, show_historical: bool, show_observations: bool) -> Self {
        self.show_historical = show_historical;
        self.show_observations = show_observations;
        self
    }

    #[must_use]
    pub fn with_active_timestamp(mut self, timestamp_utc_ms: Option<i64>) -> Self {
        self.active_timestamp_utc_ms = timestamp_utc_ms;
        self
    }
}

/// Key of a per-vector query issued by the query layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VectorQueryKey {
    pub ensemble_ident: EnsembleIdent,
    pub vector_name: String,
    pub resample_frequency: Option<Frequency>,
}

/// Queries needed for one render, ordered like the results they expect.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryQueryPlan {
    pub realizations: Vec<VectorQueryKey>,
    pub statistics: Vec<VectorQueryKey>,
    pub historical: Vec<VectorQueryKey>,
    pub observations: Vec<EnsembleIdent>,
}

impl SummaryQueryPlan {
    /// Derives the query keys for `settings`; unused categories stay empty.
    #[must_use]
    pub fn for_settings(settings: &ViewSettings) -> Self {
        let frequency = settings.config.resample_frequency;
        let mut plan = Self::default();
        if settings.mode.needs_realizations() {
            plan.realizations = query_keys(&settings.specifications, frequency);
        }
        if settings.mode.needs_statistics() {
            plan.statistics = query_keys(&settings.specifications, frequency);
        }
        if settings.show_historical {
            let historical = historical_specifications(&settings.specifications);
            plan.historical = query_keys(&historical, None);
        }
        if settings.show_observations {
            plan.observations = unique_observation_ensembles(&settings.specifications);
        }
        plan
    }
}

fn query_keys(
    specifications: &[VectorSpecification],
    resample_frequency: Option<Frequency>,
) -> Vec<VectorQueryKey> {
    specifications
        .iter()
        .map(|specification| VectorQueryKey {
            ensemble_ident: specification.ensemble_ident.clone(),
            vector_name: specification.vector_name.clone(),
            resample_frequency,
        })
        .collect()
}

/// Specifications that have a historical vector to query.
#[must_use]
pub fn historical_specifications(
    specifications: &[VectorSpecification],
) -> Vec<VectorSpecification> {
    specifications
        .iter()
        .filter(|specification| specification.has_historical_vector)
        .cloned()
        .collect()
}

/// Latest state of all queries, positionally matching a [`SummaryQueryPlan`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySnapshot {
    pub realizations: Vec<QueryResult<Vec<VectorRealizationData>>>,
    pub statistics: Vec<QueryResult<VectorStatisticData>>,
    pub historical: Vec<QueryResult<VectorHistoricalData>>,
    pub observations: Vec<QueryResult<Vec<SummaryVectorObservations>>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssembledView {
    pub figure: Figure,
    pub status: QueryStatus,
    pub published_channels: Vec<PublishedVectorChannel>,
}

/// Runs one full build pass over the latest query snapshot.
///
/// Pending or failed queries only remove their own pair from the figure and
/// are reported through `status`.
pub fn assemble_summary_view(
    settings: &ViewSettings,
    snapshot: &QuerySnapshot,
    parameter_coloring: Option<ParameterColoring>,
) -> PlotResult<AssembledView> {
    let specifications = &settings.specifications;
    let mode = settings.mode;
    let mut builder =
        PlotBuilder::configure(settings.config.clone(), specifications, parameter_coloring)?;
    let mut status = QueryStatus::default();
    let mut published_channels = Vec::new();

    if mode.needs_realizations() {
        let pairs = join_specifications_with_results(specifications, &snapshot.realizations)?;
        status = status.merge(QueryStatus::of(&snapshot.realizations));
        let styling = match mode {
            VisualizationMode::StatisticsAndRealizations => RealizationStyling::BehindStatistics,
            _ => RealizationStyling::Plain,
        };
        builder.add_realizations(&pairs, styling)?;
        published_channels = publish_vector_channels(&pairs);
    }

    if mode.needs_statistics() {
        let pairs = join_specifications_with_results(specifications, &snapshot.statistics)?;
        status = status.merge(QueryStatus::of(&snapshot.statistics));
        match mode {
            VisualizationMode::StatisticalFanchart => {
                builder.add_fanchart(&pairs, &settings.statistics.fanchart)?;
            }
            VisualizationMode::StatisticsAndRealizations => {
                builder.add_statistics(&pairs, &settings.statistics.individual, true)?;
            }
            _ => {
                builder.add_statistics(&pairs, &settings.statistics.individual, false)?;
            }
        }
    }

    if settings.show_historical {
        let history_specifications = historical_specifications(specifications);
        let pairs =
            join_specifications_with_results(&history_specifications, &snapshot.historical)?;
        status = status.merge(QueryStatus::of(&snapshot.historical));
        builder.add_history(&pairs)?;
    }

    if settings.show_observations {
        let ensembles = unique_observation_ensembles(specifications);
        let aggregated =
            aggregate_observations(&ensembles, &snapshot.observations, specifications)?;
        status = status.merge(aggregated.status);
        builder.add_observations(&aggregated.observations)?;
    }

    if status.is_error {
        warn!("one or more summary queries failed, rendering available data");
    }

    let active_timestamps: Vec<i64> = settings.active_timestamp_utc_ms.into_iter().collect();
    let figure = builder.finish(&active_timestamps)?;

    debug!(
        is_fetching = status.is_fetching,
        is_error = status.is_error,
        channels = published_channels.len(),
        "assembled summary view"
    );
    Ok(AssembledView {
        figure,
        status,
        published_channels,
    })
}
