pub mod color;
pub mod grouping;
pub mod layout;
pub mod query;
pub mod types;
pub mod vector_data;
pub mod vector_description;

pub use color::{
    ColorStop, ContinuousColorScale, HslColor, RgbColor, hex_to_rgba, scale_hex_color_lightness,
    scale_hex_color_lightness_within,
};
pub use grouping::{
    EnsembleSubplotGrouping, GroupingStrategy, VectorSubplotGrouping, grouping_for,
};
pub use layout::{SubplotDomain, SubplotGrid, SubplotPosition, SubplotSpacing};
pub use query::{
    AggregatedObservations, EnsembleObservations, LoadedPair, ObservationMap, QueryResult,
    QueryStatus, aggregate_observations, join_specifications_with_results,
    unique_observation_ensembles,
};
pub use types::{
    EnsembleIdent, EnsembleKind, FanchartStatisticOption, Frequency, StatisticFunction,
    StatisticsSelection, SubplotLimitDirection, SubplotOwner, VectorSpecification, Viewport,
    VisualizationMode,
};
pub use vector_data::{
    StatisticValueObject, SummaryVectorDateObservation, SummaryVectorObservations,
    VectorHistoricalData, VectorRealizationData, VectorStatisticData,
};
pub use vector_description::{
    DerivedVectorKind, derived_vector_source, is_derived_vector, vector_description,
};
