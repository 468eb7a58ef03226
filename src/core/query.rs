use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{EnsembleIdent, SummaryVectorObservations, VectorSpecification};
use crate::error::{PlotError, PlotResult};

/// Snapshot of one asynchronous query as seen by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult<T> {
    pub data: Option<T>,
    pub is_fetching: bool,
    pub is_error: bool,
}

impl<T> QueryResult<T> {
    #[must_use]
    pub fn loaded(data: T) -> Self {
        Self {
            data: Some(data),
            is_fetching: false,
            is_error: false,
        }
    }

    #[must_use]
    pub fn pending() -> Self {
        Self {
            data: None,
            is_fetching: true,
            is_error: false,
        }
    }

    #[must_use]
    pub fn failed() -> Self {
        Self {
            data: None,
            is_fetching: false,
            is_error: true,
        }
    }
}

impl<T> Default for QueryResult<T> {
    fn default() -> Self {
        Self::pending()
    }
}

/// A vector specification together with its resolved data.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedPair<T> {
    pub vector_specification: VectorSpecification,
    pub data: T,
}

/// Joins positionally corresponding specifications and query results.
///
/// Entries without data (pending or failed) are dropped; the output keeps the
/// input order otherwise.
pub fn join_specifications_with_results<T: Clone>(
    specifications: &[VectorSpecification],
    results: &[QueryResult<T>],
) -> PlotResult<Vec<LoadedPair<T>>> {
    if specifications.len() != results.len() {
        return Err(PlotError::LengthMismatch {
            specifications: specifications.len(),
            results: results.len(),
        });
    }

    let pairs: Vec<LoadedPair<T>> = specifications
        .iter()
        .zip(results)
        .filter_map(|(specification, result)| {
            result.data.as_ref().map(|data| LoadedPair {
                vector_specification: specification.clone(),
                data: data.clone(),
            })
        })
        .collect();

    trace!(
        requested = specifications.len(),
        loaded = pairs.len(),
        "joined query results"
    );
    Ok(pairs)
}

/// Aggregated fetch state over a set of queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStatus {
    pub is_fetching: bool,
    pub is_error: bool,
}

impl QueryStatus {
    #[must_use]
    pub fn of<T>(results: &[QueryResult<T>]) -> Self {
        Self {
            is_fetching: results.iter().any(|result| result.is_fetching),
            is_error: results.iter().any(|result| result.is_error),
        }
    }

    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            is_fetching: self.is_fetching || other.is_fetching,
            is_error: self.is_error || other.is_error,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnsembleObservations {
    pub has_summary_observations: bool,
    pub vectors_observation_data: Vec<LoadedPair<SummaryVectorObservations>>,
}

pub type ObservationMap = IndexMap<EnsembleIdent, EnsembleObservations>;

#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedObservations {
    pub observations: ObservationMap,
    pub status: QueryStatus,
}

/// Distinct ensembles to issue observation queries for, in first-seen order.
///
/// Delta ensembles carry no observations and are skipped.
#[must_use]
pub fn unique_observation_ensembles(specifications: &[VectorSpecification]) -> Vec<EnsembleIdent> {
    specifications
        .iter()
        .filter(|specification| !specification.ensemble_ident.is_delta())
        .map(|specification| specification.ensemble_ident.clone())
        .collect::<IndexSet<_>>()
        .into_iter()
        .collect()
}

/// Folds per-ensemble observation query results into an [`ObservationMap`].
///
/// `ensembles` and `results` correspond positionally. Unresolved ensembles
/// are absent from the map but still contribute to the fetch status.
pub fn aggregate_observations(
    ensembles: &[EnsembleIdent],
    results: &[QueryResult<Vec<SummaryVectorObservations>>],
    specifications: &[VectorSpecification],
) -> PlotResult<AggregatedObservations> {
    if ensembles.len() != results.len() {
        return Err(PlotError::LengthMismatch {
            specifications: ensembles.len(),
            results: results.len(),
        });
    }

    let mut observations = ObservationMap::new();
    for (ensemble, result) in ensembles.iter().zip(results) {
        let Some(summary) = result.data.as_ref() else {
            continue;
        };

        let vectors_observation_data = specifications
            .iter()
            .filter(|specification| specification.ensemble_ident == *ensemble)
            .filter_map(|specification| {
                summary
                    .iter()
                    .find(|entry| entry.vector_name == specification.vector_name)
                    .map(|entry| LoadedPair {
                        vector_specification: specification.clone(),
                        data: entry.clone(),
                    })
            })
            .collect();

        observations.insert(
            ensemble.clone(),
            EnsembleObservations {
                has_summary_observations: !summary.is_empty(),
                vectors_observation_data,
            },
        );
    }

    Ok(AggregatedObservations {
        observations,
        status: QueryStatus::of(results),
    })
}

#[cfg(test)]
mod tests {
    use super::{
        QueryResult, aggregate_observations, join_specifications_with_results,
        unique_observation_ensembles,
    };
    use crate::core::{
        EnsembleIdent, SummaryVectorDateObservation, SummaryVectorObservations,
        VectorSpecification,
    };
    use crate::error::PlotError;

    fn spec(ensemble: &str, vector: &str) -> VectorSpecification {
        VectorSpecification::new(EnsembleIdent::regular("case", ensemble), vector, "#000000")
    }

    #[test]
    fn join_drops_unresolved_entries_in_order() {
        let specs = vec![spec("a", "A"), spec("a", "B"), spec("a", "C")];
        let results = vec![
            QueryResult::loaded(1),
            QueryResult::pending(),
            QueryResult::loaded(3),
        ];
        let pairs = join_specifications_with_results(&specs, &results).expect("join");
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].vector_specification.vector_name, "A");
        assert_eq!(pairs[0].data, 1);
        assert_eq!(pairs[1].vector_specification.vector_name, "C");
        assert_eq!(pairs[1].data, 3);
    }

    #[test]
    fn join_keeps_every_loaded_entry() {
        let specs = vec![spec("a", "A"), spec("b", "A")];
        let results = vec![QueryResult::loaded("x"), QueryResult::loaded("y")];
        let pairs = join_specifications_with_results(&specs, &results).expect("join");
        let joined: Vec<_> = pairs
            .iter()
            .map(|pair| (pair.vector_specification.clone(), pair.data))
            .collect();
        assert_eq!(joined, vec![(specs[0].clone(), "x"), (specs[1].clone(), "y")]);
    }

    #[test]
    fn join_rejects_length_mismatch() {
        let specs = vec![spec("a", "A")];
        let results: Vec<QueryResult<i32>> = Vec::new();
        let err = join_specifications_with_results(&specs, &results).expect_err("mismatch");
        assert!(matches!(
            err,
            PlotError::LengthMismatch {
                specifications: 1,
                results: 0
            }
        ));
    }

    #[test]
    fn observation_ensembles_are_deduplicated_and_skip_delta() {
        let delta = VectorSpecification::new(EnsembleIdent::delta("case", "d"), "FOPT", "#000000");
        let specs = vec![spec("a", "FOPT"), spec("b", "FOPT"), spec("a", "FGPT"), delta];
        let ensembles = unique_observation_ensembles(&specs);
        assert_eq!(
            ensembles,
            vec![
                EnsembleIdent::regular("case", "a"),
                EnsembleIdent::regular("case", "b")
            ]
        );
    }

    #[test]
    fn aggregation_attaches_matching_vectors_and_tracks_pending() {
        let specs = vec![spec("a", "FOPT"), spec("a", "FGPT"), spec("b", "FOPT")];
        let ensembles = unique_observation_ensembles(&specs);
        let summary = vec![SummaryVectorObservations {
            vector_name: "FOPT".to_owned(),
            observations: vec![SummaryVectorDateObservation {
                timestamp_utc_ms: 0,
                value: 1.0,
                error: 0.1,
                label: "obs".to_owned(),
            }],
        }];
        let results = vec![QueryResult::loaded(summary), QueryResult::pending()];

        let aggregated = aggregate_observations(&ensembles, &results, &specs).expect("aggregate");
        assert!(aggregated.status.is_fetching);
        assert!(!aggregated.status.is_error);
        assert_eq!(aggregated.observations.len(), 1);

        let entry = aggregated
            .observations
            .get(&EnsembleIdent::regular("case", "a"))
            .expect("ensemble a");
        assert!(entry.has_summary_observations);
        assert_eq!(entry.vectors_observation_data.len(), 1);
        assert_eq!(
            entry.vectors_observation_data[0].vector_specification.vector_name,
            "FOPT"
        );
    }

    #[test]
    fn empty_summary_marks_ensemble_without_observations() {
        let specs = vec![spec("a", "FOPT")];
        let ensembles = unique_observation_ensembles(&specs);
        let results = vec![QueryResult::loaded(Vec::new())];
        let aggregated = aggregate_observations(&ensembles, &results, &specs).expect("aggregate");
        let entry = aggregated.observations.values().next().expect("entry");
        assert!(!entry.has_summary_observations);
        assert!(entry.vectors_observation_data.is_empty());
    }
}
