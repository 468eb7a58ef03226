use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::core::{LoadedPair, VectorRealizationData};

/// Value of one realization at the requested time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealizationValue {
    pub realization: u32,
    pub value: f64,
}

/// Payload published for one rendered (vector, ensemble) pair.
///
/// Data is produced lazily per active timestamp by [`Self::generate`].
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedVectorChannel {
    pub id: String,
    pub display_name: String,
    pub unit: Option<String>,
    realizations: Arc<Vec<VectorRealizationData>>,
}

impl PublishedVectorChannel {
    /// Per-realization values at the active timestamp.
    ///
    /// Each realization reports its latest sample not after the timestamp;
    /// without a timestamp the last sample is used. Realizations that start
    /// after the timestamp are left out.
    #[must_use]
    pub fn generate(&self, active_timestamp_utc_ms: Option<i64>) -> Vec<RealizationValue> {
        self.realizations
            .iter()
            .filter_map(|data| {
                let value = match active_timestamp_utc_ms {
                    Some(timestamp) => data.value_at_or_before(timestamp),
                    None => data.values.last().copied(),
                }?;
                Some(RealizationValue {
                    realization: data.realization,
                    value,
                })
            })
            .collect()
    }
}

/// One channel per loaded realization pair, in specification order.
#[must_use]
pub fn publish_vector_channels(
    pairs: &[LoadedPair<Vec<VectorRealizationData>>],
) -> Vec<PublishedVectorChannel> {
    pairs
        .iter()
        .map(|pair| {
            let specification = &pair.vector_specification;
            PublishedVectorChannel {
                id: specification.key(),
                display_name: format!(
                    "{} ({})",
                    specification.vector_name, specification.ensemble_display_name
                ),
                unit: pair.data.first().map(|data| data.unit.clone()),
                realizations: Arc::new(pair.data.clone()),
            }
        })
        .collect()
}
