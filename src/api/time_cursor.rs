use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::core::{LoadedPair, VectorRealizationData};

/// Click on the charting surface, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotClickEvent {
    pub x_utc_ms: f64,
}

/// Sorted, distinct timestamps across all loaded realization curves.
#[must_use]
pub fn realization_timestamps(pairs: &[LoadedPair<Vec<VectorRealizationData>>]) -> Vec<i64> {
    pairs
        .iter()
        .flat_map(|pair| pair.data.iter())
        .flat_map(|realization| realization.timestamps_utc_ms.iter().copied())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Translates a click into the next active timestamp.
///
/// Snaps to the nearest of `known_timestamps` (sorted ascending); without
/// known timestamps the click position itself is used.
#[must_use]
pub fn active_timestamp_from_click(event: PlotClickEvent, known_timestamps: &[i64]) -> Option<i64> {
    if !event.x_utc_ms.is_finite() {
        return None;
    }
    let clicked = event.x_utc_ms.round() as i64;
    if known_timestamps.is_empty() {
        return Some(clicked);
    }

    let upper = known_timestamps.partition_point(|&ts| ts < clicked);
    let after = known_timestamps.get(upper).copied();
    let before = upper
        .checked_sub(1)
        .and_then(|index| known_timestamps.get(index).copied());
    match (before, after) {
        (Some(before), Some(after)) if clicked.abs_diff(before) <= after.abs_diff(clicked) => {
            Some(before)
        }
        (_, Some(after)) => Some(after),
        (before, None) => before,
    }
}
