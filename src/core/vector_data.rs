use serde::{Deserialize, Serialize};

use crate::core::StatisticFunction;
use crate::error::{PlotError, PlotResult};

/// Samples of one vector for one realization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorRealizationData {
    pub realization: u32,
    pub timestamps_utc_ms: Vec<i64>,
    pub values: Vec<f64>,
    pub unit: String,
    pub is_rate: bool,
}

impl VectorRealizationData {
    pub fn new(
        realization: u32,
        timestamps_utc_ms: Vec<i64>,
        values: Vec<f64>,
        unit: impl Into<String>,
        is_rate: bool,
    ) -> PlotResult<Self> {
        validate_sample_lengths(timestamps_utc_ms.len(), values.len(), "realization")?;
        Ok(Self {
            realization,
            timestamps_utc_ms,
            values,
            unit: unit.into(),
            is_rate,
        })
    }

    /// Checks that every timestamp has exactly one value.
    pub fn validate(&self) -> PlotResult<()> {
        validate_sample_lengths(
            self.timestamps_utc_ms.len(),
            self.values.len(),
            "realization",
        )
    }

    /// Value at `timestamp_utc_ms`, or at the latest sample before it.
    #[must_use]
    pub fn value_at_or_before(&self, timestamp_utc_ms: i64) -> Option<f64> {
        let end = self
            .timestamps_utc_ms
            .partition_point(|&ts| ts <= timestamp_utc_ms);
        end.checked_sub(1).and_then(|index| self.values.get(index).copied())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticValueObject {
    pub statistic_function: StatisticFunction,
    pub values: Vec<f64>,
}

/// Cross-realization statistics of one vector in one ensemble.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorStatisticData {
    pub realizations: Vec<u32>,
    pub timestamps_utc_ms: Vec<i64>,
    pub value_objects: Vec<StatisticValueObject>,
    pub unit: String,
    pub is_rate: bool,
}

impl VectorStatisticData {
    pub fn validate(&self) -> PlotResult<()> {
        for object in &self.value_objects {
            validate_sample_lengths(
                self.timestamps_utc_ms.len(),
                object.values.len(),
                object.statistic_function.label(),
            )?;
        }
        Ok(())
    }

    #[must_use]
    pub fn values_for(&self, statistic: StatisticFunction) -> Option<&[f64]> {
        self.value_objects
            .iter()
            .find(|object| object.statistic_function == statistic)
            .map(|object| object.values.as_slice())
    }
}

/// Historical reference curve of one vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorHistoricalData {
    pub timestamps_utc_ms: Vec<i64>,
    pub values: Vec<f64>,
    pub unit: String,
    pub is_rate: bool,
}

impl VectorHistoricalData {
    pub fn validate(&self) -> PlotResult<()> {
        validate_sample_lengths(self.timestamps_utc_ms.len(), self.values.len(), "history")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryVectorDateObservation {
    pub timestamp_utc_ms: i64,
    pub value: f64,
    pub error: f64,
    pub label: String,
}

impl SummaryVectorDateObservation {
    /// Value and error bar must both be finite to be drawn.
    pub fn validate(&self) -> PlotResult<()> {
        if !self.value.is_finite() || !self.error.is_finite() {
            return Err(PlotError::InvalidData(format!(
                "observation `{}` needs a finite value and error",
                self.label
            )));
        }
        Ok(())
    }
}

/// All dated observations of one vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryVectorObservations {
    pub vector_name: String,
    pub observations: Vec<SummaryVectorDateObservation>,
}

fn validate_sample_lengths(timestamps: usize, values: usize, what: &str) -> PlotResult<()> {
    if timestamps != values {
        return Err(PlotError::InvalidData(format!(
            "{what} samples have {timestamps} timestamps but {values} values"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{SummaryVectorDateObservation, VectorHistoricalData, VectorRealizationData};

    #[test]
    fn realization_data_rejects_mismatched_samples() {
        assert!(VectorRealizationData::new(0, vec![1, 2], vec![1.0], "SM3", false).is_err());
    }

    #[test]
    fn public_fields_are_checked_by_validate() {
        let mut realization = VectorRealizationData::new(0, vec![1], vec![1.0], "SM3", false)
            .expect("valid data");
        realization.values.push(2.0);
        assert!(realization.validate().is_err());

        let history = VectorHistoricalData {
            timestamps_utc_ms: vec![1, 2],
            values: vec![1.0],
            unit: "SM3".to_owned(),
            is_rate: false,
        };
        assert!(history.validate().is_err());

        let mut observation = SummaryVectorDateObservation {
            timestamp_utc_ms: 1,
            value: 1.0,
            error: 0.1,
            label: "OBS".to_owned(),
        };
        assert!(observation.validate().is_ok());
        observation.error = f64::NAN;
        assert!(observation.validate().is_err());
    }

    #[test]
    fn value_lookup_uses_latest_sample_not_after_timestamp() {
        let data =
            VectorRealizationData::new(3, vec![10, 20, 30], vec![1.0, 2.0, 3.0], "SM3", false)
                .expect("valid data");
        assert_eq!(data.value_at_or_before(5), None);
        assert_eq!(data.value_at_or_before(10), Some(1.0));
        assert_eq!(data.value_at_or_before(25), Some(2.0));
        assert_eq!(data.value_at_or_before(99), Some(3.0));
    }
}
