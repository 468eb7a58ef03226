use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Whether an ensemble holds simulated realizations or the difference of two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnsembleKind {
    Regular,
    Delta,
}

/// Identity of one ensemble within a case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EnsembleIdent {
    pub case_uuid: String,
    pub ensemble_name: String,
    pub kind: EnsembleKind,
}

impl EnsembleIdent {
    #[must_use]
    pub fn regular(case_uuid: impl Into<String>, ensemble_name: impl Into<String>) -> Self {
        Self {
            case_uuid: case_uuid.into(),
            ensemble_name: ensemble_name.into(),
            kind: EnsembleKind::Regular,
        }
    }

    #[must_use]
    pub fn delta(case_uuid: impl Into<String>, ensemble_name: impl Into<String>) -> Self {
        Self {
            case_uuid: case_uuid.into(),
            ensemble_name: ensemble_name.into(),
            kind: EnsembleKind::Delta,
        }
    }

    #[must_use]
    pub fn is_delta(&self) -> bool {
        self.kind == EnsembleKind::Delta
    }
}

impl fmt::Display for EnsembleIdent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.case_uuid, self.ensemble_name)
    }
}

/// One ensemble x vector pairing selected for visualization.
///
/// Equality and hashing only consider the ensemble identity and the vector
/// name; color and display data ride along.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorSpecification {
    pub ensemble_ident: EnsembleIdent,
    pub ensemble_display_name: String,
    pub vector_name: String,
    pub color: String,
    #[serde(default)]
    pub has_historical_vector: bool,
}

impl VectorSpecification {
    #[must_use]
    pub fn new(
        ensemble_ident: EnsembleIdent,
        vector_name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        let ensemble_display_name = ensemble_ident.ensemble_name.clone();
        Self {
            ensemble_ident,
            ensemble_display_name,
            vector_name: vector_name.into(),
            color: color.into(),
            has_historical_vector: false,
        }
    }

    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.ensemble_display_name = display_name.into();
        self
    }

    #[must_use]
    pub fn with_historical_vector(mut self, has_historical_vector: bool) -> Self {
        self.has_historical_vector = has_historical_vector;
        self
    }

    /// Stable identifier of the pairing, used for published channels.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}::{}", self.ensemble_ident, self.vector_name)
    }
}

impl PartialEq for VectorSpecification {
    fn eq(&self, other: &Self) -> bool {
        self.ensemble_ident == other.ensemble_ident && self.vector_name == other.vector_name
    }
}

impl Eq for VectorSpecification {}

impl Hash for VectorSpecification {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.ensemble_ident.hash(state);
        self.vector_name.hash(state);
    }
}

/// Time-bucketing applied by the query layer before statistics are computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
    Quarterly,
    Yearly,
}

impl Frequency {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Yearly => "yearly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatisticFunction {
    Mean,
    Min,
    Max,
    P10,
    P90,
    P50,
}

impl StatisticFunction {
    pub const ALL: [Self; 6] = [
        Self::Min,
        Self::P10,
        Self::P50,
        Self::Mean,
        Self::P90,
        Self::Max,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Mean => "Mean",
            Self::Min => "Min",
            Self::Max => "Max",
            Self::P10 => "P10",
            Self::P90 => "P90",
            Self::P50 => "P50",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FanchartStatisticOption {
    Mean,
    MinMax,
    P10P90,
}

/// User-selected statistics for line and fanchart rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSelection {
    pub individual: Vec<StatisticFunction>,
    pub fanchart: Vec<FanchartStatisticOption>,
}

impl Default for StatisticsSelection {
    fn default() -> Self {
        Self {
            individual: StatisticFunction::ALL.to_vec(),
            fanchart: vec![
                FanchartStatisticOption::Mean,
                FanchartStatisticOption::MinMax,
                FanchartStatisticOption::P10P90,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VisualizationMode {
    IndividualRealizations,
    StatisticalLines,
    StatisticalFanchart,
    StatisticsAndRealizations,
}

impl VisualizationMode {
    #[must_use]
    pub const fn needs_realizations(self) -> bool {
        matches!(
            self,
            Self::IndividualRealizations | Self::StatisticsAndRealizations
        )
    }

    #[must_use]
    pub const fn needs_statistics(self) -> bool {
        !matches!(self, Self::IndividualRealizations)
    }
}

/// Attribute that drives subplot placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubplotOwner {
    Vector,
    Ensemble,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubplotLimitDirection {
    None,
    Rows,
    Columns,
}
