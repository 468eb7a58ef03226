use serde::{Deserialize, Serialize};

use crate::core::{SubplotDomain, SubplotPosition};

use super::DashStyle;

/// Vertical line marking the active timestamp across one subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeCursorLine {
    pub subplot: SubplotPosition,
    pub timestamp_utc_ms: i64,
    pub y0: f64,
    pub y1: f64,
    pub color: String,
    pub dash: DashStyle,
}

/// Text placed under the horizontal axis of a subplot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeCursorLabel {
    pub subplot: SubplotPosition,
    pub timestamp_utc_ms: i64,
    pub text: String,
    /// Figure-space y coordinate of the label anchor.
    pub y: f64,
}

impl TimeCursorLine {
    #[must_use]
    pub fn spanning(
        subplot: SubplotPosition,
        timestamp_utc_ms: i64,
        domain: SubplotDomain,
        color: impl Into<String>,
    ) -> Self {
        Self {
            subplot,
            timestamp_utc_ms,
            y0: domain.y0,
            y1: domain.y1,
            color: color.into(),
            dash: DashStyle::Dash,
        }
    }
}
