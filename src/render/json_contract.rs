use serde::{Deserialize, Serialize};

use crate::error::{PlotError, PlotResult};

use super::Figure;

pub const FIGURE_JSON_SCHEMA_V1: u32 = 1;

/// Figure payload handed to the dashboard's charting surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureJsonContractV1 {
    pub schema_version: u32,
    pub figure: Figure,
}

impl Figure {
    pub fn to_json_contract_v1_pretty(&self) -> PlotResult<String> {
        let payload = FigureJsonContractV1 {
            schema_version: FIGURE_JSON_SCHEMA_V1,
            figure: self.clone(),
        };
        serde_json::to_string_pretty(&payload)
            .map_err(|e| PlotError::InvalidData(format!("cannot encode figure as json: {e}")))
    }

    /// Reads a versioned figure payload, or a bare figure without
    /// `schema_version`.
    ///
    /// The decoded figure must pass [`Figure::validate`].
    pub fn from_json_compat_str(input: &str) -> PlotResult<Self> {
        let value: serde_json::Value = serde_json::from_str(input)
            .map_err(|e| PlotError::InvalidData(format!("figure json is malformed: {e}")))?;

        let decoded = match value.get("schema_version") {
            None => serde_json::from_value::<Figure>(value),
            Some(version) if version.as_u64() == Some(u64::from(FIGURE_JSON_SCHEMA_V1)) => {
                serde_json::from_value::<FigureJsonContractV1>(value).map(|payload| payload.figure)
            }
            Some(version) => {
                return Err(PlotError::InvalidData(format!(
                    "figure schema version {version} is not supported"
                )));
            }
        };
        let figure = decoded
            .map_err(|e| PlotError::InvalidData(format!("figure json has wrong shape: {e}")))?;
        figure.validate()?;
        Ok(figure)
    }
}
