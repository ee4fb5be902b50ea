use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};
use crate::extract::ChartExtraction;

use super::BurnupForecast;

pub const EXTRACTION_JSON_SCHEMA_V1: u32 = 1;
pub const FORECAST_JSON_SCHEMA_V1: u32 = 1;

/// Versioned envelope handed across the page/extension boundary.
///
/// `extraction: null` means the chart could not be reconstructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionJsonContractV1 {
    pub schema_version: u32,
    pub extraction: Option<ChartExtraction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForecastJsonContractV1 {
    pub schema_version: u32,
    pub forecast: BurnupForecast,
}

impl ExtractionJsonContractV1 {
    #[must_use]
    pub fn new(extraction: Option<ChartExtraction>) -> Self {
        Self {
            schema_version: EXTRACTION_JSON_SCHEMA_V1,
            extraction,
        }
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize extraction contract v1: {e}"))
        })
    }

    /// Accepts the versioned envelope, a bare extraction object, or `null`.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Option<ChartExtraction>> {
        if let Ok(extraction) = serde_json::from_str::<Option<ChartExtraction>>(input) {
            return Ok(extraction);
        }
        let payload: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse extraction json payload: {e}"))
        })?;
        if payload.schema_version != EXTRACTION_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported extraction schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.extraction)
    }
}

impl BurnupForecast {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ForecastJsonContractV1 {
            schema_version: FORECAST_JSON_SCHEMA_V1,
            forecast: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize forecast contract v1: {e}"))
        })
    }

    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(forecast) = serde_json::from_str::<Self>(input) {
            return Ok(forecast);
        }
        let payload: ForecastJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse forecast json payload: {e}"))
        })?;
        if payload.schema_version != FORECAST_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported forecast schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.forecast)
    }
}
