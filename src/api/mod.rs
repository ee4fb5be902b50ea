//! Host-facing surface: settings, forecast facade, JSON contract and the
//! bounded waits at the pipeline boundary.

pub mod bridge;
mod burnup_forecast;
mod json_contract;
mod settings;

pub use bridge::{
    DEFAULT_RESPONSE_TIMEOUT, PendingResponse, PollPolicy, ResponseSender, poll_until_ready,
    response_channel,
};
pub use burnup_forecast::{BurnupForecast, forecast_burnup, forecast_burnup_now};
pub use json_contract::{
    EXTRACTION_JSON_SCHEMA_V1, ExtractionJsonContractV1, FORECAST_JSON_SCHEMA_V1,
    ForecastJsonContractV1,
};
pub use settings::{ForecastSettings, MAX_LOOKBACK_DAYS, MIN_LOOKBACK_DAYS};
