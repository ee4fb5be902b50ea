//! burnup-lens: recovers chart data from rendered SVG and forecasts completion.
//!
//! The host page draws its insight charts but exposes no data API. This
//! crate reads the rendered markup back into typed series, reconciles pixel
//! readings with the exact values in point descriptions, and derives
//! velocity, completion date and on-track status from the result.

pub mod api;
pub mod core;
pub mod error;
pub mod extract;
pub mod forecast;
pub mod markup;
pub mod telemetry;

pub use api::{BurnupForecast, ForecastSettings, forecast_burnup};
pub use error::{ChartError, ChartResult};
pub use extract::{ChartExtraction, extract_chart};
