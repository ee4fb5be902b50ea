use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid plot geometry: width={width}, height={height}")]
    InvalidGeometry { width: f64, height: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("required chart element is missing: {0}")]
    MissingElement(&'static str),

    #[error("chart markup could not be parsed: {0}")]
    Markup(String),

    #[error("no response within {millis} ms")]
    Timeout { millis: u128 },

    #[error("response channel closed before a result was delivered")]
    Disconnected,
}
