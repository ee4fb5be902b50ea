use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Slack applied when deciding whether a traced point lies inside the plot.
pub const BOUNDS_TOLERANCE_PX: f64 = 1.0;

/// Raw device-space coordinate read from the vector markup.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Pixel bounds of the plotting area.
///
/// Every other pixel coordinate in an extraction pass is only meaningful
/// relative to this rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRectangle {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotRectangle {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> ChartResult<Self> {
        if !left.is_finite() || !top.is_finite() {
            return Err(ChartError::InvalidData(
                "plot origin must be finite".to_owned(),
            ));
        }
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ChartError::InvalidGeometry { width, height });
        }

        Ok(Self {
            left,
            top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Inclusive containment test with `tolerance` pixels of slack on every edge.
    #[must_use]
    pub fn contains(self, point: PixelPoint, tolerance: f64) -> bool {
        point.x >= self.left - tolerance
            && point.x <= self.right() + tolerance
            && point.y >= self.top - tolerance
            && point.y <= self.bottom() + tolerance
    }
}

/// Domain-space bounds of the plot rectangle edges.
///
/// For cumulative charts `x_*` are unix seconds, for column charts they are
/// ordinal category indices. `y_*` are always numeric magnitudes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisExtrema {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

/// A reconstructed observation at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DomainPoint {
    pub date: NaiveDate,
    pub value: f64,
}

impl DomainPoint {
    /// Returns `None` for non-finite values so they never enter a series.
    #[must_use]
    pub fn new(date: NaiveDate, value: f64) -> Option<Self> {
        value.is_finite().then_some(Self { date, value })
    }
}

/// Inferred chart time span. Parsing does not enforce `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    #[must_use]
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn is_forward(self) -> bool {
        self.start < self.end
    }
}

/// Semantic role of a cumulative-chart series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesRole {
    Completed,
    Open,
}

// CJK open tokens contain the completed tokens ("未完了" ⊃ "完了"), so open is checked first.
const OPEN_TOKENS: &[&str] = &["open", "オープン", "未完了", "未完成", "打开", "开放"];
const COMPLETED_TOKENS: &[&str] = &["completed", "完了", "已完成", "完成"];

impl SeriesRole {
    /// Matches legend or annotation text against the localized role vocabulary.
    #[must_use]
    pub fn from_label(text: &str) -> Option<Self> {
        let lowered = text.to_lowercase();
        if OPEN_TOKENS.iter().any(|token| lowered.contains(token)) {
            return Some(Self::Open);
        }
        if COMPLETED_TOKENS.iter().any(|token| lowered.contains(token)) {
            return Some(Self::Completed);
        }
        None
    }
}
