pub mod calendar;
pub mod path;
pub mod primitives;
pub mod scale;
pub mod time_scale;
pub mod types;
pub mod value_scale;

pub use calendar::{
    MonthDay, infer_date_range, parse_calendar_date, parse_date_range, parse_month_day,
};
pub use path::{
    PathPoints, PathToken, PathTokens, first_point_within, last_point_within, points_within,
    trace_path,
};
pub use scale::{LinearScale, PixelSpan};
pub use time_scale::{DateAxis, sample_daily};
pub use types::{
    AxisExtrema, BOUNDS_TOLERANCE_PX, DateRange, DomainPoint, PixelPoint, PlotRectangle,
    SeriesRole,
};
pub use value_scale::ValueAxis;
