use burnup_lens::core::{DateAxis, DateRange, LinearScale, PixelSpan, PlotRectangle, ValueAxis};
use chrono::{Days, NaiveDate};
use proptest::prelude::*;

proptest! {
    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0,
        pixel_length in prop_oneof![-2048.0f64..-1.0, 1.0f64..2048.0]
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;

        let span = PixelSpan::new(12.0, pixel_length).expect("span");
        let scale = LinearScale::new(domain_start, domain_end).expect("valid scale");

        let px = scale.domain_to_pixel(value, span).expect("to pixel");
        let recovered = scale.pixel_to_domain(px, span).expect("from pixel");

        prop_assert!((recovered - value).abs() <= 1e-7);
    }

    #[test]
    fn value_axis_round_trip_property(
        y_min in -10_000.0f64..10_000.0,
        y_span in 0.01f64..100_000.0,
        value_factor in 0.0f64..1.0,
        height in 10.0f64..2000.0
    ) {
        let plot = PlotRectangle::new(0.0, 5.0, 800.0, height).expect("plot");
        let axis = ValueAxis::new(y_min, y_min + y_span, plot).expect("value axis");
        let value = y_min + value_factor * y_span;

        let px = axis.value_to_pixel(value).expect("to pixel");
        prop_assert!(px >= plot.top - 1e-6 && px <= plot.bottom() + 1e-6);
        let recovered = axis.pixel_to_value(px).expect("from pixel");
        prop_assert!((recovered - value).abs() <= 1e-6);
    }

    #[test]
    fn date_axis_day_centers_map_back_to_their_day(
        span_days in 1u64..400,
        offset in 0u64..400
    ) {
        let start = NaiveDate::from_ymd_opt(2025, 1, 1).expect("start");
        let end = start.checked_add_days(Days::new(span_days)).expect("end");
        let plot = PlotRectangle::new(40.0, 0.0, 900.0, 300.0).expect("plot");
        let axis = DateAxis::new(DateRange::new(start, end), plot).expect("date axis");

        let day = start.checked_add_days(Days::new(offset % (span_days + 1))).expect("day");
        let noon = day.and_hms_opt(12, 0, 0).expect("noon");
        let px = axis.datetime_to_pixel(noon).expect("to pixel");

        prop_assert_eq!(axis.pixel_to_date(px).expect("from pixel"), day);
    }
}
