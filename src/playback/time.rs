/// Format seconds as `m:ss`. Minutes are unbounded; negative and non-finite
/// values render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// Map a horizontal offset inside the progress track to a fraction of its
/// width.
pub fn track_fraction(offset_px: f64, width_px: f64) -> Option<f64> {
    if !width_px.is_finite() || width_px <= 0.0 || offset_px.is_nan() {
        return None;
    }
    Some((offset_px / width_px).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_padded_seconds() {
        assert_eq!(format_time(125.0), "2:05");
        assert_eq!(format_time(59.0), "0:59");
        assert_eq!(format_time(0.0), "0:00");
        assert_eq!(format_time(60.0), "1:00");
        assert_eq!(format_time(3600.0), "60:00");
    }

    #[test]
    fn fractional_seconds_are_floored() {
        assert_eq!(format_time(59.999), "0:59");
        assert_eq!(format_time(125.4), "2:05");
    }

    #[test]
    fn invalid_times_render_as_zero() {
        assert_eq!(format_time(-4.0), "0:00");
        assert_eq!(format_time(f64::NAN), "0:00");
        assert_eq!(format_time(f64::INFINITY), "0:00");
    }

    #[test]
    fn track_fraction_clamps_to_track() {
        assert_eq!(track_fraction(50.0, 200.0), Some(0.25));
        assert_eq!(track_fraction(-10.0, 200.0), Some(0.0));
        assert_eq!(track_fraction(250.0, 200.0), Some(1.0));
    }

    #[test]
    fn track_fraction_rejects_degenerate_width() {
        assert_eq!(track_fraction(10.0, 0.0), None);
        assert_eq!(track_fraction(10.0, -5.0), None);
        assert_eq!(track_fraction(10.0, f64::NAN), None);
        assert_eq!(track_fraction(f64::NAN, 100.0), None);
    }
}
