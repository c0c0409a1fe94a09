use std::f64::consts::PI;

use crate::utils::constants::{DAYS_PER_YEAR, WINTER_DAYS};

/// Solar declination in degrees (Cooper's equation)
pub fn declination(day_of_year: u32) -> f64 {
    23.45 * (360.0 / DAYS_PER_YEAR as f64 * (284.0 + day_of_year as f64)).to_radians().sin()
}

/// Maximum theoretical sunshine hours (day length) for a latitude and day of year
///
/// The year is a fixed 365 days. Returns `NaN` under polar day or polar night,
/// where `-tan(φ)·tan(δ)` leaves `[-1, 1]`.
///
/// # Examples
/// ```
/// use cte_zoning::indicators::solar::max_daylight_hours;
///
/// // Equinox-like day at the equator
/// assert!((max_daylight_hours(0.0, 81) - 12.0).abs() < 1e-9);
/// ```
pub fn max_daylight_hours(latitude_degrees: f64, day_of_year: u32) -> f64 {
    let delta = declination(day_of_year).to_radians();
    let phi = latitude_degrees.to_radians();

    (24.0 / PI) * (-phi.tan() * delta.tan()).acos()
}

/// Theoretical daylight summed over the winter half-year (days 1-150 and 274-365)
pub fn winter_theoretical_daylight(latitude_degrees: f64) -> f64 {
    WINTER_DAYS
        .iter()
        .flat_map(|&(first, last)| first..=last)
        .map(|day| max_daylight_hours(latitude_degrees, day))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_daylight_bounded_outside_polar_circles() {
        let mut latitude = -66.0;
        while latitude <= 66.0 {
            for day in 1..=365 {
                let hours = max_daylight_hours(latitude, day);
                assert!(hours.is_finite(), "lat {} day {}", latitude, day);
                assert!(hours > 0.0 && hours < 24.0, "lat {} day {}: {}", latitude, day, hours);
            }
            latitude += 0.5;
        }
    }

    #[test]
    fn test_solstice_day_lengths_at_40n() {
        // Around the June and December solstices the days are symmetric
        let june = max_daylight_hours(40.0, 172);
        let december = max_daylight_hours(40.0, 355);

        assert!((june - 14.845949921562987).abs() < 1e-9);
        assert!((june + december - 24.0).abs() < 1e-9);
    }

    #[test]
    fn test_equator_is_always_twelve_hours() {
        for day in [1, 100, 200, 365] {
            assert!((max_daylight_hours(0.0, day) - 12.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_polar_conditions_give_nan() {
        // Polar night near the December solstice
        assert!(max_daylight_hours(80.0, 355).is_nan());
    }

    #[test]
    fn test_winter_theoretical_daylight_regression() {
        let value = winter_theoretical_daylight(40.0);
        assert!((value - 2685.2060543697944).abs() < 1e-9, "{}", value);

        // Same input, bit-identical output
        assert_eq!(
            winter_theoretical_daylight(40.0).to_bits(),
            winter_theoretical_daylight(40.0).to_bits()
        );
    }

    #[test]
    fn test_winter_period_spans_242_days() {
        let days: usize = WINTER_DAYS
            .iter()
            .map(|&(first, last)| (last - first + 1) as usize)
            .sum();
        assert_eq!(days, 242);

        // At the equator every day contributes exactly 12 hours
        assert!((winter_theoretical_daylight(0.0) - 242.0 * 12.0).abs() < 1e-6);
    }
}
