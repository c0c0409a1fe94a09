use crate::error::{ProcessingError, Result};
use crate::utils::constants::{SPAIN_MAX_LAT, SPAIN_MAX_LON, SPAIN_MIN_LAT, SPAIN_MIN_LON};

/// Round to a fixed number of decimal places, halves away from zero
///
/// # Examples
/// ```
/// use cte_zoning::utils::round_to;
///
/// assert_eq!(round_to(2681.8975, 1), 2681.9);
/// assert_eq!(round_to(-0.1713, 2), -0.17);
/// ```
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// True when the values differ by less than half a unit in the last of
/// `decimals` places, whichever side of a rounding boundary they fall on
pub fn within_decimals(a: f64, b: f64, decimals: i32) -> bool {
    (a - b).abs() < 0.5 * 10f64.powi(-decimals)
}

/// Validate that a location falls within Spanish territory
pub fn validate_spain_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(SPAIN_MIN_LAT..=SPAIN_MAX_LAT).contains(&latitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Latitude {} is outside Spanish bounds [{}, {}]",
            latitude, SPAIN_MIN_LAT, SPAIN_MAX_LAT
        )));
    }

    if !(SPAIN_MIN_LON..=SPAIN_MAX_LON).contains(&longitude) {
        return Err(ProcessingError::InvalidCoordinate(format!(
            "Longitude {} is outside Spanish bounds [{}, {}]",
            longitude, SPAIN_MIN_LON, SPAIN_MAX_LON
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.54136, 3), 0.541);
        assert_eq!(round_to(2419.5833, 1), 2419.6);
        assert_eq!(round_to(-0.1137, 2), -0.11);
        assert_eq!(round_to(0.0, 2), 0.0);
    }

    #[test]
    fn test_within_decimals() {
        assert!(within_decimals(40.4093, 40.409, 3));
        assert!(!within_decimals(40.412, 40.409, 3));
        assert!(within_decimals(657.04, 657.0, 1));
        assert!(!within_decimals(657.0, 650.0, 1));
        // Straddling a rounding boundary is still a match
        assert!(within_decimals(40.4094, 40.4096, 3));
        assert!(!within_decimals(40.4094, 40.4101, 3));
    }

    #[test]
    fn test_spain_coordinate_validation() {
        assert!(validate_spain_coordinates(40.4168, -3.7038).is_ok()); // Madrid
        assert!(validate_spain_coordinates(28.4636, -16.2518).is_ok()); // Santa Cruz de Tenerife
        assert!(validate_spain_coordinates(39.5696, 2.6502).is_ok()); // Palma
        assert!(validate_spain_coordinates(51.5074, -0.1278).is_err()); // London
        assert!(validate_spain_coordinates(40.0, 10.0).is_err());
    }
}
