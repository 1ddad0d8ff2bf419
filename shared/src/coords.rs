use serde::{Deserialize, Serialize};

use crate::error::{Axis, CoordinateError};

/// Geographic position, serialized as the maps library's `LatLngLiteral`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Parse a pair of text coordinates, validating both axes.
    pub fn parse(lat: &str, lng: &str) -> Result<Self, CoordinateError> {
        Ok(Self {
            lat: parse_coordinate(Axis::Latitude, lat)?,
            lng: parse_coordinate(Axis::Longitude, lng)?,
        })
    }

    /// Check an already-numeric pair against geographic bounds.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        Ok(Self {
            lat: check_bounds(Axis::Latitude, lat)?,
            lng: check_bounds(Axis::Longitude, lng)?,
        })
    }
}

/// Read a finite number from CMS text. Surrounding whitespace is ignored.
pub fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|value| value.is_finite())
}

pub fn parse_coordinate(axis: Axis, text: &str) -> Result<f64, CoordinateError> {
    let value = parse_number(text).ok_or_else(|| CoordinateError::NotANumber {
        axis,
        value: text.to_string(),
    })?;
    check_bounds(axis, value)
}

fn check_bounds(axis: Axis, value: f64) -> Result<f64, CoordinateError> {
    let limit = match axis {
        Axis::Latitude => 90.0,
        Axis::Longitude => 180.0,
    };
    if value.is_finite() && (-limit..=limit).contains(&value) {
        Ok(value)
    } else {
        Err(CoordinateError::OutOfRange { axis, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trimmed_numbers() {
        assert_eq!(parse_number(" 47.1164 "), Some(47.1164));
        assert_eq!(parse_number("-101.2996"), Some(-101.2996));
    }

    #[test]
    fn rejects_non_numeric_and_non_finite_text() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("north"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
    }

    #[test]
    fn parse_pair_reports_failing_axis() {
        let err = LatLng::parse("10", "east").unwrap_err();
        assert_eq!(
            err,
            CoordinateError::NotANumber {
                axis: Axis::Longitude,
                value: "east".to_string()
            }
        );
    }

    #[test]
    fn latitude_beyond_pole_is_out_of_range() {
        let err = LatLng::parse("91", "0").unwrap_err();
        assert_eq!(
            err,
            CoordinateError::OutOfRange {
                axis: Axis::Latitude,
                value: 91.0
            }
        );
    }

    #[test]
    fn boundary_values_are_accepted() {
        assert_eq!(
            LatLng::parse("-90", "180").unwrap(),
            LatLng::new(-90.0, 180.0)
        );
    }

    #[test]
    fn serializes_as_lat_lng_literal() {
        let value = serde_json::to_value(LatLng::new(1.5, -2.0)).unwrap();
        assert_eq!(value, serde_json::json!({ "lat": 1.5, "lng": -2.0 }));
    }
}
