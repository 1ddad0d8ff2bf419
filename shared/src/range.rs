//! Initial center and zoom, read from the `MapRange` rendering parameter.
//!
//! The parameter is a JSON string of the form
//! `{"RangeCenter":{"value":"lat,long"},"Zoom":{"value":"5"}}`.

use serde::Deserialize;

use crate::coords::{LatLng, parse_number};
use crate::error::RangeError;

pub const DEFAULT_CENTER: LatLng = LatLng::new(47.1164, -101.2996);
pub const DEFAULT_ZOOM: f64 = 3.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapRange {
    pub center: LatLng,
    pub zoom: f64,
}

impl Default for MapRange {
    fn default() -> Self {
        Self {
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }
}

#[derive(Deserialize)]
struct RawRange {
    #[serde(rename = "RangeCenter")]
    range_center: Option<RawValue>,
    #[serde(rename = "Zoom")]
    zoom: Option<RawValue>,
}

#[derive(Deserialize)]
struct RawValue {
    value: Option<String>,
}

impl RawValue {
    fn text(field: Option<Self>, name: &'static str) -> Result<String, RangeError> {
        field
            .and_then(|raw| raw.value)
            .ok_or(RangeError::MissingField(name))
    }
}

/// Parse the raw parameter. An absent or blank string yields the defaults;
/// anything present but malformed is an error.
pub fn parse_map_range(raw: Option<&str>) -> Result<MapRange, RangeError> {
    let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
        return Ok(MapRange::default());
    };

    let parsed: RawRange =
        serde_json::from_str(raw).map_err(|e| RangeError::Json(e.to_string()))?;

    let center_text = RawValue::text(parsed.range_center, "RangeCenter.value")?;
    let zoom_text = RawValue::text(parsed.zoom, "Zoom.value")?;

    let parts: Vec<&str> = center_text.split(',').collect();
    let [lat_text, lng_text] = parts.as_slice() else {
        return Err(RangeError::CenterArity(center_text.clone()));
    };
    let lat = number("RangeCenter latitude", lat_text)?;
    let lng = number("RangeCenter longitude", lng_text)?;
    let zoom = number("Zoom", &zoom_text)?;
    if zoom < 0.0 {
        return Err(RangeError::NegativeZoom(zoom));
    }

    Ok(MapRange {
        center: LatLng::checked(lat, lng)?,
        zoom,
    })
}

/// Parse the parameter, falling back to the defaults when it is malformed.
pub fn resolve_map_range(raw: Option<&str>) -> MapRange {
    match parse_map_range(raw) {
        Ok(range) => range,
        Err(e) => {
            log::warn!("ignoring MapRange, using default center and zoom: {e}");
            MapRange::default()
        }
    }
}

fn number(field: &'static str, text: &str) -> Result<f64, RangeError> {
    parse_number(text).ok_or_else(|| RangeError::NotANumber {
        field,
        value: text.to_string(),
    })
}
