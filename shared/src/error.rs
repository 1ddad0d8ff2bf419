//! Error types shared by the parsing and configuration layers.

use thiserror::Error;

/// Failure to read the `MapRange` parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RangeError {
    /// The parameter is not valid JSON.
    #[error("MapRange is not valid JSON: {0}")]
    Json(String),
    /// A required sub-field is missing or is not a string.
    #[error("MapRange is missing `{0}`")]
    MissingField(&'static str),
    /// `RangeCenter` did not split into exactly `lat,long`.
    #[error("RangeCenter must be \"lat,long\", got {0:?}")]
    CenterArity(String),
    /// A number could not be read.
    #[error("MapRange {field} is not a number: {value:?}")]
    NotANumber { field: &'static str, value: String },
    /// The zoom level is negative.
    #[error("MapRange zoom must not be negative, got {0}")]
    NegativeZoom(f64),
    /// The center lies outside valid geographic bounds.
    #[error(transparent)]
    Center(#[from] CoordinateError),
}

/// Failure to read a latitude or longitude from text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("{axis} is not a number: {value:?}")]
    NotANumber { axis: Axis, value: String },
    #[error("{axis} {value} is out of range")]
    OutOfRange { axis: Axis, value: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::Latitude => write!(f, "latitude"),
            Axis::Longitude => write!(f, "longitude"),
        }
    }
}

/// Failure to read the CMS payload.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DatasourceError {
    #[error("component payload is not valid JSON: {0}")]
    Json(String),
    /// No datasource item is bound to the rendering.
    #[error("no datasource is bound to this map")]
    MissingDatasource,
}

/// Failure to assemble maps library settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    #[error("maps API key is not configured (set {0})")]
    MissingApiKey(&'static str),
}
