//! The atomic record emitted by every fetch: one named value at one instant
//! at one place, regardless of which upstream protocol produced it.

use crate::noaa::LatLon;
use chrono::{DateTime, Utc};

/// Where an observation was measured or predicted.
///
/// Station observations carry the upstream station identifier
/// (e.g. `"GHCND:USW00094728"`); gridded forecasts carry the grid point
/// coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Site {
    Station(String),
    Coordinates(LatLon),
}

/// A single normalized weather value.
///
/// `name` is the upstream parameter name (`"PRCP"`, `"TMAX"`, ... for
/// station data; `"temp"`, `"dewpoint"`, ... for forecasts). Station
/// records carry no units on the wire, so `units` is optional, and
/// `attributes` holds the raw CDO measurement-flag string when present.
#[derive(Debug, Clone, PartialEq)]
pub struct Observation {
    pub name: String,
    pub value: f64,
    pub units: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub site: Site,
    pub attributes: Option<String>,
}
