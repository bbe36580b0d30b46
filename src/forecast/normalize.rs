//! Layout-indirection normalization: walks each supported parameter
//! section, resolves its layout key, and emits one observation per hour of
//! each indexed span.
//!
//! Forecast feeds routinely contain sparse cells, so an unparsable value is
//! skipped. A value index with no matching span is different: that means
//! the document's own indirection is broken, and the fetch fails.

use crate::error::NoaaError;
use crate::forecast::envelope::{Dwml, ParameterSection};
use crate::forecast::error::ForecastError;
use crate::forecast::layout::TimeLayoutTable;
use crate::noaa::LatLon;
use crate::types::observation::{Observation, Site};
use log::debug;
use tokio::sync::mpsc::Sender;

/// Expands the document into observations, section by section, sending
/// each one as soon as it is built. Stops silently when the receiver is
/// gone; a malformed-document failure is sent as the terminal item.
pub(crate) async fn emit_conditions(
    dwml: Dwml,
    table: TimeLayoutTable,
    observations: Sender<Result<Observation, NoaaError>>,
) {
    let point = LatLon(
        dwml.data.location.point.latitude,
        dwml.data.location.point.longitude,
    );
    let parameters = &dwml.data.parameters;

    let sections: [(&str, &[ParameterSection], &str); 7] = [
        ("temp", &parameters.temperature, "hourly"),
        ("dewpoint", &parameters.temperature, "dew point"),
        ("clouds", &parameters.cloud_amount, "total"),
        ("precip", &parameters.precipitation, "liquid"),
        ("windspeed", &parameters.wind_speed, "sustained"),
        ("winddir", &parameters.direction, "wind"),
        ("snow", &parameters.precipitation, "snow"),
    ];

    for (name, candidates, kind) in sections {
        let Some(section) = candidates.iter().find(|s| s.kind == kind) else {
            debug!("forecast document has no '{kind}' section for {name}");
            continue;
        };

        match emit_section(name, section, &table, point, &observations).await {
            Ok(true) => {}
            Ok(false) => return,
            Err(e) => {
                let _ = observations.send(Err(NoaaError::from(e))).await;
                return;
            }
        }
    }
}

/// Emits one section's observations in value-index order. Returns
/// `Ok(false)` once the receiver is gone.
async fn emit_section(
    name: &str,
    section: &ParameterSection,
    table: &TimeLayoutTable,
    point: LatLon,
    observations: &Sender<Result<Observation, NoaaError>>,
) -> Result<bool, ForecastError> {
    let spans = table
        .get(&section.time_layout)
        .ok_or_else(|| ForecastError::UnknownLayout {
            key: section.time_layout.clone(),
        })?;

    for (index, raw) in section.values.iter().enumerate() {
        let value = match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => value,
            _ => {
                debug!("skipping missing {name} value at index {index}");
                continue;
            }
        };

        let span = spans.get(index).ok_or_else(|| ForecastError::LayoutIndex {
            key: section.time_layout.clone(),
            index,
            len: spans.len(),
        })?;

        for hour in span.hours() {
            let observation = Observation {
                name: name.to_string(),
                value,
                units: Some(section.units.clone()),
                timestamp: hour,
                site: Site::Coordinates(point),
                attributes: None,
            };
            if observations.send(Ok(observation)).await.is_err() {
                return Ok(false);
            }
        }
    }

    Ok(true)
}
