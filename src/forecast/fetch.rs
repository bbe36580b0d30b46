//! Fetches one gridded-forecast document and hands back the stream its
//! expansion feeds. The document is fetched and decoded up front, so
//! transport and decode failures surface before any stream exists;
//! expansion failures arrive through the stream.

use crate::forecast::envelope::{self, Dwml};
use crate::forecast::error::ForecastError;
use crate::forecast::layout::TimeLayoutTable;
use crate::forecast::normalize::emit_conditions;
use crate::noaa::LatLon;
use crate::rate_gate::RateGate;
use crate::stream::ObservationStream;
use crate::transport::{Transport, TransportError};
use crate::types::time_span::TimeSpan;
use log::info;
use reqwest::Url;

const REQUEST_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

pub(crate) struct ForecastRequest {
    pub base_url: String,
    pub coordinate: LatLon,
    pub span: TimeSpan,
}

pub(crate) async fn fetch_document(
    transport: &dyn Transport,
    gate: &RateGate,
    request: &ForecastRequest,
) -> Result<(Dwml, TimeLayoutTable), ForecastError> {
    let url = forecast_url(request)?;
    info!("fetching forecast from {url}");

    gate.wait().await;
    let body = transport.fetch(url, &[]).await?;

    let dwml = envelope::decode_document(&body)?;
    let table = TimeLayoutTable::from_document(&dwml)?;
    Ok((dwml, table))
}

/// Spawns the expansion task over an already-decoded document.
pub(crate) fn spawn_expand(dwml: Dwml, table: TimeLayoutTable) -> ObservationStream {
    let (observations, stream) = ObservationStream::channel();
    tokio::spawn(emit_conditions(dwml, table, observations));
    stream
}

fn forecast_url(request: &ForecastRequest) -> Result<Url, TransportError> {
    let LatLon(latitude, longitude) = request.coordinate;
    let begin = request.span.begin().format(REQUEST_TIME_FORMAT).to_string();
    let end = request.span.end().format(REQUEST_TIME_FORMAT).to_string();

    Url::parse_with_params(
        &request.base_url,
        [
            ("whichClient", "NDFDgen"),
            ("lat", &latitude.to_string()),
            ("lon", &longitude.to_string()),
            ("product", "time-series"),
            ("begin", &begin),
            ("end", &end),
            ("Unit", "m"),
            ("temp", "temp"),
            ("dew", "dew"),
            ("sky", "sky"),
            ("qpf", "qpf"),
            ("snow", "snow"),
            ("wspd", "wspd"),
            ("wdir", "wdir"),
            ("Submit", "Submit"),
        ],
    )
    .map_err(|e| TransportError::InvalidUrl {
        url: request.base_url.clone(),
        detail: e.to_string(),
    })
}
