//! This module provides the main entry point for fetching NOAA weather
//! data. A [`Noaa`] client hands out one builder client per upstream
//! protocol: [`Noaa::observations`] for historical station observations
//! and [`Noaa::forecast`] for gridded forecasts. Both paths deliver the
//! same thing, an ordered [`crate::ObservationStream`].

use crate::clients::forecast_client::ForecastClient;
use crate::clients::observations_client::ObservationsClient;
use crate::error::NoaaError;
use crate::forecast::fetch::{fetch_document, spawn_expand, ForecastRequest};
use crate::observations::fetch::{spawn_fetch, ObservationsRequest};
use crate::rate_gate::RateGate;
use crate::stream::ObservationStream;
use crate::transport::{HttpTransport, Transport};
use crate::types::quota::Quota;
use crate::types::time_span::TimeSpan;
use bon::bon;
use std::sync::Arc;
use std::time::Duration;

const OBSERVATIONS_BASE_URL: &str = "https://www.ncdc.noaa.gov/cdo-web/api/v2";
const FORECAST_BASE_URL: &str =
    "https://graphical.weather.gov/xml/sample_products/browser_interface/ndfdXMLclient.php";

/// The default dataset queried for station observations.
pub const DEFAULT_DATASET: &str = "GHCND";

/// A geographical coordinate: latitude first, longitude second.
///
/// # Examples
///
/// ```
/// use noaa_weather::LatLon;
///
/// let washington = LatLon(38.99, -77.01);
/// assert_eq!(washington.0, 38.99);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon(pub f64, pub f64);

/// The configured NOAA client.
///
/// Holds the HTTP transport, the per-endpoint rate gates and the request
/// quota. All of them are shared by every fetch issued through this
/// instance, which is what keeps concurrent fetches inside the upstream's
/// request-rate ceiling. Create one and reuse it.
///
/// # Examples
///
/// ```no_run
/// use chrono::{TimeZone, Utc};
/// use noaa_weather::{Noaa, TimeSpan};
///
/// # async fn run() -> Result<(), noaa_weather::NoaaError> {
/// let client = Noaa::new("my-cdo-token");
/// let span = TimeSpan::new(
///     Utc.with_ymd_and_hms(2014, 1, 1, 0, 0, 0).unwrap(),
///     Utc.with_ymd_and_hms(2014, 12, 31, 0, 0, 0).unwrap(),
/// );
///
/// let mut stream = client
///     .observations()
///     .station("GHCND:USW00094728")
///     .period(span)
///     .call()
///     .await?;
///
/// while let Some(observation) = stream.recv().await {
///     println!("{:?}", observation?);
/// }
/// # Ok(())
/// # }
/// ```
pub struct Noaa {
    transport: Arc<dyn Transport>,
    observation_gate: Arc<RateGate>,
    forecast_gate: Arc<RateGate>,
    token: String,
    observations_base_url: String,
    forecast_base_url: String,
    quota: Quota,
}

#[bon]
impl Noaa {
    /// Creates a client with the default endpoints and quota.
    ///
    /// `token` is the CDO API token sent with every station-observation
    /// request; the forecast endpoint does not use it.
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_config().token(token.into()).call()
    }

    /// Creates a client with explicit configuration.
    ///
    /// Every parameter except `token` is optional:
    /// * `.transport(..)` substitutes the HTTP collaborator (used by tests
    ///   and proxies).
    /// * `.observations_base_url(..)` / `.forecast_base_url(..)` point the
    ///   client at alternate endpoints.
    /// * `.quota(..)` overrides the station-observation request limits.
    /// * `.forecast_request_interval(..)` spaces out forecast requests;
    ///   the upstream publishes no quota for them, so the default is no
    ///   spacing.
    #[builder]
    pub fn with_config(
        token: String,
        transport: Option<Arc<dyn Transport>>,
        observations_base_url: Option<String>,
        forecast_base_url: Option<String>,
        quota: Option<Quota>,
        forecast_request_interval: Option<Duration>,
    ) -> Self {
        let quota = quota.unwrap_or_default();
        Self {
            transport: transport.unwrap_or_else(|| Arc::new(HttpTransport::new())),
            observation_gate: Arc::new(RateGate::new(quota.min_request_interval)),
            forecast_gate: Arc::new(RateGate::new(
                forecast_request_interval.unwrap_or(Duration::ZERO),
            )),
            token,
            observations_base_url: observations_base_url
                .unwrap_or_else(|| OBSERVATIONS_BASE_URL.to_string()),
            forecast_base_url: forecast_base_url.unwrap_or_else(|| FORECAST_BASE_URL.to_string()),
            quota,
        }
    }

    /// Returns the builder client for historical station observations.
    pub fn observations(&self) -> ObservationsClient {
        ObservationsClient::new(self)
    }

    /// Returns the builder client for gridded forecasts.
    pub fn forecast(&self) -> ForecastClient {
        ForecastClient::new(self)
    }

    pub(crate) fn spawn_observations(
        &self,
        station: &str,
        dataset: &str,
        span: TimeSpan,
    ) -> ObservationStream {
        spawn_fetch(
            Arc::clone(&self.transport),
            Arc::clone(&self.observation_gate),
            ObservationsRequest {
                base_url: self.observations_base_url.clone(),
                token: self.token.clone(),
                dataset: dataset.to_string(),
                station: station.to_string(),
                span,
                quota: self.quota,
            },
        )
    }

    pub(crate) async fn fetch_forecast(
        &self,
        coordinate: LatLon,
        span: TimeSpan,
    ) -> Result<ObservationStream, NoaaError> {
        let request = ForecastRequest {
            base_url: self.forecast_base_url.clone(),
            coordinate,
            span,
        };
        let (dwml, table) = fetch_document(
            self.transport.as_ref(),
            self.forecast_gate.as_ref(),
            &request,
        )
        .await?;
        Ok(spawn_expand(dwml, table))
    }
}
