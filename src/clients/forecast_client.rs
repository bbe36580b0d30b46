//! Provides the `ForecastClient` for fetching gridded forecast values,
//! obtained via [`Noaa::forecast()`].

use crate::error::NoaaError;
use crate::noaa::{LatLon, Noaa};
use crate::stream::ObservationStream;
use crate::types::time_span::TimeSpan;
use bon::bon;
use chrono::{TimeDelta, Utc};

/// A builder client for gridded forecast data.
///
/// Instances are created by [`Noaa::forecast()`]. One request fetches one
/// forecast document for a grid point; its parameter sections (hourly
/// temperature, dew point, cloud amount, liquid precipitation, wind speed,
/// wind direction, snow amount) are expanded into per-hour observations.
pub struct ForecastClient<'a> {
    client: &'a Noaa,
}

#[bon]
impl<'a> ForecastClient<'a> {
    pub(crate) fn new(client: &'a Noaa) -> Self {
        Self { client }
    }

    /// Fetches the forecast for a grid point.
    ///
    /// Starts a builder: `.location(coordinate)` selects the point,
    /// `.period(..)` is optional (defaults to ten days either side of
    /// now), and `.call().await` executes the request.
    ///
    /// The document is fetched and decoded before the stream is returned,
    /// so transport and decode failures surface here; a structurally
    /// broken document discovered during expansion ends the stream with a
    /// terminal `Err`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use noaa_weather::{LatLon, Noaa, NoaaError};
    /// # async fn run() -> Result<(), NoaaError> {
    /// let client = Noaa::new("my-cdo-token");
    ///
    /// let mut stream = client
    ///     .forecast()
    ///     .location(LatLon(38.99, -77.01))
    ///     .call()
    ///     .await?;
    ///
    /// while let Some(observation) = stream.recv().await {
    ///     let observation = observation?;
    ///     println!("{} {} = {}", observation.timestamp, observation.name, observation.value);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder(start_fn = location)]
    #[doc(hidden)]
    pub async fn build_location(
        &self,
        #[builder(start_fn)] coordinate: LatLon,
        period: Option<TimeSpan>,
    ) -> Result<ObservationStream, NoaaError> {
        let span = period.unwrap_or_else(default_period);
        self.client.fetch_forecast(coordinate, span).await
    }

    /// Fetches conditions around the present moment (now ±1 hour).
    pub async fn current(&self, coordinate: LatLon) -> Result<ObservationStream, NoaaError> {
        self.client
            .fetch_forecast(coordinate, current_period())
            .await
    }

    /// Fetches the week ahead (now to now +7 days).
    pub async fn week(&self, coordinate: LatLon) -> Result<ObservationStream, NoaaError> {
        self.client.fetch_forecast(coordinate, week_period()).await
    }
}

fn default_period() -> TimeSpan {
    let now = Utc::now();
    TimeSpan::new(now - TimeDelta::days(10), now + TimeDelta::days(10))
}

fn current_period() -> TimeSpan {
    let now = Utc::now();
    TimeSpan::new(now - TimeDelta::hours(1), now + TimeDelta::hours(1))
}

fn week_period() -> TimeSpan {
    let now = Utc::now();
    TimeSpan::new(now, now + TimeDelta::days(7))
}
