//! Provides the `ObservationsClient` for fetching historical station
//! observations, obtained via [`Noaa::observations()`].

use crate::error::NoaaError;
use crate::noaa::{Noaa, DEFAULT_DATASET};
use crate::stream::ObservationStream;
use crate::types::time_span::TimeSpan;
use bon::bon;

/// A builder client for historical station observations.
///
/// Instances are created by [`Noaa::observations()`]. The requested time
/// span may exceed the upstream's per-request limit; it is partitioned
/// into compliant sub-spans and fetched in chronological order, so the
/// stream preserves the overall order of the caller's range.
pub struct ObservationsClient<'a> {
    client: &'a Noaa,
}

#[bon]
impl<'a> ObservationsClient<'a> {
    pub(crate) fn new(client: &'a Noaa) -> Self {
        Self { client }
    }

    /// Fetches observations recorded by one station.
    ///
    /// Starts a builder: `.station(id)` selects the station, `.period(..)`
    /// is required, `.dataset(..)` is optional (defaults to `GHCND`), and
    /// `.call().await` starts the fetch.
    ///
    /// The returned stream yields observations until the range is
    /// exhausted. A transport or decode failure ends the stream with a
    /// single terminal `Err`; everything fetched before the failure is
    /// still delivered first.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use chrono::{TimeZone, Utc};
    /// # use noaa_weather::{Noaa, NoaaError, TimeSpan};
    /// # async fn run() -> Result<(), NoaaError> {
    /// let client = Noaa::new("my-cdo-token");
    /// let span = TimeSpan::new(
    ///     Utc.with_ymd_and_hms(2010, 1, 1, 0, 0, 0).unwrap(),
    ///     Utc.with_ymd_and_hms(2013, 12, 31, 0, 0, 0).unwrap(),
    /// );
    ///
    /// let mut stream = client
    ///     .observations()
    ///     .station("GHCND:USW00094728") // Central Park, New York
    ///     .period(span)
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
    #[builder(start_fn = station)]
    #[doc(hidden)]
    pub async fn build_station(
        &self,
        #[builder(start_fn)] station: &str,
        period: TimeSpan,
        dataset: Option<&str>,
    ) -> Result<ObservationStream, NoaaError> {
        Ok(self.client.spawn_observations(
            station,
            dataset.unwrap_or(DEFAULT_DATASET),
            period,
        ))
    }
}
