use chrono::TimeDelta;
use std::time::Duration;

/// Request limits imposed by the station-observation upstream.
///
/// `max_span` bounds the time range of a single request, `page_size` is the
/// `limit` sent with each page, and `min_request_interval` is the minimum
/// spacing between any two requests to the endpoint. The defaults match
/// NOAA's published CDO quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quota {
    pub max_span: TimeDelta,
    pub page_size: u64,
    pub min_request_interval: Duration,
}

impl Default for Quota {
    fn default() -> Self {
        Self {
            max_span: TimeDelta::days(370),
            page_size: 1000,
            min_request_interval: Duration::from_secs(1),
        }
    }
}
