//! The rate-limited page loop for one sub-span: wait on the gate, request a
//! page, decode it, hand it downstream, and keep going until the upstream's
//! reported count says the last page was not full.

use crate::observations::envelope::{self, ObservationPage};
use crate::observations::error::ObservationError;
use crate::rate_gate::RateGate;
use crate::transport::{Transport, TransportError};
use crate::types::quota::Quota;
use crate::types::time_span::TimeSpan;
use log::info;
use reqwest::Url;
use tokio::sync::mpsc::Sender;

/// The observation API numbers results from 1, not 0.
const INITIAL_OFFSET: u64 = 1;

const REQUEST_DATE_FORMAT: &str = "%Y-%m-%d";

pub(crate) struct Paginator<'a> {
    pub transport: &'a dyn Transport,
    pub gate: &'a RateGate,
    pub base_url: &'a str,
    pub token: &'a str,
    pub dataset: &'a str,
    pub station: &'a str,
    pub quota: Quota,
}

impl Paginator<'_> {
    /// Fetches every page for `span`, sending each decoded envelope as soon
    /// as it arrives. Returns early without error when the receiver is
    /// gone (the consumer abandoned the stream).
    ///
    /// The termination count is re-read from each page's own metadata: the
    /// upstream total can change between requests, and the current page is
    /// the authority on whether another one exists.
    pub(crate) async fn fetch_span(
        &self,
        span: TimeSpan,
        pages: &Sender<Result<ObservationPage, ObservationError>>,
    ) -> Result<(), ObservationError> {
        let startdate = span.begin().format(REQUEST_DATE_FORMAT).to_string();
        let enddate = span.end().format(REQUEST_DATE_FORMAT).to_string();
        let limit = self.quota.page_size;
        let mut offset = INITIAL_OFFSET;

        loop {
            self.gate.wait().await;

            let url = self.page_url(&startdate, &enddate, limit, offset)?;
            let body = self
                .transport
                .fetch(url.clone(), &[("token", self.token)])
                .await?;
            let page = envelope::decode_page(url.as_str(), &body)?;

            let count = page.metadata.resultset.count;
            info!(
                "fetched observations page for {}: count={} limit={} offset={}",
                self.station, count, limit, offset
            );

            if pages.send(Ok(page)).await.is_err() {
                return Ok(());
            }

            if count < limit + offset {
                return Ok(());
            }

            offset += limit;
        }
    }

    fn page_url(
        &self,
        startdate: &str,
        enddate: &str,
        limit: u64,
        offset: u64,
    ) -> Result<Url, TransportError> {
        let endpoint = format!("{}/data", self.base_url);
        Url::parse_with_params(
            &endpoint,
            [
                ("datasetid", self.dataset),
                ("stationid", self.station),
                ("startdate", startdate),
                ("enddate", enddate),
                ("limit", &limit.to_string()),
                ("offset", &offset.to_string()),
                ("includemetadata", "true"),
            ],
        )
        .map_err(|e| TransportError::InvalidUrl {
            url: endpoint,
            detail: e.to_string(),
        })
    }
}
