//! Assembles the station-observation pipeline: one task pages through the
//! partitioned sub-spans in order, a second expands each page into
//! observations, and a bounded channel between them keeps memory flat.

use crate::error::NoaaError;
use crate::observations::envelope::ObservationPage;
use crate::observations::error::ObservationError;
use crate::observations::normalize::normalize_record;
use crate::observations::paginator::Paginator;
use crate::rate_gate::RateGate;
use crate::stream::ObservationStream;
use crate::transport::Transport;
use crate::types::observation::Observation;
use crate::types::quota::Quota;
use crate::types::time_span::TimeSpan;
use log::warn;
use std::sync::Arc;
use tokio::sync::mpsc::{self, Receiver, Sender};

/// Pages are expanded as they arrive; one in flight is enough.
const PAGE_CHANNEL_CAPACITY: usize = 1;

pub(crate) struct ObservationsRequest {
    pub base_url: String,
    pub token: String,
    pub dataset: String,
    pub station: String,
    pub span: TimeSpan,
    pub quota: Quota,
}

/// Spawns the two pipeline tasks and returns the stream they feed.
///
/// Sub-spans are fetched strictly in order, and a failure is forwarded
/// through the page channel behind any pages that preceded it, so the
/// consumer always drains everything fetched before seeing the error.
pub(crate) fn spawn_fetch(
    transport: Arc<dyn Transport>,
    gate: Arc<RateGate>,
    request: ObservationsRequest,
) -> ObservationStream {
    let (observations, stream) = ObservationStream::channel();
    let (pages, page_queue) =
        mpsc::channel::<Result<ObservationPage, ObservationError>>(PAGE_CHANNEL_CAPACITY);

    tokio::spawn(produce_pages(transport, gate, request, pages));
    tokio::spawn(expand_pages(page_queue, observations));

    stream
}

async fn produce_pages(
    transport: Arc<dyn Transport>,
    gate: Arc<RateGate>,
    request: ObservationsRequest,
    pages: Sender<Result<ObservationPage, ObservationError>>,
) {
    let paginator = Paginator {
        transport: transport.as_ref(),
        gate: gate.as_ref(),
        base_url: &request.base_url,
        token: &request.token,
        dataset: &request.dataset,
        station: &request.station,
        quota: request.quota,
    };

    for span in request.span.split(request.quota.max_span) {
        if let Err(e) = paginator.fetch_span(span, &pages).await {
            warn!("aborting observation fetch for {}: {e}", request.station);
            let _ = pages.send(Err(e)).await;
            return;
        }

        // A closed queue means the consumer dropped the stream.
        if pages.is_closed() {
            return;
        }
    }
}

async fn expand_pages(
    mut pages: Receiver<Result<ObservationPage, ObservationError>>,
    observations: Sender<Result<Observation, NoaaError>>,
) {
    while let Some(page) = pages.recv().await {
        match page {
            Ok(page) => {
                for record in page.results {
                    match normalize_record(record) {
                        Ok(Some(observation)) => {
                            if observations.send(Ok(observation)).await.is_err() {
                                return;
                            }
                        }
                        Ok(None) => {}
                        Err(e) => {
                            let _ = observations.send(Err(NoaaError::from(e))).await;
                            return;
                        }
                    }
                }
            }
            Err(e) => {
                let _ = observations.send(Err(NoaaError::from(e))).await;
                return;
            }
        }
    }
}
