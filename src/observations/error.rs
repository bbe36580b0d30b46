use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ObservationError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode observations page from {url}")]
    PageDecode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unparsable observation date '{date}' for station {station}")]
    DateParse { date: String, station: String },
}
