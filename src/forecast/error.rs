use crate::transport::TransportError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ForecastError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("Failed to decode forecast document")]
    DocumentDecode(#[source] serde_xml_rs::Error),

    #[error("Unparsable valid-time '{value}' in time layout")]
    TimestampParse {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Parameter section references unknown time layout '{key}'")]
    UnknownLayout { key: String },

    #[error("Value index {index} out of range for time layout '{key}' of length {len}")]
    LayoutIndex {
        key: String,
        index: usize,
        len: usize,
    },
}
