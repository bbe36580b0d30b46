mod clients;
mod error;
mod forecast;
mod noaa;
mod observations;
mod rate_gate;
mod stream;
mod transport;
mod types;

pub use error::NoaaError;
pub use noaa::*;

pub use clients::forecast_client::*;
pub use clients::observations_client::*;

pub use types::observation::{Observation, Site};
pub use types::quota::Quota;
pub use types::time_span::TimeSpan;

pub use rate_gate::RateGate;
pub use stream::ObservationStream;
pub use transport::{HttpTransport, Transport, TransportError};

pub use forecast::envelope::*;
pub use forecast::error::ForecastError;
pub use observations::envelope::*;
pub use observations::error::ObservationError;
