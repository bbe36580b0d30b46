use crate::forecast::error::ForecastError;
use crate::observations::error::ObservationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NoaaError {
    #[error(transparent)]
    Observation(#[from] ObservationError),

    #[error(transparent)]
    Forecast(#[from] ForecastError),
}
