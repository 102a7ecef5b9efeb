use thiserror::Error;

use crate::scoring::BandViolation;

#[derive(Debug, Error)]
pub enum InstrumentError {
    #[error("invalid band table for instrument '{instrument_id}': {violation}")]
    InvalidBands {
        instrument_id: String,
        #[source]
        violation: BandViolation,
    },

    #[error("instrument '{0}' is defined more than once")]
    DuplicateInstrument(String),

    #[error("invalid instrument table: {0}")]
    Deserialize(#[from] serde_json::Error),
}
