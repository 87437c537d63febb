//! Errors reported while building a predictor or parsing its input.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictorError {
    #[error("predictor table must have at least one entry")]
    ZeroSize,

    #[error("counter maximum must be at least 1 (got {max})")]
    CounterRange { max: u8 },

    #[error("initial counter value {init} is outside 0..={max}")]
    InitialValue { init: u8, max: u8 },

    #[error("invalid outcome symbol {sym:?} at position {pos} (expected 'T' or 'N')")]
    InvalidSymbol { pos: usize, sym: char },

    #[error("entity {entity} has no slot in a table of {size} entries")]
    EntityOutOfRange { entity: usize, size: usize },

    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl PredictorError {
    /// Returns true for errors caused by a bad table/counter setup or bad
    /// input symbols, as opposed to failures loading a configuration file.
    pub fn is_invalid_configuration(&self) -> bool {
        !matches!(self, Self::Io(_) | Self::Json(_))
    }
}

pub type Result<T> = std::result::Result<T, PredictorError>;
