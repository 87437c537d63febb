//! A table of saturating counters predicting conditional branch outcomes,
//! along with helpers for measuring how often it is right.

pub mod branch;
pub mod error;
pub mod predictor;
pub mod sim;
pub mod stats;

pub use branch::*;
pub use error::PredictorError;
pub use predictor::*;
pub use sim::*;
pub use stats::*;
