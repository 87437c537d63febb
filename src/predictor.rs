//! Saturating counters and tables of them.

pub mod table;
pub mod pht;
pub mod counter;

pub use table::*;
pub use pht::*;
pub use counter::*;

use crate::Outcome;

/// Interface to a predictor with some internal state which is only subject to
/// change by the correct branch outcome.
pub trait StatefulPredictor {
    fn name(&self) -> &'static str;

    /// Reset the internal state of the predictor.
    fn reset(&mut self);

    /// Return the current predicted outcome.
    fn predict(&self) -> Outcome;

    /// Update the internal state of the predictor with the correct outcome.
    fn update(&mut self, outcome: Outcome);
}
