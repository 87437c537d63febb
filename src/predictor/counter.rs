//! Implementation of a saturating counter.
//!
//! A counter is a single value in `0..=max`. Values above the midpoint
//! (`max / 2`) predict taken. The free functions here are the update rule
//! itself; [`SaturatingCounter`] wraps them together with the range.

use std::fmt;

use serde::{ Deserialize, Serialize };

use crate::Outcome;
use crate::error::{ PredictorError, Result };
use crate::predictor::StatefulPredictor;

/// Largest value of a 3-bit counter.
pub const MAX_3BIT: u8 = 7;

/// Return the predicted direction for a counter value.
pub fn predict(value: u8, max: u8) -> Outcome {
    Outcome::from(value > max / 2)
}

/// Return the next counter value after observing `outcome`.
///
/// Taken increments and not-taken decrements, both clamped to `0..=max`.
pub fn update(value: u8, max: u8, outcome: Outcome) -> u8 {
    match outcome {
        Outcome::T => value.saturating_add(1).min(max),
        Outcome::N => value.saturating_sub(1),
    }
}

/// Classify a counter value into one of four equally-sized bands.
pub fn state_label(value: u8, max: u8) -> CounterState {
    let span = max as usize + 1;
    let band = (value.min(max) as usize * 4) / span;
    match band {
        0 => CounterState::StronglyNotTaken,
        1 => CounterState::WeaklyNotTaken,
        2 => CounterState::WeaklyTaken,
        _ => CounterState::StronglyTaken,
    }
}

/// Human-readable classification of a counter value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CounterState {
    StronglyNotTaken,
    WeaklyNotTaken,
    WeaklyTaken,
    StronglyTaken,
}
impl fmt::Display for CounterState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            Self::StronglyNotTaken => "Strongly Not Taken",
            Self::WeaklyNotTaken   => "Weakly Not Taken",
            Self::WeaklyTaken      => "Weakly Taken",
            Self::StronglyTaken    => "Strongly Taken",
        };
        write!(f, "{}", s)
    }
}

/// Configuration for building a [`SaturatingCounter`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturatingCounterConfig {
    /// Largest counter value
    pub max: u8,

    /// Value of the counter after construction or reset
    pub init: u8,
}
impl Default for SaturatingCounterConfig {
    fn default() -> Self {
        // Weakly not-taken
        Self { max: MAX_3BIT, init: MAX_3BIT / 2 }
    }
}
impl SaturatingCounterConfig {
    pub fn storage_bits(&self) -> usize {
        (self.max.max(1).ilog2() + 1) as usize
    }

    pub fn validate(&self) -> Result<()> {
        if self.max == 0 {
            return Err(PredictorError::CounterRange { max: self.max });
        }
        if self.init > self.max {
            return Err(PredictorError::InitialValue {
                init: self.init, max: self.max
            });
        }
        Ok(())
    }

    pub fn build(self) -> Result<SaturatingCounter> {
        self.validate()?;
        Ok(SaturatingCounter { cfg: self, ctr: self.init })
    }
}

/// An N-bit saturating counter used to follow the behavior of a branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SaturatingCounter {
    cfg: SaturatingCounterConfig,
    ctr: u8,
}
impl SaturatingCounter {
    pub fn value(&self) -> u8 { self.ctr }
    pub fn max(&self) -> u8 { self.cfg.max }
    pub fn config(&self) -> &SaturatingCounterConfig { &self.cfg }

    pub fn state(&self) -> CounterState {
        state_label(self.ctr, self.cfg.max)
    }

    pub fn is_saturated(&self) -> bool {
        self.ctr == 0 || self.ctr == self.cfg.max
    }
}

impl StatefulPredictor for SaturatingCounter {
    fn name(&self) -> &'static str { "SaturatingCounter" }
    fn predict(&self) -> Outcome { predict(self.ctr, self.cfg.max) }
    fn reset(&mut self) { self.ctr = self.cfg.init; }
    fn update(&mut self, outcome: Outcome) {
        self.ctr = update(self.ctr, self.cfg.max, outcome);
    }
}
