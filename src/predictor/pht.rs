//! A pattern history table (PHT) of saturating counters.

use std::path::Path;

use log::trace;
use serde::{ Deserialize, Serialize };

use crate::Outcome;
use crate::error::{ PredictorError, Result };
use crate::predictor::*;

/// Configuration for building a [`CounterTable`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PredictorConfig {
    /// Number of entries
    pub size: usize,

    /// Parameters for the saturating counters
    pub ctr: SaturatingCounterConfig,

    /// Strategy for indexing into the table
    pub index: IndexStrategy,
}
impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            size: 8,
            ctr: SaturatingCounterConfig::default(),
            index: IndexStrategy::Aliased,
        }
    }
}
impl PredictorConfig {
    /// Parse a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Self::from_json(&s)
    }

    /// Get the number of storage bits.
    pub fn storage_bits(&self) -> usize {
        self.ctr.storage_bits() * self.size
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(PredictorError::ZeroSize);
        }
        self.ctr.validate()
    }

    /// Use this configuration to create a new [`CounterTable`].
    pub fn build(self) -> Result<CounterTable> {
        self.validate()?;
        let ctr = self.ctr.build()?;
        trace!("building {}-entry table ({} bits)", self.size, self.storage_bits());
        Ok(CounterTable {
            data: vec![ctr; self.size],
            cfg: self,
        })
    }
}

/// Final state of a single slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotState {
    pub slot: usize,
    pub value: u8,
    pub state: CounterState,
    pub prediction: Outcome,
}

/// A table of [SaturatingCounter] with a fixed number of entries.
#[derive(Clone, Debug)]
pub struct CounterTable {
    cfg: PredictorConfig,
    data: Vec<SaturatingCounter>,
}
impl CounterTable {
    /// Create a table of `size` counters (3-bit, aliased indexing) all set
    /// to `init`.
    pub fn new(size: usize, init: u8) -> Result<Self> {
        PredictorConfig {
            size,
            ctr: SaturatingCounterConfig { max: MAX_3BIT, init },
            index: IndexStrategy::Aliased,
        }.build()
    }

    pub fn config(&self) -> &PredictorConfig { &self.cfg }
    pub fn strategy(&self) -> IndexStrategy { self.cfg.index }

    /// Return every counter to its initial value.
    pub fn reset(&mut self) {
        trace!("resetting {}-entry table", self.data.len());
        for ctr in self.data.iter_mut() {
            ctr.reset();
        }
    }

    /// Counter values in slot order.
    pub fn values(&self) -> Vec<u8> {
        self.data.iter().map(|c| c.value()).collect()
    }

    pub fn snapshot(&self) -> Vec<SlotState> {
        self.data.iter().enumerate().map(|(slot, c)| SlotState {
            slot,
            value: c.value(),
            state: c.state(),
            prediction: c.predict(),
        }).collect()
    }

    /// Check that `entity` has a slot of its own under the configured
    /// strategy.
    pub fn check_entity(&self, entity: usize) -> Result<()> {
        match self.cfg.index {
            IndexStrategy::PerEntity if entity >= self.size() => {
                Err(PredictorError::EntityOutOfRange {
                    entity, size: self.size()
                })
            },
            _ => Ok(()),
        }
    }
}

impl PredictorTable for CounterTable {
    type Input = Probe;
    type Entry = SaturatingCounter;

    fn size(&self) -> usize { self.data.len() }

    fn get_index(&self, probe: Probe) -> usize {
        self.cfg.index.index(probe, self.size())
    }

    fn get_entry(&self, idx: usize) -> &SaturatingCounter {
        &self.data[idx % self.data.len()]
    }

    fn get_entry_mut(&mut self, idx: usize) -> &mut SaturatingCounter {
        let len = self.data.len();
        &mut self.data[idx % len]
    }
}
