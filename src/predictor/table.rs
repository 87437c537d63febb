//! Types for implementing a table of predictors.

use serde::{ Deserialize, Serialize };

/// Map a sequential trial step onto a slot in a table of `size` entries.
///
/// Different logical branches that land on the same slot alias each other.
pub fn index_for(step: usize, size: usize) -> usize {
    step % size
}

/// A lookup into a [PredictorTable]: which step of which entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Probe {
    /// Position of the trial within its pattern
    pub step: usize,

    /// Identifier of the simulated entity (branch) producing the pattern
    pub entity: usize,
}

/// Strategy for choosing the table slot used by a trial.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IndexStrategy {
    /// Slot is `step mod size`; every entity walks the whole table.
    #[default]
    Aliased,

    /// Slot is the entity id; each entity owns exactly one counter.
    PerEntity,
}
impl IndexStrategy {
    pub fn index(&self, probe: Probe, size: usize) -> usize {
        match self {
            Self::Aliased => index_for(probe.step, size),
            Self::PerEntity => index_for(probe.entity, size),
        }
    }
}

/// Interface to a table of predictors.
pub trait PredictorTable {
    /// The type of input to the table used to form an index.
    type Input;

    /// The type of entry in the table.
    type Entry;

    /// Returns the number of entries in the table.
    fn size(&self) -> usize;

    /// Given some input, return the corresponding index into the table.
    fn get_index(&self, input: Self::Input) -> usize;

    /// Returns a reference to an entry in the table.
    fn get_entry(&self, idx: usize) -> &Self::Entry;

    /// Returns a mutable reference to an entry in the table.
    fn get_entry_mut(&mut self, idx: usize) -> &mut Self::Entry;
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn aliased_wraps() {
        let s = IndexStrategy::Aliased;
        let idx: Vec<usize> = (0..10)
            .map(|step| s.index(Probe { step, entity: 3 }, 4))
            .collect();
        assert_eq!(idx, vec![0, 1, 2, 3, 0, 1, 2, 3, 0, 1]);
    }

    #[test]
    fn per_entity_is_fixed() {
        let s = IndexStrategy::PerEntity;
        for step in 0..16 {
            assert_eq!(s.index(Probe { step, entity: 2 }, 4), 2);
        }
    }

    #[test]
    fn strategy_names() {
        let s: IndexStrategy = serde_json::from_str("\"per-entity\"").unwrap();
        assert_eq!(s, IndexStrategy::PerEntity);
        assert_eq!(serde_json::to_string(&IndexStrategy::Aliased).unwrap(),
            "\"aliased\"");
    }
}
