//! Driving a [CounterTable] with patterns of actual outcomes.

use std::collections::BTreeMap;

use itertools::Itertools;
use log::{ debug, info };

use crate::Outcome;
use crate::branch::Pattern;
use crate::error::Result;
use crate::predictor::*;
use crate::stats::AccuracyStats;

/// The result of a single prediction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trial {
    /// Position in the pattern
    pub step: usize,

    /// Table slot used for this trial
    pub slot: usize,

    /// Counter value before the update
    pub ctr: u8,

    /// Predicted direction
    pub prediction: Outcome,

    /// Actual direction
    pub outcome: Outcome,

    /// Whether the prediction matched the outcome
    pub hit: bool,
}

/// Feeds one pattern through a table, yielding a [Trial] per outcome.
///
/// Each trial reads the selected counter, predicts, and only then updates
/// the counter, so later steps mapped onto the same slot see the new value.
pub struct Simulation<'t, 'p> {
    table: &'t mut CounterTable,
    pattern: &'p Pattern,
    entity: usize,
    step: usize,
    stats: AccuracyStats,
}
impl<'t, 'p> Simulation<'t, 'p> {
    pub fn new(table: &'t mut CounterTable, pattern: &'p Pattern, entity: usize)
        -> Result<Self>
    {
        table.check_entity(entity)?;
        Ok(Self {
            table,
            pattern,
            entity,
            step: 0,
            stats: AccuracyStats::new(),
        })
    }

    /// Statistics for the trials produced so far.
    pub fn stats(&self) -> AccuracyStats { self.stats }

    /// Run the remainder of the pattern to completion.
    pub fn run(mut self) -> RunReport {
        let trials: Vec<Trial> = self.by_ref().collect();
        let stats = self.stats;
        info!("entity {}: {}/{} correct over {} slots",
            self.entity, stats.hits(), stats.total(), self.table.size()
        );
        RunReport {
            trials,
            stats,
            final_state: self.table.snapshot(),
        }
    }
}

impl Iterator for Simulation<'_, '_> {
    type Item = Trial;
    fn next(&mut self) -> Option<Trial> {
        let outcome = self.pattern.get(self.step)?;
        let step = self.step;
        let slot = self.table.get_index(Probe { step, entity: self.entity });
        let entry = self.table.get_entry_mut(slot);

        let ctr = entry.value();
        let prediction = entry.predict();
        let hit = prediction == outcome;
        entry.update(outcome);

        self.stats.record(hit);
        self.step += 1;
        debug!("step {:3} slot {:2}: ctr={} pred={} actual={} -> {}",
            step, slot, ctr, prediction, outcome, entry.value()
        );
        Some(Trial { step, slot, ctr, prediction, outcome, hit })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.pattern.len().saturating_sub(self.step);
        (rem, Some(rem))
    }
}

/// Everything produced by running one pattern.
#[derive(Clone, Debug)]
pub struct RunReport {
    pub trials: Vec<Trial>,
    pub stats: AccuracyStats,
    pub final_state: Vec<SlotState>,
}
impl RunReport {
    /// Accuracy for each slot that was used at least once.
    pub fn slot_stats(&self) -> BTreeMap<usize, AccuracyStats> {
        self.trials.iter()
            .into_group_map_by(|t| t.slot)
            .into_iter()
            .map(|(slot, trials)| {
                let mut s = AccuracyStats::new();
                trials.iter().for_each(|t| s.record(t.hit));
                (slot, s)
            })
            .collect()
    }

    /// Steps on which the prediction was wrong.
    pub fn mispredicted_steps(&self) -> Vec<usize> {
        self.trials.iter().filter(|t| !t.hit).map(|t| t.step).collect()
    }

    pub fn predictions(&self) -> Pattern {
        self.trials.iter().map(|t| t.prediction).collect()
    }
}

/// A named pattern together with the report for its run.
#[derive(Clone, Debug)]
pub struct NamedRun {
    pub name: String,
    pub pattern: Pattern,
    pub report: RunReport,
}

/// Results for a whole [Experiment].
#[derive(Clone, Debug)]
pub struct ExperimentReport {
    pub runs: Vec<NamedRun>,

    /// Sum of the statistics of every run
    pub stats: AccuracyStats,

    /// Table state after the last run
    pub final_state: Vec<SlotState>,
}

/// A set of patterns evaluated under a single [PredictorConfig].
///
/// With [IndexStrategy::Aliased], every pattern starts from a freshly reset
/// table. With [IndexStrategy::PerEntity], all patterns share one table and
/// the n-th pattern owns slot n.
#[derive(Clone, Debug)]
pub struct Experiment {
    cfg: PredictorConfig,
    patterns: Vec<(String, Pattern)>,
}
impl Experiment {
    pub fn new(cfg: PredictorConfig) -> Self {
        Self { cfg, patterns: Vec::new() }
    }

    pub fn add_pattern(&mut self, name: impl ToString, pattern: Pattern) {
        self.patterns.push((name.to_string(), pattern));
    }

    pub fn num_patterns(&self) -> usize { self.patterns.len() }

    pub fn run(&self) -> Result<ExperimentReport> {
        let mut table = self.cfg.build()?;
        let mut runs = Vec::with_capacity(self.patterns.len());

        for (entity, (name, pattern)) in self.patterns.iter().enumerate() {
            if self.cfg.index == IndexStrategy::Aliased {
                table.reset();
            }
            let report = Simulation::new(&mut table, pattern, entity)?.run();
            runs.push(NamedRun {
                name: name.clone(),
                pattern: pattern.clone(),
                report,
            });
        }

        let stats: AccuracyStats = runs.iter().map(|r| r.report.stats).sum();
        Ok(ExperimentReport {
            runs,
            stats,
            final_state: table.snapshot(),
        })
    }
}
