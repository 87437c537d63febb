//! Helpers for collecting statistics.

use std::ops::{ Add, AddAssign };
use std::iter::Sum;

/// Number of correct predictions out of some number of trials.
///
/// Counts from independent runs combine by addition, so the order in which
/// runs are merged never changes the result.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AccuracyStats {
    /// Number of correct predictions
    pub hits: usize,

    /// Number of predictions made
    pub total: usize,
}
impl AccuracyStats {
    pub fn new() -> Self { Self::default() }

    /// Record the result of a single prediction.
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct { self.hits += 1; }
    }

    pub fn hits(&self) -> usize { self.hits }
    pub fn misses(&self) -> usize { self.total - self.hits }
    pub fn total(&self) -> usize { self.total }
    pub fn is_empty(&self) -> bool { self.total == 0 }

    /// Fraction of correct predictions, or `None` if nothing was recorded.
    pub fn hit_rate(&self) -> Option<f64> {
        if self.total == 0 {
            None
        } else {
            Some(self.hits as f64 / self.total as f64)
        }
    }

    /// Percentage of correct predictions, or `None` if nothing was recorded.
    pub fn accuracy(&self) -> Option<f64> {
        self.hit_rate().map(|r| r * 100.0)
    }

    /// Fold the counts from `other` into this accumulator.
    pub fn merge(&mut self, other: &Self) {
        self.hits += other.hits;
        self.total += other.total;
    }
}

impl Add for AccuracyStats {
    type Output = Self;
    fn add(mut self, rhs: Self) -> Self {
        self.merge(&rhs);
        self
    }
}

impl AddAssign for AccuracyStats {
    fn add_assign(&mut self, rhs: Self) {
        self.merge(&rhs);
    }
}

impl Sum for AccuracyStats {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::new(), Add::add)
    }
}

impl<'a> Sum<&'a AccuracyStats> for AccuracyStats {
    fn sum<I: Iterator<Item = &'a Self>>(iter: I) -> Self {
        iter.copied().sum()
    }
}


#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn record() {
        let mut s = AccuracyStats::new();
        s.record(true);
        s.record(false);
        s.record(true);
        s.record(true);
        assert_eq!((s.hits(), s.misses(), s.total()), (3, 1, 4));
        assert_eq!(s.hit_rate(), Some(0.75));
        assert_eq!(s.accuracy(), Some(75.0));
    }

    #[test]
    fn empty_has_no_accuracy() {
        let s = AccuracyStats::new();
        assert!(s.is_empty());
        assert_eq!(s.accuracy(), None);
        assert_eq!(s.hit_rate(), None);
    }

    #[test]
    fn sum_of_runs() {
        let runs = [
            AccuracyStats { hits: 0, total: 8 },
            AccuracyStats { hits: 8, total: 8 },
            AccuracyStats { hits: 4, total: 8 },
            AccuracyStats { hits: 5, total: 13 },
        ];
        let team: AccuracyStats = runs.iter().sum();
        assert_eq!(team, AccuracyStats { hits: 17, total: 37 });

        let mut acc = AccuracyStats::new();
        for r in runs.iter().rev() { acc += *r; }
        assert_eq!(acc, team);
    }
}
