//! Types for representing branch outcomes and sequences of outcomes.

use std::fmt;
use std::str::FromStr;

use bitvec::prelude::*;
use rand::Rng;

use crate::error::{ PredictorError, Result };

/// A branch outcome.
#[repr(u32)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Outcome {
    /// Not taken
    N = 0,
    /// Taken
    T = 1
}

impl Outcome {
    /// Parse a single outcome symbol (`'T'` or `'N'`).
    pub fn from_symbol(c: char) -> Option<Self> {
        match c {
            'T' => Some(Self::T),
            'N' => Some(Self::N),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Self::T => 'T',
            Self::N => 'N',
        }
    }

    pub fn is_taken(self) -> bool { self == Self::T }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl std::ops::Not for Outcome {
    type Output = Self;
    fn not(self) -> Self {
        match self {
            Self::N => Self::T,
            Self::T => Self::N,
        }
    }
}

impl From<bool> for Outcome {
    fn from(x: bool) -> Self {
        match x {
            true => Self::T,
            false => Self::N
        }
    }
}

impl From<Outcome> for bool {
    fn from(x: Outcome) -> bool {
        match x {
            Outcome::T => true,
            Outcome::N => false,
        }
    }
}


/// An ordered sequence of actual outcomes for a single branch.
///
/// Outcomes are packed one bit per entry (set bits are taken).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pattern {
    bits: BitVec,
}
impl Pattern {
    pub fn new() -> Self {
        Self { bits: BitVec::new() }
    }

    /// Generate `len` outcomes where each one is taken with probability
    /// `p_taken`. Probabilities outside `[0, 1]` are clamped.
    pub fn random(rng: &mut impl Rng, len: usize, p_taken: f64) -> Self {
        let p = if p_taken.is_nan() { 0.0 } else { p_taken.clamp(0.0, 1.0) };
        let bits = (0..len).map(|_| rng.gen_bool(p)).collect();
        Self { bits }
    }

    pub fn push(&mut self, outcome: Outcome) {
        self.bits.push(outcome.into());
    }

    pub fn len(&self) -> usize { self.bits.len() }
    pub fn is_empty(&self) -> bool { self.bits.is_empty() }

    /// Returns the outcome at position `idx`, if any.
    pub fn get(&self, idx: usize) -> Option<Outcome> {
        self.bits.get(idx).map(|b| Outcome::from(*b))
    }

    pub fn iter(&self) -> impl Iterator<Item = Outcome> + '_ {
        self.bits.iter().by_vals().map(Outcome::from)
    }

    /// Number of taken outcomes in the pattern.
    pub fn times_taken(&self) -> usize { self.bits.count_ones() }

    /// Fraction of outcomes that are taken, or `None` for an empty pattern.
    pub fn taken_ratio(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.times_taken() as f64 / self.len() as f64)
        }
    }

    pub fn as_bitslice(&self) -> &BitSlice { &self.bits }
}

impl FromStr for Pattern {
    type Err = PredictorError;
    fn from_str(s: &str) -> Result<Self> {
        let mut res = Self::new();
        for (pos, sym) in s.chars().enumerate() {
            let outcome = Outcome::from_symbol(sym)
                .ok_or(PredictorError::InvalidSymbol { pos, sym })?;
            res.push(outcome);
        }
        Ok(res)
    }
}

impl FromIterator<Outcome> for Pattern {
    fn from_iter<I: IntoIterator<Item = Outcome>>(iter: I) -> Self {
        Self { bits: iter.into_iter().map(bool::from).collect() }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s: String = self.iter().map(Outcome::symbol).collect();
        write!(f, "{}", s)
    }
}
