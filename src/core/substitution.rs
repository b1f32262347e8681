//! Two-parameter substitution model.
//!
//! The model distinguishes transitions (codes differing by two) from
//! transversions (codes differing by one or three) and yields the
//! probability of each substitution after an elapsed evolutionary time.

use serde::{Deserialize, Serialize};

use crate::encoding::{Nucleotide, Symbol};
use crate::errors::{PhylogenyError, Result};

pub type SubstitutionMatrix = [[f64; 4]; 4];

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct SubstitutionModel {
    /// Transition rate.
    alpha: f64,
    /// Transversion rate.
    beta: f64,
}

impl SubstitutionModel {
    pub fn new(alpha: f64, beta: f64) -> Result<Self> {
        validate_rate("alpha", alpha)?;
        validate_rate("beta", beta)?;
        Ok(Self { alpha, beta })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn beta(&self) -> f64 {
        self.beta
    }

    /// Transition probabilities after `time`. Non-positive times give the
    /// identity matrix.
    pub fn matrix(&self, time: f64) -> SubstitutionMatrix {
        let time = time.max(0.);
        let transversion_decay = (-4. * self.beta * time).exp();
        let transition_decay = (-2. * (self.alpha + self.beta) * time).exp();

        let s = (1. - transversion_decay) / 4.;
        let u = (1. + transversion_decay - 2. * transition_decay) / 4.;
        let r = 1. - 2. * s - u;

        let mut matrix = [[0.; 4]; 4];
        for (from, row) in matrix.iter_mut().enumerate() {
            for (to, entry) in row.iter_mut().enumerate() {
                *entry = match from.abs_diff(to) {
                    0 => r,
                    2 => u,
                    _ => s,
                };
            }
        }
        matrix
    }

    /// Draw a replacement for `symbol` given a single uniform sample.
    ///
    /// Candidates are visited in code order, skipping `symbol` itself, and the
    /// first whose own probability exceeds `sample` is taken.
    pub fn substitute(
        matrix: &SubstitutionMatrix,
        symbol: Nucleotide,
        sample: f64,
    ) -> Nucleotide {
        let from = symbol.index();
        (0..Nucleotide::SIZE)
            .filter(|&to| to != from)
            .find(|&to| matrix[from][to] > sample)
            .and_then(Nucleotide::from_index)
            .unwrap_or(symbol)
    }
}

fn validate_rate(name: &str, rate: f64) -> Result<()> {
    if !rate.is_finite() || rate < 0. {
        return Err(PhylogenyError::InvalidParameter(format!(
            "{name} must be a finite non-negative rate, got {rate}"
        )));
    }
    Ok(())
}
