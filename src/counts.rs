//! Dirichlet-multinomial count bookkeeping: per-state observation and
//! transition counts and priors, plus add/remove under an alignment.

use crate::error::{HmmError, Result};

/// Per-state observation and transition counts and priors.
///
/// Priors are fixed at construction; counts are mutated by `add_obs`/`remove_obs`,
/// `add_trans`/`remove_trans`, and the bulk `apply` used by the outer sampler.
#[derive(Debug, Clone)]
pub struct CountTable {
    codebook_size: usize,
    num_unit_states: usize,
    obs_prior: Vec<Vec<f64>>,
    obs_count: Vec<Vec<f64>>,
    trans_prior: Vec<Vec<f64>>,
    trans_count: Vec<Vec<f64>>,
}

impl CountTable {
    pub fn new(
        num_states: usize,
        codebook_size: usize,
        num_unit_states: usize,
        obs_prior_param: f64,
        trans_prior_param: f64,
    ) -> Self {
        CountTable {
            codebook_size,
            num_unit_states,
            obs_prior: vec![vec![obs_prior_param; codebook_size]; num_states],
            obs_count: vec![vec![0.0; codebook_size]; num_states],
            trans_prior: vec![vec![trans_prior_param; 2]; num_states],
            trans_count: vec![vec![0.0; 2]; num_states],
        }
    }

    pub fn num_states(&self) -> usize {
        self.obs_count.len()
    }

    pub fn obs_prior(&self, i: usize) -> &[f64] {
        &self.obs_prior[i]
    }

    pub fn obs_count(&self, i: usize) -> &[f64] {
        &self.obs_count[i]
    }

    pub fn trans_prior(&self, i: usize) -> &[f64] {
        &self.trans_prior[i]
    }

    pub fn trans_count(&self, i: usize) -> &[f64] {
        &self.trans_count[i]
    }

    pub fn add_obs(&mut self, i: usize, c: usize, n: f64) {
        self.obs_count[i][c] += n;
    }

    pub fn remove_obs(&mut self, i: usize, c: usize, n: f64) {
        self.obs_count[i][c] -= n;
    }

    pub fn add_trans(&mut self, i: usize, d: usize, n: f64) {
        self.trans_count[i][d] += n;
    }

    pub fn remove_trans(&mut self, i: usize, d: usize, n: f64) {
        self.trans_count[i][d] -= n;
    }

    /// Absorb (`sign = 1.0`) or retract (`sign = -1.0`) an alignment's counts.
    ///
    /// Each frame contributes one observation count. Each adjacent state pair
    /// contributes one transition count: self-loop (index 0), in-unit advance
    /// (index 1), or a unit-boundary advance (also index 1, taken when the
    /// successor lands on an entry state rather than `i + 1`). The alignment's
    /// final state always takes one forced exit (index 1), even for a
    /// single-frame alignment -- the generative model charges every visited
    /// state for its eventual advance out.
    pub fn apply(&mut self, alignment: &[usize], features: &[usize], sign: f64) -> Result<usize> {
        if alignment.len() != features.len() {
            return Err(HmmError::contract_violation(format!(
                "alignment length {} does not match feature length {}",
                alignment.len(),
                features.len()
            )));
        }
        for (&state, &code) in alignment.iter().zip(features.iter()) {
            if code >= self.codebook_size {
                return Err(HmmError::contract_violation(format!(
                    "feature code {code} out of range for codebook size {}",
                    self.codebook_size
                )));
            }
            self.add_obs(state, code, sign);
        }
        for pair in alignment.windows(2) {
            let (i, j) = (pair[0], pair[1]);
            let diff = j as i64 - i as i64;
            let dest = if diff == 0 {
                0
            } else if diff == 1 {
                1
            } else if j % self.num_unit_states == 0 {
                1
            } else {
                return Err(HmmError::contract_violation(format!(
                    "state jump {i} -> {j} is not a left-to-right transition"
                )));
            };
            self.add_trans(i, dest, sign);
        }
        if let Some(&last) = alignment.last() {
            self.add_trans(last, 1, sign);
        }
        Ok(alignment.len())
    }
}
