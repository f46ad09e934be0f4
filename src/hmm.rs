//! The `DiscreteHmm` subsystem: a left-to-right discrete HMM whose emission
//! and transition parameters are drawn from Dirichlet posteriors, plus the two
//! canonical WFSTs that plug it into a lattice-decoding pipeline.

use crate::counts::CountTable;
use crate::error::{HmmError, Result};
use crate::params::ParamBlock;
use crate::resample;
use crate::rng::Rng;
use crate::state::StateId;
use crate::wfst::{self, Arc, Wfst};

/// A left-to-right discrete-emission HMM with `num_units * num_unit_states`
/// states, laid out so state `u * num_unit_states + s` is in-unit state `s` of
/// unit `u`.
///
/// Owns its RNG exclusively; concurrent callers must serialize externally
/// (see module docs on the single-threaded cooperative model).
pub struct DiscreteHmm {
    codebook_size: usize,
    num_units: usize,
    num_unit_states: usize,
    counts: CountTable,
    params: ParamBlock,
    rng: Rng,
}

impl DiscreteHmm {
    /// Construct with priors and draw the initial sample from the prior
    /// (counts start at zero, so the posterior equals the prior).
    pub fn new(
        codebook_size: usize,
        num_units: usize,
        num_unit_states: usize,
        obs_prior_param: f64,
        trans_prior_param: f64,
        mut rng: Rng,
    ) -> Result<Self> {
        if codebook_size == 0 {
            return Err(HmmError::invalid_parameter("codebook_size must be positive"));
        }
        if num_units == 0 {
            return Err(HmmError::invalid_parameter("num_units must be positive"));
        }
        if num_unit_states == 0 {
            return Err(HmmError::invalid_parameter("num_unit_states must be positive"));
        }
        if obs_prior_param < 0.0 {
            return Err(HmmError::invalid_parameter("obs_prior_param must be non-negative"));
        }
        if trans_prior_param < 0.0 {
            return Err(HmmError::invalid_parameter("trans_prior_param must be non-negative"));
        }

        let num_states = num_units * num_unit_states;
        let counts = CountTable::new(num_states, codebook_size, num_unit_states, obs_prior_param, trans_prior_param);
        let mut params = ParamBlock::new(num_states, codebook_size);

        resample::resample_obs(&counts, &mut params, &mut rng)?;
        resample::resample_trans(&counts, &mut params, &mut rng)?;

        Ok(DiscreteHmm {
            codebook_size,
            num_units,
            num_unit_states,
            counts,
            params,
            rng,
        })
    }

    pub fn num_states(&self) -> usize {
        self.num_units * self.num_unit_states
    }

    pub fn codebook_size(&self) -> usize {
        self.codebook_size
    }

    pub fn num_units(&self) -> usize {
        self.num_units
    }

    pub fn num_unit_states(&self) -> usize {
        self.num_unit_states
    }

    /// Draw fresh `obs_prob` from the current Dirichlet posterior.
    pub fn resample_obs(&mut self) -> Result<()> {
        resample::resample_obs(&self.counts, &mut self.params, &mut self.rng)
    }

    /// Draw fresh `trans_prob` from the current Dirichlet posterior.
    pub fn resample_trans(&mut self) -> Result<()> {
        resample::resample_trans(&self.counts, &mut self.params, &mut self.rng)
    }

    pub fn state_prob(&self, state: usize, code: usize) -> f64 {
        self.params.obs_prob(state, code)
    }

    pub fn trans_prob(&self, state: usize, dest: usize) -> f64 {
        self.params.trans_prob(state, dest)
    }

    /// Absorb an alignment's counts (the outer sampler's bulk accounting op).
    pub fn add_sample_counts(&mut self, alignment: &[usize], features: &[usize]) -> Result<usize> {
        self.counts.apply(alignment, features, 1.0)
    }

    /// Retract an alignment's counts, the exact inverse of `add_sample_counts`.
    pub fn remove_sample_counts(&mut self, alignment: &[usize], features: &[usize]) -> Result<usize> {
        self.counts.apply(alignment, features, -1.0)
    }

    /// A per-frame state emission lattice: `features.len() + 1` states, one
    /// arc per `(frame, HMM state)` pair weighted by `-ln state_prob`.
    pub fn frame_state_lattice(&self, features: &[usize]) -> Result<Wfst> {
        for &code in features {
            if code >= self.codebook_size {
                return Err(HmmError::contract_violation(format!(
                    "feature code {code} out of range for codebook size {}",
                    self.codebook_size
                )));
            }
        }

        let mut fst = Wfst::new();
        let states: Vec<usize> = (0..=features.len()).map(|_| fst.add_state()).collect();
        fst.set_start(states[0]);
        fst.set_final(*states.last().unwrap(), 0.0);

        for (t, &code) in features.iter().enumerate() {
            for state in 0..self.num_states() {
                let p = self.state_prob(state, code);
                let label = wfst::state_label(state);
                fst.add_arc(states[t], Arc {
                    ilabel: label,
                    olabel: label,
                    weight: -p.ln(),
                    nextstate: states[t + 1],
                });
            }
        }
        Ok(fst)
    }

    /// A single-start, single-final cycle recognizing any concatenation of
    /// monophone units: state 0 is both initial and final.
    pub fn monophone_cycle(&self) -> Wfst {
        let mut fst = Wfst::new();
        let home = fst.add_state();
        fst.set_start(home);
        fst.set_final(home, 0.0);

        for unit in 0..self.num_units {
            let entry_state = StateId::new(unit, 0, self.num_unit_states);
            let mut wfst_state = fst.add_state();
            fst.add_arc(home, Arc {
                ilabel: wfst::state_label(entry_state.index()),
                olabel: wfst::unit_label(unit),
                weight: 0.0,
                nextstate: wfst_state,
            });

            let mut hmm_state = entry_state;
            for _ in 0..self.num_unit_states - 1 {
                let self_loop_p = self.trans_prob(hmm_state.index(), 0);
                fst.add_arc(wfst_state, Arc {
                    ilabel: wfst::state_label(hmm_state.index()),
                    olabel: 0,
                    weight: -self_loop_p.ln(),
                    nextstate: wfst_state,
                });

                let next_hmm_state = StateId::new(unit, hmm_state.in_unit(self.num_unit_states) + 1, self.num_unit_states);
                let next_wfst_state = fst.add_state();
                let advance_p = self.trans_prob(hmm_state.index(), 1);
                fst.add_arc(wfst_state, Arc {
                    ilabel: wfst::state_label(next_hmm_state.index()),
                    olabel: 0,
                    weight: -advance_p.ln(),
                    nextstate: next_wfst_state,
                });

                hmm_state = next_hmm_state;
                wfst_state = next_wfst_state;
            }

            let self_loop_p = self.trans_prob(hmm_state.index(), 0);
            fst.add_arc(wfst_state, Arc {
                ilabel: wfst::state_label(hmm_state.index()),
                olabel: 0,
                weight: -self_loop_p.ln(),
                nextstate: wfst_state,
            });

            let exit_p = self.trans_prob(hmm_state.index(), 1);
            fst.add_arc(wfst_state, Arc {
                ilabel: wfst::EPSILON,
                olabel: 0,
                weight: -exit_p.ln(),
                nextstate: home,
            });
        }

        fst
    }
}

/// Fluent construction of a [`DiscreteHmm`], mirroring the core's enumerated
/// construction parameters (codebook size, unit count, states per unit, and
/// the two Dirichlet prior masses).
#[derive(Clone, Debug)]
pub struct DiscreteHmmBuilder {
    codebook_size: usize,
    num_units: usize,
    num_unit_states: usize,
    obs_prior_param: f64,
    trans_prior_param: f64,
    seed: Option<u64>,
}

impl DiscreteHmmBuilder {
    pub fn new(codebook_size: usize, num_units: usize) -> Self {
        DiscreteHmmBuilder {
            codebook_size,
            num_units,
            num_unit_states: 3,
            obs_prior_param: 1.0,
            trans_prior_param: 1.0,
            seed: None,
        }
    }

    pub fn num_unit_states(mut self, n: usize) -> Self {
        self.num_unit_states = n;
        self
    }

    pub fn obs_prior(mut self, alpha: f64) -> Self {
        self.obs_prior_param = alpha;
        self
    }

    pub fn trans_prior(mut self, alpha: f64) -> Self {
        self.trans_prior_param = alpha;
        self
    }

    /// Seed the RNG deterministically, for reproducible tests.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn build(self) -> Result<DiscreteHmm> {
        let rng = match self.seed {
            Some(seed) => Rng::seed_from_u64(seed),
            None => Rng::from_entropy(),
        };
        DiscreteHmm::new(
            self.codebook_size,
            self.num_units,
            self.num_unit_states,
            self.obs_prior_param,
            self.trans_prior_param,
            rng,
        )
    }
}
