//! Gibbs-style parameter resampling: draws new emission and transition
//! probabilities from their Dirichlet posteriors given counts plus priors.

use crate::counts::CountTable;
use crate::error::Result;
use crate::params::ParamBlock;
use crate::rng::Rng;

/// `obs_prob[i] <- Dirichlet(obs_prior[i] + obs_count[i])` for every state.
///
/// Each state's prior and counts are combined and resampled before the next
/// state is touched, so a caller observing `params` between calls never sees
/// a state with counts read but parameters not yet written.
pub fn resample_obs(counts: &CountTable, params: &mut ParamBlock, rng: &mut Rng) -> Result<()> {
    for i in 0..counts.num_states() {
        let posterior: Vec<f64> = counts
            .obs_prior(i)
            .iter()
            .zip(counts.obs_count(i))
            .map(|(&prior, &count)| prior + count)
            .collect();
        let sample = rng.dirichlet(&posterior)?;
        params.set_obs_prob(i, sample);
    }
    Ok(())
}

/// `trans_prob[i] <- Dirichlet(trans_prior[i] + trans_count[i])` for every state.
pub fn resample_trans(counts: &CountTable, params: &mut ParamBlock, rng: &mut Rng) -> Result<()> {
    for i in 0..counts.num_states() {
        let posterior: Vec<f64> = counts
            .trans_prior(i)
            .iter()
            .zip(counts.trans_count(i))
            .map(|(&prior, &count)| prior + count)
            .collect();
        let sample = rng.dirichlet(&posterior)?;
        params.set_trans_prob(i, sample);
    }
    Ok(())
}
