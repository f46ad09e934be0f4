//! Command-line configuration for the demo training-iteration driver.
//!
//! The real pipeline's lattice I/O, symbol tables, and pronunciation
//! dictionary are out of scope for this crate (see `lib.rs`); this CLI only
//! drives the `DiscreteHmm` core through a toy iteration loop so the crate has
//! a runnable entry point during development.

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "discrete-hmm", about = "Toy driver for the discrete HMM core")]
pub struct Cli {
    /// Discrete codebook size.
    #[arg(long, default_value_t = 8)]
    pub codebook_size: usize,

    /// Number of acoustic units.
    #[arg(long, default_value_t = 4)]
    pub num_units: usize,

    /// HMM states per unit.
    #[arg(long, default_value_t = 3)]
    pub num_unit_states: usize,

    /// Symmetric Dirichlet prior mass for emissions.
    #[arg(long, default_value_t = 1.0)]
    pub obs_prior: f64,

    /// Symmetric Dirichlet prior mass for transitions.
    #[arg(long, default_value_t = 1.0)]
    pub trans_prior: f64,

    /// RNG seed, for reproducible runs.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Number of toy Gibbs iterations to run.
    #[arg(long, default_value_t = 5)]
    pub iterations: usize,
}
