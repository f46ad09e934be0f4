//! Bayesian discrete-emission left-to-right HMM core for acoustic-unit
//! discovery: Dirichlet-multinomial count bookkeeping, Gibbs-style parameter
//! resampling, and construction of the two WFSTs that plug the model into a
//! surrounding lattice-decoding pipeline.
//!
//! Lattice file I/O, symbol-table management, pronunciation lookup, and the
//! outer training-iteration driver are collaborators, not this crate's job --
//! see [`DiscreteHmm`] for the operations exposed across that boundary.

pub mod align;
pub mod counts;
pub mod error;
pub mod hmm;
pub mod params;
pub mod resample;
pub mod rng;
pub mod state;
pub mod wfst;

pub use error::{HmmError, Result};
pub use hmm::{DiscreteHmm, DiscreteHmmBuilder};
pub use rng::Rng;
pub use wfst::{Arc, Wfst};
