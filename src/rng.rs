//! Seedable RNG primitives: uniform, exponential, gamma, and Dirichlet sampling.
//!
//! The sampler owns an explicit, injectable PRNG rather than reaching for a
//! process-wide global -- required for deterministic, reproducible tests and
//! because a `DiscreteHmm` may coexist with other independently seeded models
//! in the same process.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::error::{HmmError, Result};

/// Guards the Johnk-method boundary at `a = 1`, where the `v.powf(1.0 / (1.0 - a))`
/// term would divide by zero. Any `a` within this distance of 1 is routed to the
/// `Exponential(1)` fallback instead (see Design Notes / Open Question 2).
const GAMMA_UNITY_EPS: f64 = 1e-9;

/// A private, exclusively-owned pseudo-random source.
pub struct Rng {
    inner: ChaCha8Rng,
}

impl Rng {
    /// Seed deterministically, for reproducible tests.
    pub fn seed_from_u64(seed: u64) -> Self {
        Rng { inner: ChaCha8Rng::seed_from_u64(seed) }
    }

    /// Seed from the OS entropy source, for production sampling.
    pub fn from_entropy() -> Self {
        Rng { inner: rand::make_rng() }
    }

    /// `r ~ Uniform(0, 1)`, strictly open on both ends.
    pub fn uniform(&mut self) -> f64 {
        use rand::RngExt as _;
        loop {
            let r: f64 = self.inner.random();
            if r > 0.0 {
                return r;
            }
        }
    }

    /// `Exponential(lambda)` via inverse-CDF sampling.
    pub fn exponential(&mut self, lambda: f64) -> Result<f64> {
        if lambda <= 0.0 {
            return Err(HmmError::invalid_parameter(format!(
                "exponential rate must be positive, got {lambda}"
            )));
        }
        Ok(-(1.0 - self.uniform()).ln() / lambda)
    }

    /// `Gamma(a, theta)`, `a` the shape and `theta` the scale.
    ///
    /// Uses Best's XG rejection method for `a > 1` and Johnk's method for
    /// `a <= 1`, with the boundary near `a = 1` routed through the
    /// `Exponential(1)` fallback to avoid Johnk's division by `1 - a`.
    pub fn gamma(&mut self, a: f64, theta: f64) -> Result<f64> {
        if a <= 0.0 {
            return Err(HmmError::invalid_parameter(format!(
                "gamma shape must be positive, got {a}"
            )));
        }
        if theta <= 0.0 {
            return Err(HmmError::invalid_parameter(format!(
                "gamma scale must be positive, got {theta}"
            )));
        }

        if a > 1.0 {
            Ok(self.gamma_best_xg(a) * theta)
        } else if a >= 1.0 - GAMMA_UNITY_EPS {
            Ok(self.exponential(1.0)? * theta)
        } else {
            Ok(self.gamma_johnk(a)? * theta)
        }
    }

    /// Best's XG rejection method, `a > 1`.
    fn gamma_best_xg(&mut self, a: f64) -> f64 {
        let b = a - 1.0;
        let c = 3.0 * a - 0.75;
        loop {
            let u = self.uniform();
            let v = self.uniform();
            let w = u * (1.0 - u);
            let y = (c / w).sqrt() * (u - 0.5);
            let x = b + y;
            if x < 0.0 {
                continue;
            }
            let z = 64.0 * w.powi(3) * v * v;
            if z <= 1.0 - 2.0 * y * y / x || z.ln() <= 2.0 * (b * (x / b).ln() - y) {
                return x;
            }
        }
    }

    /// Johnk's method, `a` strictly below the unity guard.
    fn gamma_johnk(&mut self, a: f64) -> Result<f64> {
        let (x, y) = loop {
            let u = self.uniform();
            let v = self.uniform();
            let x = u.powf(1.0 / a);
            let y = v.powf(1.0 / (1.0 - a));
            if x + y <= 1.0 {
                break (x, y);
            }
        };
        let e = self.exponential(1.0)?;
        Ok(e * x / (x + y))
    }

    /// `Dirichlet(alpha)`: normalize independent `Gamma(alpha_i, 1)` draws.
    ///
    /// A zero entry in `alpha` is legal -- it yields `gamma(0, 1) = 0`, i.e. a
    /// guaranteed-zero probability mass in that slot -- but the whole vector
    /// must sum to something positive or normalization is undefined.
    pub fn dirichlet(&mut self, alpha: &[f64]) -> Result<Vec<f64>> {
        if alpha.iter().any(|&a| a < 0.0) {
            return Err(HmmError::invalid_parameter(
                "dirichlet concentration parameters must be non-negative",
            ));
        }
        let mut draws = Vec::with_capacity(alpha.len());
        let mut sum = 0.0;
        for &a in alpha {
            let y = if a == 0.0 { 0.0 } else { self.gamma(a, 1.0)? };
            draws.push(y);
            sum += y;
        }
        if sum == 0.0 {
            return Err(HmmError::invalid_parameter(
                "dirichlet draw summed to zero (all-zero concentration)",
            ));
        }
        for y in &mut draws {
            *y /= sum;
        }
        Ok(draws)
    }
}
