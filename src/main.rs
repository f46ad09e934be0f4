use clap::Parser;
use discrete_hmm::DiscreteHmmBuilder;
use rand::RngExt as _;

mod cli;

use cli::Cli;

/// Walk a random left-to-right path through `num_states` states, stopping
/// once it has left the last unit, and emit one random feature code per
/// frame. Stands in for the external sampler's composition + draw, which
/// this crate does not implement (see `lib.rs`).
fn random_alignment(num_states: usize, codebook_size: usize, min_len: usize, rng: &mut impl rand::Rng) -> (Vec<usize>, Vec<usize>) {
    let target_len = min_len + rng.random_range(0..=min_len.max(1) * 2);
    let mut alignment = Vec::with_capacity(target_len);
    let mut state = 0usize;
    for i in 0..target_len {
        alignment.push(state);
        let remaining_steps = target_len - i - 1;
        let remaining_states = num_states - 1 - state;
        let must_advance = remaining_steps <= remaining_states;
        if state + 1 < num_states && (must_advance || rng.random_bool(0.5)) {
            state += 1;
        }
    }
    let features: Vec<usize> = (0..alignment.len()).map(|_| rng.random_range(0..codebook_size)).collect();
    (alignment, features)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let hmm = DiscreteHmmBuilder::new(cli.codebook_size, cli.num_units)
        .num_unit_states(cli.num_unit_states)
        .obs_prior(cli.obs_prior)
        .trans_prior(cli.trans_prior)
        .seed(cli.seed)
        .build();

    let mut hmm = match hmm {
        Ok(hmm) => hmm,
        Err(err) => {
            log::error!("failed to construct DiscreteHmm: {err}");
            std::process::exit(1);
        }
    };

    log::info!(
        "built DiscreteHmm: {} units x {} states = {} states, codebook size {}",
        cli.num_units,
        cli.num_unit_states,
        hmm.num_states(),
        cli.codebook_size
    );

    let mut demo_rng = rand::rng();

    for iteration in 0..cli.iterations {
        let (alignment, features) = random_alignment(hmm.num_states(), cli.codebook_size, hmm.num_unit_states(), &mut demo_rng);

        if let Err(err) = hmm.add_sample_counts(&alignment, &features) {
            log::error!("iteration {iteration}: contract violation adding counts: {err}");
            std::process::exit(1);
        }

        if let Err(err) = hmm.resample_obs().and_then(|_| hmm.resample_trans()) {
            log::error!("iteration {iteration}: resampling failed: {err}");
            std::process::exit(1);
        }

        let lattice = match hmm.frame_state_lattice(&features) {
            Ok(fst) => fst,
            Err(err) => {
                log::error!("iteration {iteration}: failed to build frame state lattice: {err}");
                std::process::exit(1);
            }
        };
        let cycle = hmm.monophone_cycle();

        log::info!(
            "iteration {iteration}: alignment len {}, lattice {} states/{} arcs, monophone cycle {} states/{} arcs",
            alignment.len(),
            lattice.num_states(),
            lattice.num_arcs(),
            cycle.num_states(),
            cycle.num_arcs(),
        );
    }
}
