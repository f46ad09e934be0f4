//! Property-based checks of the invariants that must hold for any inputs:
//! add/remove symmetry of count tables, and the simplex property of freshly
//! resampled parameters.

use discrete_hmm::counts::CountTable;
use discrete_hmm::DiscreteHmmBuilder;
use proptest::prelude::*;

/// A left-to-right alignment: each step either repeats the last state or
/// advances by exactly one, staying within `[0, num_states)`.
fn alignment_strategy(num_states: usize) -> impl Strategy<Value = Vec<usize>> {
    prop::collection::vec(any::<bool>(), 1..12).prop_map(move |advances| {
        let mut state = 0usize;
        let mut out = Vec::with_capacity(advances.len());
        for advance in advances {
            out.push(state);
            if advance && state + 1 < num_states {
                state += 1;
            }
        }
        out
    })
}

const NUM_STATES: usize = 6; // 2 units x 3 states
const CODEBOOK_SIZE: usize = 5;

proptest! {
    #![proptest_config(ProptestConfig { cases: 256, ..ProptestConfig::default() })]

    /// Invariant 1: for any (add, remove) pair on the same alignment and
    /// features, count tables return to their pre-add values element-wise.
    #[test]
    fn add_remove_is_symmetric(alignment in alignment_strategy(NUM_STATES), feature_seed in 0usize..1000) {
        let features: Vec<usize> = (0..alignment.len())
            .map(|i| (feature_seed + i) % CODEBOOK_SIZE)
            .collect();

        let mut table = CountTable::new(NUM_STATES, CODEBOOK_SIZE, 3, 1.0, 1.0);
        table.apply(&alignment, &features, 1.0).unwrap();
        table.apply(&alignment, &features, -1.0).unwrap();

        for state in 0..NUM_STATES {
            prop_assert!(table.obs_count(state).iter().all(|&c| c == 0.0));
            prop_assert!(table.trans_count(state).iter().all(|&c| c == 0.0));
        }
    }

    /// Invariant 2: after resampling, every obs_prob row sums to 1 and is
    /// element-wise in [0, 1], for any valid construction parameters.
    #[test]
    fn resampled_obs_prob_is_always_a_simplex(
        codebook_size in 1usize..9,
        num_units in 1usize..4,
        num_unit_states in 1usize..4,
        seed in 0u64..10_000,
    ) {
        let mut hmm = DiscreteHmmBuilder::new(codebook_size, num_units)
            .num_unit_states(num_unit_states)
            .seed(seed)
            .build()
            .unwrap();
        hmm.resample_obs().unwrap();

        for state in 0..hmm.num_states() {
            let sum: f64 = (0..codebook_size).map(|c| hmm.state_prob(state, c)).sum();
            prop_assert!((sum - 1.0).abs() < 1e-9);
            for c in 0..codebook_size {
                let p = hmm.state_prob(state, c);
                prop_assert!((0.0..=1.0).contains(&p));
            }
        }
    }

    /// Invariant 2 (transitions): same property for trans_prob.
    #[test]
    fn resampled_trans_prob_is_always_a_simplex(
        num_units in 1usize..4,
        num_unit_states in 1usize..4,
        seed in 0u64..10_000,
    ) {
        let mut hmm = DiscreteHmmBuilder::new(4, num_units)
            .num_unit_states(num_unit_states)
            .seed(seed)
            .build()
            .unwrap();
        hmm.resample_trans().unwrap();

        for state in 0..hmm.num_states() {
            let sum = hmm.trans_prob(state, 0) + hmm.trans_prob(state, 1);
            prop_assert!((sum - 1.0).abs() < 1e-9);
        }
    }
}
