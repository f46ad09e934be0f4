//! Extracts the HMM state-id sequence from a sampled, linear WFST path.

use crate::wfst::Wfst;

/// Walk forward from `fst`'s start state, taking the first (and, for a linear
/// path, only) outgoing arc at each state until a state has none. Each arc's
/// input label minus one is the HMM state id; epsilon input labels (id `0`,
/// giving `-1`) are skipped rather than pushed.
///
/// Assumes `fst` is linear. A non-linear input is not rejected -- the first
/// arc at each state is always taken -- since the external composition this
/// feeds from only ever returns single paths.
pub fn parse_sample(fst: &Wfst) -> Vec<usize> {
    let mut out = Vec::new();
    let mut state = fst.start();
    loop {
        let arcs = fst.arcs(state);
        let Some(arc) = arcs.first() else { break };
        if arc.ilabel > 0 {
            out.push((arc.ilabel - 1) as usize);
        }
        state = arc.nextstate;
    }
    out
}
