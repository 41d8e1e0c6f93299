//! The four neighbourhood operators (component E).
//!
//! Each neighbourhood exposes `best_improving` (exhaustive scan, first
//! minimal-delta move wins ties) and `random` (bounded-attempt sampling),
//! matching the contract in the design notes.

pub mod cross_exchange;
pub mod relocate;
pub mod swap;
pub mod two_opt;

use rand_chacha::ChaCha8Rng;

use crate::config::NeighborhoodKind;
use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::moves::Move;

pub use cross_exchange::CrossExchangeNeighborhood;
pub use relocate::RelocateNeighborhood;
pub use swap::SwapNeighborhood;
pub use two_opt::TwoOptNeighborhood;

/// Bounded attempt budget for `random()` sampling before giving up.
pub const RANDOM_ATTEMPT_BUDGET: usize = 30;

pub trait Neighborhood {
    /// Scans every legal move in this neighbourhood's move space and
    /// returns the one with the most negative delta, or `None` if no move
    /// improves the solution. Ties broken by first-encountered in the
    /// deterministic enumeration order (route index ascending, then
    /// position ascending).
    fn best_improving(&self, solution: &Solution, instance: &Instance) -> Option<Move>;

    /// Samples up to [`RANDOM_ATTEMPT_BUDGET`] random moves from this
    /// neighbourhood's move space and returns the feasible one with the
    /// lowest delta seen, or `None` if none of the attempts was feasible.
    fn random(&self, solution: &Solution, instance: &Instance, rng: &mut ChaCha8Rng) -> Option<Move>;
}

/// Scores `candidates` in parallel (via `rayon`), then reduces
/// *sequentially* over the results in their original order to find the
/// first move with the minimum delta below zero. Preserving the
/// sequential reduction (rather than a parallel min-reduction) is what
/// keeps the tie-break deterministic regardless of thread scheduling.
pub(crate) fn best_improving_over(
    candidates: Vec<Move>,
    score: impl Fn(&Move) -> Option<f64> + Sync,
) -> Option<Move> {
    use rayon::prelude::*;

    let scored: Vec<(Move, Option<f64>)> = candidates
        .par_iter()
        .map(|mv| (*mv, score(mv)))
        .collect();

    let mut best: Option<(Move, f64)> = None;
    for (mv, maybe_delta) in scored {
        if let Some(d) = maybe_delta {
            if d < 0.0 {
                match best {
                    Some((_, best_d)) if d >= best_d => {}
                    _ => best = Some((mv, d)),
                }
            }
        }
    }
    best.map(|(mv, _)| mv)
}

/// Dispatches to the configured neighbourhood implementation for `kind`.
pub fn for_kind(kind: NeighborhoodKind, max_segment_length: usize) -> Box<dyn Neighborhood + Send + Sync> {
    match kind {
        NeighborhoodKind::Swap => Box::new(SwapNeighborhood),
        NeighborhoodKind::Relocate => Box::new(RelocateNeighborhood),
        NeighborhoodKind::TwoOpt => Box::new(TwoOptNeighborhood),
        NeighborhoodKind::CrossExchange => Box::new(CrossExchangeNeighborhood { max_segment_length }),
    }
}
