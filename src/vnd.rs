//! Variable Neighborhood Descent (component F).

use tracing::{debug, trace};

use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::neighborhoods::Neighborhood;

/// Cycles `neighborhoods` in order, applying the best improving move found
/// and restarting from the first neighbourhood whenever one is applied.
/// Terminates when no neighbourhood in the list yields an improving move.
///
/// Termination is guaranteed because cost is bounded below by zero and
/// every applied move strictly decreases it; `max_iterations_without_improvement`
/// is a safety net against pathological inputs, not the primary stop condition.
pub fn vnd(
    solution: &mut Solution,
    instance: &Instance,
    neighborhoods: &[Box<dyn Neighborhood + Send + Sync>],
    max_iterations_without_improvement: usize,
) {
    let mut k = 0;
    let mut guard = 0;

    while k < neighborhoods.len() {
        if guard >= max_iterations_without_improvement {
            debug!(guard, "VND safety guard reached, stopping descent");
            break;
        }

        match neighborhoods[k].best_improving(solution, instance) {
            Some(mv) => {
                let before = solution.cost();
                solution.apply(&mv, instance);
                trace!(
                    neighborhood = k,
                    before,
                    after = solution.cost(),
                    "VND applied improving move"
                );
                k = 0;
                guard = 0;
            }
            None => {
                k += 1;
                guard += 1;
            }
        }
    }
}
