//! Run diagnostics returned alongside the final [`crate::Solution`].

/// Counters and bookkeeping describing how a `solve()` call spent its
/// budget. Informational only — nothing in the solver branches on a
/// `Diagnostics` field once the run has finished.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    /// Total outer-loop iterations executed.
    pub iterations: u64,
    /// Iteration at which `best_so_far` last improved.
    pub best_iteration: u64,
    /// Moves accepted (by SA criterion or aspiration override).
    pub accepted: u64,
    /// Moves rejected by the SA acceptance test.
    pub rejected_by_annealing: u64,
    /// Moves rejected because they were tabu and aspiration didn't apply.
    pub rejected_by_tabu: u64,
    /// Accepted moves that were tabu but let through by aspiration.
    pub aspirated: u64,
    /// Number of periodic VND intensification passes run during the outer loop.
    pub intensifications: u64,
    /// `true` if the run stopped because `general.time_limit_seconds`
    /// elapsed rather than reaching a natural stop condition. Not an
    /// error: the caller still receives the best solution found so far.
    pub timed_out: bool,
    /// Gap to `instance.best_known()`, in percent, when that value is set.
    pub gap_percentage: Option<f64>,
}
