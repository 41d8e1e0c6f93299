//! A capacitated vehicle routing solver: randomised nearest-neighbour
//! construction, Variable Neighborhood Descent, and a simulated-annealing
//! outer loop with tabu-search bookkeeping.

pub mod config;
pub mod construction;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod evaluation;
pub mod moves;
pub mod neighborhoods;
pub mod solver;
pub mod vnd;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{info, span, Level};

pub use config::Config;
pub use diagnostics::Diagnostics;
pub use domain::{Instance, Route, Solution};
pub use error::SolverError;

/// Solves `instance` under `config`, returning the best solution found and
/// diagnostics describing the run.
///
/// Fails only on an invalid `config` — `instance` is validated at
/// construction time by [`Instance::new`], so by the time a caller holds
/// one, it is already known-good.
pub fn solve(instance: &Instance, config: &Config) -> Result<(Solution, Diagnostics), SolverError> {
    config.validate()?;

    let span = span!(Level::INFO, "solve", n = instance.n(), capacity = instance.capacity());
    let _guard = span.enter();

    let seed = config.general.seed.unwrap_or_else(rand::random);
    info!(seed, "seeding solver RNG");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let (solution, diagnostics) = solver::run(instance, config, &mut rng);

    // `verify()` recomputes every route from scratch and asserts the
    // partition/capacity/cost invariants; spec §4.B reserves it for
    // tests/debug, not the production path.
    #[cfg(debug_assertions)]
    solution.verify(instance);

    Ok((solution, diagnostics))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_instance(n: usize, capacity: u64) -> Instance {
        let mut coords = vec![(0.0, 0.0)];
        for i in 1..=n {
            coords.push((i as f64, 0.0));
        }
        let dist: Vec<Vec<f64>> = coords
            .iter()
            .map(|&(x1, y1)| {
                coords
                    .iter()
                    .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        let demand: Vec<u64> = std::iter::once(0).chain((1..=n).map(|_| 1)).collect();
        Instance::new(demand, dist, capacity, None).unwrap()
    }

    #[test]
    fn solve_rejects_invalid_config() {
        let inst = line_instance(3, 3);
        let mut config = Config::default();
        config.simulated_annealing.alpha = 1.5;
        assert!(solve(&inst, &config).is_err());
    }

    #[test]
    fn solve_returns_a_feasible_solution() {
        let inst = line_instance(9, 4);
        let mut config = Config::default();
        config.general.seed = Some(42);
        config.local_search.max_iterations = 500;
        let (solution, diagnostics) = solve(&inst, &config).unwrap();
        solution.verify(&inst);
        assert!(diagnostics.iterations > 0);
    }

    #[test]
    fn solve_is_reproducible_given_same_seed() {
        let inst = line_instance(9, 4);
        let mut config = Config::default();
        config.general.seed = Some(7);
        config.local_search.max_iterations = 300;

        let (s1, _) = solve(&inst, &config).unwrap();
        let (s2, _) = solve(&inst, &config).unwrap();
        assert_eq!(s1.cost(), s2.cost());
        for (r1, r2) in s1.routes().iter().zip(s2.routes()) {
            assert_eq!(r1.customers(), r2.customers());
        }
    }
}
