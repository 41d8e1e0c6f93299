//! The simulated-annealing-plus-tabu outer loop (component H).

use std::time::Instant;

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, span, Level};

use crate::config::Config;
use crate::construction::construct;
use crate::diagnostics::Diagnostics;
use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::evaluation::cost::{delta, feasible};
use crate::moves::signature;
use crate::neighborhoods::{for_kind, Neighborhood};
use crate::solver::tabu::TabuList;
use crate::vnd::vnd;

/// Whether a candidate move passes the tabu gate: not tabu, or tabu but
/// overridden by aspiration (spec §4.G — a tabu move is accepted anyway if
/// applying it would beat the best-so-far).
fn passes_tabu_gate(
    is_tabu: bool,
    aspiration_enabled: bool,
    candidate_cost: f64,
    best_cost: f64,
) -> bool {
    let aspiration = aspiration_enabled && candidate_cost < best_cost;
    !is_tabu || aspiration
}

/// Builds an initial solution (construction + VND), then alternates random
/// moves under simulated-annealing acceptance and tabu bookkeeping,
/// periodically re-running VND to intensify. Returns the best solution
/// seen and diagnostics describing the run; never fails once `config` has
/// passed [`Config::validate`] and `instance` has passed
/// [`Instance::new`]'s checks.
pub fn run(instance: &Instance, config: &Config, rng: &mut ChaCha8Rng) -> (Solution, Diagnostics) {
    let neighborhoods: Vec<Box<dyn Neighborhood + Send + Sync>> = config
        .vnd
        .neighborhoods
        .iter()
        .map(|&kind| for_kind(kind, config.vnd.max_segment_length))
        .collect();

    let mut diagnostics = Diagnostics::default();

    let init_span = span!(Level::DEBUG, "initial_solution");
    let mut current = {
        let _guard = init_span.enter();
        let mut sol = construct(instance, &config.initial_solution, rng);
        vnd(
            &mut sol,
            instance,
            &neighborhoods,
            config.vnd.max_iterations_without_improvement,
        );
        sol
    };
    let mut best = current.clone();
    info!(cost = current.cost(), "initial solution after VND");

    let mut tabu = TabuList::new(
        config.tabu_search.tabu_tenure,
        config.tabu_search.tabu_tenure_random_range,
    );

    let start = Instant::now();
    let deadline = config.general.time_limit_seconds;

    let mut temperature = config.simulated_annealing.initial_temperature;
    let mut iteration: u64 = 0;
    let mut iterations_without_improvement: u64 = 0;

    let loop_span = span!(Level::INFO, "outer_loop");
    let _loop_guard = loop_span.enter();

    'outer: while temperature > config.simulated_annealing.final_temperature
        && iteration < config.local_search.max_iterations as u64
        && iterations_without_improvement < config.local_search.max_iterations_without_improvement as u64
    {
        for _ in 0..config.simulated_annealing.iterations_per_temperature {
            if let Some(limit) = deadline {
                if start.elapsed().as_secs_f64() >= limit {
                    diagnostics.timed_out = true;
                    break 'outer;
                }
            }
            if iteration >= config.local_search.max_iterations as u64
                || iterations_without_improvement >= config.local_search.max_iterations_without_improvement as u64
            {
                break 'outer;
            }

            let nbh_idx = rng.gen_range(0..neighborhoods.len());
            let candidate = neighborhoods[nbh_idx].random(&current, instance, rng);

            let Some(mv) = candidate else {
                iteration += 1;
                iterations_without_improvement += 1;
                continue;
            };

            if !feasible(&mv, &current, instance) {
                iteration += 1;
                iterations_without_improvement += 1;
                continue;
            }

            let mv_delta = delta(&mv, &current, instance);
            let sig = signature(&mv, &current);
            let is_tabu = tabu.is_tabu(sig, iteration);
            let candidate_cost = current.cost() + mv_delta;

            if !passes_tabu_gate(
                is_tabu,
                config.tabu_search.aspiration_enabled,
                candidate_cost,
                best.cost(),
            ) {
                diagnostics.rejected_by_tabu += 1;
                iteration += 1;
                iterations_without_improvement += 1;
                continue;
            }

            let accept = mv_delta < 0.0 || rng.gen::<f64>() < (-mv_delta / temperature).exp();

            if !accept {
                diagnostics.rejected_by_annealing += 1;
                iteration += 1;
                iterations_without_improvement += 1;
                continue;
            }

            current.apply(&mv, instance);
            tabu.add(sig, iteration, rng);
            diagnostics.accepted += 1;
            if is_tabu {
                diagnostics.aspirated += 1;
            }

            if current.cost() < best.cost() {
                best = current.clone();
                diagnostics.best_iteration = iteration;
                iterations_without_improvement = 0;
                debug!(iteration, cost = best.cost(), "new best solution");
            } else {
                iterations_without_improvement += 1;
            }

            iteration += 1;

            if iteration % config.vnd.intensification_period == 0 {
                vnd(
                    &mut current,
                    instance,
                    &neighborhoods,
                    config.vnd.max_iterations_without_improvement,
                );
                diagnostics.intensifications += 1;
                if current.cost() < best.cost() {
                    best = current.clone();
                    diagnostics.best_iteration = iteration;
                    iterations_without_improvement = 0;
                    debug!(iteration, cost = best.cost(), "VND intensification improved best");
                }
            }
        }

        temperature *= config.simulated_annealing.alpha;
        tabu.sweep(iteration);
    }

    diagnostics.iterations = iteration;
    diagnostics.gap_percentage = instance.gap_percentage(best.cost());

    info!(
        iterations = diagnostics.iterations,
        cost = best.cost(),
        timed_out = diagnostics.timed_out,
        "search finished"
    );

    (best, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

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

    /// P7: a tabu move that would beat the best-so-far is accepted when
    /// aspiration is enabled, even though an ordinary tabu move with the
    /// same tabu status is rejected.
    #[test]
    fn aspiration_overrides_tabu_for_a_new_global_best() {
        let best_cost = 10.0;
        let candidate_cost = 9.0; // beats best_cost -> aspiration should fire

        assert!(passes_tabu_gate(true, true, candidate_cost, best_cost));
        assert!(!passes_tabu_gate(true, false, candidate_cost, best_cost));
        assert!(!passes_tabu_gate(true, true, best_cost + 1.0, best_cost));
        assert!(passes_tabu_gate(false, true, best_cost + 1.0, best_cost));
    }

    #[test]
    fn run_never_regresses_below_initial_vnd_solution() {
        let inst = line_instance(12, 4);
        let mut config = Config::default();
        config.local_search.max_iterations = 500;
        config.local_search.max_iterations_without_improvement = 200;
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut initial = construct(&inst, &config.initial_solution, &mut rng.clone());
        let neighborhoods: Vec<Box<dyn Neighborhood + Send + Sync>> = config
            .vnd
            .neighborhoods
            .iter()
            .map(|&kind| for_kind(kind, config.vnd.max_segment_length))
            .collect();
        vnd(
            &mut initial,
            &inst,
            &neighborhoods,
            config.vnd.max_iterations_without_improvement,
        );

        let (best, diagnostics) = run(&inst, &config, &mut rng);
        best.verify(&inst);
        assert!(best.cost() <= initial.cost() + 1e-9);
        assert!(diagnostics.iterations > 0);
    }

    #[test]
    fn periodic_vnd_intensification_runs_during_the_loop() {
        let inst = line_instance(15, 5);
        let mut config = Config::default();
        config.local_search.max_iterations = 400;
        config.vnd.intensification_period = 20;
        let mut rng = ChaCha8Rng::seed_from_u64(3);

        let (best, diagnostics) = run(&inst, &config, &mut rng);
        best.verify(&inst);
        assert!(diagnostics.intensifications > 0);
    }

    #[test]
    fn reproducible_given_same_seed() {
        let inst = line_instance(10, 4);
        let mut config = Config::default();
        config.local_search.max_iterations = 300;

        let mut rng1 = ChaCha8Rng::seed_from_u64(123);
        let mut rng2 = ChaCha8Rng::seed_from_u64(123);
        let (best1, _) = run(&inst, &config, &mut rng1);
        let (best2, _) = run(&inst, &config, &mut rng2);

        assert_eq!(best1.cost(), best2.cost());
        for (r1, r2) in best1.routes().iter().zip(best2.routes()) {
            assert_eq!(r1.customers(), r2.customers());
        }
    }
}
