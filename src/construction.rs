//! Randomised nearest-neighbour construction (component D).

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::InitialSolutionConfig;
use crate::domain::instance::Instance;
use crate::domain::route::Route;
use crate::domain::solution::Solution;

/// Builds an initial feasible [`Solution`] by repeatedly appending, to the
/// current route, a customer drawn uniformly from the top-K nearest
/// unvisited candidates that still fit in the route's remaining capacity
/// (K scales with `config.randomness`); opens a fresh route whenever no
/// remaining customer fits. Reproducible given `rng`'s seed.
pub fn construct(instance: &Instance, config: &InitialSolutionConfig, rng: &mut ChaCha8Rng) -> Solution {
    let depot = Instance::DEPOT;
    let mut unvisited: Vec<usize> = instance.customers().collect();

    let mut routes: Vec<Route> = Vec::new();
    let mut current: Vec<usize> = Vec::new();
    let mut current_load: u64 = 0;

    while !unvisited.is_empty() {
        let last = current.last().copied().unwrap_or(depot);
        let remaining_capacity = instance.capacity() - current_load;

        let mut candidates: Vec<usize> = unvisited
            .iter()
            .copied()
            .filter(|&c| instance.demand(c) <= remaining_capacity)
            .collect();

        if candidates.is_empty() {
            debug!(
                route_len = current.len(),
                load = current_load,
                "closing route, no remaining customer fits"
            );
            routes.push(finish_route(&current, instance));
            current = Vec::new();
            current_load = 0;
            continue;
        }

        candidates.sort_by(|&a, &b| {
            instance
                .dist(last, a)
                .total_cmp(&instance.dist(last, b))
        });

        let k = ((config.randomness * candidates.len() as f64).ceil() as usize).max(1);
        let chosen_index = rng.gen_range(0..k.min(candidates.len()));
        let chosen = candidates[chosen_index];

        current.push(chosen);
        current_load += instance.demand(chosen);
        unvisited.retain(|&c| c != chosen);
    }

    routes.push(finish_route(&current, instance));

    debug!(num_routes = routes.len(), "construction complete");
    Solution::new(routes)
}

fn finish_route(customers: &[usize], instance: &Instance) -> Route {
    let mut route = Route::new();
    for &c in customers {
        route.push(c);
    }
    route.recompute(instance);
    route
}
