use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::evaluation::cost::{delta, feasible};
use crate::moves::Move;
use crate::neighborhoods::{best_improving_over, Neighborhood, RANDOM_ATTEMPT_BUDGET};

/// Exchanges the customers at one position in each of two distinct routes.
pub struct SwapNeighborhood;

fn enumerate(solution: &Solution) -> Vec<Move> {
    let mut moves = Vec::new();
    let routes = solution.routes();
    for route_a in 0..routes.len() {
        for route_b in (route_a + 1)..routes.len() {
            for pos_a in 0..routes[route_a].len() {
                for pos_b in 0..routes[route_b].len() {
                    moves.push(Move::Swap {
                        route_a,
                        pos_a,
                        route_b,
                        pos_b,
                    });
                }
            }
        }
    }
    moves
}

impl Neighborhood for SwapNeighborhood {
    fn best_improving(&self, solution: &Solution, instance: &Instance) -> Option<Move> {
        let candidates = enumerate(solution);
        best_improving_over(candidates, |mv| {
            if feasible(mv, solution, instance) {
                Some(delta(mv, solution, instance))
            } else {
                None
            }
        })
    }

    fn random(&self, solution: &Solution, instance: &Instance, rng: &mut ChaCha8Rng) -> Option<Move> {
        let routes = solution.routes();
        if routes.len() < 2 {
            return None;
        }
        let mut best: Option<(Move, f64)> = None;
        for _ in 0..RANDOM_ATTEMPT_BUDGET {
            let route_a = rng.gen_range(0..routes.len());
            let route_b = rng.gen_range(0..routes.len());
            if route_a == route_b || routes[route_a].is_empty() || routes[route_b].is_empty() {
                continue;
            }
            let pos_a = rng.gen_range(0..routes[route_a].len());
            let pos_b = rng.gen_range(0..routes[route_b].len());
            let mv = Move::Swap {
                route_a,
                pos_a,
                route_b,
                pos_b,
            };
            if !feasible(&mv, solution, instance) {
                continue;
            }
            let d = delta(&mv, solution, instance);
            let better = match best {
                Some((_, best_d)) => d < best_d,
                None => true,
            };
            if better {
                best = Some((mv, d));
            }
        }
        best.map(|(mv, _)| mv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::route::Route;

    fn line_instance() -> Instance {
        let coords = [(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)];
        let dist = coords
            .iter()
            .map(|&(x1, y1)| {
                coords
                    .iter()
                    .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                    .collect()
            })
            .collect();
        Instance::new(vec![0, 1, 1, 1], dist, 2, None).unwrap()
    }

    fn route_of(instance: &Instance, customers: &[usize]) -> Route {
        let mut r = Route::new();
        for &c in customers {
            r.push(c);
        }
        r.recompute(instance);
        r
    }

    #[test]
    fn finds_improving_swap_between_two_routes() {
        let inst = line_instance();
        // [1,3] and [2] is worse than [1,2] and [3]; swap should fix it.
        let sol = Solution::new(vec![route_of(&inst, &[1, 3]), route_of(&inst, &[2])]);
        let mv = SwapNeighborhood.best_improving(&sol, &inst);
        assert!(mv.is_some());
        let mut mutated = sol.clone();
        mutated.apply(&mv.unwrap(), &inst);
        assert!(mutated.cost() < sol.cost());
    }

    #[test]
    fn no_improving_move_on_single_route() {
        let inst = line_instance();
        let sol = Solution::new(vec![route_of(&inst, &[1, 2, 3])]);
        assert!(SwapNeighborhood.best_improving(&sol, &inst).is_none());
    }
}
