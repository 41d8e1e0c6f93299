use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::evaluation::cost::delta;
use crate::moves::Move;
use crate::neighborhoods::{best_improving_over, Neighborhood, RANDOM_ATTEMPT_BUDGET};

/// Reverses a contiguous segment within a single route. Always feasible:
/// reversal never changes a route's load.
pub struct TwoOptNeighborhood;

fn enumerate(solution: &Solution) -> Vec<Move> {
    let mut moves = Vec::new();
    let routes = solution.routes();
    for (route, r) in routes.iter().enumerate() {
        let len = r.len();
        for a in 0..len {
            for b in (a + 1)..len {
                moves.push(Move::TwoOpt { route, a, b });
            }
        }
    }
    moves
}

impl Neighborhood for TwoOptNeighborhood {
    fn best_improving(&self, solution: &Solution, instance: &Instance) -> Option<Move> {
        let candidates = enumerate(solution);
        best_improving_over(candidates, |mv| Some(delta(mv, solution, instance)))
    }

    fn random(&self, solution: &Solution, instance: &Instance, rng: &mut ChaCha8Rng) -> Option<Move> {
        let routes = solution.routes();
        let eligible: Vec<usize> = (0..routes.len()).filter(|&i| routes[i].len() >= 2).collect();
        if eligible.is_empty() {
            return None;
        }
        let mut best: Option<(Move, f64)> = None;
        for _ in 0..RANDOM_ATTEMPT_BUDGET {
            let route = eligible[rng.gen_range(0..eligible.len())];
            let len = routes[route].len();
            let mut a = rng.gen_range(0..len);
            let mut b = rng.gen_range(0..len);
            if a == b {
                continue;
            }
            if a > b {
                std::mem::swap(&mut a, &mut b);
            }
            let mv = Move::TwoOpt { route, a, b };
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
        Instance::new(vec![0, 1, 1, 1], dist, 3, None).unwrap()
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
    fn reverses_out_of_order_segment_to_reduce_cost() {
        let inst = line_instance();
        let sol = Solution::new(vec![route_of(&inst, &[1, 3, 2])]);
        let mv = TwoOptNeighborhood.best_improving(&sol, &inst).unwrap();
        let mut mutated = sol.clone();
        mutated.apply(&mv, &inst);
        assert_eq!(mutated.cost(), 6.0);
    }
}
