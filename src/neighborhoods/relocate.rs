use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::evaluation::cost::{delta, feasible};
use crate::moves::Move;
use crate::neighborhoods::{best_improving_over, Neighborhood, RANDOM_ATTEMPT_BUDGET};

/// Removes a customer from its route and reinserts it elsewhere — in
/// another route, or at a non-adjacent position in the same route (a
/// same-route relocate to the position it already occupies is a no-op by
/// construction and is skipped by the enumerator).
pub struct RelocateNeighborhood;

fn adjusted_target(from_pos: usize, to_pos: usize) -> usize {
    if to_pos > from_pos {
        to_pos - 1
    } else {
        to_pos
    }
}

fn enumerate(solution: &Solution) -> Vec<Move> {
    let mut moves = Vec::new();
    let routes = solution.routes();
    for from_route in 0..routes.len() {
        for from_pos in 0..routes[from_route].len() {
            for to_route in 0..routes.len() {
                let to_len = routes[to_route].len();
                for to_pos in 0..=to_len {
                    if to_route == from_route && adjusted_target(from_pos, to_pos) == from_pos {
                        continue;
                    }
                    moves.push(Move::Relocate {
                        from_route,
                        from_pos,
                        to_route,
                        to_pos,
                    });
                }
            }
        }
    }
    moves
}

impl Neighborhood for RelocateNeighborhood {
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
        let non_empty: Vec<usize> = (0..routes.len()).filter(|&i| !routes[i].is_empty()).collect();
        if non_empty.is_empty() || routes.len() < 2 {
            return None;
        }
        let mut best: Option<(Move, f64)> = None;
        for _ in 0..RANDOM_ATTEMPT_BUDGET {
            let from_route = non_empty[rng.gen_range(0..non_empty.len())];
            let from_pos = rng.gen_range(0..routes[from_route].len());
            let to_route = rng.gen_range(0..routes.len());
            let to_len = routes[to_route].len();
            let to_pos = rng.gen_range(0..=to_len);
            if to_route == from_route && adjusted_target(from_pos, to_pos) == from_pos {
                continue;
            }
            let mv = Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
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
    fn relocate_can_merge_two_routes_into_one() {
        let inst = line_instance();
        let sol = Solution::new(vec![route_of(&inst, &[1, 2]), route_of(&inst, &[3])]);
        let mv = RelocateNeighborhood.best_improving(&sol, &inst);
        assert!(mv.is_some());
        let mut mutated = sol.clone();
        mutated.apply(&mv.unwrap(), &inst);
        assert!(mutated.cost() < sol.cost());
    }

    #[test]
    fn no_adjacent_no_op_moves_enumerated() {
        let inst = line_instance();
        let sol = Solution::new(vec![route_of(&inst, &[1, 2, 3])]);
        for mv in enumerate(&sol) {
            if let Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } = mv
            {
                if from_route == to_route {
                    assert_ne!(adjusted_target(from_pos, to_pos), from_pos);
                }
            }
        }
    }
}
