use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::domain::instance::Instance;
use crate::domain::solution::Solution;
use crate::evaluation::cost::{delta, feasible};
use crate::moves::Move;
use crate::neighborhoods::{best_improving_over, Neighborhood, RANDOM_ATTEMPT_BUDGET};

/// Swaps two non-empty, bounded-length contiguous segments between two
/// distinct routes. Segment length ranges `1..=max_segment_length`.
pub struct CrossExchangeNeighborhood {
    pub max_segment_length: usize,
}

fn segments(len: usize, max_segment_length: usize) -> Vec<(usize, usize)> {
    let mut out = Vec::new();
    for start in 0..len {
        for seg_len in 1..=max_segment_length.min(len - start) {
            out.push((start, start + seg_len - 1));
        }
    }
    out
}

fn enumerate(solution: &Solution, max_segment_length: usize) -> Vec<Move> {
    let mut moves = Vec::new();
    let routes = solution.routes();
    for route_a in 0..routes.len() {
        for route_b in (route_a + 1)..routes.len() {
            let segs_a = segments(routes[route_a].len(), max_segment_length);
            let segs_b = segments(routes[route_b].len(), max_segment_length);
            for &(a1, a2) in &segs_a {
                for &(b1, b2) in &segs_b {
                    moves.push(Move::CrossExchange {
                        route_a,
                        a1,
                        a2,
                        route_b,
                        b1,
                        b2,
                    });
                }
            }
        }
    }
    moves
}

impl Neighborhood for CrossExchangeNeighborhood {
    fn best_improving(&self, solution: &Solution, instance: &Instance) -> Option<Move> {
        let candidates = enumerate(solution, self.max_segment_length);
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
        let eligible: Vec<usize> = (0..routes.len()).filter(|&i| !routes[i].is_empty()).collect();
        if eligible.len() < 2 {
            return None;
        }
        let mut best: Option<(Move, f64)> = None;
        for _ in 0..RANDOM_ATTEMPT_BUDGET {
            let route_a = eligible[rng.gen_range(0..eligible.len())];
            let route_b = eligible[rng.gen_range(0..eligible.len())];
            if route_a == route_b {
                continue;
            }
            let segs_a = segments(routes[route_a].len(), self.max_segment_length);
            let segs_b = segments(routes[route_b].len(), self.max_segment_length);
            if segs_a.is_empty() || segs_b.is_empty() {
                continue;
            }
            let (a1, a2) = segs_a[rng.gen_range(0..segs_a.len())];
            let (b1, b2) = segs_b[rng.gen_range(0..segs_b.len())];
            let mv = Move::CrossExchange {
                route_a,
                a1,
                a2,
                route_b,
                b1,
                b2,
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
