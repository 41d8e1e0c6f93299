//! Delta-cost and feasibility evaluators, one pair per [`Move`] kind.
//!
//! Every `delta` builds the hypothetical post-move customer sequence(s) for
//! just the affected route(s) and feeds them through the same
//! [`route_distance`] function [`Route::recompute`] uses, so
//! `delta(mv, solution) == cost(apply(mv, solution)) - cost(solution)`
//! holds exactly, not just approximately (P3).

use crate::domain::instance::Instance;
use crate::domain::route::route_distance;
use crate::domain::solution::Solution;
use crate::moves::Move;

/// Cost change `mv` would cause if applied to `solution`, without mutating it.
pub fn delta(mv: &Move, solution: &Solution, instance: &Instance) -> f64 {
    match *mv {
        Move::Swap {
            route_a,
            pos_a,
            route_b,
            pos_b,
        } => {
            if route_a == route_b {
                let before = solution.route(route_a).cost();
                let mut seq = solution.route(route_a).customers().to_vec();
                seq.swap(pos_a, pos_b);
                route_distance(&seq, instance) - before
            } else {
                let ra = solution.route(route_a);
                let rb = solution.route(route_b);
                let before = ra.cost() + rb.cost();

                let mut seq_a = ra.customers().to_vec();
                let mut seq_b = rb.customers().to_vec();
                let ca = seq_a[pos_a];
                let cb = seq_b[pos_b];
                seq_a[pos_a] = cb;
                seq_b[pos_b] = ca;

                route_distance(&seq_a, instance) + route_distance(&seq_b, instance) - before
            }
        }
        Move::Relocate {
            from_route,
            from_pos,
            to_route,
            to_pos,
        } => {
            if from_route == to_route {
                let before = solution.route(from_route).cost();
                let mut seq = solution.route(from_route).customers().to_vec();
                let customer = seq.remove(from_pos);
                let adjusted = if to_pos > from_pos { to_pos - 1 } else { to_pos };
                seq.insert(adjusted, customer);
                route_distance(&seq, instance) - before
            } else {
                let before = solution.route(from_route).cost() + solution.route(to_route).cost();
                let mut seq_from = solution.route(from_route).customers().to_vec();
                let customer = seq_from.remove(from_pos);
                let mut seq_to = solution.route(to_route).customers().to_vec();
                seq_to.insert(to_pos, customer);
                route_distance(&seq_from, instance) + route_distance(&seq_to, instance) - before
            }
        }
        Move::TwoOpt { route, a, b } => {
            let before = solution.route(route).cost();
            let mut seq = solution.route(route).customers().to_vec();
            seq[a..=b].reverse();
            route_distance(&seq, instance) - before
        }
        Move::CrossExchange {
            route_a,
            a1,
            a2,
            route_b,
            b1,
            b2,
        } => {
            if route_a == route_b {
                let before = solution.route(route_a).cost();
                let seq = cross_exchange_sequence(solution.route(route_a).customers(), a1, a2, b1, b2);
                route_distance(&seq, instance) - before
            } else {
                let before = solution.route(route_a).cost() + solution.route(route_b).cost();
                let seg_a = solution.route(route_a).customers()[a1..=a2].to_vec();
                let seg_b = solution.route(route_b).customers()[b1..=b2].to_vec();

                let mut seq_a = solution.route(route_a).customers().to_vec();
                seq_a.splice(a1..=a2, seg_b);
                let mut seq_b = solution.route(route_b).customers().to_vec();
                seq_b.splice(b1..=b2, seg_a);

                route_distance(&seq_a, instance) + route_distance(&seq_b, instance) - before
            }
        }
    }
}

fn cross_exchange_sequence(customers: &[usize], a1: usize, a2: usize, b1: usize, b2: usize) -> Vec<usize> {
    let (first, second) = if a1 < b1 {
        ((a1, a2), (b1, b2))
    } else {
        ((b1, b2), (a1, a2))
    };
    let mut seq = customers.to_vec();
    let seg_first = seq[first.0..=first.1].to_vec();
    let seg_second = seq[second.0..=second.1].to_vec();
    seq.splice(second.0..=second.1, seg_first);
    seq.splice(first.0..=first.1, seg_second);
    seq
}

/// Whether applying `mv` to `solution` keeps every affected route's load at
/// or under capacity. Intra-route moves never change any route's load and
/// are therefore always feasible; 2-opt is always intra-route.
pub fn feasible(mv: &Move, solution: &Solution, instance: &Instance) -> bool {
    let cap = instance.capacity();
    match *mv {
        Move::Swap {
            route_a,
            pos_a,
            route_b,
            pos_b,
        } => {
            if route_a == route_b {
                return true;
            }
            let ca = solution.route(route_a).customer_at(pos_a);
            let cb = solution.route(route_b).customer_at(pos_b);
            let load_a = solution.route(route_a).load() - instance.demand(ca) + instance.demand(cb);
            let load_b = solution.route(route_b).load() - instance.demand(cb) + instance.demand(ca);
            load_a <= cap && load_b <= cap
        }
        Move::Relocate {
            from_route,
            to_route,
            from_pos,
            ..
        } => {
            if from_route == to_route {
                return true;
            }
            let customer = solution.route(from_route).customer_at(from_pos);
            let load_to = solution.route(to_route).load() + instance.demand(customer);
            load_to <= cap
        }
        Move::TwoOpt { .. } => true,
        Move::CrossExchange {
            route_a,
            a1,
            a2,
            route_b,
            b1,
            b2,
        } => {
            if route_a == route_b {
                return true;
            }
            let demand_of = |route: usize, lo: usize, hi: usize| -> u64 {
                solution.route(route).customers()[lo..=hi]
                    .iter()
                    .map(|&c| instance.demand(c))
                    .sum()
            };
            let seg_a_demand = demand_of(route_a, a1, a2);
            let seg_b_demand = demand_of(route_b, b1, b2);
            let load_a = solution.route(route_a).load() - seg_a_demand + seg_b_demand;
            let load_b = solution.route(route_b).load() - seg_b_demand + seg_a_demand;
            load_a <= cap && load_b <= cap
        }
    }
}
