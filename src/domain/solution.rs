use crate::domain::instance::Instance;
use crate::domain::route::Route;
use crate::moves::Move;

/// An ordered list of routes plus a cached total cost.
///
/// Invariants enforced by every public mutator:
/// 1. every customer `1..=n` appears in exactly one route exactly once;
/// 2. every route's load is at most the instance capacity;
/// 3. `cost()` equals the sum of route contributions, recomputed from
///    scratch on every `apply` (never accumulated by delta), so it never
///    drifts from a full recomputation.
///
/// Empty routes are kept during search (they may absorb a future
/// `Relocate`) and are only filtered out by [`Solution::non_empty_routes`],
/// the seam an external writer collaborator is expected to use.
#[derive(Debug, Clone)]
pub struct Solution {
    routes: Vec<Route>,
    total_cost: f64,
}

impl Solution {
    /// Builds a `Solution` from already-populated routes, computing the
    /// cached total from their (already `recompute`d) per-route costs.
    pub fn new(routes: Vec<Route>) -> Self {
        let total_cost = routes.iter().map(Route::cost).sum();
        Self { routes, total_cost }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn route(&self, idx: usize) -> &Route {
        &self.routes[idx]
    }

    pub fn num_routes(&self) -> usize {
        self.routes.len()
    }

    pub fn non_empty_routes(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter().filter(|r| !r.is_empty())
    }

    #[inline]
    pub fn cost(&self) -> f64 {
        self.total_cost
    }

    /// Mutates the routes affected by `mv`, recomputes their cached
    /// load/cost from scratch, and re-sums `total_cost`.
    ///
    /// Callers must have already screened `mv` with
    /// `evaluation::cost::feasible` — this is a programmer error otherwise,
    /// not a recoverable failure (see the design notes' propagation
    /// policy). In debug builds this is checked with `debug_assert!`.
    pub fn apply(&mut self, mv: &Move, instance: &Instance) {
        let touched = self.mutate(mv);
        for &idx in &touched {
            self.routes[idx].recompute(instance);
            debug_assert!(
                self.routes[idx].load() <= instance.capacity(),
                "apply produced an infeasible route: load {} > capacity {}",
                self.routes[idx].load(),
                instance.capacity()
            );
        }
        self.total_cost = self.routes.iter().map(Route::cost).sum();
    }

    /// Performs the raw customer-sequence mutation for `mv`, returning the
    /// set of route indices that changed (and therefore need `recompute`).
    fn mutate(&mut self, mv: &Move) -> Vec<usize> {
        match *mv {
            Move::Swap {
                route_a,
                pos_a,
                route_b,
                pos_b,
            } => {
                if route_a == route_b {
                    self.routes[route_a].customers_mut().swap(pos_a, pos_b);
                    vec![route_a]
                } else {
                    let ca = self.routes[route_a].customer_at(pos_a);
                    let cb = self.routes[route_b].customer_at(pos_b);
                    self.routes[route_a].customers_mut()[pos_a] = cb;
                    self.routes[route_b].customers_mut()[pos_b] = ca;
                    vec![route_a, route_b]
                }
            }
            Move::Relocate {
                from_route,
                from_pos,
                to_route,
                to_pos,
            } => {
                if from_route == to_route {
                    let customer = self.routes[from_route].customers_mut().remove(from_pos);
                    let adjusted = if to_pos > from_pos { to_pos - 1 } else { to_pos };
                    self.routes[from_route]
                        .customers_mut()
                        .insert(adjusted, customer);
                    vec![from_route]
                } else {
                    let customer = self.routes[from_route].customers_mut().remove(from_pos);
                    self.routes[to_route].customers_mut().insert(to_pos, customer);
                    vec![from_route, to_route]
                }
            }
            Move::TwoOpt { route, a, b } => {
                self.routes[route].customers_mut()[a..=b].reverse();
                vec![route]
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
                    self.cross_exchange_same_route(route_a, a1, a2, b1, b2);
                    vec![route_a]
                } else {
                    let seg_a: Vec<usize> = self.routes[route_a].customers()[a1..=a2].to_vec();
                    let seg_b: Vec<usize> = self.routes[route_b].customers()[b1..=b2].to_vec();
                    self.routes[route_a]
                        .customers_mut()
                        .splice(a1..=a2, seg_b);
                    self.routes[route_b]
                        .customers_mut()
                        .splice(b1..=b2, seg_a);
                    vec![route_a, route_b]
                }
            }
        }
    }

    /// Cross-exchange of two disjoint segments within the same route.
    /// Splices the later segment first so the earlier segment's indices
    /// stay valid for the second splice.
    fn cross_exchange_same_route(&mut self, route: usize, a1: usize, a2: usize, b1: usize, b2: usize) {
        let (first, second) = if a1 < b1 {
            ((a1, a2), (b1, b2))
        } else {
            ((b1, b2), (a1, a2))
        };
        let seg_first: Vec<usize> = self.routes[route].customers()[first.0..=first.1].to_vec();
        let seg_second: Vec<usize> = self.routes[route].customers()[second.0..=second.1].to_vec();

        self.routes[route]
            .customers_mut()
            .splice(second.0..=second.1, seg_first);
        self.routes[route]
            .customers_mut()
            .splice(first.0..=first.1, seg_second);
    }

    /// Recomputes every route and the total cost from scratch and asserts
    /// the solution's invariants. Used only in tests/debug; callers on the
    /// hot path rely on the incrementally maintained cache instead.
    pub fn verify(&self, instance: &Instance) {
        let mut seen = vec![false; instance.n() + 1];
        let mut recomputed_total = 0.0;
        for route in &self.routes {
            assert!(
                route.load() <= instance.capacity(),
                "route load {} exceeds capacity {}",
                route.load(),
                instance.capacity()
            );
            let mut r = route.clone();
            r.recompute(instance);
            assert!(
                (r.cost() - route.cost()).abs() < 1e-6,
                "cached route cost {} does not match recomputation {}",
                route.cost(),
                r.cost()
            );
            for &c in route.customers() {
                assert!(!seen[c], "customer {c} appears in more than one route");
                seen[c] = true;
            }
            recomputed_total += r.cost();
        }
        for c in instance.customers() {
            assert!(seen[c], "customer {c} is missing from the solution");
        }
        assert!(
            (recomputed_total - self.total_cost).abs() < 1e-6,
            "cached total cost {} does not match recomputation {}",
            self.total_cost,
            recomputed_total
        );
    }
}

impl std::fmt::Display for Solution {
    /// The textual form the writer collaborator is expected to emit:
    /// one `Route #k: c1 c2 ...` line per non-empty route (1-indexed),
    /// followed by `Cost <total>`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (k, route) in self.non_empty_routes().enumerate() {
            write!(f, "Route #{}:", k + 1)?;
            for c in route.customers() {
                write!(f, " {c}")?;
            }
            writeln!(f)?;
        }
        write!(f, "Cost {}", self.total_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn two_opt_reverses_segment_and_updates_cost() {
        let inst = line_instance();
        let mut sol = Solution::new(vec![route_of(&inst, &[1, 3, 2])]);
        sol.apply(&Move::TwoOpt { route: 0, a: 1, b: 2 }, &inst);
        assert_eq!(sol.route(0).customers(), &[1, 2, 3]);
        assert_eq!(sol.cost(), 6.0);
        sol.verify(&inst);
    }

    #[test]
    fn relocate_moves_customer_between_routes() {
        let inst = line_instance();
        let mut sol = Solution::new(vec![route_of(&inst, &[1, 2]), route_of(&inst, &[3])]);
        sol.apply(
            &Move::Relocate {
                from_route: 1,
                from_pos: 0,
                to_route: 0,
                to_pos: 2,
            },
            &inst,
        );
        assert_eq!(sol.route(0).customers(), &[1, 2, 3]);
        assert!(sol.route(1).is_empty());
        sol.verify(&inst);
    }

    #[test]
    fn swap_across_routes_preserves_partition() {
        let inst = line_instance();
        let mut sol = Solution::new(vec![route_of(&inst, &[1, 2]), route_of(&inst, &[3])]);
        sol.apply(
            &Move::Swap {
                route_a: 0,
                pos_a: 1,
                route_b: 1,
                pos_b: 0,
            },
            &inst,
        );
        assert_eq!(sol.route(0).customers(), &[1, 3]);
        assert_eq!(sol.route(1).customers(), &[2]);
        sol.verify(&inst);
    }

    #[test]
    fn display_matches_writer_textual_form() {
        let inst = line_instance();
        let sol = Solution::new(vec![route_of(&inst, &[1, 2, 3])]);
        assert_eq!(format!("{sol}"), "Route #1: 1 2 3\nCost 6");
    }
}
