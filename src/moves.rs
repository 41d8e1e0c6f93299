//! The tagged-variant `Move` type and its canonical `Signature`.
//!
//! A `Move` is produced by exactly one neighbourhood enumerator, scored by
//! `evaluation::cost`, and consumed at most once by `Solution::apply`. It is
//! never retained beyond the iteration that created it.

/// One local modification of a [`crate::Solution`], tagged by neighbourhood kind.
///
/// Route indices (`route`, `route_a`, `route_b`, ...) are stable for the
/// lifetime of one `solve()` call: routes are only ever appended to the
/// solution (to hold a fresh empty route), never removed or reordered, so
/// an index captured when a move is generated is still valid when it is
/// applied moments later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Exchange the customers at `pos_a` in `route_a` and `pos_b` in `route_b`.
    Swap {
        route_a: usize,
        pos_a: usize,
        route_b: usize,
        pos_b: usize,
    },
    /// Remove the customer at `from_pos` in `from_route` and insert it at
    /// `to_pos` in `to_route` (before the customer currently at `to_pos`,
    /// or at the end of the route when `to_pos == to_route.len()`).
    Relocate {
        from_route: usize,
        from_pos: usize,
        to_route: usize,
        to_pos: usize,
    },
    /// Reverse the contiguous segment `[a..=b]` (`a < b`) within `route`.
    TwoOpt { route: usize, a: usize, b: usize },
    /// Swap segment `route_a[a1..=a2]` with segment `route_b[b1..=b2]`.
    CrossExchange {
        route_a: usize,
        a1: usize,
        a2: usize,
        route_b: usize,
        b1: usize,
        b2: usize,
    },
}

/// Canonical key a `Move` maps to for tabu bookkeeping: small, and stable
/// under the trivial relabellings the move's own kind considers symmetric
/// (e.g. swapping the two arguments of a `Swap`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Signature {
    /// Unordered pair of customer ids exchanged.
    Swap(usize, usize),
    /// The relocated customer and the stable id of its destination route.
    Relocate(usize, usize),
    /// Unordered pair of customer ids at the two changed edge endpoints.
    TwoOpt(usize, usize),
    /// Unordered pair of the two swapped segments' head customer ids.
    CrossExchange(usize, usize),
}

fn sorted_pair(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Derives a [`Signature`] for `mv` given the solution it would apply to
/// (customer identities at the move's positions are read, not the move's
/// raw indices, so the signature reflects *what* changes, not *where*).
pub fn signature(mv: &Move, solution: &crate::domain::solution::Solution) -> Signature {
    match *mv {
        Move::Swap {
            route_a,
            pos_a,
            route_b,
            pos_b,
        } => {
            let ca = solution.route(route_a).customer_at(pos_a);
            let cb = solution.route(route_b).customer_at(pos_b);
            let (x, y) = sorted_pair(ca, cb);
            Signature::Swap(x, y)
        }
        Move::Relocate {
            from_route,
            from_pos,
            to_route,
            ..
        } => {
            let customer = solution.route(from_route).customer_at(from_pos);
            Signature::Relocate(customer, to_route)
        }
        Move::TwoOpt { route, a, b } => {
            let ca = solution.route(route).customer_at(a);
            let cb = solution.route(route).customer_at(b);
            let (x, y) = sorted_pair(ca, cb);
            Signature::TwoOpt(x, y)
        }
        Move::CrossExchange {
            route_a,
            a1,
            route_b,
            b1,
            ..
        } => {
            let ha = solution.route(route_a).customer_at(a1);
            let hb = solution.route(route_b).customer_at(b1);
            let (x, y) = sorted_pair(ha, hb);
            Signature::CrossExchange(x, y)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sorted_pair_is_order_independent() {
        assert_eq!(sorted_pair(3, 1), sorted_pair(1, 3));
    }
}
