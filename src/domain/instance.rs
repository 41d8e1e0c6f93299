use crate::error::SolverError;

/// Immutable problem data, shared read-only by every other component.
///
/// Customers are numbered `1..=n`; `0` is the depot. `dist` and `demand`
/// are both indexed `0..=n`, with `demand[0]` unused (kept at `0` by
/// construction) so that depot/customer ids can be used interchangeably
/// as matrix indices without an off-by-one translation at every call site.
#[derive(Debug, Clone)]
pub struct Instance {
    n: usize,
    capacity: u64,
    demand: Vec<u64>,
    dist: Vec<Vec<f64>>,
    best_known: Option<f64>,
}

impl Instance {
    pub const DEPOT: usize = 0;

    /// Builds an `Instance` from already-parsed arrays, performing the
    /// structural validation a parser collaborator would otherwise skip.
    ///
    /// `demand` and `dist` must be indexed `0..=n` (depot included);
    /// `demand[0]` is ignored and treated as zero.
    pub fn new(
        demand: Vec<u64>,
        dist: Vec<Vec<f64>>,
        capacity: u64,
        best_known: Option<f64>,
    ) -> Result<Self, SolverError> {
        if capacity == 0 {
            return Err(SolverError::InvalidInstance(
                "vehicle capacity must be positive".into(),
            ));
        }
        if demand.is_empty() {
            return Err(SolverError::InvalidInstance(
                "demand vector must include at least the depot entry".into(),
            ));
        }
        let n = demand.len() - 1;

        if dist.len() != n + 1 {
            return Err(SolverError::InvalidInstance(format!(
                "distance matrix has {} rows, expected {}",
                dist.len(),
                n + 1
            )));
        }
        for (i, row) in dist.iter().enumerate() {
            if row.len() != n + 1 {
                return Err(SolverError::InvalidInstance(format!(
                    "distance matrix row {i} has {} columns, expected {}",
                    row.len(),
                    n + 1
                )));
            }
        }
        for i in 0..=n {
            if dist[i][i] != 0.0 {
                return Err(SolverError::InvalidInstance(format!(
                    "dist[{i}][{i}] must be zero"
                )));
            }
            for j in 0..=n {
                if dist[i][j] < 0.0 {
                    return Err(SolverError::InvalidInstance(format!(
                        "dist[{i}][{j}] is negative"
                    )));
                }
                if (dist[i][j] - dist[j][i]).abs() > 1e-9 {
                    return Err(SolverError::InvalidInstance(format!(
                        "distance matrix is not symmetric at ({i}, {j})"
                    )));
                }
            }
        }

        for (customer, &d) in demand.iter().enumerate().skip(1) {
            if d > capacity {
                return Err(SolverError::InvalidInstance(format!(
                    "customer {customer} has demand {d} exceeding capacity {capacity}"
                )));
            }
        }

        Ok(Self {
            n,
            capacity,
            demand,
            dist,
            best_known,
        })
    }

    #[inline]
    pub fn n(&self) -> usize {
        self.n
    }

    #[inline]
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    #[inline]
    pub fn demand(&self, customer: usize) -> u64 {
        self.demand[customer]
    }

    #[inline]
    pub fn dist(&self, i: usize, j: usize) -> f64 {
        self.dist[i][j]
    }

    pub fn best_known(&self) -> Option<f64> {
        self.best_known
    }

    /// Gap percentage of `cost` against the instance's best-known objective,
    /// or `None` when no reference objective was supplied.
    pub fn gap_percentage(&self, cost: f64) -> Option<f64> {
        self.best_known
            .filter(|&bk| bk > 0.0)
            .map(|bk| 100.0 * (cost - bk) / bk)
    }

    pub fn customers(&self) -> impl Iterator<Item = usize> {
        1..=self.n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_instance() -> Instance {
        // depot at (0,0), customers at (1,0) (2,0) (3,0)
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

    #[test]
    fn rejects_demand_over_capacity() {
        let dist = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let err = Instance::new(vec![0, 5], dist, 2, None).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInstance(_)));
    }

    #[test]
    fn rejects_asymmetric_matrix() {
        let dist = vec![vec![0.0, 1.0], vec![2.0, 0.0]];
        let err = Instance::new(vec![0, 1], dist, 2, None).unwrap_err();
        assert!(matches!(err, SolverError::InvalidInstance(_)));
    }

    #[test]
    fn accepts_valid_instance() {
        let inst = square_instance();
        assert_eq!(inst.n(), 3);
        assert_eq!(inst.dist(0, 3), 3.0);
    }

    #[test]
    fn gap_percentage_computes_against_best_known() {
        let coords_dist = {
            let dist = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
            Instance::new(vec![0, 1], dist, 2, Some(10.0)).unwrap()
        };
        assert!((coords_dist.gap_percentage(11.0).unwrap() - 10.0).abs() < 1e-9);
        let _ = coords_dist;
    }
}
