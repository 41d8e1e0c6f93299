pub mod cost;

pub use cost::{delta, feasible};
