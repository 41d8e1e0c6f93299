use cvrp_solver::{solve, Config, Instance};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Builds the toy four-customer instance used as a demo (depot plus
/// customers sitting on a unit square) and runs the solver over it with
/// the default configuration, printing the textual solution form.
fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let coords = [(0.0, 0.0), (0.0, 1.0), (1.0, 1.0), (1.0, 0.0)];
    let dist: Vec<Vec<f64>> = coords
        .iter()
        .map(|&(x1, y1)| {
            coords
                .iter()
                .map(|&(x2, y2)| ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt())
                .collect()
        })
        .collect();
    let demand = vec![0, 1, 1, 1];

    let instance = Instance::new(demand, dist, 2, None).expect("demo instance is well-formed");
    let mut config = Config::default();
    config.general.seed = Some(42);

    match solve(&instance, &config) {
        Ok((solution, diagnostics)) => {
            println!("{solution}");
            println!(
                "iterations={} best_iteration={} accepted={}",
                diagnostics.iterations, diagnostics.best_iteration, diagnostics.accepted
            );
        }
        Err(err) => eprintln!("solve failed: {err}"),
    }
}
