use serde::{Deserialize, Serialize};

use crate::error::SolverError;

/// Which neighbourhood a `vnd.neighborhoods` entry names. Also the pool
/// the SA+Tabu outer loop samples from when it picks a random neighbourhood.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NeighborhoodKind {
    Swap,
    Relocate,
    TwoOpt,
    CrossExchange,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulatedAnnealingConfig {
    pub initial_temperature: f64,
    pub final_temperature: f64,
    pub alpha: f64,
    pub iterations_per_temperature: usize,
}

impl Default for SimulatedAnnealingConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            final_temperature: 1.0,
            alpha: 0.95,
            iterations_per_temperature: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TabuSearchConfig {
    pub tabu_tenure: u64,
    pub tabu_tenure_random_range: u64,
    pub aspiration_enabled: bool,
}

impl Default for TabuSearchConfig {
    fn default() -> Self {
        Self {
            tabu_tenure: 10,
            tabu_tenure_random_range: 5,
            aspiration_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VndConfig {
    pub neighborhoods: Vec<NeighborhoodKind>,
    pub max_iterations_without_improvement: usize,
    /// Maximum segment length `L` for cross-exchange (open question in the
    /// design notes, resolved here with the spec's suggested default of 3).
    pub max_segment_length: usize,
    /// `vnd_every`: the outer loop re-runs VND intensification every this
    /// many accepted iterations (open question in the design notes — the
    /// distilled option list folds this into `vnd.*` rather than inventing
    /// a new top-level section for one field).
    pub intensification_period: u64,
}

impl Default for VndConfig {
    fn default() -> Self {
        Self {
            neighborhoods: vec![
                NeighborhoodKind::Swap,
                NeighborhoodKind::Relocate,
                NeighborhoodKind::TwoOpt,
                NeighborhoodKind::CrossExchange,
            ],
            max_iterations_without_improvement: 1000,
            max_segment_length: 3,
            intensification_period: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalSearchConfig {
    pub max_iterations: usize,
    pub max_iterations_without_improvement: usize,
}

impl Default for LocalSearchConfig {
    fn default() -> Self {
        Self {
            max_iterations: 100_000,
            max_iterations_without_improvement: 2_000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitialSolutionConfig {
    pub randomness: f64,
}

impl Default for InitialSolutionConfig {
    fn default() -> Self {
        Self { randomness: 0.3 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneralConfig {
    pub seed: Option<u64>,
    pub time_limit_seconds: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityConfig {
    pub target_gap_percentage: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            target_gap_percentage: 7.0,
        }
    }
}

/// The full recognised configuration surface from the spec's external
/// interfaces section, one nested struct per dotted option prefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub simulated_annealing: SimulatedAnnealingConfig,
    pub tabu_search: TabuSearchConfig,
    pub vnd: VndConfig,
    pub local_search: LocalSearchConfig,
    pub initial_solution: InitialSolutionConfig,
    pub general: GeneralConfig,
    pub quality: QualityConfig,
}

impl Config {
    /// Screens the `InvalidConfig` cases from the error design up front, so
    /// that construction, VND, and the outer loop never need to fail once
    /// past this call.
    pub fn validate(&self) -> Result<(), SolverError> {
        let sa = &self.simulated_annealing;
        if !(sa.alpha > 0.0 && sa.alpha < 1.0) {
            return Err(SolverError::InvalidConfig(format!(
                "simulated_annealing.alpha must be in (0, 1), got {}",
                sa.alpha
            )));
        }
        if !(sa.initial_temperature > 0.0) {
            return Err(SolverError::InvalidConfig(
                "simulated_annealing.initial_temperature must be positive".into(),
            ));
        }
        if !(sa.final_temperature > 0.0) {
            return Err(SolverError::InvalidConfig(
                "simulated_annealing.final_temperature must be positive".into(),
            ));
        }
        if sa.final_temperature >= sa.initial_temperature {
            return Err(SolverError::InvalidConfig(
                "simulated_annealing.final_temperature must be < initial_temperature".into(),
            ));
        }
        if sa.iterations_per_temperature == 0 {
            return Err(SolverError::InvalidConfig(
                "simulated_annealing.iterations_per_temperature must be positive".into(),
            ));
        }

        if self.vnd.neighborhoods.is_empty() {
            return Err(SolverError::InvalidConfig(
                "vnd.neighborhoods must not be empty".into(),
            ));
        }
        if self.vnd.max_iterations_without_improvement == 0 {
            return Err(SolverError::InvalidConfig(
                "vnd.max_iterations_without_improvement must be positive".into(),
            ));
        }
        if self.vnd.max_segment_length == 0 {
            return Err(SolverError::InvalidConfig(
                "vnd.max_segment_length must be positive".into(),
            ));
        }
        if self.vnd.intensification_period == 0 {
            return Err(SolverError::InvalidConfig(
                "vnd.intensification_period must be positive".into(),
            ));
        }

        if !(0.0..=1.0).contains(&self.initial_solution.randomness) {
            return Err(SolverError::InvalidConfig(
                "initial_solution.randomness must be in [0, 1]".into(),
            ));
        }

        if self.local_search.max_iterations == 0 {
            return Err(SolverError::InvalidConfig(
                "local_search.max_iterations must be positive".into(),
            ));
        }

        if let Some(limit) = self.general.time_limit_seconds {
            if !(limit > 0.0) {
                return Err(SolverError::InvalidConfig(
                    "general.time_limit_seconds must be positive when set".into(),
                ));
            }
        }

        Ok(())
    }
}
