use thiserror::Error;

/// Typed failure surface for the solver. Once an [`crate::Instance`] and
/// [`crate::Config`] have passed validation, nothing downstream of them
/// (construction, VND, the outer loop) can fail — see the propagation
/// policy in the design notes.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("invalid instance: {0}")]
    InvalidInstance(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),
}
