use thiserror::Error;

#[derive(Debug, Error)]
pub enum PicError {
    #[error("particle at x = {x:.6e} m lies outside the grid [0, {length:.6e}] m")]
    DomainViolation { x: f64, length: f64 },
    #[error("weight {weight} outside [0, 1] for particle at x = {x:.6e} m")]
    WeightOutOfRange { weight: f64, x: f64 },
    #[error("field derivative is undefined at node {node}")]
    DerivativeDegenerate { node: usize },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("run did not drain within {steps} steps")]
    StepLimitExceeded { steps: u64 },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to parse configuration: {0}")]
    Toml(#[from] toml::de::Error),
}
