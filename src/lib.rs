//! One-dimensional electrostatic particle-in-cell model of a planar vacuum
//! diode, run until the emitted beam reaches its space-charge-limited steady
//! state and the gap drains.

pub mod discretization;
pub mod error;
pub mod models;
pub mod numerics;
pub mod physics;
pub mod processing;

pub use error::PicError;
pub use models::diode::DiodeParams;
pub use numerics::transient::{LoopState, ParticleInCell, RunResult, StepRecord};
pub use physics::weighting::WeightingScheme;
