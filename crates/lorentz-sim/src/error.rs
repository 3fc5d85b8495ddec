//! Error taxonomy for the simulation engine.
//!
//! Structural errors abort the whole simulation with no partial result.
//! Degenerate physical inputs to the validators (zero charge or zero field)
//! are reported as data, not as errors.

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum SimError {
    /// Mass must be strictly positive; acceleration divides by it.
    #[error("invalid mass {0}: mass must be > 0")]
    InvalidMass(f64),

    /// Integrator name did not exactly match a known method.
    #[error("unknown integrator {0:?}: expected \"RK4\" or \"Euler\"")]
    UnknownIntegrator(String),

    /// Empty particle list or duplicate particle ids.
    #[error("invalid particle list: {0}")]
    InvalidParticleList(String),

    /// Particle count above the supported bound.
    #[error("too many particles: {count} (limit {limit})")]
    TooManyParticles { count: usize, limit: usize },

    /// Time grid invariants violated (dt > 0, t_final > t0).
    #[error("invalid time grid: t0={t0}, t_final={t_final}, dt={dt}")]
    InvalidTimeGrid { t0: f64, t_final: f64, dt: f64 },

    /// The run was cancelled; partial trajectories are discarded.
    #[error("simulation cancelled")]
    Cancelled,
}
