//! Particle and phase-space state types.
//!
//! A particle's state is the 6-component vector `[x, y, z, vx, vy, vz]`.
//! Motion is confined to the x-y plane, so z and vz are zeroed at
//! construction and stay zero under the planar force model.

use nalgebra::{SVector, Vector3};
use serde::{Deserialize, Serialize};

/// Phase-space state [x, y, z, vx, vy, vz].
pub type State6 = SVector<f64, 6>;

/// A charged particle as supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleSpec {
    /// Unique id within a request
    pub id: String,
    pub q: f64,  // charge (C)
    pub m: f64,  // mass (kg), must be > 0
    pub x: f64,  // initial position x (m)
    pub y: f64,  // initial position y (m)
    pub vx: f64, // initial velocity x (m/s)
    pub vy: f64, // initial velocity y (m/s)
}

impl ParticleSpec {
    /// Initial phase-space state with z = 0 and vz = 0 enforced.
    pub fn initial_state(&self) -> State6 {
        State6::from_row_slice(&[self.x, self.y, 0.0, self.vx, self.vy, 0.0])
    }
}

/// Velocity block [vx, vy, vz] of a state vector.
pub fn velocity(state: &State6) -> Vector3<f64> {
    Vector3::new(state[3], state[4], state[5])
}
