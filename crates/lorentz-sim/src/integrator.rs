//! Fixed-step time integrators.
//!
//! Two interchangeable update rules advance one 6-component state by one
//! time increment using the Lorentz-force derivative:
//! - classical 4th-order Runge-Kutta (local error O(dt^5), global O(dt^4))
//! - explicit Euler (global error O(dt))
//!
//! Selection is by exact name. Unrecognized names are rejected rather than
//! silently falling back to a default method.

use serde::{Deserialize, Serialize};

use crate::error::SimError;
use crate::field::FieldConfiguration;
use crate::force::derivative;
use crate::state::State6;

/// The closed set of supported integration methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Integrator {
    #[serde(rename = "RK4")]
    Rk4,
    #[serde(rename = "Euler")]
    Euler,
}

impl Integrator {
    /// Parse an integrator name. Exact match only: "RK4" or "Euler".
    pub fn from_name(name: &str) -> Result<Self, SimError> {
        match name {
            "RK4" => Ok(Self::Rk4),
            "Euler" => Ok(Self::Euler),
            other => Err(SimError::UnknownIntegrator(other.to_string())),
        }
    }

    /// Canonical name of the method.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rk4 => "RK4",
            Self::Euler => "Euler",
        }
    }

    /// Advance one state by one time increment dt.
    pub fn step(
        &self,
        state: &State6,
        dt: f64,
        q: f64,
        m: f64,
        fields: &FieldConfiguration,
    ) -> Result<State6, SimError> {
        match self {
            Self::Rk4 => rk4_step(state, dt, q, m, fields),
            Self::Euler => euler_step(state, dt, q, m, fields),
        }
    }
}

/// One classical RK4 step: four derivative evaluations.
///
/// k1 = f(s), k2 = f(s + dt/2 k1), k3 = f(s + dt/2 k2), k4 = f(s + dt k3),
/// next = s + dt/6 (k1 + 2 k2 + 2 k3 + k4).
pub fn rk4_step(
    state: &State6,
    dt: f64,
    q: f64,
    m: f64,
    fields: &FieldConfiguration,
) -> Result<State6, SimError> {
    let s = *state;
    let k1 = derivative(&s, q, m, fields)?;
    let k2 = derivative(&(s + 0.5 * dt * k1), q, m, fields)?;
    let k3 = derivative(&(s + 0.5 * dt * k2), q, m, fields)?;
    let k4 = derivative(&(s + dt * k3), q, m, fields)?;

    Ok(s + (dt / 6.0) * (k1 + 2.0 * k2 + 2.0 * k3 + k4))
}

/// One explicit Euler step: a single derivative evaluation.
pub fn euler_step(
    state: &State6,
    dt: f64,
    q: f64,
    m: f64,
    fields: &FieldConfiguration,
) -> Result<State6, SimError> {
    let d = derivative(state, q, m, fields)?;
    Ok(*state + dt * d)
}
