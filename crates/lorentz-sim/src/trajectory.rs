//! Uniform time grid construction and single-particle trajectory generation.
//!
//! The grid is generated half-open over [t0, t_final + dt) with step dt,
//! which keeps the endpoint: in the exact case that is
//! floor((t_final - t0)/dt) + 1 samples, and floating-point accumulation may
//! land the final sample at or slightly past t_final. Stepping is strictly
//! sequential; sample i is one integrator step from sample i-1.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::SimError;
use crate::field::FieldConfiguration;
use crate::integrator::Integrator;
use crate::state::State6;

/// Cooperative cancellation flag, checked once per sample boundary.
///
/// Cloning shares the flag. A cancelled run discards its partial
/// trajectories and reports [`SimError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// Uniform time grid from t0 through t_final, inclusive.
pub fn time_grid(t0: f64, t_final: f64, dt: f64) -> Vec<f64> {
    let n = ((t_final + dt - t0) / dt).ceil() as usize;
    (0..n).map(|i| t0 + i as f64 * dt).collect()
}

/// Integrate one particle across the time grid.
///
/// Sample 0 is the initial state exactly; every later sample is produced by
/// the selected integrator from its predecessor. Cancellation is checked
/// before each step; a cancelled run returns [`SimError::Cancelled`] and the
/// partial trajectory is dropped.
#[allow(clippy::too_many_arguments)]
pub fn simulate_particle(
    initial_state: State6,
    q: f64,
    m: f64,
    times: &[f64],
    dt: f64,
    integrator: Integrator,
    fields: &FieldConfiguration,
    cancel: &CancelToken,
) -> Result<Vec<State6>, SimError> {
    let mut states = Vec::with_capacity(times.len());
    states.push(initial_state);

    for _ in 1..times.len() {
        if cancel.is_cancelled() {
            return Err(SimError::Cancelled);
        }
        let prev = states[states.len() - 1];
        let next = integrator.step(&prev, dt, q, m, fields)?;
        states.push(next);
    }

    Ok(states)
}
