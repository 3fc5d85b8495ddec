//! Multi-particle simulation orchestration.
//!
//! Resolves the field configuration once, runs each particle's trajectory
//! over the shared time grid, recomputes the acceleration at every sample
//! from the sampled velocity (never from integrator internals), and
//! assembles the per-component result series. Particles are mutually
//! independent; no trajectory reads another particle's state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SimError;
use crate::field::{FieldConfiguration, FieldSpecs};
use crate::force::acceleration;
use crate::integrator::Integrator;
use crate::state::{velocity, ParticleSpec, State6};
use crate::trajectory::{simulate_particle, time_grid, CancelToken};

/// Defensive upper bound on the particle count per run.
pub const MAX_PARTICLES: usize = 100;

/// A complete, strongly-typed simulation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationInput {
    pub fields: FieldSpecs,
    pub particles: Vec<ParticleSpec>,
    #[serde(default)]
    pub t0: f64,
    pub t_final: f64,
    pub dt: f64,
    pub integrator: Integrator,
}

/// Echo of the run parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationMeta {
    pub t0: f64,
    pub t_final: f64,
    pub dt: f64,
    pub integrator: Integrator,
}

/// Per-component series for one particle, one entry per time sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParticleSeries {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<f64>,
    pub vx: Vec<f64>,
    pub vy: Vec<f64>,
    pub vz: Vec<f64>,
    pub ax: Vec<f64>,
    pub ay: Vec<f64>,
    pub az: Vec<f64>,
}

/// Assembled result of one simulation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationResult {
    pub meta: SimulationMeta,
    pub times: Vec<f64>,
    pub particles: BTreeMap<String, ParticleSeries>,
}

/// Run a simulation to completion.
pub fn simulate(input: &SimulationInput) -> Result<SimulationResult, SimError> {
    simulate_with_cancel(input, &CancelToken::new())
}

/// Run a simulation, honoring a cancellation token at sample granularity.
///
/// Structural errors and cancellation abort the whole call; no partial
/// result is ever returned.
pub fn simulate_with_cancel(
    input: &SimulationInput,
    cancel: &CancelToken,
) -> Result<SimulationResult, SimError> {
    check_input(input)?;

    let fields = FieldConfiguration::resolve(&input.fields.e, &input.fields.b);
    let times = time_grid(input.t0, input.t_final, input.dt);

    debug!(
        particles = input.particles.len(),
        samples = times.len(),
        integrator = input.integrator.name(),
        "running simulation"
    );

    let mut particles = BTreeMap::new();
    for p in &input.particles {
        let states = simulate_particle(
            p.initial_state(),
            p.q,
            p.m,
            &times,
            input.dt,
            input.integrator,
            &fields,
            cancel,
        )?;
        particles.insert(p.id.clone(), assemble_series(&states, p.q, p.m, &fields)?);
    }

    Ok(SimulationResult {
        meta: SimulationMeta {
            t0: input.t0,
            t_final: input.t_final,
            dt: input.dt,
            integrator: input.integrator,
        },
        times,
        particles,
    })
}

fn check_input(input: &SimulationInput) -> Result<(), SimError> {
    if !(input.dt > 0.0) || !(input.t_final > input.t0) {
        return Err(SimError::InvalidTimeGrid {
            t0: input.t0,
            t_final: input.t_final,
            dt: input.dt,
        });
    }

    if input.particles.is_empty() {
        return Err(SimError::InvalidParticleList(
            "empty particle list".to_string(),
        ));
    }

    if input.particles.len() > MAX_PARTICLES {
        return Err(SimError::TooManyParticles {
            count: input.particles.len(),
            limit: MAX_PARTICLES,
        });
    }

    let mut seen = BTreeSet::new();
    for p in &input.particles {
        if !seen.insert(p.id.as_str()) {
            return Err(SimError::InvalidParticleList(format!(
                "duplicate particle id {:?}",
                p.id
            )));
        }
    }

    Ok(())
}

/// Split the sampled states into per-component series, recomputing the
/// acceleration at each sample from that sample's velocity.
fn assemble_series(
    states: &[State6],
    q: f64,
    m: f64,
    fields: &FieldConfiguration,
) -> Result<ParticleSeries, SimError> {
    let mut series = ParticleSeries::default();

    for s in states {
        let v = velocity(s);
        let a = acceleration(&v, q, m, fields)?;
        series.x.push(s[0]);
        series.y.push(s[1]);
        series.z.push(s[2]);
        series.vx.push(s[3]);
        series.vy.push(s[4]);
        series.vz.push(s[5]);
        series.ax.push(a.x);
        series.ay.push(a.y);
        series.az.push(a.z);
    }

    Ok(series)
}
