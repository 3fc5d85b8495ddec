//! lorentz-sim: charged-particle trajectory integration under the Lorentz force
//!
//! This crate provides:
//! - Resolution of polar field descriptions into Cartesian E and B vectors
//! - The Lorentz force / acceleration evaluator and phase-space derivative
//! - Fixed-step RK4 and Euler integrators over a 6-component state
//! - Per-particle trajectory generation on an inclusive uniform time grid
//! - A multi-particle orchestrator assembling per-component result series
//! - Analytic validators (gyroradius check, kinetic energy and speed)
//!
//! The model is planar: motion is confined to the x-y plane and the magnetic
//! field acts along the plane normal. Particles are mutually independent.

pub mod error;
pub mod field;
pub mod force;
pub mod integrator;
pub mod simulate;
pub mod state;
pub mod trajectory;
pub mod validate;

pub use error::SimError;
pub use field::{FieldConfiguration, FieldSpec, FieldSpecs};
pub use force::{acceleration, derivative, lorentz_force};
pub use integrator::{euler_step, rk4_step, Integrator};
pub use simulate::{
    simulate, simulate_with_cancel, ParticleSeries, SimulationInput, SimulationMeta,
    SimulationResult, MAX_PARTICLES,
};
pub use state::{ParticleSpec, State6};
pub use trajectory::{simulate_particle, time_grid, CancelToken};
pub use validate::{
    circular_check, energy_report, expected_radius, kinetic_energy, speed,
    validate_circular_motion, CircularCheck, EnergyReport, DEFAULT_TOLERANCE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_to_end_result_structure() {
        let input = SimulationInput {
            fields: FieldSpecs {
                e: FieldSpec {
                    magnitude: 0.0,
                    angle_deg: 0.0,
                },
                b: FieldSpec {
                    magnitude: 1.0,
                    angle_deg: 0.0,
                },
            },
            particles: vec![
                ParticleSpec {
                    id: "p1".to_string(),
                    q: 1.0,
                    m: 1.0,
                    x: 0.0,
                    y: 0.0,
                    vx: 1.0,
                    vy: 0.0,
                },
                ParticleSpec {
                    id: "p2".to_string(),
                    q: -1.0,
                    m: 1.0,
                    x: 0.0,
                    y: 0.0,
                    vx: 1.0,
                    vy: 0.0,
                },
            ],
            t0: 0.0,
            t_final: 1.0,
            dt: 0.01,
            integrator: Integrator::Rk4,
        };

        let result = simulate(&input).unwrap();

        assert_eq!(result.particles.len(), 2);
        assert!(result.particles.contains_key("p1"));
        assert!(result.particles.contains_key("p2"));
        assert_eq!(result.times[0], 0.0);
        for series in result.particles.values() {
            assert_eq!(series.x.len(), result.times.len());
            assert_eq!(series.az.len(), result.times.len());
        }

        // The result document round-trips through JSON.
        let json = serde_json::to_string(&result).unwrap();
        let parsed: SimulationResult = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.times.len(), result.times.len());
        assert_eq!(parsed.meta.integrator, Integrator::Rk4);
    }
}
