//! Lorentz force and the phase-space derivative.
//!
//! F = q(E + v x B), a = F / m. The derivative maps a state
//! [x, y, z, vx, vy, vz] to [vx, vy, vz, ax, ay, az].

use nalgebra::Vector3;

use crate::error::SimError;
use crate::field::FieldConfiguration;
use crate::state::{velocity, State6};

/// Lorentz force on a charge q moving at v through the resolved fields (N).
///
/// The cross product is right-handed: (v x B)_x = vy*Bz - vz*By, etc.
pub fn lorentz_force(v: &Vector3<f64>, q: f64, fields: &FieldConfiguration) -> Vector3<f64> {
    q * (fields.e + v.cross(&fields.b))
}

/// Acceleration a = F / m (m/s^2). Mass must be strictly positive.
pub fn acceleration(
    v: &Vector3<f64>,
    q: f64,
    m: f64,
    fields: &FieldConfiguration,
) -> Result<Vector3<f64>, SimError> {
    if !(m > 0.0) {
        return Err(SimError::InvalidMass(m));
    }
    Ok(lorentz_force(v, q, fields) / m)
}

/// Phase-space derivative of a state: [vx, vy, vz, ax, ay, az].
///
/// Pure function of the state's velocity block and the resolved fields.
pub fn derivative(
    state: &State6,
    q: f64,
    m: f64,
    fields: &FieldConfiguration,
) -> Result<State6, SimError> {
    let v = velocity(state);
    let a = acceleration(&v, q, m, fields)?;
    Ok(State6::from_row_slice(&[v.x, v.y, v.z, a.x, a.y, a.z]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldSpec;

    fn fields(e: Vector3<f64>, b: Vector3<f64>) -> FieldConfiguration {
        FieldConfiguration { e, b }
    }

    #[test]
    fn electric_field_only() {
        let f = fields(Vector3::new(1.0, 0.0, 0.0), Vector3::zeros());
        let force = lorentz_force(&Vector3::zeros(), 1.0, &f);
        // F = qE when v = 0
        assert!((force - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn magnetic_field_right_hand_rule() {
        let f = fields(Vector3::zeros(), Vector3::new(0.0, 0.0, 1.0));
        let v = Vector3::new(1.0, 0.0, 0.0);
        let force = lorentz_force(&v, 1.0, &f);
        // F = q(v x B) = [1,0,0] x [0,0,1] = [0,-1,0]
        assert!((force - Vector3::new(0.0, -1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn acceleration_scales_inverse_mass() {
        let f = fields(Vector3::new(2.0, 0.0, 0.0), Vector3::zeros());
        let a = acceleration(&Vector3::zeros(), 1.0, 4.0, &f).unwrap();
        assert!((a - Vector3::new(0.5, 0.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn nonpositive_mass_rejected() {
        let f = FieldConfiguration::resolve(
            &FieldSpec {
                magnitude: 1.0,
                angle_deg: 0.0,
            },
            &FieldSpec {
                magnitude: 0.0,
                angle_deg: 0.0,
            },
        );
        let v = Vector3::zeros();
        assert_eq!(
            acceleration(&v, 1.0, 0.0, &f),
            Err(SimError::InvalidMass(0.0))
        );
        assert_eq!(
            acceleration(&v, 1.0, -1.0, &f),
            Err(SimError::InvalidMass(-1.0))
        );
    }

    #[test]
    fn derivative_stacks_velocity_and_acceleration() {
        let f = fields(Vector3::new(0.0, 3.0, 0.0), Vector3::zeros());
        let s = State6::from_row_slice(&[1.0, 2.0, 0.0, 4.0, 5.0, 0.0]);
        let d = derivative(&s, 1.0, 1.0, &f).unwrap();
        // Velocity block passes through, acceleration block is qE/m
        assert_eq!(d[0], 4.0);
        assert_eq!(d[1], 5.0);
        assert_eq!(d[2], 0.0);
        assert!((d[3] - 0.0).abs() < 1e-12);
        assert!((d[4] - 3.0).abs() < 1e-12);
        assert!((d[5] - 0.0).abs() < 1e-12);
    }
}
