//! Analytic validators, independent of integration.
//!
//! Circular-motion radius check against the gyroradius r = mv/(|q|B), and
//! kinetic-energy / speed calculation. A degenerate field (q = 0 or B = 0)
//! is a legitimate physical edge case: it is reported as data (invalid
//! check, infinite expected radius), never as an error.

use serde::{Deserialize, Serialize};

/// Default relative tolerance for the circular-motion check.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Report returned by the circular-motion check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CircularCheck {
    pub is_valid: bool,
    pub expected_radius: f64,
    pub measured_radius: f64,
    pub relative_error: f64,
}

/// Kinetic energy and speed of one particle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnergyReport {
    pub kinetic_energy: f64,
    pub speed: f64,
}

/// Gyroradius r = mv / (|q| B). Infinite when q = 0 or B = 0: without charge
/// or field there is no circular orbit to compare against.
pub fn expected_radius(q: f64, m: f64, v: f64, b: f64) -> f64 {
    if q == 0.0 || b == 0.0 {
        return f64::INFINITY;
    }
    (m * v) / (q.abs() * b)
}

/// Compare a measured orbit radius against the gyroradius.
pub fn circular_check(q: f64, m: f64, v: f64, b: f64, radius: f64, tolerance: f64) -> CircularCheck {
    let expected = expected_radius(q, m, v, b);
    if !expected.is_finite() {
        return CircularCheck {
            is_valid: false,
            expected_radius: expected,
            measured_radius: radius,
            relative_error: f64::INFINITY,
        };
    }

    let relative_error = (radius - expected).abs() / expected;
    CircularCheck {
        is_valid: relative_error < tolerance,
        expected_radius: expected,
        measured_radius: radius,
        relative_error,
    }
}

/// True when the measured radius matches r = mv/(|q|B) within the tolerance;
/// false for a degenerate field (q = 0 or B = 0).
pub fn validate_circular_motion(
    q: f64,
    m: f64,
    v: f64,
    b: f64,
    radius: f64,
    tolerance: f64,
) -> bool {
    circular_check(q, m, v, b, radius, tolerance).is_valid
}

/// Kinetic energy KE = 1/2 m (vx^2 + vy^2 + vz^2).
pub fn kinetic_energy(m: f64, vx: f64, vy: f64, vz: f64) -> f64 {
    0.5 * m * (vx * vx + vy * vy + vz * vz)
}

/// Speed |v|.
pub fn speed(vx: f64, vy: f64, vz: f64) -> f64 {
    (vx * vx + vy * vy + vz * vz).sqrt()
}

/// Kinetic energy and speed in one report.
pub fn energy_report(m: f64, vx: f64, vy: f64, vz: f64) -> EnergyReport {
    EnergyReport {
        kinetic_energy: kinetic_energy(m, vx, vy, vz),
        speed: speed(vx, vy, vz),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gyroradius_formula() {
        // r = mv/(|q|B) = 1*2/(1*1) = 2
        assert_eq!(expected_radius(1.0, 1.0, 2.0, 1.0), 2.0);
        // Sign of the charge does not matter
        assert_eq!(expected_radius(-1.0, 1.0, 2.0, 1.0), 2.0);
    }

    #[test]
    fn matching_radius_is_valid() {
        let check = circular_check(1.0, 1.0, 2.0, 1.0, 2.0, DEFAULT_TOLERANCE);
        assert!(check.is_valid);
        assert_eq!(check.expected_radius, 2.0);
        assert_eq!(check.measured_radius, 2.0);
        assert_eq!(check.relative_error, 0.0);
    }

    #[test]
    fn wrong_radius_is_invalid() {
        let check = circular_check(1.0, 1.0, 2.0, 1.0, 3.0, DEFAULT_TOLERANCE);
        assert!(!check.is_valid);
        assert!((check.relative_error - 0.5).abs() < 1e-12);
    }

    #[test]
    fn degenerate_field_reported_as_data() {
        for (q, b) in [(0.0, 1.0), (1.0, 0.0), (0.0, 0.0)] {
            let check = circular_check(q, 1.0, 2.0, b, 2.0, DEFAULT_TOLERANCE);
            assert!(!check.is_valid, "q={} B={} must be invalid", q, b);
            assert!(check.expected_radius.is_infinite());
            assert!(check.relative_error.is_infinite());
        }
        assert!(!validate_circular_motion(0.0, 1.0, 2.0, 1.0, 2.0, DEFAULT_TOLERANCE));
    }

    #[test]
    fn tolerance_bounds_the_check() {
        // 2% off: fails the 1% default, passes a 5% tolerance.
        assert!(!validate_circular_motion(1.0, 1.0, 2.0, 1.0, 2.04, 0.01));
        assert!(validate_circular_motion(1.0, 1.0, 2.0, 1.0, 2.04, 0.05));
    }

    #[test]
    fn kinetic_energy_and_speed() {
        // m = 2, v = (3, 4, 0): KE = 0.5*2*25 = 25, |v| = 5
        let report = energy_report(2.0, 3.0, 4.0, 0.0);
        assert_eq!(report.kinetic_energy, 25.0);
        assert_eq!(report.speed, 5.0);
    }

    #[test]
    fn kinetic_energy_includes_vz() {
        assert_eq!(kinetic_energy(2.0, 0.0, 0.0, 3.0), 9.0);
        assert_eq!(speed(0.0, 0.0, 3.0), 3.0);
    }
}
