//! Field resolution: polar field descriptions to Cartesian vectors.
//!
//! The simulation is planar: particles move in the x-y plane and the
//! magnetic field acts along the plane normal (z). Resolving keeps both
//! in-plane components of E but reduces B to `Bz = magnitude * cos(angle)`;
//! the in-plane component implied by `sin(angle)` is discarded.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// Magnitude/angle description of a field, as supplied by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field strength (N/C for E, T for B), >= 0
    pub magnitude: f64,
    /// Direction in the x-y plane, degrees in [0, 360]
    pub angle_deg: f64,
}

impl FieldSpec {
    /// Angle in radians, wrapped into [0, 360) first. The boundary layer
    /// already bounds the angle; the wrap keeps direct callers correct.
    fn angle_rad(&self) -> f64 {
        self.angle_deg.rem_euclid(360.0).to_radians()
    }
}

/// Polar E and B specs for one simulation request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldSpecs {
    #[serde(rename = "E")]
    pub e: FieldSpec,
    #[serde(rename = "B")]
    pub b: FieldSpec,
}

/// Resolved Cartesian fields, shared read-only by every particle in a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldConfiguration {
    /// Electric field (N/C)
    pub e: Vector3<f64>,
    /// Magnetic field (T); only the z component is populated
    pub b: Vector3<f64>,
}

impl FieldConfiguration {
    /// Resolve polar E and B specs into Cartesian vectors.
    pub fn resolve(e: &FieldSpec, b: &FieldSpec) -> Self {
        let e_angle = e.angle_rad();
        let e_vec = Vector3::new(
            e.magnitude * e_angle.cos(),
            e.magnitude * e_angle.sin(),
            0.0,
        );

        // B restricted to the plane normal: Bz = |B| cos(angle)
        let bz = b.magnitude * b.angle_rad().cos();
        let b_vec = Vector3::new(0.0, 0.0, bz);

        Self { e: e_vec, b: b_vec }
    }
}
