use crate::constants::SMALL_ROTATION_ANGLE;
use nalgebra as na;

/// Quaternion utilities for orbit-frame attitude
/// Following scalar-first convention: q = [q0; q1; q2; q3] = [eta; eps1; eps2; eps3]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
    pub data: na::Vector4<f64>,
}

impl Quaternion {
    pub fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion {
            data: na::Vector4::new(w, x, y, z),
        }
    }

    pub fn from_parts(scalar: f64, vector: &na::Vector3<f64>) -> Self {
        Self::new(scalar, vector[0], vector[1], vector[2])
    }

    pub fn scalar(&self) -> f64 {
        self.data[0]
    }

    pub fn vector(&self) -> na::Vector3<f64> {
        na::Vector3::new(self.data[1], self.data[2], self.data[3])
    }

    pub fn norm(&self) -> f64 {
        self.data.norm()
    }

    /// Same rotation, opposite sign. Both q and -q describe one attitude.
    pub fn negate(&self) -> Self {
        Quaternion { data: -self.data }
    }

    /// Representative with a non-negative scalar part, so that the
    /// rotation angle lies in [0, pi].
    pub fn canonical(&self) -> Self {
        if self.scalar() < 0.0 {
            self.negate()
        } else {
            *self
        }
    }

    /// Rotation angle in [0, 2pi], computed with atan2 to keep precision
    /// for both small and large angles.
    pub fn rotation_angle(&self) -> f64 {
        2.0 * self.vector().norm().atan2(self.scalar())
    }

    /// Exponential map (rotation vector) of this attitude.
    ///
    /// The quaternion is first brought to its canonical sign, which selects the
    /// rotation with angle phi <= pi. The map is then `phi / sin(phi / 2) * eps`.
    /// At phi = pi the factor is still finite (pi), but the result sits on the
    /// boundary where the vector and its shadow `-e` describe the same attitude;
    /// near-zero components there carry only absolute precision.
    pub fn to_exponential_map(&self) -> na::Vector3<f64> {
        let q = self.canonical();
        let phi = q.rotation_angle();
        let factor = if phi < SMALL_ROTATION_ANGLE {
            2.0 * (1.0 + phi * phi / 24.0)
        } else {
            phi / (0.5 * phi).sin()
        };
        q.vector() * factor
    }

    /// Inverse of [`Quaternion::to_exponential_map`]. Always returns the
    /// representative with a non-negative scalar part for |e| <= pi.
    pub fn from_exponential_map(exponential_map: &na::Vector3<f64>) -> Self {
        let phi = exponential_map.norm();
        let factor = if phi < SMALL_ROTATION_ANGLE {
            0.5 * (1.0 - phi * phi / 24.0)
        } else {
            (0.5 * phi).sin() / phi
        };
        Self::from_parts((0.5 * phi).cos(), &(exponential_map * factor))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::PI;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    #[test_case(na::Vector3::new(0.0, 0.0, 0.0); "identity")]
    #[test_case(na::Vector3::new(1.0e-6, -2.0e-6, 0.5e-6); "small angle series branch")]
    #[test_case(na::Vector3::new(0.3, -0.2, 1.1); "moderate rotation")]
    #[test_case(na::Vector3::new(0.0, 0.0, 3.0); "close to half turn")]
    fn exponential_map_round_trip(exponential_map: na::Vector3<f64>) {
        let q = Quaternion::from_exponential_map(&exponential_map);
        assert_relative_eq!(q.norm(), 1.0, max_relative = 1e-15);
        assert_abs_diff_eq!(q.to_exponential_map(), exponential_map, epsilon = 1e-14);
    }

    #[test]
    fn exponential_map_matches_axis_angle_rotation() {
        let axis = na::Unit::new_normalize(na::Vector3::new(1.0, 2.0, -0.5));
        let angle = 1.2;
        let q = Quaternion::from_exponential_map(&(axis.into_inner() * angle));
        let expected = na::UnitQuaternion::from_axis_angle(&axis, angle);
        assert_abs_diff_eq!(q.scalar(), expected.w, epsilon = 1e-15);
        assert_abs_diff_eq!(q.vector(), expected.imag(), epsilon = 1e-15);
    }

    #[test]
    fn negated_quaternion_maps_to_same_rotation_vector() {
        let q = Quaternion::new(-0.8985541982805564, -0.419, -0.0552, -0.1183).canonical();
        assert!(q.scalar() > 0.0);
        let e = q.to_exponential_map();
        assert_abs_diff_eq!(e, q.negate().to_exponential_map(), epsilon = 0.0);
        assert!(e.norm() <= PI);
    }

    #[test]
    fn half_turn_stays_finite() {
        // 180 degree rotation about an axis in the xy-plane
        let q = Quaternion::new(0.0, -0.300705799504273, 0.953716950748227, 0.0);
        let e = q.to_exponential_map();
        assert_relative_eq!(e.norm(), PI, max_relative = 1e-14);
        assert_abs_diff_eq!(e[2], 0.0, epsilon = 1e-15);
    }
}
