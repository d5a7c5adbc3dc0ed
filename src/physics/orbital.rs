use crate::elements::element_errors::ElementErrors;
use crate::elements::keplerian::{
    self, check_gravitational_parameter, is_parabolic, semi_latus_rectum, wrap_to_two_pi,
    KeplerianElements,
};
use nalgebra as na;

/// Below this ratio an orbit is treated as circular (eccentricity) or
/// equatorial (node vector over angular momentum).
const STATE_SINGULARITY_TOLERANCE: f64 = 1e-11;

pub struct OrbitalMechanics;

impl OrbitalMechanics {
    /// Converts a Cartesian state to Keplerian elements [a, e, i, omega, Omega, nu].
    ///
    /// Circular orbits get omega = 0 and the true anomaly measured from the
    /// ascending node; equatorial orbits get Omega = 0 and angles measured from
    /// the x axis. For parabolic orbits the first element is the semi-latus rectum.
    pub fn cartesian_to_keplerian(
        r: &na::Vector3<f64>,
        v: &na::Vector3<f64>,
        mu: f64,
    ) -> Result<KeplerianElements, ElementErrors> {
        check_gravitational_parameter(mu)?;
        let mut elements = KeplerianElements::zeros();

        // Angular momentum
        let h = r.cross(v);
        let h_mag = h.magnitude();
        let h_unit = h / h_mag;

        // Node vector
        let n = na::Vector3::z().cross(&h);
        let equatorial = n.magnitude() / h_mag < STATE_SINGULARITY_TOLERANCE;

        // Eccentricity vector
        let r_mag = r.magnitude();
        let v_mag = v.magnitude();
        let e_vec = ((v_mag * v_mag - mu / r_mag) * r - r.dot(v) * v) / mu;
        let e = e_vec.magnitude();
        let circular = e < STATE_SINGULARITY_TOLERANCE;
        elements[keplerian::ECCENTRICITY_INDEX] = e;

        elements[keplerian::SEMI_MAJOR_AXIS_INDEX] = if is_parabolic(e) {
            h_mag * h_mag / mu
        } else {
            let specific_energy = v_mag * v_mag / 2.0 - mu / r_mag;
            -mu / (2.0 * specific_energy)
        };

        elements[keplerian::INCLINATION_INDEX] = h.xy().magnitude().atan2(h.z);

        let node_direction = if equatorial {
            na::Vector3::x()
        } else {
            elements[keplerian::LONGITUDE_OF_ASCENDING_NODE_INDEX] =
                wrap_to_two_pi(n.y.atan2(n.x));
            n
        };

        // Angle swept from `from` to `to` in the direction of motion
        let angle_about_h = |from: &na::Vector3<f64>, to: &na::Vector3<f64>| {
            wrap_to_two_pi(h_unit.dot(&from.cross(to)).atan2(from.dot(to)))
        };

        let periapsis_direction = if circular {
            node_direction
        } else {
            elements[keplerian::ARGUMENT_OF_PERIAPSIS_INDEX] =
                angle_about_h(&node_direction, &e_vec);
            e_vec
        };

        elements[keplerian::TRUE_ANOMALY_INDEX] = angle_about_h(&periapsis_direction, r);

        Ok(elements)
    }

    /// Converts Keplerian elements [a, e, i, omega, Omega, nu] to position and
    /// velocity in the frame the elements are defined in [m, m/s].
    pub fn keplerian_to_cartesian(
        elements: &KeplerianElements,
        mu: f64,
    ) -> Result<(na::Vector3<f64>, na::Vector3<f64>), ElementErrors> {
        check_gravitational_parameter(mu)?;
        keplerian::validate(elements)?;

        let e = elements[keplerian::ECCENTRICITY_INDEX];
        let i = elements[keplerian::INCLINATION_INDEX];
        let omega = elements[keplerian::ARGUMENT_OF_PERIAPSIS_INDEX];
        let omega_cap = elements[keplerian::LONGITUDE_OF_ASCENDING_NODE_INDEX];
        let nu = elements[keplerian::TRUE_ANOMALY_INDEX];

        // Position and velocity in the orbital plane
        let p = semi_latus_rectum(elements);
        let r_mag = p / (1.0 + e * nu.cos());
        let r_orbital = na::Vector3::new(r_mag * nu.cos(), r_mag * nu.sin(), 0.0);
        let v_orbital = (mu / p).sqrt() * na::Vector3::new(-nu.sin(), e + nu.cos(), 0.0);

        let rot_omega = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), omega);
        let rot_i = na::Rotation3::from_axis_angle(&na::Vector3::x_axis(), i);
        let rot_omega_cap = na::Rotation3::from_axis_angle(&na::Vector3::z_axis(), omega_cap);

        let transform = rot_omega_cap * rot_i * rot_omega;
        Ok((transform * r_orbital, transform * v_orbital))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EARTH_GRAVITATIONAL_PARAMETER, PI, SUN_GRAVITATIONAL_PARAMETER};
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    const MU: f64 = EARTH_GRAVITATIONAL_PARAMETER;

    #[test_case(
        KeplerianElements::new(6_778_137.0, 0.0025, 51.6_f64.to_radians(), 1.2, 4.0, 0.3);
        "near circular inclined"
    )]
    #[test_case(
        KeplerianElements::new(2.4e7, 0.7, 63.4_f64.to_radians(), 270_f64.to_radians(), 0.5, 3.0);
        "highly elliptical"
    )]
    #[test_case(
        KeplerianElements::new(-3.0e7, 1.8, 2.2, 0.9, 5.5, 0.4);
        "hyperbolic retrograde"
    )]
    fn state_round_trip(elements: KeplerianElements) {
        let (r, v) = OrbitalMechanics::keplerian_to_cartesian(&elements, MU).unwrap();
        let recovered = OrbitalMechanics::cartesian_to_keplerian(&r, &v, MU).unwrap();
        assert_relative_eq!(recovered[0], elements[0], max_relative = 1e-10);
        assert_abs_diff_eq!(recovered[1], elements[1], epsilon = 1e-12);
        for index in 2..6 {
            assert_abs_diff_eq!(recovered[index], elements[index], epsilon = 1e-9);
        }
    }

    #[test]
    fn circular_orbit_measures_from_the_node() {
        let elements = KeplerianElements::new(7.0e6, 0.0, 0.4, 0.0, 2.0, 1.1);
        let (r, v) = OrbitalMechanics::keplerian_to_cartesian(&elements, MU).unwrap();
        assert_relative_eq!(v.norm(), (MU / 7.0e6).sqrt(), max_relative = 1e-14);

        let recovered = OrbitalMechanics::cartesian_to_keplerian(&r, &v, MU).unwrap();
        assert_abs_diff_eq!(recovered[1], 0.0, epsilon = 1e-12);
        assert_eq!(recovered[keplerian::ARGUMENT_OF_PERIAPSIS_INDEX], 0.0);
        assert_abs_diff_eq!(recovered[keplerian::TRUE_ANOMALY_INDEX], 1.1, epsilon = 1e-12);
    }

    #[test_case(0.0, 0.8; "prograde")]
    #[test_case(PI, 0.8; "retrograde")]
    fn equatorial_orbit_measures_from_x_axis(inclination: f64, argument_of_periapsis: f64) {
        let elements = KeplerianElements::new(1.5e11, 0.1, inclination, argument_of_periapsis, 0.0, 2.0);
        let (r, v) =
            OrbitalMechanics::keplerian_to_cartesian(&elements, SUN_GRAVITATIONAL_PARAMETER).unwrap();
        let recovered =
            OrbitalMechanics::cartesian_to_keplerian(&r, &v, SUN_GRAVITATIONAL_PARAMETER).unwrap();
        assert_eq!(recovered[keplerian::LONGITUDE_OF_ASCENDING_NODE_INDEX], 0.0);
        assert_abs_diff_eq!(recovered[keplerian::INCLINATION_INDEX], inclination, epsilon = 1e-12);
        assert_abs_diff_eq!(
            recovered[keplerian::ARGUMENT_OF_PERIAPSIS_INDEX],
            argument_of_periapsis,
            epsilon = 1e-10
        );
        assert_abs_diff_eq!(recovered[keplerian::TRUE_ANOMALY_INDEX], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn parabolic_orbit_uses_semi_latus_rectum() {
        let p = 2.0e7;
        let elements = KeplerianElements::new(p, 1.0, 0.3, 0.2, 0.1, 0.0);
        let (r, v) = OrbitalMechanics::keplerian_to_cartesian(&elements, MU).unwrap();
        // Periapsis at p / 2 with escape velocity
        assert_relative_eq!(r.norm(), p / 2.0, max_relative = 1e-14);
        assert_relative_eq!(v.norm(), (2.0 * MU / r.norm()).sqrt(), max_relative = 1e-14);
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let r = na::Vector3::new(7.0e6, 0.0, 0.0);
        let v = na::Vector3::new(0.0, 7.5e3, 0.0);
        assert_eq!(
            OrbitalMechanics::cartesian_to_keplerian(&r, &v, 0.0),
            Err(ElementErrors::InvalidGravitationalParameter(0.0))
        );

        let equatorial_with_node = KeplerianElements::new(7.0e6, 0.1, 0.0, 0.0, 1.0, 0.0);
        assert!(matches!(
            OrbitalMechanics::keplerian_to_cartesian(&equatorial_with_node, MU),
            Err(ElementErrors::UndefinedLongitudeOfAscendingNode { .. })
        ));

        // a > 0 with e > 1 would give a NaN velocity
        let mismatched_sign = KeplerianElements::new(7.0e6, 1.5, 0.3, 0.0, 0.0, 0.0);
        assert_eq!(
            OrbitalMechanics::keplerian_to_cartesian(&mismatched_sign, MU),
            Err(ElementErrors::NonPositiveSemiLatusRectum(-8.75e6))
        );
    }
}
