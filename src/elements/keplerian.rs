use super::element_errors::ElementErrors;
use crate::constants::{PI, SINGULARITY_TOLERANCE, TWO_PI};
use nalgebra as na;

/// Keplerian element vector [a, e, i, omega, Omega, nu]
///   a: semi-major axis [m] (semi-latus rectum for e = 1)
///   e: eccentricity [-]
///   i: inclination [rad]
///   omega: argument of periapsis [rad]
///   Omega: longitude of ascending node [rad]
///   nu: true anomaly [rad]
pub type KeplerianElements = na::Vector6<f64>;

pub const SEMI_MAJOR_AXIS_INDEX: usize = 0;
pub const SEMI_LATUS_RECTUM_INDEX: usize = 0;
pub const ECCENTRICITY_INDEX: usize = 1;
pub const INCLINATION_INDEX: usize = 2;
pub const ARGUMENT_OF_PERIAPSIS_INDEX: usize = 3;
pub const LONGITUDE_OF_ASCENDING_NODE_INDEX: usize = 4;
pub const TRUE_ANOMALY_INDEX: usize = 5;

pub fn is_circular(eccentricity: f64) -> bool {
    eccentricity.abs() < SINGULARITY_TOLERANCE
}

pub fn is_parabolic(eccentricity: f64) -> bool {
    (eccentricity - 1.0).abs() < SINGULARITY_TOLERANCE
}

pub fn is_equatorial(inclination: f64) -> bool {
    inclination.abs() < SINGULARITY_TOLERANCE
}

/// Wraps an angle to [0, 2pi).
pub fn wrap_to_two_pi(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TWO_PI);
    // rem_euclid can round up to exactly 2pi for tiny negative inputs
    if wrapped >= TWO_PI {
        0.0
    } else {
        wrapped
    }
}

/// Semi-latus rectum, taken directly from the first element for parabolic orbits.
pub fn semi_latus_rectum(elements: &KeplerianElements) -> f64 {
    let e = elements[ECCENTRICITY_INDEX];
    if is_parabolic(e) {
        elements[SEMI_LATUS_RECTUM_INDEX]
    } else {
        elements[SEMI_MAJOR_AXIS_INDEX] * (1.0 - e * e)
    }
}

pub fn check_gravitational_parameter(mu: f64) -> Result<(), ElementErrors> {
    if mu.is_finite() && mu > 0.0 {
        Ok(())
    } else {
        Err(ElementErrors::InvalidGravitationalParameter(mu))
    }
}

/// Rejects element sets in which an angle is undefined yet set to a non-zero
/// value, whose inclination is outside [0, pi], or whose semi-latus rectum is
/// not positive (a < 0 with e < 1, a > 0 with e > 1, or a = 0).
pub fn validate(elements: &KeplerianElements) -> Result<(), ElementErrors> {
    let e = elements[ECCENTRICITY_INDEX];
    let i = elements[INCLINATION_INDEX];
    let omega = elements[ARGUMENT_OF_PERIAPSIS_INDEX];
    let raan = elements[LONGITUDE_OF_ASCENDING_NODE_INDEX];

    if e < 0.0 {
        return Err(ElementErrors::NegativeEccentricity(e));
    }
    let p = semi_latus_rectum(elements);
    if !(p.is_finite() && p > 0.0) {
        return Err(ElementErrors::NonPositiveSemiLatusRectum(p));
    }
    if !(0.0..=PI).contains(&i) {
        return Err(ElementErrors::InclinationOutOfRange(i));
    }
    if is_circular(e) && omega != 0.0 {
        return Err(ElementErrors::UndefinedArgumentOfPeriapsis {
            argument_of_periapsis: omega,
        });
    }
    if is_equatorial(i) && raan != 0.0 {
        return Err(ElementErrors::UndefinedLongitudeOfAscendingNode {
            longitude_of_ascending_node: raan,
        });
    }
    Ok(())
}
