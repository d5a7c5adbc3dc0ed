//! Unified State Model element conversions.
//!
//! Two attitude parameterisations are supported: the quaternion form (USM7,
//! seven elements) and the exponential-map form (USMEM, six elements). Both
//! share the velocity hodograph elements C, Rf1 and Rf2.

use super::element_errors::ElementErrors;
use super::keplerian::{
    self, KeplerianElements, ARGUMENT_OF_PERIAPSIS_INDEX, ECCENTRICITY_INDEX, INCLINATION_INDEX,
    LONGITUDE_OF_ASCENDING_NODE_INDEX, TRUE_ANOMALY_INDEX,
};
use crate::constants::{RETROGRADE_SINGULARITY_TOLERANCE, SINGULARITY_TOLERANCE};
use crate::numerics::quaternion::Quaternion;
use nalgebra as na;

/// [C, Rf1, Rf2, e1, e2, e3]
pub type UsmemElements = na::Vector6<f64>;
/// [C, Rf1, Rf2, eps1, eps2, eps3, eta]
pub type Usm7Elements = na::SVector<f64, 7>;

pub const C_HODOGRAPH_INDEX: usize = 0;
pub const RF1_HODOGRAPH_INDEX: usize = 1;
pub const RF2_HODOGRAPH_INDEX: usize = 2;
pub const E1_EXPONENTIAL_MAP_INDEX: usize = 3;
pub const E2_EXPONENTIAL_MAP_INDEX: usize = 4;
pub const E3_EXPONENTIAL_MAP_INDEX: usize = 5;
pub const EPSILON1_QUATERNION_INDEX: usize = 3;
pub const EPSILON2_QUATERNION_INDEX: usize = 4;
pub const EPSILON3_QUATERNION_INDEX: usize = 5;
pub const ETA_QUATERNION_INDEX: usize = 6;

fn usm7_quaternion(usm7: &Usm7Elements) -> Quaternion {
    Quaternion::new(
        usm7[ETA_QUATERNION_INDEX],
        usm7[EPSILON1_QUATERNION_INDEX],
        usm7[EPSILON2_QUATERNION_INDEX],
        usm7[EPSILON3_QUATERNION_INDEX],
    )
}

fn assemble_usm7(hodograph: &na::Vector3<f64>, quaternion: &Quaternion) -> Usm7Elements {
    let epsilon = quaternion.vector();
    Usm7Elements::from_column_slice(&[
        hodograph[0],
        hodograph[1],
        hodograph[2],
        epsilon[0],
        epsilon[1],
        epsilon[2],
        quaternion.scalar(),
    ])
}

/// Converts Keplerian elements to USM7 elements.
///
/// The quaternion is built from the 3-1-3 sequence (Omega, i, u) without
/// wrapping the argument of latitude u = omega + nu, so the sign of the
/// quaternion follows directly from the input angles.
pub fn keplerian_to_usm7(
    keplerian_elements: &KeplerianElements,
    mu: f64,
) -> Result<Usm7Elements, ElementErrors> {
    keplerian::check_gravitational_parameter(mu)?;
    keplerian::validate(keplerian_elements)?;

    let e = keplerian_elements[ECCENTRICITY_INDEX];
    let i = keplerian_elements[INCLINATION_INDEX];
    let omega = keplerian_elements[ARGUMENT_OF_PERIAPSIS_INDEX];
    let raan = keplerian_elements[LONGITUDE_OF_ASCENDING_NODE_INDEX];
    let nu = keplerian_elements[TRUE_ANOMALY_INDEX];

    // Velocity hodograph
    let c = (mu / keplerian::semi_latus_rectum(keplerian_elements)).sqrt();
    let longitude_of_periapsis = raan + omega;
    let hodograph = na::Vector3::new(
        c,
        -e * c * longitude_of_periapsis.sin(),
        e * c * longitude_of_periapsis.cos(),
    );

    // Attitude of the orbit frame
    let argument_of_latitude = omega + nu;
    let (sin_half_i, cos_half_i) = (0.5 * i).sin_cos();
    let half_sum = 0.5 * (raan + argument_of_latitude);
    let half_difference = 0.5 * (raan - argument_of_latitude);
    let quaternion = Quaternion::new(
        cos_half_i * half_sum.cos(),
        sin_half_i * half_difference.cos(),
        sin_half_i * half_difference.sin(),
        cos_half_i * half_sum.sin(),
    );

    Ok(assemble_usm7(&hodograph, &quaternion))
}

/// Converts USM7 elements to Keplerian elements.
///
/// Fails for 180 degree inclinations: there eps3 and eta both vanish and the
/// right ascension of latitude cannot be recovered. The rejection covers
/// inclinations within about 2e-14 rad of pi.
pub fn usm7_to_keplerian(usm7: &Usm7Elements, mu: f64) -> Result<KeplerianElements, ElementErrors> {
    keplerian::check_gravitational_parameter(mu)?;

    let c = usm7[C_HODOGRAPH_INDEX];
    let rf1 = usm7[RF1_HODOGRAPH_INDEX];
    let rf2 = usm7[RF2_HODOGRAPH_INDEX];
    let eps1 = usm7[EPSILON1_QUATERNION_INDEX];
    let eps2 = usm7[EPSILON2_QUATERNION_INDEX];
    let eps3 = usm7[EPSILON3_QUATERNION_INDEX];
    let eta = usm7[ETA_QUATERNION_INDEX];

    let cos_half_i_squared = eps3 * eps3 + eta * eta;
    let sin_half_i_squared = eps1 * eps1 + eps2 * eps2;
    if cos_half_i_squared.sqrt() < RETROGRADE_SINGULARITY_TOLERANCE {
        return Err(ElementErrors::UndefinedRightAscensionOfLatitude);
    }

    let inclination = 2.0 * sin_half_i_squared.sqrt().atan2(cos_half_i_squared.sqrt());
    let right_ascension_of_latitude =
        (2.0 * eps3 * eta).atan2(eta * eta - eps3 * eps3);

    let raan = if sin_half_i_squared.sqrt() < SINGULARITY_TOLERANCE {
        0.0
    } else {
        keplerian::wrap_to_two_pi((eps1 * eps3 + eps2 * eta).atan2(eps1 * eta - eps2 * eps3))
    };

    let eccentricity = (rf1 * rf1 + rf2 * rf2).sqrt() / c;
    let omega = if keplerian::is_circular(eccentricity) {
        0.0
    } else {
        keplerian::wrap_to_two_pi((-rf1).atan2(rf2) - raan)
    };
    let nu = keplerian::wrap_to_two_pi(right_ascension_of_latitude - raan - omega);

    let p = mu / (c * c);
    let first_element = if keplerian::is_parabolic(eccentricity) {
        p
    } else {
        p / (1.0 - eccentricity * eccentricity)
    };

    Ok(KeplerianElements::new(
        first_element,
        eccentricity,
        inclination,
        omega,
        raan,
        nu,
    ))
}

/// Replaces the quaternion of a USM7 set by its exponential map.
pub fn usm7_to_usmem(usm7: &Usm7Elements) -> UsmemElements {
    let e = usm7_quaternion(usm7).to_exponential_map();
    UsmemElements::new(
        usm7[C_HODOGRAPH_INDEX],
        usm7[RF1_HODOGRAPH_INDEX],
        usm7[RF2_HODOGRAPH_INDEX],
        e[0],
        e[1],
        e[2],
    )
}

/// Replaces the exponential map of a USMEM set by its quaternion. The
/// quaternion always has a non-negative scalar part.
pub fn usmem_to_usm7(usmem: &UsmemElements) -> Usm7Elements {
    let exponential_map = usmem.fixed_rows::<3>(E1_EXPONENTIAL_MAP_INDEX).into_owned();
    let hodograph = usmem.fixed_rows::<3>(C_HODOGRAPH_INDEX).into_owned();
    assemble_usm7(&hodograph, &Quaternion::from_exponential_map(&exponential_map))
}

/// Converts Keplerian elements to USMEM elements.
pub fn keplerian_to_usmem(
    keplerian_elements: &KeplerianElements,
    mu: f64,
) -> Result<UsmemElements, ElementErrors> {
    keplerian_to_usm7(keplerian_elements, mu).map(|usm7| usm7_to_usmem(&usm7))
}

/// Converts USMEM elements to Keplerian elements.
pub fn usmem_to_keplerian(usmem: &UsmemElements, mu: f64) -> Result<KeplerianElements, ElementErrors> {
    usm7_to_keplerian(&usmem_to_usm7(usmem), mu)
}
