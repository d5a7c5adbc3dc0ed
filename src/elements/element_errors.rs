use std::{error::Error, fmt};

/// Failures of the orbital element conversions.
///
/// Every variant describes a geometry for which the requested element set is
/// not defined. They are deterministic: the same input always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ElementErrors {
    UndefinedArgumentOfPeriapsis { argument_of_periapsis: f64 },
    UndefinedLongitudeOfAscendingNode { longitude_of_ascending_node: f64 },
    InclinationOutOfRange(f64),
    NegativeEccentricity(f64),
    NonPositiveSemiLatusRectum(f64),
    UndefinedRightAscensionOfLatitude,
    InvalidGravitationalParameter(f64),
}

impl ElementErrors {
    /// Whether the failure is caused by an undefined angle or an invalid
    /// orientation, as opposed to an invalid physical constant.
    pub fn is_degenerate_geometry(&self) -> bool {
        !matches!(self, ElementErrors::InvalidGravitationalParameter(_))
    }
}

impl fmt::Display for ElementErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementErrors::UndefinedArgumentOfPeriapsis {
                argument_of_periapsis,
            } => write!(
                f,
                "Argument of periapsis is undefined for a circular orbit, but {} rad was given",
                argument_of_periapsis
            ),
            ElementErrors::UndefinedLongitudeOfAscendingNode {
                longitude_of_ascending_node,
            } => write!(
                f,
                "Longitude of ascending node is undefined for an equatorial orbit, but {} rad was given",
                longitude_of_ascending_node
            ),
            ElementErrors::InclinationOutOfRange(i) => {
                write!(f, "Inclination {} rad is outside [0, pi]", i)
            }
            ElementErrors::NegativeEccentricity(e) => write!(f, "Negative eccentricity {}", e),
            ElementErrors::NonPositiveSemiLatusRectum(p) => write!(
                f,
                "Semi-latus rectum {} m is not positive; the semi-major axis sign must match the orbit type",
                p
            ),
            ElementErrors::UndefinedRightAscensionOfLatitude => write!(
                f,
                "Right ascension of latitude is undefined for a 180 degree inclination"
            ),
            ElementErrors::InvalidGravitationalParameter(mu) => {
                write!(f, "Invalid gravitational parameter {}", mu)
            }
        }
    }
}

impl Error for ElementErrors {}
