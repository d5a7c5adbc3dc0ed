use nalgebra as na;

/// Gravity field of a body, evaluated at body-fixed positions.
///
/// The potential follows the geodesy sign convention: it is positive and tends
/// to mu / r far from the body, and its gradient is the acceleration.
/// Evaluation takes `&mut self` since implementations may cache per-position data.
pub trait GravityFieldModel {
    fn gravitational_parameter(&self) -> f64;

    fn potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> f64;

    fn gradient_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>)
        -> na::Vector3<f64>;

    fn hessian_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>)
        -> na::Matrix3<f64>;

    fn laplacian_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> f64;

    fn name(&self) -> &'static str;

    fn acceleration(&mut self, body_fixed_position: &na::Vector3<f64>) -> na::Vector3<f64> {
        self.gradient_of_potential(body_fixed_position)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointMassGravityField {
    gravitational_parameter: f64,
}

impl PointMassGravityField {
    pub fn new(gravitational_parameter: f64) -> Self {
        Self {
            gravitational_parameter,
        }
    }
}

impl GravityFieldModel for PointMassGravityField {
    fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter
    }

    fn potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> f64 {
        self.gravitational_parameter / body_fixed_position.norm()
    }

    fn gradient_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> na::Vector3<f64> {
        gravitational_acceleration(body_fixed_position, self.gravitational_parameter, &na::Vector3::zeros())
    }

    fn hessian_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> na::Matrix3<f64> {
        let r = body_fixed_position.norm();
        self.gravitational_parameter / r.powi(5)
            * (3.0 * body_fixed_position * body_fixed_position.transpose()
                - r * r * na::Matrix3::identity())
    }

    fn laplacian_of_potential(&mut self, _body_fixed_position: &na::Vector3<f64>) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "point mass"
    }
}

/// Acceleration of a body at `position_of_subject` due to a point mass with
/// gravitational parameter `mu` located at `position_of_attractor`.
pub fn gravitational_acceleration(
    position_of_subject: &na::Vector3<f64>,
    mu: f64,
    position_of_attractor: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    let relative_position = position_of_subject - position_of_attractor;
    let r: f64 = relative_position.magnitude();
    -mu * relative_position / (r * r * r)
}

pub fn gravitational_acceleration_from_mass(
    gravitational_constant: f64,
    position_of_subject: &na::Vector3<f64>,
    mass_of_attractor: f64,
    position_of_attractor: &na::Vector3<f64>,
) -> na::Vector3<f64> {
    gravitational_acceleration(
        position_of_subject,
        gravitational_constant * mass_of_attractor,
        position_of_attractor,
    )
}
