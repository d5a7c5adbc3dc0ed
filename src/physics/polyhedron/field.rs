use super::cache::{GeometrySnapshot, PolyhedronGravityCache};
use super::dyads::PolyhedronDyads;
use super::polyhedron_errors::PolyhedronErrors;
use super::shape::PolyhedronShape;
use crate::constants::G;
use crate::physics::gravity::GravityFieldModel;
use nalgebra as na;
use std::sync::Arc;

/// Potential of a constant density polyhedron (Werner & Scheeres 1997, Eq. 10).
pub fn potential_from_geometry(
    gravitational_constant_times_density: f64,
    shape: &PolyhedronShape,
    dyads: &PolyhedronDyads,
    snapshot: &GeometrySnapshot,
) -> f64 {
    let r = snapshot.relative_coordinates();

    let edge_sum: f64 = shape
        .edges()
        .iter()
        .zip(dyads.edge_dyads())
        .zip(snapshot.per_edge_factor())
        .map(|((edge, dyad), factor)| {
            let r_e = &r[edge[0]];
            r_e.dot(&(dyad * r_e)) * factor
        })
        .sum();

    let facet_sum: f64 = shape
        .facets()
        .iter()
        .zip(dyads.facet_dyads())
        .zip(snapshot.per_facet_factor())
        .map(|((facet, dyad), factor)| {
            let r_f = &r[facet[0]];
            r_f.dot(&(dyad * r_f)) * factor
        })
        .sum();

    0.5 * gravitational_constant_times_density * (edge_sum - facet_sum)
}

/// Gradient of the polyhedron potential (Eq. 15), i.e. the acceleration.
pub fn gradient_from_geometry(
    gravitational_constant_times_density: f64,
    shape: &PolyhedronShape,
    dyads: &PolyhedronDyads,
    snapshot: &GeometrySnapshot,
) -> na::Vector3<f64> {
    let r = snapshot.relative_coordinates();
    let mut gradient = na::Vector3::zeros();

    for ((edge, dyad), factor) in shape
        .edges()
        .iter()
        .zip(dyads.edge_dyads())
        .zip(snapshot.per_edge_factor())
    {
        gradient -= dyad * r[edge[0]] * *factor;
    }
    for ((facet, dyad), factor) in shape
        .facets()
        .iter()
        .zip(dyads.facet_dyads())
        .zip(snapshot.per_facet_factor())
    {
        gradient += dyad * r[facet[0]] * *factor;
    }

    gravitational_constant_times_density * gradient
}

/// Hessian of the polyhedron potential (Eq. 16).
pub fn hessian_from_geometry(
    gravitational_constant_times_density: f64,
    dyads: &PolyhedronDyads,
    snapshot: &GeometrySnapshot,
) -> na::Matrix3<f64> {
    let mut hessian = na::Matrix3::zeros();
    for (dyad, factor) in dyads.edge_dyads().iter().zip(snapshot.per_edge_factor()) {
        hessian += dyad * *factor;
    }
    for (dyad, factor) in dyads.facet_dyads().iter().zip(snapshot.per_facet_factor()) {
        hessian -= dyad * *factor;
    }
    gravitational_constant_times_density * hessian
}

/// Laplacian of the polyhedron potential (Eq. 17): zero outside the body and
/// -4 pi G rho inside.
pub fn laplacian_from_geometry(
    gravitational_constant_times_density: f64,
    snapshot: &GeometrySnapshot,
) -> f64 {
    -gravitational_constant_times_density * snapshot.per_facet_factor().iter().sum::<f64>()
}

/// Gravity field of a constant density polyhedron.
///
/// Shape and dyads are shared between forks of the same field; the geometry
/// cache is not, so each thread evaluating a body works on its own fork.
#[derive(Debug, Clone)]
pub struct PolyhedronGravityField {
    gravitational_parameter: f64,
    volume: f64,
    shape: Arc<PolyhedronShape>,
    dyads: Arc<PolyhedronDyads>,
    cache: PolyhedronGravityCache,
    fixed_reference_frame: String,
}

impl PolyhedronGravityField {
    /// Field with the volume derived from the shape.
    pub fn new(
        gravitational_parameter: f64,
        shape: Arc<PolyhedronShape>,
    ) -> Result<Self, PolyhedronErrors> {
        let volume = shape.volume();
        Self::with_volume(gravitational_parameter, volume, shape)
    }

    pub fn with_volume(
        gravitational_parameter: f64,
        volume: f64,
        shape: Arc<PolyhedronShape>,
    ) -> Result<Self, PolyhedronErrors> {
        if !(gravitational_parameter.is_finite() && gravitational_parameter > 0.0) {
            return Err(PolyhedronErrors::InvalidGravitationalParameter(
                gravitational_parameter,
            ));
        }
        if !(volume.is_finite() && volume > 0.0) {
            return Err(PolyhedronErrors::NonPositiveVolume(volume));
        }

        let dyads = Arc::new(PolyhedronDyads::compute(&shape)?);
        log::debug!(
            "Polyhedron gravity field: mu = {} m^3/s^2, volume = {} m^3, {} vertices",
            gravitational_parameter,
            volume,
            shape.vertex_count()
        );

        Ok(Self {
            gravitational_parameter,
            volume,
            cache: PolyhedronGravityCache::new(Arc::clone(&shape)),
            shape,
            dyads,
            fixed_reference_frame: String::new(),
        })
    }

    pub fn from_density(density: f64, shape: Arc<PolyhedronShape>) -> Result<Self, PolyhedronErrors> {
        let volume = shape.volume();
        Self::with_volume(G * density * volume, volume, shape)
    }

    pub fn with_fixed_reference_frame(mut self, frame: impl Into<String>) -> Self {
        self.fixed_reference_frame = frame.into();
        self
    }

    /// Another field over the same shape and dyads, with an empty cache.
    pub fn fork(&self) -> Self {
        Self {
            gravitational_parameter: self.gravitational_parameter,
            volume: self.volume,
            shape: Arc::clone(&self.shape),
            dyads: Arc::clone(&self.dyads),
            cache: PolyhedronGravityCache::new(Arc::clone(&self.shape)),
            fixed_reference_frame: self.fixed_reference_frame.clone(),
        }
    }

    pub fn volume(&self) -> f64 {
        self.volume
    }

    pub fn gravitational_constant_times_density(&self) -> f64 {
        self.gravitational_parameter / self.volume
    }

    pub fn shape(&self) -> &Arc<PolyhedronShape> {
        &self.shape
    }

    pub fn dyads(&self) -> &Arc<PolyhedronDyads> {
        &self.dyads
    }

    pub fn vertices(&self) -> &[na::Vector3<f64>] {
        self.shape.vertices()
    }

    pub fn facets(&self) -> &[[usize; 3]] {
        self.shape.facets()
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        self.shape.edges()
    }

    pub fn facet_dyads(&self) -> &[na::Matrix3<f64>] {
        self.dyads.facet_dyads()
    }

    pub fn edge_dyads(&self) -> &[na::Matrix3<f64>] {
        self.dyads.edge_dyads()
    }

    pub fn cache(&self) -> &PolyhedronGravityCache {
        &self.cache
    }

    pub fn fixed_reference_frame(&self) -> &str {
        &self.fixed_reference_frame
    }
}

impl GravityFieldModel for PolyhedronGravityField {
    fn gravitational_parameter(&self) -> f64 {
        self.gravitational_parameter
    }

    fn potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> f64 {
        let density_factor = self.gravitational_constant_times_density();
        let snapshot = self.cache.update(body_fixed_position);
        potential_from_geometry(density_factor, &self.shape, &self.dyads, snapshot)
    }

    fn gradient_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> na::Vector3<f64> {
        let density_factor = self.gravitational_constant_times_density();
        let snapshot = self.cache.update(body_fixed_position);
        gradient_from_geometry(density_factor, &self.shape, &self.dyads, snapshot)
    }

    fn hessian_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> na::Matrix3<f64> {
        let density_factor = self.gravitational_constant_times_density();
        let snapshot = self.cache.update(body_fixed_position);
        hessian_from_geometry(density_factor, &self.dyads, snapshot)
    }

    fn laplacian_of_potential(&mut self, body_fixed_position: &na::Vector3<f64>) -> f64 {
        let density_factor = self.gravitational_constant_times_density();
        let snapshot = self.cache.update(body_fixed_position);
        laplacian_from_geometry(density_factor, snapshot)
    }

    fn name(&self) -> &'static str {
        "polyhedron"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::shapes::CubeShape;
    use crate::constants::PI;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_case::test_case;

    fn cube_field() -> PolyhedronGravityField {
        CubeShape::gravity_field().unwrap()
    }

    fn tetrahedron_field() -> PolyhedronGravityField {
        let vertices = vec![
            na::Vector3::new(0.0, 0.0, 0.0),
            na::Vector3::new(3.0, 0.0, 0.0),
            na::Vector3::new(0.0, 2.0, 0.0),
            na::Vector3::new(0.0, 0.0, 1.5),
        ];
        let facets = vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]];
        let shape = PolyhedronShape::from_facets(vertices, facets).unwrap();
        PolyhedronGravityField::new(1.0e-3, Arc::new(shape)).unwrap()
    }

    #[test]
    fn constructor_checks() {
        let shape = Arc::new(CubeShape::shape().unwrap());
        assert_eq!(
            PolyhedronGravityField::new(-1.0, Arc::clone(&shape)).unwrap_err(),
            PolyhedronErrors::InvalidGravitationalParameter(-1.0)
        );
        assert_eq!(
            PolyhedronGravityField::with_volume(1.0, 0.0, Arc::clone(&shape)).unwrap_err(),
            PolyhedronErrors::NonPositiveVolume(0.0)
        );

        let field = cube_field().with_fixed_reference_frame("Cube_Fixed");
        assert_eq!(field.fixed_reference_frame(), "Cube_Fixed");
        assert_relative_eq!(field.volume(), 8000.0, max_relative = 1e-14);
        assert_relative_eq!(
            field.gravitational_constant_times_density(),
            G * CubeShape::DENSITY,
            max_relative = 1e-14
        );
        assert_eq!(field.vertices().len(), 8);
        assert_eq!(field.facets().len(), 12);
        assert_eq!(field.edges().len(), 18);
        assert_eq!(field.facet_dyads().len(), 12);
        assert_eq!(field.edge_dyads().len(), 18);
        assert!(!field.cache().is_valid());
    }

    #[test]
    fn cube_regression_values() {
        let mut field = cube_field();

        assert_relative_eq!(
            field.potential(&na::Vector3::zeros()),
            1.696555417423654e-4,
            max_relative = 1e-12
        );

        let above = na::Vector3::new(0.0, 0.0, 30.0);
        assert_relative_eq!(field.potential(&above), 4.739199533720782e-05, max_relative = 1e-12);
        let gradient = field.gradient_of_potential(&above);
        assert_abs_diff_eq!(gradient.x, 0.0, epsilon = 1e-20);
        assert_abs_diff_eq!(gradient.y, 0.0, epsilon = 1e-20);
        assert_relative_eq!(gradient.z, -1.5631440454872596e-06, max_relative = 1e-12);

        let hessian = field.hessian_of_potential(&above);
        assert_relative_eq!(hessian[(0, 0)], -5.078823370329524e-08, max_relative = 1e-10);
        assert_relative_eq!(hessian[(2, 2)], 1.0157646740659049e-07, max_relative = 1e-10);
    }

    #[test_case(na::Vector3::new(1.0e4, 0.0, 0.0); "on axis")]
    #[test_case(na::Vector3::new(1000.0, 2000.0, -500.0); "off axis")]
    fn far_field_tends_to_point_mass(position: na::Vector3<f64>) {
        let mut field = cube_field();
        let mu = field.gravitational_parameter();
        let r = position.norm();
        assert_relative_eq!(field.potential(&position), mu / r, max_relative = 1e-8);
        assert_relative_eq!(
            field.gradient_of_potential(&position),
            -mu * position / r.powi(3),
            max_relative = 1e-6
        );
    }

    #[test]
    fn irregular_far_field_centres_on_centroid() {
        let mut field = tetrahedron_field();
        let centroid = na::Vector3::new(0.75, 0.5, 0.375);
        let position = na::Vector3::new(-2.0e3, 1.5e3, 4.0e3);
        assert_relative_eq!(
            field.potential(&position),
            field.gravitational_parameter() / (position - centroid).norm(),
            max_relative = 1e-6
        );
    }

    #[test_case(na::Vector3::new(5.0, -3.0, 2.0), true; "inside cube")]
    #[test_case(na::Vector3::new(0.0, 0.0, 30.0), false; "above cube")]
    #[test_case(na::Vector3::new(-40.0, 25.0, 11.0), false; "off diagonal")]
    fn laplacian_inside_and_outside(position: na::Vector3<f64>, inside: bool) {
        let mut field = cube_field();
        let expected = if inside {
            -4.0 * PI * field.gravitational_constant_times_density()
        } else {
            0.0
        };
        let laplacian = field.laplacian_of_potential(&position);
        assert_abs_diff_eq!(laplacian, expected, epsilon = 1e-18);

        let hessian = field.hessian_of_potential(&position);
        assert_abs_diff_eq!(hessian.trace(), laplacian, epsilon = 1e-18);
        assert_abs_diff_eq!(hessian, hessian.transpose(), epsilon = 1e-20);
    }

    #[test_case(na::Vector3::new(5.0, -3.0, 2.0); "cube interior")]
    #[test_case(na::Vector3::new(25.0, -13.0, 18.0); "cube exterior")]
    #[test_case(na::Vector3::new(10.5, 3.0, -9.5); "near a cube edge")]
    fn cube_derivatives_match_finite_differences(position: na::Vector3<f64>) {
        assert_derivatives_match_finite_differences(&mut cube_field(), &position);
    }

    #[test_case(na::Vector3::new(0.5, 0.4, 0.3); "tetrahedron interior")]
    #[test_case(na::Vector3::new(4.0, -1.0, 2.5); "tetrahedron exterior")]
    fn tetrahedron_derivatives_match_finite_differences(position: na::Vector3<f64>) {
        assert_derivatives_match_finite_differences(&mut tetrahedron_field(), &position);
    }

    fn assert_derivatives_match_finite_differences(
        field: &mut PolyhedronGravityField,
        position: &na::Vector3<f64>,
    ) {
        let step = 1.0e-4;
        let gradient = field.gradient_of_potential(position);
        let hessian = field.hessian_of_potential(position);

        for axis in 0..3 {
            let offset = na::Vector3::ith(axis, step);
            let potential_difference =
                (field.potential(&(position + offset)) - field.potential(&(position - offset)))
                    / (2.0 * step);
            assert_abs_diff_eq!(
                potential_difference,
                gradient[axis],
                epsilon = 1e-6 * gradient.norm()
            );

            let gradient_difference = (field.gradient_of_potential(&(position + offset))
                - field.gradient_of_potential(&(position - offset)))
                / (2.0 * step);
            assert_abs_diff_eq!(
                gradient_difference,
                hessian.column(axis).into_owned(),
                epsilon = 1e-6 * hessian.norm()
            );
        }
    }

    #[test]
    fn cube_potential_is_symmetric() {
        let mut field = cube_field();
        let position = na::Vector3::new(5.0, -3.0, 2.0);
        let reference = field.potential(&position);
        for mirrored in [
            na::Vector3::new(-5.0, -3.0, 2.0),
            na::Vector3::new(5.0, 3.0, -2.0),
            na::Vector3::new(-3.0, 2.0, 5.0),
        ] {
            assert_relative_eq!(field.potential(&mirrored), reference, max_relative = 1e-13);
        }
    }

    #[test]
    fn alternating_queries_do_not_leak_state() {
        let first = na::Vector3::new(5.0, -3.0, 2.0);
        let second = na::Vector3::new(1000.0, 2000.0, -500.0);

        let mut field = cube_field();
        let mut reference = cube_field();
        let expected_first = reference.gradient_of_potential(&first);
        let expected_second = reference.gradient_of_potential(&second);

        for _ in 0..3 {
            assert_eq!(field.gradient_of_potential(&first), expected_first);
            assert_eq!(field.gradient_of_potential(&second), expected_second);
        }
        assert_eq!(field.cache().current_position().unwrap(), &second);
    }

    #[test]
    fn forks_evaluate_independently_across_threads() {
        let field = cube_field();
        let positions: Vec<na::Vector3<f64>> = (0..4)
            .map(|k| na::Vector3::new(20.0 + k as f64, -5.0 * k as f64, 3.0))
            .collect();

        let mut serial = field.fork();
        let expected: Vec<f64> = positions.iter().map(|p| serial.potential(p)).collect();

        let handles: Vec<_> = positions
            .iter()
            .map(|&position| {
                let mut local = field.fork();
                std::thread::spawn(move || local.potential(&position))
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), expected);
        }
        assert!(Arc::ptr_eq(field.shape(), serial.shape()));
        assert!(Arc::ptr_eq(field.dyads(), serial.dyads()));
    }
}
