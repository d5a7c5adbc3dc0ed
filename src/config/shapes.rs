use crate::physics::polyhedron::{PolyhedronErrors, PolyhedronGravityField, PolyhedronShape};
use nalgebra as na;
use std::sync::Arc;

/// Homogeneous cube centred on the origin, triangulated into 12 facets.
pub struct CubeShape;

impl CubeShape {
    pub const SIDE_LENGTH: f64 = 20.0; // meters
    pub const DENSITY: f64 = 2670.0; // kg/m^3

    pub fn vertices() -> Vec<na::Vector3<f64>> {
        let s = Self::SIDE_LENGTH / 2.0;
        vec![
            na::Vector3::new(-s, -s, -s),
            na::Vector3::new(s, -s, -s),
            na::Vector3::new(s, s, -s),
            na::Vector3::new(-s, s, -s),
            na::Vector3::new(-s, -s, s),
            na::Vector3::new(s, -s, s),
            na::Vector3::new(s, s, s),
            na::Vector3::new(-s, s, s),
        ]
    }

    pub fn facets() -> Vec<[usize; 3]> {
        vec![
            [0, 3, 2], // z = -s
            [0, 2, 1],
            [4, 5, 6], // z = +s
            [4, 6, 7],
            [0, 1, 5], // y = -s
            [0, 5, 4],
            [2, 3, 7], // y = +s
            [2, 7, 6],
            [1, 2, 6], // x = +s
            [1, 6, 5],
            [0, 4, 7], // x = -s
            [0, 7, 3],
        ]
    }

    pub fn shape() -> Result<PolyhedronShape, PolyhedronErrors> {
        PolyhedronShape::from_facets(Self::vertices(), Self::facets())
    }

    pub fn gravity_field() -> Result<PolyhedronGravityField, PolyhedronErrors> {
        PolyhedronGravityField::from_density(Self::DENSITY, Arc::new(Self::shape()?))
    }
}
