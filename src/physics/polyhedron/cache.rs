use super::polyhedron_errors::PolyhedronErrors;
use super::shape::PolyhedronShape;
use nalgebra as na;
use std::sync::Arc;

/// Position-dependent quantities of one polyhedron query.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometrySnapshot {
    position: na::Vector3<f64>,
    relative_coordinates: Vec<na::Vector3<f64>>,
    vertex_distances: Vec<f64>,
    per_facet_factor: Vec<f64>,
    per_edge_factor: Vec<f64>,
}

impl GeometrySnapshot {
    fn with_capacity(shape: &PolyhedronShape) -> Self {
        Self {
            // NaN never compares equal, so the first update always computes
            position: na::Vector3::repeat(f64::NAN),
            relative_coordinates: Vec::with_capacity(shape.vertex_count()),
            vertex_distances: Vec::with_capacity(shape.vertex_count()),
            per_facet_factor: Vec::with_capacity(shape.facet_count()),
            per_edge_factor: Vec::with_capacity(shape.edge_count()),
        }
    }

    pub fn position(&self) -> &na::Vector3<f64> {
        &self.position
    }

    /// Vertex positions relative to the query position.
    pub fn relative_coordinates(&self) -> &[na::Vector3<f64>] {
        &self.relative_coordinates
    }

    /// Signed solid angle subtended by each facet.
    pub fn per_facet_factor(&self) -> &[f64] {
        &self.per_facet_factor
    }

    /// Logarithmic factor of each edge.
    pub fn per_edge_factor(&self) -> &[f64] {
        &self.per_edge_factor
    }

    fn recompute(&mut self, shape: &PolyhedronShape, position: &na::Vector3<f64>) {
        self.position = *position;

        self.relative_coordinates.clear();
        self.relative_coordinates
            .extend(shape.vertices().iter().map(|vertex| vertex - position));

        self.vertex_distances.clear();
        self.vertex_distances
            .extend(self.relative_coordinates.iter().map(|r| r.norm()));

        let r = &self.relative_coordinates;
        let d = &self.vertex_distances;

        // Werner & Scheeres (1997), Eq. 27
        self.per_facet_factor.clear();
        self.per_facet_factor
            .extend(shape.facets().iter().map(|&[i, j, k]| {
                let numerator = r[i].dot(&r[j].cross(&r[k]));
                let denominator = d[i] * d[j] * d[k]
                    + d[i] * r[j].dot(&r[k])
                    + d[j] * r[k].dot(&r[i])
                    + d[k] * r[i].dot(&r[j]);
                2.0 * numerator.atan2(denominator)
            }));

        // Werner & Scheeres (1997), Eq. 7
        self.per_edge_factor.clear();
        self.per_edge_factor
            .extend(shape.edges().iter().map(|&[i, j]| {
                let edge_length = (r[j] - r[i]).norm();
                let distance_sum = d[i] + d[j];
                ((distance_sum + edge_length) / (distance_sum - edge_length)).ln()
            }));
    }
}

/// Caches the per-query geometry of a polyhedron for the last evaluated position.
///
/// Potential, gradient and Hessian at the same position share one computation.
/// Each gravity field owns its own cache.
#[derive(Debug, Clone)]
pub struct PolyhedronGravityCache {
    shape: Arc<PolyhedronShape>,
    current: Option<GeometrySnapshot>,
}

impl PolyhedronGravityCache {
    pub fn new(shape: Arc<PolyhedronShape>) -> Self {
        Self {
            shape,
            current: None,
        }
    }

    /// Brings the cache to `position` and returns the matching snapshot.
    ///
    /// Undefined for positions on a surface edge or vertex, where the edge
    /// factor diverges.
    pub fn update(&mut self, position: &na::Vector3<f64>) -> &GeometrySnapshot {
        let shape = &self.shape;
        let snapshot = self
            .current
            .get_or_insert_with(|| GeometrySnapshot::with_capacity(shape));
        if snapshot.position != *position {
            log::trace!("Recomputing polyhedron geometry at {:?}", position.as_slice());
            snapshot.recompute(shape, position);
        }
        snapshot
    }

    pub fn is_valid(&self) -> bool {
        self.current.is_some()
    }

    pub fn shape(&self) -> &Arc<PolyhedronShape> {
        &self.shape
    }

    pub fn snapshot(&self) -> Result<&GeometrySnapshot, PolyhedronErrors> {
        self.current
            .as_ref()
            .ok_or(PolyhedronErrors::UninitializedCache)
    }

    pub fn current_position(&self) -> Result<&na::Vector3<f64>, PolyhedronErrors> {
        self.snapshot().map(GeometrySnapshot::position)
    }

    pub fn relative_coordinates(&self) -> Result<&[na::Vector3<f64>], PolyhedronErrors> {
        self.snapshot().map(GeometrySnapshot::relative_coordinates)
    }

    pub fn per_facet_factor(&self) -> Result<&[f64], PolyhedronErrors> {
        self.snapshot().map(GeometrySnapshot::per_facet_factor)
    }

    pub fn per_edge_factor(&self) -> Result<&[f64], PolyhedronErrors> {
        self.snapshot().map(GeometrySnapshot::per_edge_factor)
    }
}
