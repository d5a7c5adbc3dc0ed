use super::polyhedron_errors::PolyhedronErrors;
use nalgebra as na;
use std::collections::HashSet;

/// Constant shape of a polyhedron.
///
/// Facets list their vertices counter-clockwise as seen from outside the body,
/// so that `(v1 - v0) x (v2 - v0)` is the outward normal. Indices are 0-based.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronShape {
    vertices: Vec<na::Vector3<f64>>,
    facets: Vec<[usize; 3]>,
    edges: Vec<[usize; 2]>,
}

/// Undirected key of the edge between two vertices.
pub(super) fn edge_key(a: usize, b: usize) -> [usize; 2] {
    if a < b {
        [a, b]
    } else {
        [b, a]
    }
}

impl PolyhedronShape {
    pub fn new(
        vertices: Vec<na::Vector3<f64>>,
        facets: Vec<[usize; 3]>,
        edges: Vec<[usize; 2]>,
    ) -> Result<Self, PolyhedronErrors> {
        if vertices.is_empty() || facets.is_empty() {
            return Err(PolyhedronErrors::EmptyShape);
        }
        let vertex_count = vertices.len();
        let out_of_range = |element: &'static str, index: usize, vertex: usize| {
            PolyhedronErrors::VertexIndexOutOfRange {
                element,
                index,
                vertex,
                vertex_count,
            }
        };

        for (index, facet) in facets.iter().enumerate() {
            if let Some(&vertex) = facet.iter().find(|&&v| v >= vertex_count) {
                return Err(out_of_range("Facet", index, vertex));
            }
            let [a, b, c] = *facet;
            if a == b || b == c || a == c {
                return Err(PolyhedronErrors::DegenerateFacet(index));
            }
            let area_vector = (vertices[b] - vertices[a]).cross(&(vertices[c] - vertices[a]));
            if area_vector.norm() == 0.0 {
                return Err(PolyhedronErrors::DegenerateFacet(index));
            }
        }

        for (index, edge) in edges.iter().enumerate() {
            if let Some(&vertex) = edge.iter().find(|&&v| v >= vertex_count) {
                return Err(out_of_range("Edge", index, vertex));
            }
            if edge[0] == edge[1] {
                return Err(PolyhedronErrors::DegenerateEdge(index));
            }
        }

        Ok(Self {
            vertices,
            facets,
            edges,
        })
    }

    /// Builds the shape deriving the edge list from the facets, in order of
    /// first appearance.
    pub fn from_facets(
        vertices: Vec<na::Vector3<f64>>,
        facets: Vec<[usize; 3]>,
    ) -> Result<Self, PolyhedronErrors> {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();
        for facet in &facets {
            for k in 0..3 {
                let (a, b) = (facet[k], facet[(k + 1) % 3]);
                if seen.insert(edge_key(a, b)) {
                    edges.push([a, b]);
                }
            }
        }
        Self::new(vertices, facets, edges)
    }

    pub fn vertices(&self) -> &[na::Vector3<f64>] {
        &self.vertices
    }

    pub fn facets(&self) -> &[[usize; 3]] {
        &self.facets
    }

    pub fn edges(&self) -> &[[usize; 2]] {
        &self.edges
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Outward unit normal of a facet.
    pub fn facet_normal(&self, facet: usize) -> na::Vector3<f64> {
        let [a, b, c] = self.facets[facet];
        let v = &self.vertices;
        (v[b] - v[a]).cross(&(v[c] - v[a])).normalize()
    }

    /// Enclosed volume, summing the signed tetrahedra spanned by the origin and
    /// each facet.
    pub fn volume(&self) -> f64 {
        self.facets
            .iter()
            .map(|&[a, b, c]| {
                self.vertices[a].dot(&self.vertices[b].cross(&self.vertices[c]))
            })
            .sum::<f64>()
            / 6.0
    }
}
