use super::polyhedron_errors::PolyhedronErrors;
use super::shape::{edge_key, PolyhedronShape};
use nalgebra as na;
use std::collections::HashMap;

/// Facet and edge dyads of a polyhedron (Werner & Scheeres, 1997).
///
/// They depend only on the shape, so they are computed once and shared by every
/// field evaluating that shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyhedronDyads {
    facet_dyads: Vec<na::Matrix3<f64>>,
    edge_dyads: Vec<na::Matrix3<f64>>,
}

/// One side of an edge: the facet and the direction in which it traverses the edge.
#[derive(Debug, Clone, Copy)]
struct EdgeSide {
    facet: usize,
    from: usize,
    to: usize,
}

impl PolyhedronDyads {
    pub fn compute(shape: &PolyhedronShape) -> Result<Self, PolyhedronErrors> {
        let normals: Vec<na::Vector3<f64>> =
            (0..shape.facet_count()).map(|f| shape.facet_normal(f)).collect();

        let facet_dyads = normals.iter().map(|n| n * n.transpose()).collect();

        let mut adjacency: HashMap<[usize; 2], Vec<EdgeSide>> = HashMap::new();
        for (facet, vertices) in shape.facets().iter().enumerate() {
            for k in 0..3 {
                let (from, to) = (vertices[k], vertices[(k + 1) % 3]);
                adjacency
                    .entry(edge_key(from, to))
                    .or_default()
                    .push(EdgeSide { facet, from, to });
            }
        }

        check_edge_coverage(shape, &adjacency)?;

        let edge_dyads = shape
            .edges()
            .iter()
            .enumerate()
            .map(|(index, edge)| {
                let sides = adjacency
                    .get(&edge_key(edge[0], edge[1]))
                    .map(Vec::as_slice)
                    .unwrap_or(&[]);
                let [side_a, side_b] = match sides {
                    [a, b] => [*a, *b],
                    _ => {
                        return Err(PolyhedronErrors::OpenEdge {
                            edge: index,
                            facet_count: sides.len(),
                        })
                    }
                };
                if side_a.from != side_b.to || side_a.to != side_b.from {
                    return Err(PolyhedronErrors::InconsistentOrientation { edge: index });
                }
                Ok(edge_normal_dyad(shape, &normals, side_a)
                    + edge_normal_dyad(shape, &normals, side_b))
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!(
            "Computed {} facet dyads and {} edge dyads",
            shape.facet_count(),
            shape.edge_count()
        );

        Ok(Self {
            facet_dyads,
            edge_dyads,
        })
    }

    pub fn facet_dyads(&self) -> &[na::Matrix3<f64>] {
        &self.facet_dyads
    }

    pub fn edge_dyads(&self) -> &[na::Matrix3<f64>] {
        &self.edge_dyads
    }
}

/// Every facet edge must appear exactly once in the edge list.
fn check_edge_coverage(
    shape: &PolyhedronShape,
    adjacency: &HashMap<[usize; 2], Vec<EdgeSide>>,
) -> Result<(), PolyhedronErrors> {
    let mut listed: HashMap<[usize; 2], usize> = HashMap::with_capacity(shape.edge_count());
    for (index, edge) in shape.edges().iter().enumerate() {
        if let Some(&first) = listed.get(&edge_key(edge[0], edge[1])) {
            return Err(PolyhedronErrors::DuplicateEdge { edge: index, first });
        }
        listed.insert(edge_key(edge[0], edge[1]), index);
    }
    if listed.len() == adjacency.len() && adjacency.keys().all(|key| listed.contains_key(key)) {
        return Ok(());
    }
    // Report the first unlisted edge in facet order
    for (facet, vertices) in shape.facets().iter().enumerate() {
        for k in 0..3 {
            let key = edge_key(vertices[k], vertices[(k + 1) % 3]);
            if !listed.contains_key(&key) {
                return Err(PolyhedronErrors::MissingEdge {
                    vertices: key,
                    facet,
                });
            }
        }
    }
    Ok(())
}

/// n_f n_fe^T for one facet adjacent to an edge; n_fe lies in the facet plane,
/// perpendicular to the edge, pointing out of the facet.
fn edge_normal_dyad(
    shape: &PolyhedronShape,
    normals: &[na::Vector3<f64>],
    side: EdgeSide,
) -> na::Matrix3<f64> {
    let normal = normals[side.facet];
    let direction = shape.vertices()[side.to] - shape.vertices()[side.from];
    let edge_normal = direction.cross(&normal).normalize();
    normal * edge_normal.transpose()
}
