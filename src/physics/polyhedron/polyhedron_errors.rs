use std::{error::Error, fmt};

#[derive(Debug, Clone, PartialEq)]
pub enum PolyhedronErrors {
    EmptyShape,
    VertexIndexOutOfRange {
        element: &'static str,
        index: usize,
        vertex: usize,
        vertex_count: usize,
    },
    DegenerateFacet(usize),
    DegenerateEdge(usize),
    OpenEdge { edge: usize, facet_count: usize },
    MissingEdge { vertices: [usize; 2], facet: usize },
    DuplicateEdge { edge: usize, first: usize },
    InconsistentOrientation { edge: usize },
    NonPositiveVolume(f64),
    InvalidGravitationalParameter(f64),
    UninitializedCache,
}

impl PolyhedronErrors {
    /// Errors raised while loading a malformed shape, as opposed to usage errors.
    pub fn is_inconsistent_shape(&self) -> bool {
        !matches!(
            self,
            PolyhedronErrors::UninitializedCache | PolyhedronErrors::InvalidGravitationalParameter(_)
        )
    }
}

impl fmt::Display for PolyhedronErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolyhedronErrors::EmptyShape => write!(f, "Polyhedron has no vertices or facets"),
            PolyhedronErrors::VertexIndexOutOfRange {
                element,
                index,
                vertex,
                vertex_count,
            } => write!(
                f,
                "{} {} references vertex {}, but only {} vertices exist",
                element, index, vertex, vertex_count
            ),
            PolyhedronErrors::DegenerateFacet(facet) => {
                write!(f, "Facet {} has repeated vertices or zero area", facet)
            }
            PolyhedronErrors::DegenerateEdge(edge) => {
                write!(f, "Edge {} connects a vertex to itself", edge)
            }
            PolyhedronErrors::OpenEdge { edge, facet_count } => write!(
                f,
                "Edge {} is shared by {} facets instead of 2",
                edge, facet_count
            ),
            PolyhedronErrors::MissingEdge { vertices, facet } => write!(
                f,
                "Edge between vertices {} and {} of facet {} is not in the edge list",
                vertices[0], vertices[1], facet
            ),
            PolyhedronErrors::DuplicateEdge { edge, first } => {
                write!(f, "Edge {} repeats edge {}", edge, first)
            }
            PolyhedronErrors::InconsistentOrientation { edge } => write!(
                f,
                "Facets adjacent to edge {} are not consistently oriented",
                edge
            ),
            PolyhedronErrors::NonPositiveVolume(volume) => {
                write!(f, "Polyhedron volume {} is not positive", volume)
            }
            PolyhedronErrors::InvalidGravitationalParameter(mu) => {
                write!(f, "Invalid gravitational parameter {}", mu)
            }
            PolyhedronErrors::UninitializedCache => {
                write!(f, "Polyhedron cache read before the first update")
            }
        }
    }
}

impl Error for PolyhedronErrors {}
