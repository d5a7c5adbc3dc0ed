pub mod cache;
pub mod dyads;
pub mod field;
pub mod polyhedron_errors;
pub mod shape;

pub use cache::{GeometrySnapshot, PolyhedronGravityCache};
pub use dyads::PolyhedronDyads;
pub use field::PolyhedronGravityField;
pub use polyhedron_errors::PolyhedronErrors;
pub use shape::PolyhedronShape;
