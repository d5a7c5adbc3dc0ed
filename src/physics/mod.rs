pub mod gravity;
pub mod orbital;
pub mod polyhedron;
pub mod radiation;
