pub mod shape_loader;
pub mod shapes;
