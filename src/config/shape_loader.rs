use crate::physics::polyhedron::{PolyhedronErrors, PolyhedronGravityField, PolyhedronShape};
use csv::{ReaderBuilder, Trim};
use nalgebra as na;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use std::{error::Error, fmt, io};

#[derive(Debug)]
pub enum ShapeLoadErrors {
    IoError(io::Error),
    CsvError(csv::Error),
    ShapeError(PolyhedronErrors),
    MissingSettings,
    UnderdeterminedMass,
}

impl fmt::Display for ShapeLoadErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeLoadErrors::IoError(e) => write!(f, "I/O error: {}", e),
            ShapeLoadErrors::CsvError(e) => write!(f, "CSV parsing error: {}", e),
            ShapeLoadErrors::ShapeError(e) => write!(f, "Invalid polyhedron: {}", e),
            ShapeLoadErrors::MissingSettings => write!(f, "Settings file has no data row"),
            ShapeLoadErrors::UnderdeterminedMass => write!(
                f,
                "Either a gravitational parameter or a density must be given"
            ),
        }
    }
}

impl Error for ShapeLoadErrors {}

impl From<io::Error> for ShapeLoadErrors {
    fn from(err: io::Error) -> Self {
        ShapeLoadErrors::IoError(err)
    }
}

impl From<csv::Error> for ShapeLoadErrors {
    fn from(err: csv::Error) -> Self {
        ShapeLoadErrors::CsvError(err)
    }
}

impl From<PolyhedronErrors> for ShapeLoadErrors {
    fn from(err: PolyhedronErrors) -> Self {
        ShapeLoadErrors::ShapeError(err)
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct VertexRecord {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// Facet as three 0-based vertex indices, counter-clockwise seen from outside.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct FacetRecord {
    pub v1: usize,
    pub v2: usize,
    pub v3: usize,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct EdgeRecord {
    pub v1: usize,
    pub v2: usize,
}

/// Physical properties of a polyhedral body. A gravitational parameter takes
/// precedence over a density; the volume defaults to the one of the shape.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolyhedronSettings {
    pub gravitational_parameter: Option<f64>,
    pub density: Option<f64>,
    pub volume: Option<f64>,
    #[serde(default)]
    pub fixed_reference_frame: String,
}

impl PolyhedronSettings {
    pub fn build(
        &self,
        shape: Arc<PolyhedronShape>,
    ) -> Result<PolyhedronGravityField, ShapeLoadErrors> {
        let volume = self.volume.unwrap_or_else(|| shape.volume());
        let field = match (self.gravitational_parameter, self.density) {
            (Some(mu), _) => PolyhedronGravityField::with_volume(mu, volume, shape)?,
            (None, Some(density)) => PolyhedronGravityField::with_volume(
                crate::constants::G * density * volume,
                volume,
                shape,
            )?,
            (None, None) => return Err(ShapeLoadErrors::UnderdeterminedMass),
        };
        Ok(field.with_fixed_reference_frame(self.fixed_reference_frame.clone()))
    }
}

fn read_records<T: DeserializeOwned, R: io::Read>(reader: R) -> Result<Vec<T>, ShapeLoadErrors> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);
    let records = rdr.deserialize().collect::<Result<Vec<T>, csv::Error>>()?;
    Ok(records)
}

/// Reads `x,y,z` rows.
pub fn read_vertices<R: io::Read>(reader: R) -> Result<Vec<na::Vector3<f64>>, ShapeLoadErrors> {
    Ok(read_records::<VertexRecord, _>(reader)?
        .into_iter()
        .map(|v| na::Vector3::new(v.x, v.y, v.z))
        .collect())
}

/// Reads `v1,v2,v3` rows.
pub fn read_facets<R: io::Read>(reader: R) -> Result<Vec<[usize; 3]>, ShapeLoadErrors> {
    Ok(read_records::<FacetRecord, _>(reader)?
        .into_iter()
        .map(|f| [f.v1, f.v2, f.v3])
        .collect())
}

/// Reads `v1,v2` rows.
pub fn read_edges<R: io::Read>(reader: R) -> Result<Vec<[usize; 2]>, ShapeLoadErrors> {
    Ok(read_records::<EdgeRecord, _>(reader)?
        .into_iter()
        .map(|e| [e.v1, e.v2])
        .collect())
}

pub fn read_settings<R: io::Read>(reader: R) -> Result<PolyhedronSettings, ShapeLoadErrors> {
    read_records::<PolyhedronSettings, _>(reader)?
        .into_iter()
        .next()
        .ok_or(ShapeLoadErrors::MissingSettings)
}

/// Loads a shape from CSV files. Without an edge file the edges are derived
/// from the facets.
pub fn load_shape(
    vertices_path: impl AsRef<Path>,
    facets_path: impl AsRef<Path>,
    edges_path: Option<&Path>,
) -> Result<PolyhedronShape, ShapeLoadErrors> {
    let vertices = read_vertices(File::open(vertices_path)?)?;
    let facets = read_facets(File::open(facets_path)?)?;
    let shape = match edges_path {
        Some(path) => PolyhedronShape::new(vertices, facets, read_edges(File::open(path)?)?)?,
        None => PolyhedronShape::from_facets(vertices, facets)?,
    };
    log::debug!(
        "Loaded polyhedron with {} vertices, {} facets and {} edges",
        shape.vertex_count(),
        shape.facet_count(),
        shape.edge_count()
    );
    Ok(shape)
}
