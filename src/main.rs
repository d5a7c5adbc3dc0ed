use csv::Writer;
use env_logger::{Builder, Env};
use nalgebra as na;
use orbitfield::config::shapes::CubeShape;
use orbitfield::constants::*;
use orbitfield::elements::{keplerian_to_usmem, usmem_to_keplerian, KeplerianElements};
use orbitfield::physics::gravity::{GravityFieldModel, PointMassGravityField};
use orbitfield::physics::orbital::OrbitalMechanics;
use orbitfield::physics::radiation::{ConstantLuminosity, IsotropicPointRadiationSource};
use std::error::Error;
use std::fs::{self, File};
use std::path::Path;

fn main() -> Result<(), Box<dyn Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    // Create output directory if it doesn't exist
    let output_dir = Path::new("output");
    fs::create_dir_all(output_dir)?;

    write_polyhedron_orbit(&output_dir.join("polyhedron_orbit.csv"))?;
    write_element_conversions(&output_dir.join("usmem_elements.csv"))?;

    let sun = IsotropicPointRadiationSource::new(ConstantLuminosity::new(SOLAR_LUMINOSITY));
    log::info!(
        "Solar irradiance at 1 AU: {:.2} W/m^2",
        sun.irradiance_at_position(&na::Vector3::new(ASTRONOMICAL_UNIT, 0.0, 0.0))
    );

    Ok(())
}

/// Samples the cube's gravity field along an inclined, eccentric orbit and
/// compares it with a point mass of the same gravitational parameter.
fn write_polyhedron_orbit(path: &Path) -> Result<(), Box<dyn Error>> {
    let mut polyhedron = CubeShape::gravity_field()?.with_fixed_reference_frame("Cube_Fixed");
    let mu = polyhedron.gravitational_parameter();
    let mut point_mass = PointMassGravityField::new(mu);

    let elements = KeplerianElements::new(
        40.0,                  // semi-major axis (m)
        0.3,                   // eccentricity
        30.0_f64.to_radians(), // inclination
        0.4,                   // argument of periapsis
        1.2,                   // longitude of ascending node
        0.0,                   // true anomaly
    );

    let mut writer = Writer::from_writer(File::create(path)?);
    writer.write_record([
        "True Anomaly (deg)",
        "Position X (m)",
        "Position Y (m)",
        "Position Z (m)",
        "Potential (m^2/s^2)",
        "Acceleration X (m/s^2)",
        "Acceleration Y (m/s^2)",
        "Acceleration Z (m/s^2)",
        "Point Mass Deviation (-)",
        "Laplacian (1/s^2)",
    ])?;

    let samples = 72;
    for k in 0..samples {
        let mut sample = elements;
        sample[5] = TWO_PI * k as f64 / samples as f64;
        let (position, _) = OrbitalMechanics::keplerian_to_cartesian(&sample, mu)?;

        let potential = polyhedron.potential(&position);
        let acceleration = polyhedron.gradient_of_potential(&position);
        let laplacian = polyhedron.laplacian_of_potential(&position);
        let deviation = (acceleration - point_mass.acceleration(&position)).norm()
            / acceleration.norm();

        writer.write_record(&[
            sample[5].to_degrees().to_string(),
            position.x.to_string(),
            position.y.to_string(),
            position.z.to_string(),
            potential.to_string(),
            acceleration.x.to_string(),
            acceleration.y.to_string(),
            acceleration.z.to_string(),
            deviation.to_string(),
            laplacian.to_string(),
        ])?;
    }

    writer.flush()?;
    log::info!(
        "Polyhedron field samples in frame {} written to {}",
        polyhedron.fixed_reference_frame(),
        path.display()
    );
    Ok(())
}

/// Converts a set of heliocentric orbits to USMEM elements and back.
fn write_element_conversions(path: &Path) -> Result<(), Box<dyn Error>> {
    let cases = [
        ("elliptic", KeplerianElements::new(1.5e11, 0.1, 0.9, 1.2, 0.3, 2.1)),
        ("hyperbolic", KeplerianElements::new(-1.5e11, 1.5, 0.6, 4.0, 2.0, 0.7)),
        ("parabolic", KeplerianElements::new(1.5e11, 1.0, 1.1, 0.2, 5.0, 1.0)),
        ("circular equatorial", KeplerianElements::new(1.5e11, 0.0, 0.0, 0.0, 0.0, 3.0)),
        ("retrograde", KeplerianElements::new(1.5e11, 0.1, PI, 6.1, 0.26, 2.97)),
        ("undefined node", KeplerianElements::new(1.5e11, 0.1, 0.0, 1.0, 0.5, 0.2)),
    ];

    let mut writer = Writer::from_writer(File::create(path)?);
    writer.write_record([
        "Case", "C (m/s)", "Rf1 (m/s)", "Rf2 (m/s)", "e1 (-)", "e2 (-)", "e3 (-)",
        "Round Trip Error (-)",
    ])?;

    for (name, elements) in cases {
        let usmem = match keplerian_to_usmem(&elements, SUN_GRAVITATIONAL_PARAMETER) {
            Ok(usmem) => usmem,
            Err(e) => {
                log::warn!("Skipping {} orbit: {}", name, e);
                continue;
            }
        };
        let round_trip_error = match usmem_to_keplerian(&usmem, SUN_GRAVITATIONAL_PARAMETER) {
            Ok(recovered) => ((recovered - elements).component_div(&elements.map(|x| x.abs().max(1.0))))
                .amax(),
            Err(e) => {
                log::warn!("Cannot recover {} orbit: {}", name, e);
                f64::NAN
            }
        };

        let mut record = vec![name.to_string()];
        record.extend(usmem.iter().map(|x| x.to_string()));
        record.push(round_trip_error.to_string());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    log::info!("Element conversions written to {}", path.display());
    Ok(())
}
