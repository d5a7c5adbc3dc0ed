pub const G: f64 = 6.67430e-11; // Gravitational constant (m³/kg/s²)

// Gravitational parameters
pub const SUN_GRAVITATIONAL_PARAMETER: f64 = 1.32712440018e20; // (m³/s²)
pub const EARTH_GRAVITATIONAL_PARAMETER: f64 = 3.986004418e14; // (m³/s²)

// Radiation
pub const ASTRONOMICAL_UNIT: f64 = 1.495978707e11; // (m)
pub const SOLAR_LUMINOSITY: f64 = 3.828e26; // Nominal solar luminosity (W)
pub const SOLAR_CONSTANT: f64 = 1361.0; // Solar irradiance at 1 AU (W/m^2)

// Element conversion tolerances
pub const SINGULARITY_TOLERANCE: f64 = 1.0e-15; // Zero eccentricity / inclination detection
pub const RETROGRADE_SINGULARITY_TOLERANCE: f64 = 1.0e-14; // |cos(i/2)| below which λ is undefined, i.e. i within ~2e-14 rad of pi
pub const SMALL_ROTATION_ANGLE: f64 = 1.0e-4; // Series branch of the exponential map (rad)

// Math
pub const PI: f64 = std::f64::consts::PI;
pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
