use crate::constants::PI;
use nalgebra as na;

/// Total radiant power emitted by a source [W].
pub trait LuminosityModel {
    fn luminosity(&self) -> f64;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConstantLuminosity {
    luminosity: f64,
}

impl ConstantLuminosity {
    pub fn new(luminosity: f64) -> Self {
        Self { luminosity }
    }
}

impl LuminosityModel for ConstantLuminosity {
    fn luminosity(&self) -> f64 {
        self.luminosity
    }
}

/// Luminosity inferred from the irradiance measured at a reference distance,
/// e.g. the solar constant at 1 AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IrradianceBasedLuminosity {
    irradiance_at_distance: f64,
    distance: f64,
}

impl IrradianceBasedLuminosity {
    pub fn new(irradiance_at_distance: f64, distance: f64) -> Self {
        Self {
            irradiance_at_distance,
            distance,
        }
    }
}

impl LuminosityModel for IrradianceBasedLuminosity {
    fn luminosity(&self) -> f64 {
        4.0 * PI * self.distance * self.distance * self.irradiance_at_distance
    }
}

/// Point source radiating equally in all directions from the body centre.
#[derive(Debug, Clone)]
pub struct IsotropicPointRadiationSource<L: LuminosityModel> {
    luminosity_model: L,
}

impl<L: LuminosityModel> IsotropicPointRadiationSource<L> {
    pub fn new(luminosity_model: L) -> Self {
        Self { luminosity_model }
    }

    pub fn luminosity_model(&self) -> &L {
        &self.luminosity_model
    }

    /// Irradiance [W/m^2] at a position relative to the source centre.
    pub fn irradiance_at_position(&self, target_position: &na::Vector3<f64>) -> f64 {
        let distance_squared = target_position.norm_squared();
        self.luminosity_model.luminosity() / (4.0 * PI * distance_squared)
    }

    /// Irradiance paired with the position it originates from, in the source
    /// frame. A point source contributes a single entry at its centre.
    pub fn irradiance_with_source(
        &self,
        target_position: &na::Vector3<f64>,
    ) -> Vec<(f64, na::Vector3<f64>)> {
        vec![(self.irradiance_at_position(target_position), na::Vector3::zeros())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ASTRONOMICAL_UNIT, SOLAR_CONSTANT, SOLAR_LUMINOSITY};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn solar_irradiance_at_one_astronomical_unit() {
        let sun = IsotropicPointRadiationSource::new(ConstantLuminosity::new(SOLAR_LUMINOSITY));
        let position = na::Vector3::new(0.0, ASTRONOMICAL_UNIT, 0.0);
        assert_abs_diff_eq!(sun.irradiance_at_position(&position), 1361.0, epsilon = 0.5);
    }

    #[test]
    fn irradiance_based_luminosity_reproduces_reference() {
        let sun = IsotropicPointRadiationSource::new(IrradianceBasedLuminosity::new(
            SOLAR_CONSTANT,
            ASTRONOMICAL_UNIT,
        ));
        let at_one_au = na::Vector3::new(ASTRONOMICAL_UNIT, 0.0, 0.0);
        assert_relative_eq!(
            sun.irradiance_at_position(&at_one_au),
            SOLAR_CONSTANT,
            max_relative = 1e-14
        );

        // Inverse square law
        let at_two_au = na::Vector3::new(0.0, -2.0 * ASTRONOMICAL_UNIT, 0.0);
        assert_relative_eq!(
            sun.irradiance_at_position(&at_two_au),
            SOLAR_CONSTANT / 4.0,
            max_relative = 1e-14
        );
    }

    #[test]
    fn single_contribution_from_source_centre() {
        let source = IsotropicPointRadiationSource::new(ConstantLuminosity::new(1.0e3));
        let position = na::Vector3::new(3.0, 4.0, 0.0);
        let contributions = source.irradiance_with_source(&position);
        assert_eq!(contributions.len(), 1);
        assert_relative_eq!(contributions[0].0, 1.0e3 / (4.0 * PI * 25.0), max_relative = 1e-15);
        assert_eq!(contributions[0].1, na::Vector3::zeros());
        assert_eq!(source.luminosity_model().luminosity(), 1.0e3);
    }
}
