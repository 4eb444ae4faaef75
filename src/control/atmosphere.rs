use crate::errors::SimulationError;

/// Per-band temperature fit, in the profile's native temperature unit.
#[derive(Clone, Copy, Debug)]
pub enum TemperatureLaw {
    Linear { base: f64, lapse: f64 },
    Constant(f64),
}

impl TemperatureLaw {
    fn evaluate(&self, altitude: f64) -> f64 {
        match *self {
            TemperatureLaw::Linear { base, lapse } => base + lapse * altitude,
            TemperatureLaw::Constant(value) => value,
        }
    }
}

/// Per-band pressure fit: a power law of absolute temperature or an
/// exponential decay with altitude.
#[derive(Clone, Copy, Debug)]
pub enum PressureLaw {
    PowerLaw {
        base: f64,
        temperature_ref: f64,
        exponent: f64,
    },
    Exponential {
        base: f64,
        offset: f64,
        altitude_scale: f64,
    },
}

impl PressureLaw {
    fn evaluate(&self, altitude: f64, absolute_temperature: f64) -> f64 {
        match *self {
            PressureLaw::PowerLaw {
                base,
                temperature_ref,
                exponent,
            } => base * (absolute_temperature / temperature_ref).powf(exponent),
            PressureLaw::Exponential {
                base,
                offset,
                altitude_scale,
            } => base * (offset - altitude_scale * altitude).exp(),
        }
    }
}

/// One altitude band of the piecewise density model. Bands are stored
/// highest floor first; the band applies from its floor upward.
#[derive(Clone, Copy, Debug)]
pub struct AtmosphereBand {
    pub floor: f64,
    pub temperature: TemperatureLaw,
    pub pressure: PressureLaw,
}

/// Two-band viscosity fit: constant above the breakpoint, linear below.
#[derive(Clone, Copy, Debug)]
pub struct ViscosityProfile {
    pub breakpoint: f64,
    pub constant_above: f64,
    pub slope: f64,
    pub intercept: f64,
}

/// Data-driven atmosphere constants for one body. Each body supplies its
/// own band breakpoints and unit conversions; the evaluation code is
/// shared.
#[derive(Clone, Debug)]
pub struct AtmosphereProfile {
    pub atmosphere_height: f64,
    bands: Vec<AtmosphereBand>,
    gas_constant: f64,
    absolute_zero_offset: f64,
    density_scale: f64,
    viscosity: ViscosityProfile,
    pub speed_of_sound: f64,
}

impl AtmosphereProfile {
    pub fn new(
        atmosphere_height: f64,
        bands: Vec<AtmosphereBand>,
        gas_constant: f64,
        absolute_zero_offset: f64,
        density_scale: f64,
        viscosity: ViscosityProfile,
        speed_of_sound: f64,
    ) -> Result<Self, SimulationError> {
        if atmosphere_height < 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Atmosphere height must be non-negative, got {}",
                atmosphere_height
            )));
        }
        if atmosphere_height > 0.0 && bands.is_empty() {
            return Err(SimulationError::ConfigError(
                "An atmosphere-bearing profile needs at least one density band".to_string(),
            ));
        }
        if gas_constant <= 0.0 || density_scale <= 0.0 {
            return Err(SimulationError::ConfigError(
                "Gas constant and density scale must be positive".to_string(),
            ));
        }
        if speed_of_sound <= 0.0 {
            return Err(SimulationError::ConfigError(
                "Speed of sound must be positive".to_string(),
            ));
        }

        Ok(AtmosphereProfile {
            atmosphere_height,
            bands,
            gas_constant,
            absolute_zero_offset,
            density_scale,
            viscosity,
            speed_of_sound,
        })
    }

    /// A profile for airless bodies: zero density and viscosity everywhere.
    pub fn vacuum() -> Self {
        AtmosphereProfile {
            atmosphere_height: 0.0,
            bands: Vec::new(),
            gas_constant: 1.0,
            absolute_zero_offset: 0.0,
            density_scale: 1.0,
            viscosity: ViscosityProfile {
                breakpoint: 0.0,
                constant_above: 0.0,
                slope: 0.0,
                intercept: 0.0,
            },
            speed_of_sound: 1.0,
        }
    }

    /// Atmospheric density in kg/m³ at the given altitude.
    ///
    /// Realistic density model based off https://www.grc.nasa.gov/www/k-12/rocket/atmos.html
    pub fn density(&self, altitude: f64) -> f64 {
        if altitude >= self.atmosphere_height {
            return 0.0;
        }

        let band = self
            .bands
            .iter()
            .find(|band| altitude > band.floor)
            .or_else(|| self.bands.last());

        let band = match band {
            Some(band) => band,
            None => return 0.0,
        };

        let temperature = band.temperature.evaluate(altitude);
        let absolute_temperature = temperature + self.absolute_zero_offset;
        if absolute_temperature <= 0.0 {
            return 0.0;
        }

        let pressure = band.pressure.evaluate(altitude, absolute_temperature);
        let density = pressure / (self.gas_constant * absolute_temperature);

        density * self.density_scale
    }

    /// Dynamic viscosity in Pa·s at the given altitude.
    pub fn viscosity(&self, altitude: f64) -> f64 {
        if altitude >= self.atmosphere_height {
            return 0.0;
        }

        if altitude > self.viscosity.breakpoint {
            self.viscosity.constant_above
        } else {
            self.viscosity.slope * altitude + self.viscosity.intercept
        }
    }

    /// Earth's atmosphere. The fits work in imperial units internally and
    /// convert to kg/m³ at the end, matching the NASA model they came from.
    pub fn earth() -> Self {
        let bands = vec![
            // Upper stratosphere, above 25 098.756 m
            AtmosphereBand {
                floor: 25_098.756,
                temperature: TemperatureLaw::Linear {
                    base: -205.05,
                    lapse: 0.0053805776,
                },
                pressure: PressureLaw::PowerLaw {
                    base: 51.97,
                    temperature_ref: 389.98,
                    exponent: -11.388,
                },
            },
            // Lower stratosphere, above 11 019.13 m
            AtmosphereBand {
                floor: 11_019.13,
                temperature: TemperatureLaw::Constant(-70.0),
                pressure: PressureLaw::Exponential {
                    base: 473.1,
                    offset: 1.73,
                    altitude_scale: 0.00015748032,
                },
            },
            // Troposphere
            AtmosphereBand {
                floor: 0.0,
                temperature: TemperatureLaw::Linear {
                    base: 59.0,
                    lapse: -0.0116797904,
                },
                pressure: PressureLaw::PowerLaw {
                    base: 2116.0,
                    temperature_ref: 518.6,
                    exponent: 5.256,
                },
            },
        ];

        AtmosphereProfile {
            atmosphere_height: crate::constants::EARTH_ATMOSPHERE_HEIGHT,
            bands,
            gas_constant: 1718.0,
            absolute_zero_offset: 459.7,
            density_scale: 515.379,
            viscosity: ViscosityProfile {
                breakpoint: 10_668.0,
                constant_above: 0.0000089213,
                slope: -5.37e-10,
                intercept: 1.458e-5,
            },
            speed_of_sound: crate::constants::EARTH_SPEED_OF_SOUND,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use crate::constants::AIR_DENSITY_SEA_LEVEL;

    #[test]
    fn test_sea_level_density() {
        let atmosphere = AtmosphereProfile::earth();
        assert_abs_diff_eq!(
            atmosphere.density(0.0),
            AIR_DENSITY_SEA_LEVEL,
            epsilon = 0.01
        );
    }

    #[test]
    fn test_density_zero_at_and_above_atmosphere_height() {
        let atmosphere = AtmosphereProfile::earth();
        assert_eq!(atmosphere.density(70_000.0), 0.0);
        assert_eq!(atmosphere.density(71_000.0), 0.0);
        assert_eq!(atmosphere.density(500_000.0), 0.0);
        assert_eq!(atmosphere.viscosity(70_000.0), 0.0);
        assert_eq!(atmosphere.viscosity(71_000.0), 0.0);
    }

    #[test]
    fn test_density_monotonically_non_increasing() {
        let atmosphere = AtmosphereProfile::earth();
        let mut previous = atmosphere.density(0.0);
        let mut altitude = 250.0;
        while altitude < 70_000.0 {
            let density = atmosphere.density(altitude);
            assert!(
                density <= previous,
                "Density increased from {} to {} at {} m",
                previous,
                density,
                altitude
            );
            previous = density;
            altitude += 250.0;
        }
    }

    #[test]
    fn test_density_continuity_across_band_edges() {
        let atmosphere = AtmosphereProfile::earth();
        for edge in [11_019.13, 25_098.756] {
            let below = atmosphere.density(edge - 0.5);
            let above = atmosphere.density(edge + 0.5);
            assert_relative_eq!(below, above, max_relative = 0.03);
        }
    }

    #[test]
    fn test_viscosity_bands() {
        let atmosphere = AtmosphereProfile::earth();

        // Linear below the breakpoint
        assert_relative_eq!(atmosphere.viscosity(0.0), 1.458e-5, epsilon = 1e-12);
        assert_relative_eq!(
            atmosphere.viscosity(5_000.0),
            -5.37e-10 * 5_000.0 + 1.458e-5,
            epsilon = 1e-12
        );

        // Constant above it, up to the edge of the atmosphere
        assert_relative_eq!(atmosphere.viscosity(20_000.0), 0.0000089213, epsilon = 1e-12);
        assert_relative_eq!(atmosphere.viscosity(69_999.0), 0.0000089213, epsilon = 1e-12);
    }

    #[test]
    fn test_viscosity_non_increasing() {
        let atmosphere = AtmosphereProfile::earth();
        let mut previous = atmosphere.viscosity(0.0);
        let mut altitude = 500.0;
        while altitude < 71_000.0 {
            let viscosity = atmosphere.viscosity(altitude);
            assert!(viscosity <= previous);
            previous = viscosity;
            altitude += 500.0;
        }
    }

    #[test]
    fn test_vacuum_profile() {
        let vacuum = AtmosphereProfile::vacuum();
        assert_eq!(vacuum.density(0.0), 0.0);
        assert_eq!(vacuum.viscosity(0.0), 0.0);
    }

    #[test]
    fn test_invalid_profile_rejected() {
        let result = AtmosphereProfile::new(
            -1.0,
            Vec::new(),
            1718.0,
            459.7,
            515.379,
            ViscosityProfile {
                breakpoint: 0.0,
                constant_above: 0.0,
                slope: 0.0,
                intercept: 0.0,
            },
            340.0,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_tropopause_density() {
        // Just below the first band edge the troposphere fit should be
        // close to the standard-atmosphere value of ~0.36 kg/m³.
        let atmosphere = AtmosphereProfile::earth();
        assert_abs_diff_eq!(atmosphere.density(11_000.0), 0.36, epsilon = 0.02);
    }
}
