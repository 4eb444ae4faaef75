use crate::constants::{
    EARTH_MASS, EARTH_POLAR_ROTATION_PERIOD, EARTH_POLAR_ROTATION_RATE, EARTH_RADIUS,
    EARTH_ROTATION_PERIOD, EARTH_ROTATION_RATE, GRAVITATIONAL_CONSTANT,
};
use crate::control::atmosphere::AtmosphereProfile;
use crate::errors::SimulationError;
use crate::utils::vector2d::Vector2D;

/// Selects how fast the body spins. Polar-orbit runs slow the surface
/// rotation down by a factor of 100 so ground tracks stay visible.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RotationMode {
    Standard,
    Polar,
}

/// Simulation-start configuration for a body. Passed in explicitly at
/// construction instead of living in process-wide settings.
#[derive(Clone, Copy, Debug)]
pub struct BodyConfig {
    pub rotation_mode: RotationMode,
}

impl Default for BodyConfig {
    fn default() -> Self {
        BodyConfig {
            rotation_mode: RotationMode::Standard,
        }
    }
}

/// A gravitating, atmosphere-bearing body. Constructed once at
/// simulation start and shared read-only by every craft near it.
#[derive(Clone, Debug)]
pub struct CelestialBody {
    pub name: String,
    pub position: Vector2D,
    pub radius: f64,
    pub mass: f64,
    pub rotation_rate: f64,
    pub rotation_period: f64,
    pub atmosphere: AtmosphereProfile,
}

impl CelestialBody {
    pub fn new(
        name: String,
        position: Vector2D,
        radius: f64,
        mass: f64,
        rotation_rate: f64,
        rotation_period: f64,
        atmosphere: AtmosphereProfile,
    ) -> Result<Self, SimulationError> {
        if radius <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Body radius must be positive, got {}",
                radius
            )));
        }
        if mass <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Body mass must be positive, got {}",
                mass
            )));
        }

        Ok(CelestialBody {
            name,
            position,
            radius,
            mass,
            rotation_rate,
            rotation_period,
            atmosphere,
        })
    }

    pub fn earth(config: BodyConfig) -> Self {
        let (rotation_rate, rotation_period) = match config.rotation_mode {
            RotationMode::Standard => (EARTH_ROTATION_RATE, EARTH_ROTATION_PERIOD),
            RotationMode::Polar => (EARTH_POLAR_ROTATION_RATE, EARTH_POLAR_ROTATION_PERIOD),
        };

        CelestialBody {
            name: "Earth".to_string(),
            position: Vector2D::zero(),
            radius: EARTH_RADIUS,
            mass: EARTH_MASS,
            rotation_rate,
            rotation_period,
            atmosphere: AtmosphereProfile::earth(),
        }
    }

    pub fn atmosphere_height(&self) -> f64 {
        self.atmosphere.atmosphere_height
    }

    pub fn surface_gravity(&self) -> f64 {
        GRAVITATIONAL_CONSTANT * self.mass / self.radius.powi(2)
    }

    pub fn gravity_at_altitude(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude.max(0.0);
        GRAVITATIONAL_CONSTANT * self.mass / distance.powi(2)
    }

    pub fn escape_velocity(&self, altitude: f64) -> f64 {
        let distance = self.radius + altitude.max(0.0);
        (2.0 * GRAVITATIONAL_CONSTANT * self.mass / distance).sqrt()
    }

    pub fn altitude_of(&self, position: &Vector2D) -> f64 {
        (*position - self.position).magnitude() - self.radius
    }

    /// Velocity of the co-rotating air mass at a point, tangential to the
    /// radial direction. Zero outside the atmosphere.
    pub fn atmosphere_velocity_at(&self, position: &Vector2D) -> Vector2D {
        if self.altitude_of(position) >= self.atmosphere_height() {
            return Vector2D::zero();
        }

        let radial = *position - self.position;
        radial.perpendicular() * self.rotation_rate
    }
}
