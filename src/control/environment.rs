use crate::control::body::CelestialBody;
use crate::utils::vector2d::Vector2D;

/// Ambient conditions at a craft's position, recomputed from the body's
/// profiles at the start of every tick.
#[derive(Debug, Clone, Copy)]
pub struct Environment {
    pub altitude: f64,
    pub air_density: f64,
    pub viscosity: f64,
    pub speed_of_sound: f64,
    pub gravity: f64,
    pub atmosphere_velocity: Vector2D,
}

impl Environment {
    pub fn at(body: &CelestialBody, position: &Vector2D) -> Self {
        let altitude = body.altitude_of(position);

        Environment {
            altitude,
            air_density: body.atmosphere.density(altitude),
            viscosity: body.atmosphere.viscosity(altitude),
            speed_of_sound: body.atmosphere.speed_of_sound,
            gravity: body.gravity_at_altitude(altitude),
            atmosphere_velocity: body.atmosphere_velocity_at(position),
        }
    }

    pub fn is_in_atmosphere(&self) -> bool {
        self.air_density > 0.0
    }
}
