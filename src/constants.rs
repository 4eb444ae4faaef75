// Physical Constants
pub const GRAVITATIONAL_CONSTANT: f64 = 6.67430e-11; // N⋅m²/kg²
pub const EARTH_RADIUS: f64 = 6_371_000.0; // meters
pub const EARTH_MASS: f64 = 5.97219e24; // kg
pub const EARTH_ATMOSPHERE_HEIGHT: f64 = 70_000.0; // m

// Earth rotation, standard vs. polar-orbit pacing
pub const EARTH_ROTATION_RATE: f64 = -7.2722052166e-5; // rad/s
pub const EARTH_ROTATION_PERIOD: f64 = 86_400.0; // s
pub const EARTH_POLAR_ROTATION_RATE: f64 = -7.2722052166e-7; // rad/s
pub const EARTH_POLAR_ROTATION_PERIOD: f64 = 8_640_000.0; // s

// Aerodynamic Constants
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m³
pub const EARTH_SPEED_OF_SOUND: f64 = 340.29; // m/s
pub const HEAT_TRANSFER_COEFFICIENT: f64 = 1.7415e-4;

// Deployable Part Constants
pub const FIN_DEPLOY_RATE: f64 = 0.5; // rad/s
pub const FIN_DEPLOY_TIME: f64 = 3.0; // s
pub const CANARD_DRAG_WEIGHT: f64 = 0.075;
pub const MAIN_FIN_DRAG_WEIGHT: f64 = 0.34;

// Simulation Parameters
pub const TIME_STEP: f64 = 0.05; // s
pub const MAX_SIMULATION_TIME: f64 = 86_400.0; // s
