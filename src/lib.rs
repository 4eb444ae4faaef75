pub mod constants;
pub mod control;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::*;
pub use control::atmosphere::{AtmosphereBand, AtmosphereProfile, ViscosityProfile};
pub use control::body::{BodyConfig, CelestialBody, RotationMode};
pub use control::environment::Environment;
pub use control::parts::{
    Booster, Engine, EngineState, FinRole, FinSide, FinState, FlightPart, GridFin, PartForce,
};
pub use control::spacecraft::Spacecraft;
pub use errors::SimulationError;

// Re-export commonly used items from trajectory_system
pub use trajectory_system::aerodynamics::{Aerodynamics, FinAeroState, FlowState};
pub use trajectory_system::kinematics::Kinematics;

// Re-export commonly used items from telemetry_system
pub use telemetry_system::telemetry::Telemetry;

// Re-export commonly used utilities
pub use utils::vector2d::Vector2D;
