use crate::constants::{
    CANARD_DRAG_WEIGHT, FIN_DEPLOY_RATE, FIN_DEPLOY_TIME, MAIN_FIN_DRAG_WEIGHT,
};
use crate::control::environment::Environment;
use crate::errors::SimulationError;
use crate::trajectory_system::aerodynamics::{dynamic_pressure, FinAeroState, FlowState};
use crate::utils::vector2d::Vector2D;

/// Force contribution of one part, with its torque about the craft's
/// center of mass.
#[derive(Debug, Clone, Copy)]
pub struct PartForce {
    pub force: Vector2D,
    pub torque: f64,
}

impl PartForce {
    pub fn zero() -> Self {
        PartForce {
            force: Vector2D::zero(),
            torque: 0.0,
        }
    }
}

/// Capability seam for the per-tick pipeline: a part first advances its
/// local state, then reports its force for the current flow snapshot.
pub trait FlightPart {
    fn update_state(&mut self, dt: f64);

    fn contribute_force(&self, flow: &FlowState, environment: &Environment, pitch: f64)
        -> PartForce;
}

/// Which aerodynamic station a fin occupies. The drag model weights a
/// canard differently from a main fin; the weight rides on this role
/// tag, never on the fin's position in a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinRole {
    Canard,
    Main,
}

impl FinRole {
    pub fn drag_weight(&self) -> f64 {
        match self {
            FinRole::Canard => CANARD_DRAG_WEIGHT,
            FinRole::Main => MAIN_FIN_DRAG_WEIGHT,
        }
    }
}

/// Mounted side decides which way the fin swings out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinSide {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinState {
    Stowed,
    Deploying,
    Deployed,
}

/// A deployable grid fin. Deployment is one-way: once the actuator has
/// run its course the fin stays out.
#[derive(Debug, Clone)]
pub struct GridFin {
    pub role: FinRole,
    pub side: FinSide,
    pub offset: Vector2D,
    pub width: f64,
    pub height: f64,
    rest_dihedral: f64,
    dihedral: f64,
    state: FinState,
    deploy_timer: f64,
}

impl GridFin {
    pub fn new(
        role: FinRole,
        side: FinSide,
        offset: Vector2D,
        width: f64,
        height: f64,
        rest_dihedral: f64,
    ) -> Result<Self, SimulationError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Fin dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        Ok(GridFin {
            role,
            side,
            offset,
            width,
            height,
            rest_dihedral,
            dihedral: rest_dihedral,
            state: FinState::Stowed,
            deploy_timer: 0.0,
        })
    }

    /// Starts the deploy actuator. A fin already swinging or locked out
    /// ignores the command.
    pub fn deploy(&mut self) {
        if self.state != FinState::Stowed {
            return;
        }
        if self.dihedral > self.rest_dihedral + 1e-9 {
            return;
        }

        self.state = FinState::Deploying;
    }

    pub fn state(&self) -> FinState {
        self.state
    }

    pub fn dihedral(&self) -> f64 {
        self.dihedral
    }

    pub fn aero_state(&self) -> FinAeroState {
        FinAeroState {
            dihedral: self.dihedral,
            drag_weight: self.role.drag_weight(),
        }
    }

    fn area(&self) -> f64 {
        self.width * self.height
    }
}

impl FlightPart for GridFin {
    fn update_state(&mut self, dt: f64) {
        if self.state != FinState::Deploying {
            return;
        }

        self.deploy_timer += dt;

        let rate = match self.side {
            FinSide::Left => FIN_DEPLOY_RATE,
            FinSide::Right => -FIN_DEPLOY_RATE,
        };
        self.dihedral += rate * dt;

        if self.deploy_timer > FIN_DEPLOY_TIME {
            self.state = FinState::Deployed;
        }
    }

    fn contribute_force(
        &self,
        flow: &FlowState,
        environment: &Environment,
        pitch: f64,
    ) -> PartForce {
        let speed = flow.speed();
        if speed == 0.0 || environment.air_density == 0.0 {
            return PartForce::zero();
        }

        let q = dynamic_pressure(environment.air_density, speed);

        // Projected fin area follows its dihedral sweep
        let drag_area = self.area() * self.dihedral.cos().abs();
        let drag_magnitude = q * drag_area * self.role.drag_weight();
        let drag = -flow.relative_velocity.normalize() * drag_magnitude;

        // Deflected fins steer: lift from the local incidence angle
        let incidence = flow.angle_of_attack + self.dihedral;
        let lift_magnitude = q * self.area() * (2.0 * incidence).sin() * self.role.drag_weight();
        let lift = flow.relative_velocity.normalize().perpendicular() * lift_magnitude;

        let force = drag + lift;
        let arm = self.offset.rotate(pitch);

        PartForce {
            force,
            torque: arm.cross(&force),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    Off,
    Throttled,
}

/// A gimballed engine. Its state follows the commanded throttle
/// directly; there is no spool-up timer.
#[derive(Debug, Clone)]
pub struct Engine {
    pub cant: f64,
    pub offset: Vector2D,
    pub max_thrust: f64,
    pub burn_rate: f64,
    throttle: f64,
    state: EngineState,
}

impl Engine {
    pub fn new(
        cant: f64,
        offset: Vector2D,
        max_thrust: f64,
        burn_rate: f64,
    ) -> Result<Self, SimulationError> {
        if max_thrust < 0.0 || burn_rate < 0.0 {
            return Err(SimulationError::ConfigError(
                "Engine thrust and burn rate must be non-negative".to_string(),
            ));
        }

        Ok(Engine {
            cant,
            offset,
            max_thrust,
            burn_rate,
            throttle: 0.0,
            state: EngineState::Off,
        })
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn thrust(&self) -> f64 {
        match self.state {
            EngineState::Throttled => self.max_thrust * self.throttle,
            EngineState::Off => 0.0,
        }
    }

    pub fn propellant_flow(&self) -> f64 {
        match self.state {
            EngineState::Throttled => self.burn_rate * self.throttle,
            EngineState::Off => 0.0,
        }
    }
}

impl FlightPart for Engine {
    fn update_state(&mut self, _dt: f64) {
        self.state = if self.throttle > 0.0 {
            EngineState::Throttled
        } else {
            EngineState::Off
        };
    }

    fn contribute_force(
        &self,
        _flow: &FlowState,
        _environment: &Environment,
        pitch: f64,
    ) -> PartForce {
        let thrust = self.thrust();
        if thrust == 0.0 {
            return PartForce::zero();
        }

        let force = Vector2D::from_angle(pitch + self.cant) * thrust;
        let arm = self.offset.rotate(pitch);

        PartForce {
            force,
            torque: arm.cross(&force),
        }
    }
}

/// A strap-on booster: dead mass and extra cross-section until it is
/// jettisoned by a stage-separation command.
#[derive(Debug, Clone)]
pub struct Booster {
    pub offset: Vector2D,
    pub width: f64,
    pub height: f64,
    pub mass: f64,
    pub drag_cd: f64,
}

impl Booster {
    pub fn new(
        offset: Vector2D,
        width: f64,
        height: f64,
        mass: f64,
        drag_cd: f64,
    ) -> Result<Self, SimulationError> {
        if mass <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Booster mass must be positive, got {}",
                mass
            )));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Booster dimensions must be positive, got {}x{}",
                width, height
            )));
        }

        Ok(Booster {
            offset,
            width,
            height,
            mass,
            drag_cd,
        })
    }

    fn frontal_area(&self, angle_of_attack: f64) -> f64 {
        let cross_section = std::f64::consts::PI * (self.width / 2.0).powi(2);
        let side = self.width * self.height;
        (cross_section * angle_of_attack.cos()).abs() + (side * angle_of_attack.sin()).abs()
    }
}

impl FlightPart for Booster {
    fn update_state(&mut self, _dt: f64) {}

    fn contribute_force(
        &self,
        flow: &FlowState,
        environment: &Environment,
        pitch: f64,
    ) -> PartForce {
        let speed = flow.speed();
        if speed == 0.0 || environment.air_density == 0.0 {
            return PartForce::zero();
        }

        let q = dynamic_pressure(environment.air_density, speed);
        let drag_magnitude = q * self.frontal_area(flow.angle_of_attack) * self.drag_cd;
        let force = -flow.relative_velocity.normalize() * drag_magnitude;
        let arm = self.offset.rotate(pitch);

        PartForce {
            force,
            torque: arm.cross(&force),
        }
    }
}
