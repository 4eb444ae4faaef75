use crate::control::body::CelestialBody;
use crate::control::environment::Environment;
use crate::control::parts::{Booster, Engine, FlightPart, GridFin};
use crate::errors::SimulationError;
use crate::trajectory_system::aerodynamics::{Aerodynamics, FinAeroState, FlowState};
use crate::trajectory_system::kinematics::Kinematics;
use crate::utils::vector2d::Vector2D;

/// A rigid-body craft: geometry, propellant, parts, and the planar
/// kinematic state the integrator advances.
pub struct Spacecraft {
    pub name: String,
    pub aerodynamics: Aerodynamics,
    pub kinematics: Kinematics,
    pub dry_mass: f64,
    pub propellant_mass: f64,
    pub fins: Vec<GridFin>,
    pub engines: Vec<Engine>,
    pub boosters: Vec<Booster>,
    throttle: f64,
    heating_rate: f64,
}

impl Spacecraft {
    pub fn new(
        name: String,
        aerodynamics: Aerodynamics,
        kinematics: Kinematics,
        dry_mass: f64,
        propellant_mass: f64,
    ) -> Result<Self, SimulationError> {
        if dry_mass <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Dry mass must be positive, got {}",
                dry_mass
            )));
        }
        if propellant_mass < 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Propellant mass must be non-negative, got {}",
                propellant_mass
            )));
        }

        Ok(Spacecraft {
            name,
            aerodynamics,
            kinematics,
            dry_mass,
            propellant_mass,
            fins: Vec::new(),
            engines: Vec::new(),
            boosters: Vec::new(),
            throttle: 0.0,
            heating_rate: 0.0,
        })
    }

    pub fn add_fin(&mut self, fin: GridFin) {
        self.fins.push(fin);
    }

    pub fn add_engine(&mut self, engine: Engine) {
        self.engines.push(engine);
    }

    pub fn add_booster(&mut self, booster: Booster) {
        self.boosters.push(booster);
    }

    pub fn total_mass(&self) -> f64 {
        let booster_mass: f64 = self.boosters.iter().map(|booster| booster.mass).sum();
        self.dry_mass + self.propellant_mass + booster_mass
    }

    /// Slender-rod approximation about the center of mass.
    pub fn moment_of_inertia(&self) -> f64 {
        self.total_mass() * self.aerodynamics.height.powi(2) / 12.0
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.throttle = throttle.clamp(0.0, 1.0);
    }

    pub fn throttle(&self) -> f64 {
        self.throttle
    }

    pub fn deploy_fins(&mut self) {
        for fin in &mut self.fins {
            fin.deploy();
        }
    }

    /// Stage separation: drops all strap-on boosters and returns how
    /// many were released.
    pub fn jettison_boosters(&mut self) -> usize {
        let count = self.boosters.len();
        self.boosters.clear();
        count
    }

    pub fn altitude(&self, body: &CelestialBody) -> f64 {
        body.altitude_of(&self.kinematics.position)
    }

    pub fn speed(&self) -> f64 {
        self.kinematics.speed()
    }

    pub fn pitch(&self) -> f64 {
        self.kinematics.pitch
    }

    pub fn heating_rate(&self) -> f64 {
        self.heating_rate
    }

    fn engine_cant(&self) -> f64 {
        self.engines.first().map(|engine| engine.cant).unwrap_or(0.0)
    }

    fn fin_aero_states(&self) -> Vec<FinAeroState> {
        self.fins.iter().map(|fin| fin.aero_state()).collect()
    }

    /// One simulation tick. Stages run in a fixed order: part state
    /// machines first, then the flow snapshot from the pre-integration
    /// state, then force aggregation, then the integrator. No stage
    /// reads state another stage already advanced this tick.
    pub fn update(&mut self, dt: f64, body: &CelestialBody) {
        let effective_throttle = if self.propellant_mass > 0.0 {
            self.throttle
        } else {
            0.0
        };

        for engine in &mut self.engines {
            engine.set_throttle(effective_throttle);
            engine.update_state(dt);
        }
        for fin in &mut self.fins {
            fin.update_state(dt);
        }
        for booster in &mut self.boosters {
            booster.update_state(dt);
        }

        let environment = Environment::at(body, &self.kinematics.position);
        let flow = FlowState::new(
            self.kinematics.pitch,
            self.kinematics.velocity,
            &environment,
            effective_throttle,
        );

        let (net_force, net_torque) = self.net_force_and_torque(&flow, &environment, body);

        let propellant_flow: f64 = self.engines.iter().map(|engine| engine.propellant_flow()).sum();
        self.propellant_mass = (self.propellant_mass - propellant_flow * dt).max(0.0);

        let mass = self.total_mass();
        let moment_of_inertia = self.moment_of_inertia();
        self.kinematics
            .step(net_force, net_torque, mass, moment_of_inertia, dt);

        self.heating_rate = self
            .aerodynamics
            .heating_rate(environment.air_density, flow.speed());
    }

    /// Sums gravity, body aerodynamics, and every part's contribution
    /// into one force vector and one torque scalar about the center of
    /// mass.
    fn net_force_and_torque(
        &self,
        flow: &FlowState,
        environment: &Environment,
        body: &CelestialBody,
    ) -> (Vector2D, f64) {
        let mass = self.total_mass();

        let radial = self.kinematics.position - body.position;
        let gravity = if radial.magnitude() > 0.0 {
            -radial.normalize() * (environment.gravity * mass)
        } else {
            Vector2D::zero()
        };

        let fin_states = self.fin_aero_states();
        let body_aero = self.aerodynamics.calculate_aerodynamic_force(
            flow,
            environment,
            &fin_states,
            self.engine_cant(),
        );

        let mut net_force = gravity + body_aero;
        let mut net_torque = 0.0;

        let pitch = self.kinematics.pitch;
        for fin in &self.fins {
            let contribution = fin.contribute_force(flow, environment, pitch);
            net_force = net_force + contribution.force;
            net_torque += contribution.torque;
        }
        for engine in &self.engines {
            let contribution = engine.contribute_force(flow, environment, pitch);
            net_force = net_force + contribution.force;
            net_torque += contribution.torque;
        }
        for booster in &self.boosters {
            let contribution = booster.contribute_force(flow, environment, pitch);
            net_force = net_force + contribution.force;
            net_torque += contribution.torque;
        }

        (net_force, net_torque)
    }
}
