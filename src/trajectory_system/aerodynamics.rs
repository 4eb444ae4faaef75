use std::f64::consts::{FRAC_PI_2, PI};

use crate::constants::HEAT_TRANSFER_COEFFICIENT;
use crate::control::environment::Environment;
use crate::errors::SimulationError;
use crate::utils::vector2d::Vector2D;

/// Wraps an angle to [-π, π].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = angle % (2.0 * PI);
    if wrapped > PI {
        wrapped - 2.0 * PI
    } else if wrapped < -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

pub fn dynamic_pressure(air_density: f64, speed: f64) -> f64 {
    0.5 * air_density * speed.powi(2)
}

/// Flow conditions of a craft for one tick. Derived from the
/// pre-integration state snapshot and never stored between ticks.
#[derive(Debug, Clone, Copy)]
pub struct FlowState {
    pub angle_of_attack: f64,
    pub mach_number: f64,
    pub relative_velocity: Vector2D,
    /// Throttle on the 0-100 scale the drag-preservation fit expects.
    pub throttle_percent: f64,
}

impl FlowState {
    pub fn new(pitch: f64, velocity: Vector2D, environment: &Environment, throttle: f64) -> Self {
        let relative_velocity = velocity - environment.atmosphere_velocity;
        let speed = relative_velocity.magnitude();

        let mach_number = if environment.speed_of_sound > 0.0 {
            speed / environment.speed_of_sound
        } else {
            0.0
        };

        // With no airflow the craft is aligned with its own axis.
        let velocity_angle = if speed > 1e-6 {
            relative_velocity.angle()
        } else {
            pitch
        };

        FlowState {
            angle_of_attack: normalize_angle(pitch - velocity_angle),
            mach_number,
            relative_velocity,
            throttle_percent: throttle.clamp(0.0, 1.0) * 100.0,
        }
    }

    pub fn speed(&self) -> f64 {
        self.relative_velocity.magnitude()
    }

    pub fn is_retrograde(&self) -> bool {
        self.angle_of_attack.abs() > FRAC_PI_2
    }
}

/// Per-fin inputs to the drag model: current dihedral plus a drag weight
/// configured from the fin's role, never from its array position.
#[derive(Debug, Clone, Copy)]
pub struct FinAeroState {
    pub dihedral: f64,
    pub drag_weight: f64,
}

/// Angle-of-attack and Mach dependent coefficient model for one craft
/// geometry.
#[derive(Debug, Clone)]
pub struct Aerodynamics {
    pub width: f64,
    pub height: f64,
    pub forward_cd: f64,
    pub retrograde_cd: f64,
    pub lift_cd: f64,
}

impl Aerodynamics {
    pub fn new(
        width: f64,
        height: f64,
        forward_cd: f64,
        retrograde_cd: f64,
        lift_cd: f64,
    ) -> Result<Self, SimulationError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(SimulationError::ConfigError(format!(
                "Craft dimensions must be positive, got {}x{}",
                width, height
            )));
        }
        if forward_cd < 0.0 || retrograde_cd < 0.0 || lift_cd < 0.0 {
            return Err(SimulationError::ConfigError(
                "Reference drag coefficients must be non-negative".to_string(),
            ));
        }

        Ok(Aerodynamics {
            width,
            height,
            forward_cd,
            retrograde_cd,
            lift_cd,
        })
    }

    /// Mach-dependent scaling of a reference drag coefficient. The
    /// supersonic branch follows 1.4·e^(0.3/M); a smoothstep blend over
    /// Mach 0.8-1.2 keeps the transonic crossing free of force jumps.
    pub fn base_cd(&self, reference_cd: f64, mach_number: f64) -> f64 {
        let supersonic = 1.4 * (0.3 / mach_number.max(0.8)).exp();

        if mach_number <= 0.8 {
            reference_cd
        } else if mach_number < 1.2 {
            let t = (mach_number - 0.8) / 0.4;
            let blend = t * t * (3.0 - 2.0 * t);
            reference_cd * (1.0 + (supersonic - 1.0) * blend)
        } else {
            reference_cd * supersonic
        }
    }

    /// Lift coefficient, signed to match sin(2α).
    pub fn lift_coefficient(&self, flow: &FlowState) -> f64 {
        self.base_cd(self.lift_cd, flow.mach_number) * (2.0 * flow.angle_of_attack).sin()
    }

    /// Form drag coefficient. The reference Cd switches between the
    /// forward and retrograde faces at |α| = π/2, each fin scales the
    /// running value by its dihedral projection, and engines gimballed
    /// against a retrograde supersonic flow preserve extra drag.
    pub fn form_drag_coefficient(
        &self,
        flow: &FlowState,
        fins: &[FinAeroState],
        engine_cant: f64,
    ) -> f64 {
        let reference_cd = if flow.is_retrograde() {
            self.retrograde_cd
        } else {
            self.forward_cd
        };

        let base_cd = self.base_cd(reference_cd, flow.mach_number);
        let mut drag_coefficient = (base_cd * flow.angle_of_attack.sin()).abs();

        for fin in fins {
            drag_coefficient *= 1.0 + fin.dihedral.cos().abs() * fin.drag_weight;
        }

        drag_coefficient *= self.drag_preservation(flow, engine_cant);

        drag_coefficient.abs()
    }

    /// Thrust-assisted drag augmentation, exactly 1 outside the
    /// retrograde supersonic throttled regime.
    pub fn drag_preservation(&self, flow: &FlowState, engine_cant: f64) -> f64 {
        if flow.is_retrograde()
            && flow.throttle_percent > 0.0
            && flow.mach_number >= 1.5
            && flow.mach_number < 20.0
        {
            1.0 + (flow.throttle_percent / 50.0) * (2.0 * engine_cant).sin()
        } else {
            1.0
        }
    }

    /// Flow-facing projected area: the circular cross-section and the
    /// side profile blended by the angle of attack.
    pub fn frontal_area(&self, angle_of_attack: f64) -> f64 {
        let cross_sectional_area = PI * (self.width / 2.0).powi(2);
        let side_area = self.width * self.height;

        (cross_sectional_area * angle_of_attack.cos()).abs()
            + (side_area * angle_of_attack.sin()).abs()
    }

    pub fn lifting_surface_area(&self, angle_of_attack: f64) -> f64 {
        (self.width * self.height * angle_of_attack.cos()).abs()
    }

    /// Drag force on the craft body, opposing the relative velocity.
    pub fn calculate_drag(
        &self,
        flow: &FlowState,
        environment: &Environment,
        fins: &[FinAeroState],
        engine_cant: f64,
    ) -> Vector2D {
        let speed = flow.speed();
        if speed == 0.0 || environment.air_density == 0.0 {
            return Vector2D::zero();
        }

        let q = dynamic_pressure(environment.air_density, speed);
        let drag_magnitude = q
            * self.frontal_area(flow.angle_of_attack)
            * self.form_drag_coefficient(flow, fins, engine_cant);

        -flow.relative_velocity.normalize() * drag_magnitude
    }

    /// Lift force, perpendicular to the relative velocity.
    pub fn calculate_lift(&self, flow: &FlowState, environment: &Environment) -> Vector2D {
        let speed = flow.speed();
        if speed == 0.0 || environment.air_density == 0.0 {
            return Vector2D::zero();
        }

        let q = dynamic_pressure(environment.air_density, speed);
        let lift_magnitude = q
            * self.lifting_surface_area(flow.angle_of_attack)
            * self.lift_coefficient(flow);

        flow.relative_velocity.normalize().perpendicular() * lift_magnitude
    }

    pub fn calculate_aerodynamic_force(
        &self,
        flow: &FlowState,
        environment: &Environment,
        fins: &[FinAeroState],
        engine_cant: f64,
    ) -> Vector2D {
        self.calculate_drag(flow, environment, fins, engine_cant)
            + self.calculate_lift(flow, environment)
    }

    pub fn heating_rate(&self, air_density: f64, speed: f64) -> f64 {
        0.5 * HEAT_TRANSFER_COEFFICIENT * air_density * speed.powi(3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::body::{BodyConfig, CelestialBody};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn miniature_shuttle() -> Aerodynamics {
        Aerodynamics::new(3.66, 22.37, 0.5, 0.7, 0.6).unwrap()
    }

    fn sea_level_environment() -> Environment {
        let earth = CelestialBody::earth(BodyConfig::default());
        let position = Vector2D::new(0.0, earth.radius);
        Environment::at(&earth, &position)
    }

    fn flow(angle_of_attack: f64, mach_number: f64, throttle: f64) -> FlowState {
        FlowState {
            angle_of_attack,
            mach_number,
            relative_velocity: Vector2D::new(mach_number * 340.29, 0.0),
            throttle_percent: throttle * 100.0,
        }
    }

    #[test]
    fn test_base_cd_subsonic_passthrough() {
        let aero = miniature_shuttle();
        assert_relative_eq!(aero.base_cd(0.5, 0.0), 0.5);
        assert_relative_eq!(aero.base_cd(0.5, 0.79), 0.5);
    }

    #[test]
    fn test_base_cd_continuous_across_transonic() {
        let aero = miniature_shuttle();
        let mut mach = 0.5;
        let mut previous = aero.base_cd(0.5, mach);
        while mach < 3.0 {
            mach += 0.001;
            let current = aero.base_cd(0.5, mach);
            assert!(
                (current - previous).abs() < 0.01,
                "Jump of {} at Mach {}",
                (current - previous).abs(),
                mach
            );
            previous = current;
        }
    }

    #[test]
    fn test_base_cd_supersonic_branch() {
        let aero = miniature_shuttle();
        let at_mach_2 = aero.base_cd(0.5, 2.0);
        assert_relative_eq!(at_mach_2, 0.5 * 1.4 * (0.3_f64 / 2.0).exp(), epsilon = 1e-12);
        // Supersonic drag rise exceeds the subsonic reference
        assert!(at_mach_2 > 0.5);
    }

    #[test]
    fn test_coefficients_finite_over_full_alpha_sweep() {
        let aero = miniature_shuttle();
        let fins = [
            FinAeroState {
                dihedral: 0.0,
                drag_weight: 0.075,
            },
            FinAeroState {
                dihedral: -PI / 6.0,
                drag_weight: 0.34,
            },
        ];

        let mut alpha = -PI;
        while alpha <= PI {
            for mach in [0.0, 0.5, 1.0, 1.5, 5.0, 25.0] {
                let state = flow(alpha, mach, 1.0);
                let drag = aero.form_drag_coefficient(&state, &fins, 0.1);
                let lift = aero.lift_coefficient(&state);

                assert!(drag.is_finite() && drag >= 0.0);
                assert!(lift.is_finite());
                // Lift sign tracks sin(2α)
                assert!(lift * (2.0 * alpha).sin() >= 0.0);
            }
            alpha += PI / 36.0;
        }
    }

    #[test]
    fn test_retrograde_switches_reference_cd() {
        let aero = miniature_shuttle();
        let prograde = flow(PI / 4.0, 0.5, 0.0);
        let retrograde = flow(3.0 * PI / 4.0, 0.5, 0.0);

        // sin(π/4) == sin(3π/4), so the ratio isolates the reference Cd switch
        let forward = aero.form_drag_coefficient(&prograde, &[], 0.0);
        let backward = aero.form_drag_coefficient(&retrograde, &[], 0.0);
        assert_relative_eq!(backward / forward, 0.7 / 0.5, epsilon = 1e-9);
    }

    #[test]
    fn test_drag_preservation_regime_bounds() {
        let aero = miniature_shuttle();
        let cant = 0.2;

        // Active only when retrograde, throttled, and 1.5 <= Mach < 20
        let active = flow(PI, 5.0, 0.8);
        assert!(aero.drag_preservation(&active, cant) > 1.0);

        let at_lower_edge = flow(PI, 1.5, 0.8);
        assert!(aero.drag_preservation(&at_lower_edge, cant) > 1.0);

        let unthrottled = flow(PI, 5.0, 0.0);
        assert_relative_eq!(aero.drag_preservation(&unthrottled, cant), 1.0);

        let subsonic = flow(PI, 1.2, 0.8);
        assert_relative_eq!(aero.drag_preservation(&subsonic, cant), 1.0);

        let hypersonic = flow(PI, 20.0, 0.8);
        assert_relative_eq!(aero.drag_preservation(&hypersonic, cant), 1.0);

        let prograde = flow(0.1, 5.0, 0.8);
        assert_relative_eq!(aero.drag_preservation(&prograde, cant), 1.0);
    }

    #[test]
    fn test_drag_preservation_value() {
        let aero = miniature_shuttle();
        let state = flow(PI, 5.0, 1.0);
        let cant: f64 = 0.15;

        let expected = 1.0 + (100.0 / 50.0) * (2.0 * cant).sin();
        assert_relative_eq!(aero.drag_preservation(&state, cant), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_fin_dihedral_multipliers() {
        let aero = miniature_shuttle();
        let state = flow(PI / 6.0, 0.5, 0.0);

        let bare = aero.form_drag_coefficient(&state, &[], 0.0);
        let canard = FinAeroState {
            dihedral: 0.0,
            drag_weight: 0.075,
        };
        let main_fin = FinAeroState {
            dihedral: 0.0,
            drag_weight: 0.34,
        };

        let finned = aero.form_drag_coefficient(&state, &[canard, main_fin], 0.0);
        assert_relative_eq!(finned / bare, 1.075 * 1.34, epsilon = 1e-9);

        // A fin feathered to 90° stops multiplying the drag
        let feathered = FinAeroState {
            dihedral: FRAC_PI_2,
            drag_weight: 0.34,
        };
        let with_feathered = aero.form_drag_coefficient(&state, &[feathered], 0.0);
        assert_relative_eq!(with_feathered, bare, epsilon = 1e-9);
    }

    #[test]
    fn test_frontal_area_blends_profiles() {
        let aero = miniature_shuttle();
        let cross_section = PI * (3.66_f64 / 2.0).powi(2);
        let side = 3.66 * 22.37;

        assert_relative_eq!(aero.frontal_area(0.0), cross_section, epsilon = 1e-9);
        assert_relative_eq!(aero.frontal_area(FRAC_PI_2), side, epsilon = 1e-9);
        assert_relative_eq!(aero.lifting_surface_area(0.0), side, epsilon = 1e-9);
        assert_abs_diff_eq!(aero.lifting_surface_area(FRAC_PI_2), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_velocity_yields_zero_force() {
        let aero = miniature_shuttle();
        let environment = sea_level_environment();
        let state = FlowState {
            angle_of_attack: PI / 4.0,
            mach_number: 0.0,
            relative_velocity: Vector2D::zero(),
            throttle_percent: 0.0,
        };

        let force = aero.calculate_aerodynamic_force(&state, &environment, &[], 0.0);
        assert_eq!(force, Vector2D::zero());
    }

    #[test]
    fn test_drag_opposes_relative_velocity() {
        let aero = miniature_shuttle();
        let environment = sea_level_environment();
        let state = FlowState {
            angle_of_attack: PI / 6.0,
            mach_number: 0.3,
            relative_velocity: Vector2D::new(100.0, 20.0),
            throttle_percent: 0.0,
        };

        let drag = aero.calculate_drag(&state, &environment, &[], 0.0);
        assert!(drag.dot(&state.relative_velocity) < 0.0);

        let lift = aero.calculate_lift(&state, &environment);
        assert_abs_diff_eq!(lift.dot(&state.relative_velocity), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_flow_state_angle_of_attack_wrapping() {
        let earth = CelestialBody::earth(BodyConfig::default());
        let position = Vector2D::new(0.0, earth.radius + 1_000.0);
        let environment = Environment::at(&earth, &position);

        let velocity = Vector2D::new(200.0, 0.0) + environment.atmosphere_velocity;
        let state = FlowState::new(PI + 0.1 - 2.0 * PI, velocity, &environment, 0.0);

        assert!(state.angle_of_attack.abs() <= PI);
        assert!(state.is_retrograde());
    }

    #[test]
    fn test_heating_rate_cubic_in_speed() {
        let aero = miniature_shuttle();
        let heating = aero.heating_rate(0.001, 7_000.0);
        assert_relative_eq!(heating, 29_866.725, epsilon = 1e-6);
        assert_eq!(aero.heating_rate(0.0, 7_000.0), 0.0);
    }
}
