use std::f64::consts::PI;

use crate::utils::vector2d::Vector2D;

/// Planar rigid-body state: translation plus a single rotation axis.
#[derive(Debug, Clone)]
pub struct Kinematics {
    pub position: Vector2D,
    pub velocity: Vector2D,
    pub acceleration: Vector2D,
    pub pitch: f64,
    pub angular_velocity: f64,
    pub time: f64,
}

impl Kinematics {
    pub fn new(position: Vector2D, velocity: Vector2D, pitch: f64) -> Self {
        Kinematics {
            position,
            velocity,
            acceleration: Vector2D::zero(),
            pitch: wrap_pitch(pitch),
            angular_velocity: 0.0,
            time: 0.0,
        }
    }

    /// Semi-implicit Euler step: velocities are advanced from the
    /// current force and torque first, then position and pitch advance
    /// with the NEW velocities. That ordering bounds energy drift over
    /// long orbital runs where explicit Euler spirals outward.
    ///
    /// `dt` is taken as given; callers sub-step when their frame time
    /// exceeds a stable step.
    pub fn step(
        &mut self,
        net_force: Vector2D,
        net_torque: f64,
        mass: f64,
        moment_of_inertia: f64,
        dt: f64,
    ) {
        self.acceleration = if mass > 0.0 {
            net_force / mass
        } else {
            Vector2D::zero()
        };

        let angular_acceleration = if moment_of_inertia > 0.0 {
            net_torque / moment_of_inertia
        } else {
            0.0
        };

        self.velocity = self.velocity + self.acceleration * dt;
        self.angular_velocity += angular_acceleration * dt;

        self.position = self.position + self.velocity * dt;
        self.pitch = wrap_pitch(self.pitch + self.angular_velocity * dt);

        self.time += dt;
    }

    pub fn speed(&self) -> f64 {
        self.velocity.magnitude()
    }
}

fn wrap_pitch(pitch: f64) -> f64 {
    let wrapped = pitch % (2.0 * PI);
    if wrapped < 0.0 {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}
