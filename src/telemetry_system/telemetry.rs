use crate::control::body::CelestialBody;
use crate::control::parts::FinState;
use crate::control::spacecraft::Spacecraft;

/// In-memory flight recorder. Samples the craft at a fixed simulation
/// cadence and keeps running extremes; knows nothing about any on-disk
/// format.
pub struct Telemetry {
    pub log: Vec<String>,
    sample_interval: f64,
    time_since_sample: f64,
    simulation_time: f64,
    max_velocity: f64,
    max_altitude: f64,
    max_acceleration: f64,
    max_heating_rate: f64,
    min_propellant: f64,
    fin_events: Vec<(FinState, f64)>,
}

impl Telemetry {
    pub fn new(sample_interval: f64) -> Self {
        Telemetry {
            log: Vec::new(),
            sample_interval,
            // Force a sample on the first tick
            time_since_sample: f64::MAX,
            simulation_time: 0.0,
            max_velocity: 0.0,
            max_altitude: 0.0,
            max_acceleration: 0.0,
            max_heating_rate: 0.0,
            min_propellant: f64::MAX,
            fin_events: Vec::new(),
        }
    }

    fn format_time(elapsed_time: f64) -> String {
        if elapsed_time >= 3600.0 {
            let hours = (elapsed_time / 3600.0).floor();
            let minutes = ((elapsed_time % 3600.0) / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}h {:.0}m {:.2}s", hours, minutes, seconds)
        } else if elapsed_time >= 60.0 {
            let minutes = (elapsed_time / 60.0).floor();
            let seconds = elapsed_time % 60.0;
            format!("{:.0}m {:.2}s", minutes, seconds)
        } else {
            format!("{:.2}s", elapsed_time)
        }
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    pub fn collect_data(&mut self, craft: &Spacecraft, body: &CelestialBody, delta_time: f64) {
        self.simulation_time += delta_time;
        self.time_since_sample += delta_time;

        let velocity = craft.speed();
        let altitude = craft.altitude(body);
        let acceleration = craft.kinematics.acceleration.magnitude();
        let heating_rate = craft.heating_rate();

        if velocity > self.max_velocity {
            self.max_velocity = velocity;
        }
        if altitude > self.max_altitude {
            self.max_altitude = altitude;
        }
        if acceleration > self.max_acceleration {
            self.max_acceleration = acceleration;
        }
        if heating_rate > self.max_heating_rate {
            self.max_heating_rate = heating_rate;
        }
        if craft.propellant_mass < self.min_propellant {
            self.min_propellant = craft.propellant_mass;
        }

        // Fin deployment transitions, whenever they happen
        if let Some(fin) = craft.fins.first() {
            let record = match self.fin_events.last() {
                Some((last_state, _)) => *last_state != fin.state(),
                None => true,
            };
            if record {
                self.fin_events.push((fin.state(), self.simulation_time));
            }
        }

        if self.time_since_sample < self.sample_interval {
            return;
        }
        self.time_since_sample = 0.0;

        let entry = format!(
            "Time: {}\n\
             Altitude: {}\n\
             Velocity: {:.2} m/s\n\
             Acceleration: {:.2} m/s²\n\
             Throttle: {:.0}%\n\
             Heating Rate: {:.2} W/m²\n\
             Propellant: {:.2} kg\n\
             Pitch: {:.2}°\n",
            Self::format_time(self.simulation_time),
            Self::format_altitude(altitude),
            velocity,
            acceleration,
            craft.throttle() * 100.0,
            heating_rate,
            craft.propellant_mass,
            craft.pitch().to_degrees()
        );
        self.log.push(entry);
    }

    pub fn display_data(&self) {
        println!("--- Telemetry Data ---");
        for entry in &self.log {
            println!("{}", entry);
        }
        println!("--- End of Telemetry ---");

        println!("\n--- Flight Summary ---");
        println!("Max Velocity: {:.2} m/s", self.max_velocity);
        println!("Max Altitude: {}", Self::format_altitude(self.max_altitude));
        println!("Max Acceleration: {:.2} m/s²", self.max_acceleration);
        println!("Max Heating Rate: {:.2} W/m²", self.max_heating_rate);
        if self.min_propellant < f64::MAX {
            println!("Min Propellant: {:.2} kg", self.min_propellant);
        }

        if !self.fin_events.is_empty() {
            println!("\n--- Fin Deployment ---");
            for (state, time) in &self.fin_events {
                println!("State {:?} reached at: {}", state, Self::format_time(*time));
            }
        }
    }
}
