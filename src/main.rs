use std::f64::consts::PI;

use spacecraft_simulation::*;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let earth = CelestialBody::earth(BodyConfig::default());

    // A small reentry vehicle: two fins, one slightly canted engine
    let aerodynamics = Aerodynamics::new(3.66, 22.37, 0.5, 0.7, 0.6)?;
    let entry_position = Vector2D::new(0.0, earth.radius + 120_000.0);
    let entry_velocity = Vector2D::new(7_400.0, -150.0);
    let kinematics = Kinematics::new(entry_position, entry_velocity, PI);

    let mut craft = Spacecraft::new(
        "MiniShuttle".to_string(),
        aerodynamics,
        kinematics,
        6_700.0,
        100_000.0,
    )?;
    craft.add_fin(GridFin::new(
        FinRole::Canard,
        FinSide::Left,
        Vector2D::new(8.95, 0.2),
        1.3,
        2.0,
        0.0,
    )?);
    craft.add_fin(GridFin::new(
        FinRole::Main,
        FinSide::Right,
        Vector2D::new(-8.2, 0.8),
        2.38,
        5.89,
        -PI / 6.0,
    )?);
    craft.add_engine(Engine::new(0.05, Vector2D::new(-8.9, 0.0), 845_000.0, 270.0)?);

    println!(
        "Entry interface: {:.1} km altitude, {:.1} m/s",
        craft.altitude(&earth) / 1000.0,
        craft.speed()
    );

    let mut telemetry = Telemetry::new(30.0);
    let mut fins_deployed = false;
    let mut elapsed = 0.0;

    while elapsed < MAX_SIMULATION_TIME {
        let altitude = craft.altitude(&earth);

        if !fins_deployed && altitude < earth.atmosphere_height() {
            craft.deploy_fins();
            fins_deployed = true;
            println!("Deploying grid fins at {:.0} m", altitude);
        }

        // Retrograde entry burn through the worst of the heating
        if altitude < 40_000.0 && craft.speed() > 600.0 {
            craft.set_throttle(0.4);
        } else {
            craft.set_throttle(0.0);
        }

        craft.update(TIME_STEP, &earth);
        telemetry.collect_data(&craft, &earth, TIME_STEP);
        elapsed += TIME_STEP;

        if craft.altitude(&earth) <= 0.0 {
            println!(
                "Touchdown at {:.2} m/s after {:.1} s of flight",
                craft.speed(),
                elapsed
            );
            break;
        }
    }

    telemetry.display_data();

    Ok(())
}
