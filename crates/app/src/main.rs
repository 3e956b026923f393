use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::clock::SimClock;
use simulation::game_params::GameParams;
use simulation::stats::CityStats;
use simulation::SimulationUpdateSet;

mod demo_town;

/// Simulated seconds to run before exiting.
#[derive(Resource)]
struct RunLength {
    seconds: f64,
    last_report: f64,
}

const REPORT_EVERY_SECS: f64 = 10.0;

fn main() -> AppExit {
    let mut app = App::new();

    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_millis(16))),
        LogPlugin::default(),
    ));

    // Parameters come from a JSON file when TILETOWN_PARAMS points at one.
    let params = match std::env::var("TILETOWN_PARAMS") {
        Ok(path) => load_params(&path),
        Err(_) => GameParams::default(),
    };
    let seconds = env_f64("TILETOWN_SECONDS", 120.0);
    let speed = env_f64("TILETOWN_SPEED", 10.0);

    app.insert_resource(params)
        .insert_resource(RunLength {
            seconds,
            last_report: 0.0,
        })
        .add_plugins(simulation::SimulationPlugin)
        .add_systems(
            Startup,
            (
                demo_town::seed_demo_town,
                move |mut time: ResMut<Time<Virtual>>| time.set_relative_speed_f64(speed),
            ),
        )
        .add_systems(
            Update,
            report_and_exit.after(SimulationUpdateSet::Reporting),
        );

    app.run()
}

fn load_params(path: &str) -> GameParams {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) => {
            warn!("Cannot read params from {}: {}. Using defaults.", path, err);
            return GameParams::default();
        }
    };
    match GameParams::from_json(&json) {
        Ok(params) => params,
        Err(err) => {
            warn!("Invalid params in {}: {}. Using defaults.", path, err);
            GameParams::default()
        }
    }
}

fn env_f64(name: &str, default: f64) -> f64 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(default)
}

fn report_and_exit(
    clock: Res<SimClock>,
    stats: Res<CityStats>,
    mut run: ResMut<RunLength>,
    mut exit: EventWriter<AppExit>,
) {
    let now = clock.seconds();
    if now - run.last_report >= REPORT_EVERY_SECS {
        run.last_report = now;
        info!(
            "t={:.0}s population={} houses={} carriers={} ladies={} employed={}",
            now,
            stats.population,
            stats.houses,
            stats.water_carriers,
            stats.market_ladies,
            stats.workers_employed
        );
    }
    if now < run.seconds {
        return;
    }
    match serde_json::to_string_pretty(&*stats) {
        Ok(json) => println!("{json}"),
        Err(err) => error!("Cannot serialize final stats: {}", err),
    }
    exit.send(AppExit::Success);
}
