use std::{path::Path, time::Duration};

use bevy::{app::ScheduleRunnerPlugin, log::LogPlugin, prelude::*};

use digital_mind::{character::CharacterPlugin, core::CorePlugin};

const FRAME_INTERVAL: Duration = Duration::from_millis(100);
const TIME_SCALE_ENV: &str = "MIND_TIME_SCALE";

fn main() {
    load_mind_env();

    App::new()
        .add_plugins((
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(FRAME_INTERVAL)),
            LogPlugin::default(),
            CorePlugin::with_time_scale(time_scale_from_env()),
            CharacterPlugin,
        ))
        .run();
}

fn load_mind_env() {
    const MIND_ENV_FILE: &str = "mind.env";

    let path = Path::new(MIND_ENV_FILE);
    if !path.exists() {
        return;
    }

    if let Err(err) = dotenvy::from_filename(path) {
        eprintln!("Failed to load {}: {}", MIND_ENV_FILE, err);
    }
}

fn time_scale_from_env() -> f32 {
    std::env::var(TIME_SCALE_ENV)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(1.0)
}
