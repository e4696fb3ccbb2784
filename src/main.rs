use std::process::ExitCode;

use warpfield::{SceneConfig, Visualization};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::args().nth(1) {
        Some(arg) => match SceneConfig::from_arg(&arg) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{}", e);
                log::info!(
                    "Available presets: {}",
                    warpfield::Preset::ALL.map(|p| p.name()).join(", ")
                );
                return ExitCode::FAILURE;
            }
        },
        None => SceneConfig::default(),
    };

    match Visualization::from_config(config).run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
