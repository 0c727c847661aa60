use particle_backdrop::{run, SceneConfig, Theme};

/// Usage: `particle-backdrop [config.json] [light|dark]`
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);

    let config = match args.next() {
        Some(path) => match SceneConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => SceneConfig::default(),
    };

    let theme = match args.next().as_deref() {
        Some("dark") => Theme::Dark,
        _ => Theme::Light,
    };

    if let Err(e) = run(config, theme) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
