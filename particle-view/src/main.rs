//! Application entry point for the particle field viewer.
//!
//! This binary sets up logging and eframe/egui and delegates all
//! interactive logic and rendering to [`Viewer`] from the `viewer` module.

mod viewer;

use particle_core::config::SimConfig;
use viewer::Viewer;

/// Environment variable naming an optional JSON config file.
const CONFIG_ENV: &str = "PARTICLE_CONFIG";

/// Loads the config named by [`CONFIG_ENV`], falling back to defaults.
fn load_config() -> SimConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return SimConfig::default();
    };
    match SimConfig::load(&path) {
        Ok(cfg) => {
            log::info!("loaded config from {}", path.to_string_lossy());
            cfg
        }
        Err(err) => {
            log::warn!(
                "{}: {err}; using the default configuration",
                path.to_string_lossy()
            );
            SimConfig::default()
        }
    }
}

/// Starts the native eframe application.
///
/// ### Returns
/// - `Ok(())` if the application runs to completion without errors.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> eframe::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = load_config();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([cfg.bounds.x as f32 + 240.0, cfg.bounds.y as f32 + 80.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Particle Field",
        options,
        Box::new(|_cc| Ok(Box::new(Viewer::new(cfg)))),
    )
}
