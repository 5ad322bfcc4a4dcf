use anyhow::Result;
use ratatui::layout::Rect;
use std::path::PathBuf;
use std::time::{Instant, SystemTime};

use wormsim_core::config::AppConfig;
use wormsim_core::connectome::Connectome;
use wormsim_core::simulation::{Simulation, TickReport};
use wormsim_tui::scene::SceneRenderer;

pub const MIN_TIME_SCALE: f64 = 0.25;
pub const MAX_TIME_SCALE: f64 = 4.0;

pub struct App {
    pub running: bool,
    pub paused: bool,
    pub sim: Simulation<Connectome>,
    pub config: AppConfig,
    pub config_path: PathBuf,
    pub config_last_modified: Option<SystemTime>,
    // FPS & Timing
    pub fps: f64,
    pub frame_count: u64,
    pub last_fps_update: Instant,
    pub time_scale: f64,
    pub last_report: Option<TickReport>,
    // Rendering
    pub scene: SceneRenderer,
    pub last_scene_rect: Rect,
}

impl App {
    pub fn new(config: AppConfig, config_path: PathBuf) -> Result<Self> {
        let sim = Simulation::with_connectome(&config)?;
        let (width, height) = config.canvas_size();
        let config_last_modified = std::fs::metadata(&config_path)
            .ok()
            .and_then(|m| m.modified().ok());

        Ok(Self {
            running: true,
            paused: false,
            sim,
            config,
            config_path,
            config_last_modified,
            fps: 0.0,
            frame_count: 0,
            last_fps_update: Instant::now(),
            time_scale: 1.0,
            last_report: None,
            scene: SceneRenderer::new(width, height),
            last_scene_rect: Rect::default(),
        })
    }

    /// Re-reads the config file when its modification time changes.
    ///
    /// Canvas size, body geometry and the brain are fixed for the run; only
    /// locomotion tuning, render style and pacing are picked up. A file that
    /// fails validation is logged and ignored.
    pub fn check_config_reload(&mut self) -> Result<bool> {
        let Ok(metadata) = std::fs::metadata(&self.config_path) else {
            return Ok(false);
        };
        let modified = metadata.modified()?;
        if Some(modified) == self.config_last_modified {
            return Ok(false);
        }
        self.config_last_modified = Some(modified);

        let content = std::fs::read_to_string(&self.config_path)?;
        let new_config = match AppConfig::from_toml(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %self.config_path.display(), error = %e, "Ignoring invalid config change");
                return Ok(false);
            }
        };

        self.config.locomotion = new_config.locomotion;
        self.config.render = new_config.render;
        self.config.target_fps = new_config.target_fps;
        self.sim.apply_config(&self.config);
        Ok(true)
    }

    pub fn adjust_time_scale(&mut self, factor: f64) {
        self.time_scale = (self.time_scale * factor).clamp(MIN_TIME_SCALE, MAX_TIME_SCALE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut config = AppConfig::default();
        config.world.seed = Some(1);
        App::new(config, PathBuf::from("does-not-exist.toml")).unwrap()
    }

    #[test]
    fn test_time_scale_clamped() {
        let mut app = app();
        for _ in 0..10 {
            app.adjust_time_scale(2.0);
        }
        assert_eq!(app.time_scale, MAX_TIME_SCALE);
        for _ in 0..10 {
            app.adjust_time_scale(0.5);
        }
        assert_eq!(app.time_scale, MIN_TIME_SCALE);
    }

    #[test]
    fn test_missing_config_never_reloads() {
        let mut app = app();
        assert!(!app.check_config_reload().unwrap());
    }
}
