pub mod input;
pub mod render;
pub mod state;

pub use state::App;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use wormsim_tui::Tui;

/// Catch-up ticks allowed per frame after a stall.
const MAX_TICKS_PER_FRAME: u32 = 8;

impl App {
    pub async fn run(&mut self, tui: &mut Tui) -> Result<()> {
        let mut last_tick = Instant::now();
        let mut last_config_check = Instant::now();

        // Setup shutdown handler
        let shutdown = Arc::new(AtomicBool::new(false));
        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Ctrl+C received, shutting down");
            shutdown_clone.store(true, Ordering::SeqCst);
        });

        tracing::info!(target_fps = self.config.target_fps, "Interactive session started");

        while self.running && !shutdown.load(Ordering::SeqCst) {
            // Check for config reload every 2 seconds
            if last_config_check.elapsed() >= Duration::from_secs(2) {
                match self.check_config_reload() {
                    Ok(true) => tracing::info!("Configuration hot-reloaded"),
                    Ok(false) => {}
                    Err(e) => tracing::warn!(error = %e, "Config reload failed"),
                }
                last_config_check = Instant::now();
            }

            // Use 1ms poll interval to prevent busy-waiting while remaining responsive
            while event::poll(Duration::from_millis(1))? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    _ => {}
                }
            }
            if !self.running {
                break;
            }

            let tick_rate = self.tick_rate();
            if last_tick.elapsed() >= tick_rate {
                if !self.paused {
                    let mut ticks = 0;
                    while last_tick.elapsed() >= tick_rate && ticks < MAX_TICKS_PER_FRAME {
                        self.last_report = Some(self.sim.tick());
                        last_tick += tick_rate;
                        ticks += 1;
                    }
                }
                if self.paused || last_tick.elapsed() >= tick_rate {
                    last_tick = Instant::now();
                }

                tui.terminal.draw(|f| {
                    self.draw(f);
                })?;

                self.frame_count += 1;
                if self.last_fps_update.elapsed() >= Duration::from_secs(1) {
                    self.update_fps();
                }
            }
        }

        tracing::info!(
            ticks = self.sim.tick_count(),
            eaten = self.sim.metrics().food_eaten(),
            "Interactive session ended"
        );
        Ok(())
    }

    /// Wall time between ticks at the current time scale.
    #[must_use]
    pub fn tick_rate(&self) -> Duration {
        let fps = self.config.target_fps.max(1) as f64;
        Duration::from_secs_f64(1.0 / (fps * self.time_scale))
    }

    fn update_fps(&mut self) {
        let elapsed = self.last_fps_update.elapsed().as_secs_f64();
        self.fps = self.frame_count as f64 / elapsed;
        self.frame_count = 0;
        self.last_fps_update = Instant::now();
    }
}
