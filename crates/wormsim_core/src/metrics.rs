//! Run statistics and logging setup.
//!
//! Counters are atomics so a renderer or a headless reporter can read them
//! through a shared reference while the simulation keeps ticking.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Ticks between periodic summaries in the log.
pub const SUMMARY_INTERVAL: u64 = 1000;

pub struct Metrics {
    tick_count: AtomicU64,
    food_eaten: AtomicU64,
    food_sensed_ticks: AtomicU64,
    food_count: AtomicU64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    #[must_use]
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            food_eaten: AtomicU64::new(0),
            food_sensed_ticks: AtomicU64::new(0),
            food_count: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick with its duration.
    pub fn record_tick(&self, duration: Duration, food_remaining: usize, sensed: bool) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        self.food_count
            .store(food_remaining as u64, Ordering::Relaxed);
        if sensed {
            self.food_sensed_ticks.fetch_add(1, Ordering::Relaxed);
        }

        if tick % SUMMARY_INTERVAL == 0 {
            tracing::info!(
                tick = tick,
                food = food_remaining,
                eaten = self.food_eaten(),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_consumed(&self, count: usize) {
        self.food_eaten.fetch_add(count as u64, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_eaten(&self) -> u64 {
        self.food_eaten.load(Ordering::Relaxed)
    }

    /// Ticks during which food was within sensing range.
    #[must_use]
    pub fn food_sensed_ticks(&self) -> u64 {
        self.food_sensed_ticks.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn food_count(&self) -> u64 {
        self.food_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Installs the global tracing subscriber.
///
/// With a `log_file` everything goes there without colors, which keeps the
/// terminal free for the TUI. Otherwise logs go to stderr. `RUST_LOG`
/// overrides the default `info` level. Calling this twice is harmless.
pub fn init_logging(log_file: Option<&Path>) -> std::io::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .ok();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .ok();
        }
    }
    Ok(())
}
