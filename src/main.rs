use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use wormsim_core::config::AppConfig;
use wormsim_core::metrics::init_logging;
use wormsim_core::simulation::Simulation;
use wormsim_lib::app::App;
use wormsim_lib::headless::{self, HeadlessOptions};
use wormsim_tui::Tui;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "standard")]
    mode: Mode,

    /// Custom config file path
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Ticks to run in headless mode
    #[arg(long, default_value_t = 10_000)]
    ticks: u64,

    /// Random food markers placed in headless mode
    #[arg(long, default_value_t = 20)]
    food: usize,

    /// Seed for spontaneous activity and headless food placement
    #[arg(long)]
    seed: Option<u64>,

    /// Log file (interactive mode defaults to wormsim.log)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[derive(clap::ValueEnum, Clone, Debug)]
enum Mode {
    Standard,
    Headless,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_file = match args.mode {
        Mode::Standard => Some(
            args.log_file
                .clone()
                .unwrap_or_else(|| PathBuf::from("wormsim.log")),
        ),
        Mode::Headless => args.log_file.clone(),
    };
    init_logging(log_file.as_deref())?;

    let mut config = AppConfig::load(&args.config);
    if args.seed.is_some() {
        config.world.seed = args.seed;
    }

    match args.mode {
        Mode::Headless => {
            let seed = config.world.seed.unwrap_or_else(rand::random);
            config.world.seed = Some(seed);
            let sim = Simulation::with_connectome(&config)?;
            let options = HeadlessOptions {
                ticks: args.ticks,
                food: args.food,
                seed,
            };
            let summary = headless::run(sim, &config, options)?;
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        Mode::Standard => {
            let mut app = App::new(config, args.config)?;

            let mut tui = Tui::new()?;
            tui.init()?;

            let res = app.run(&mut tui).await;

            tui.exit()?;

            if let Err(e) = res {
                eprintln!("Application error: {e}");
            }
        }
    }

    Ok(())
}
