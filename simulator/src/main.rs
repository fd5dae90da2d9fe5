mod display;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use kaprekar_execution::{
    roulette::{classify::classify, kaprekar::transform, strategy::from_model},
    Session, SpinRng,
};
use kaprekar_simulator::{
    config::{Config, ValidatedConfig},
    Api, Simulator,
};
use std::{path::PathBuf, str::FromStr, sync::Arc};
use tracing::{info, Level};

use crate::display::{display_session, display_trace};

#[derive(Parser, Debug)]
#[command(author, version, about = "Kaprekar roulette tracker", long_about = None)]
struct Args {
    /// Overrides the configured log level.
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

/// Settings shared by commands that run a session.
#[derive(clap::Args, Debug)]
struct SessionArgs {
    /// YAML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed for a reproducible session.
    #[arg(long)]
    seed: Option<u64>,

    /// Spins used to build each Kaprekar seed (1-4).
    #[arg(short, long)]
    window: Option<usize>,

    /// Starting bankroll (minimum 100).
    #[arg(short, long)]
    bank: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a number of spins and print the session.
    Run {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(short, long, default_value_t = 36)]
        spins: usize,

        /// Print the session as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Serve the tracker over HTTP.
    Serve {
        #[command(flatten)]
        session: SessionArgs,

        /// Address to bind, e.g. 127.0.0.1:8080.
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Print Kaprekar's routine for one seed.
    Kaprekar { seed: u32 },
    /// Print the sector group of one outcome.
    Classify { outcome: u8 },
}

impl SessionArgs {
    fn load(&self) -> anyhow::Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(window) = self.window {
            config.spin_window = window;
        }
        if let Some(bank) = self.bank {
            config.starting_bank = bank;
        }
        Ok(config)
    }
}

fn init_logging(level: Level) {
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn validate(mut config: Config, log_level: Option<&str>) -> anyhow::Result<ValidatedConfig> {
    if let Some(level) = log_level {
        config.log_level = level.to_string();
    }
    let config = config.validate().context("invalid configuration")?;
    init_logging(config.log_level);
    Ok(config)
}

fn run(config: ValidatedConfig, spins: usize, json: bool) -> anyhow::Result<()> {
    let mut strategy = from_model(&config.hit)?;
    let mut rng = config.seed.map_or_else(SpinRng::from_entropy, SpinRng::new);
    let mut session = Session::new(config.session);

    info!(spins, hit = ?config.hit, "running session");
    for _ in 0..spins {
        session.spin(&mut rng, &mut strategy);
    }

    let view = session.view();
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        display_session(&view);
    }
    Ok(())
}

async fn serve(config: ValidatedConfig) -> anyhow::Result<()> {
    let addr = config.listen;
    let simulator = Arc::new(Simulator::new(config.session, config.hit, config.seed)?);
    let api = Api::new(simulator);
    let app = api.router();

    // Start server
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("Listening on {}", addr);
    axum::serve(listener, app).await.context("axum server error")?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse args
    let args = Args::parse();

    match args.command {
        Command::Run {
            session,
            spins,
            json,
        } => {
            let config = validate(session.load()?, args.log_level.as_deref())?;
            run(config, spins, json)
        }
        Command::Serve { session, listen } => {
            let mut config = session.load()?;
            if let Some(listen) = listen {
                config.listen = listen;
            }
            let config = validate(config, args.log_level.as_deref())?;
            serve(config).await
        }
        Command::Kaprekar { seed } => {
            let level = args.log_level.as_deref().unwrap_or("info");
            init_logging(Level::from_str(level).context("invalid log level")?);
            let trace = transform(seed).with_context(|| format!("kaprekar({seed}) failed"))?;
            display_trace(&trace);
            Ok(())
        }
        Command::Classify { outcome } => match classify(outcome) {
            Some(group) => {
                println!("{outcome} -> {group}");
                Ok(())
            }
            None => bail!("{outcome} is not on the wheel (expected 0-36)"),
        },
    }
}
