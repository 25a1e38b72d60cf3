//! verity-settle: replays a ledger snapshot through end-of-tick settlement.

mod config;
mod run;

use anyhow::Context;
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use config::SettleConfig;
use verity_store::QueueKind;
use verity_store_lmdb::LmdbEnvironment;
use verity_types::Timestamp;
use verity_utils::LogFormat;

#[derive(Parser)]
#[command(name = "verity-settle", about = "Verity end-of-tick settlement driver")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "VERITY_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "VERITY_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// LMDB directory for the persisted expiration queues and params.
    #[arg(long, env = "VERITY_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, env = "VERITY_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Settle one tick over a genesis snapshot and print the report as JSON.
    Run {
        /// Genesis snapshot (JSON).
        #[arg(long)]
        genesis: PathBuf,

        /// Tick time, in Unix seconds.
        #[arg(long)]
        now: u64,

        /// Write the post-tick snapshot here. Nothing is written if the
        /// tick aborts.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Manage the persisted expiration queues.
    Queue {
        #[command(subcommand)]
        action: QueueAction,
    },
}

#[derive(clap::Subcommand)]
enum QueueAction {
    /// Replace the persisted queues and params with a snapshot's.
    Load {
        #[arg(long)]
        genesis: PathBuf,
    },
    /// Print both persisted queues, head first.
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => SettleConfig::from_toml_file(path)?,
        None => SettleConfig::default(),
    };
    let config = SettleConfig {
        log_format: cli.log_format.unwrap_or(file_config.log_format),
        log_level: cli.log_level.unwrap_or(file_config.log_level),
        data_dir: cli.data_dir.or(file_config.data_dir),
        params: file_config.params,
    };

    verity_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!(path = %path.display(), "loaded config");
    }

    let lmdb = match &config.data_dir {
        Some(dir) => Some(
            LmdbEnvironment::open(dir, LmdbEnvironment::DEFAULT_MAP_SIZE)
                .with_context(|| format!("opening data dir {}", dir.display()))?,
        ),
        None => None,
    };

    match cli.command {
        Command::Run { genesis, now, out } => {
            let snapshot = run::read_genesis(&genesis)?;
            let now = Timestamp::from_secs(now);
            let (report, post) = match run::run_tick(snapshot, now, config.params, lmdb.as_ref()) {
                Ok(settled) => settled,
                Err(e) => {
                    tracing::error!(error = %e, now = %now, "tick aborted; no state written");
                    return Err(e);
                }
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let Some(out) = out {
                run::write_genesis(&out, &post)?;
                tracing::info!(path = %out.display(), "wrote post-tick genesis");
            }
        }
        Command::Queue { action } => {
            let env = lmdb.context("queue commands need --data-dir")?;
            match action {
                QueueAction::Load { genesis } => {
                    run::load_queues(run::read_genesis(&genesis)?, config.params, &env)?;
                }
                QueueAction::Show => {
                    let mut queues = BTreeMap::new();
                    for kind in [QueueKind::ClaimExpiration, QueueKind::StakeExpiration] {
                        queues.insert(kind.to_string(), env.expiration_queue(kind).ids()?);
                    }
                    println!("{}", serde_json::to_string_pretty(&queues)?);
                }
            }
        }
    }

    Ok(())
}
