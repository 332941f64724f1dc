use clap::{Args, Parser, Subcommand};
use dicepay::application::table::{CrapsTable, TableConfig};
use dicepay::domain::dice::DiceRoll;
use dicepay::domain::ports::{DiceSourceBox, SessionStoreBox};
use dicepay::domain::session::STARTING_BALANCE;
use dicepay::error::DicepayError;
use dicepay::infrastructure::dice::{RandomDice, ScriptedDice};
use dicepay::infrastructure::in_memory::InMemorySessionStore;
use dicepay::interfaces::csv::audit_writer::CsvAuditLog;
use dicepay::interfaces::csv::session_writer::SessionWriter;
use dicepay::interfaces::jsonl::round_reader::RoundReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::{Level, error, info};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log every settled round
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Play the rounds in a JSON Lines file and print one report per round
    Play {
        /// Input rounds, one `{"session": ..., "bets": {...}}` object per line
        input: PathBuf,

        #[command(flatten)]
        storage: StorageArgs,

        /// Append every roll to this CSV file
        #[arg(long)]
        audit_log: Option<PathBuf>,

        /// Seed the dice for a reproducible run
        #[arg(long, conflicts_with = "rolls")]
        seed: Option<u64>,

        /// Use these rolls (e.g. `--roll 3,4`) in order, repeating, instead of random dice
        #[arg(long = "roll", value_name = "D1,D2")]
        rolls: Vec<DiceRoll>,

        /// Balance given to a session before its first round
        #[arg(long, default_value_t = STARTING_BALANCE)]
        starting_balance: Decimal,
    },
    /// Print balance and last-round stats for every stored session as CSV
    Stats {
        #[command(flatten)]
        storage: StorageArgs,
    },
}

#[derive(Args)]
struct StorageArgs {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    match cli.command {
        Command::Play {
            input,
            storage,
            audit_log,
            seed,
            rolls,
            starting_balance,
        } => {
            let config = TableConfig::new(starting_balance)?;
            let dice: DiceSourceBox = if !rolls.is_empty() {
                Box::new(ScriptedDice::new(rolls)?)
            } else if let Some(seed) = seed {
                Box::new(RandomDice::seeded(seed))
            } else {
                Box::new(RandomDice::from_entropy())
            };

            let mut table = CrapsTable::new(open_store(storage)?, dice).with_config(config);
            if let Some(path) = audit_log {
                info!("Appending rolls to {}", path.display());
                table = table.with_audit_log(Box::new(CsvAuditLog::append(path)?));
            }

            play(&table, input).await
        }
        Command::Stats { storage } => {
            let sessions = open_store(storage)?.all_sessions().await?;
            let stdout = io::stdout();
            SessionWriter::new(stdout.lock()).write_sessions(sessions)?;
            Ok(())
        }
    }
}

async fn play(table: &CrapsTable, input: PathBuf) -> Result<()> {
    let file = File::open(input).into_diagnostic()?;
    let reader = RoundReader::new(file);
    let mut stdout = io::stdout();

    for request in reader.rounds() {
        match request {
            Ok(request) => match table.play_round(&request.session, &request.bets).await {
                Ok(report) => {
                    let line = serde_json::to_string(&report).into_diagnostic()?;
                    writeln!(stdout, "{line}").into_diagnostic()?;
                }
                Err(e) => error!("Error processing round for '{}': {}", request.session, e),
            },
            Err(e @ DicepayError::Io(_)) => return Err(e.into()),
            Err(e) => error!("Error reading round: {}", e),
        }
    }

    stdout.flush().into_diagnostic()
}

fn open_store(storage: StorageArgs) -> dicepay::error::Result<SessionStoreBox> {
    match storage.db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            info!("Using RocksDB session store at {}", path.display());
            let store = dicepay::infrastructure::rocksdb::RocksDBStore::open(path)?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemorySessionStore::new()))
        }
        None => Ok(Box::new(InMemorySessionStore::new())),
    }
}
