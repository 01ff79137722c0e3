mod demo;
mod menu;

use std::io;
use std::sync::Once;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::application::Ledger;

pub use demo::run_demo;
pub use menu::{Console, MenuError, MenuOption};

/// Day format accepted on the console and used in output.
pub const DAY_FORMAT: &str = "%Y-%m-%d";

/// Cashbook - in-memory inflow/outflow ledger
#[derive(Parser)]
#[command(name = "cashbook")]
#[command(about = "Record inflows and outflows and query them from a console menu")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the interactive console menu (default)
    Menu,

    /// Seed a sample ledger and print a walkthrough of every query
    Demo {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        init_tracing(self.verbose);

        match self.command.unwrap_or(Commands::Menu) {
            Commands::Menu => {
                let stdin = io::stdin();
                let mut console = Console::new(stdin.lock(), io::stdout().lock());
                let mut ledger = Ledger::new();

                console.run(&mut ledger)?;
                info!(transactions = ledger.len(), "session ended");
            }

            Commands::Demo { format } => {
                run_demo(format, &mut io::stdout().lock())?;
            }
        }

        Ok(())
    }
}

static TRACING_INIT: Once = Once::new();

/// Initialize the global tracing subscriber. Logs go to stderr so stdout
/// carries only the console dialogue.
pub fn init_tracing(verbose: bool) {
    TRACING_INIT.call_once(|| {
        let default_filter = if verbose { "warn,cashbook=debug" } else { "warn" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init();
    });
}

/// Parse a `YYYY-MM-DD` day.
pub fn parse_day(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(input.trim(), DAY_FORMAT)
}
