use clap::Parser;

use crate::broker::BrokerId;
use crate::import::{Importer, RawInput};
use crate::util::basic::SError;

pub const OPENBROKER_APP_VERSION: &str = "0.4.0";

const ABOUT: &str = "Broker transaction-export normalization tool";

fn get_long_about() -> String {
    "\
Reads transaction-history CSV exports from brokerage and exchange platforms,
detects which platform produced each file from its content alone, and prints
the normalized trades as JSON.

When detection fails the result carries the broker id \"unknown\"; re-run
with --broker to pick the parser explicitly."
        .to_string()
}

#[derive(Parser, Debug)]
#[command(version = OPENBROKER_APP_VERSION,
          about = ABOUT, long_about = get_long_about())]
pub struct Args {
    #[arg(required = true)]
    pub csv_files: Vec<String>,

    /// Skip content sniffing and force this broker's parser
    /// (e.g. trading212, degiro, binance).
    #[arg(short, long)]
    pub broker: Option<String>,

    /// Pretty-print the JSON output
    #[arg(short, long, default_value_t = false)]
    pub pretty: bool,

    /// Print verbose output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

pub fn run() -> Result<(), SError> {
    let args = Args::parse();
    if args.verbose {
        crate::tracing::enable_trace_env("openbroker=debug");
    }
    crate::tracing::setup_tracing();

    let broker_override = match &args.broker {
        Some(s) => Some(
            BrokerId::parse(s).ok_or(format!("Unknown broker id '{s}'"))?,
        ),
        None => None,
    };

    let importer = Importer::with_default_config();

    for path in &args.csv_files {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read {path}: {e}"))?;
        let input = RawInput::new(path.clone(), "text/csv", content);

        let result = match broker_override {
            Some(id) => importer.import_as(id, &input),
            None => importer.import(&input),
        }
        .map_err(|e| format!("{path}: {e}"))?;

        let json = if args.pretty {
            serde_json::to_string_pretty(&result)
        } else {
            serde_json::to_string(&result)
        }
        .map_err(|e| format!("{e}"))?;
        println!("{json}");
    }
    Ok(())
}
