mod commands;
mod logging;
mod output;

use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "fabric",
    version,
    about = "Filter and rank a fabric catalog by material, density, price, delivery and color"
)]
struct Cli {
    /// Log debug events to stderr (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter and rank a catalog (XLSX, XLS, ODS or CSV)
    Evaluate {
        /// Path to the catalog file
        catalog: PathBuf,

        /// JSON request file (default: every filter off, no ranking)
        #[arg(short, long, value_name = "FILE")]
        request: Option<PathBuf>,

        /// Custom delivery tier table (JSON)
        #[arg(short, long, value_name = "FILE")]
        tiers: Option<PathBuf>,

        /// RUB per USD used for USD catalogs
        #[arg(long, value_name = "RATE")]
        usd_rate: Option<Decimal>,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Also print the unfiltered catalog
        #[arg(long)]
        raw: bool,
    },
    /// List the names, compositions and colors a request can select
    Options {
        /// Path to the catalog file
        catalog: PathBuf,

        /// Custom delivery tier table (JSON)
        #[arg(short, long, value_name = "FILE")]
        tiers: Option<PathBuf>,
    },
    /// List delivery tiers and their cities
    Tiers {
        /// Custom delivery tier table (JSON)
        #[arg(short, long, value_name = "FILE")]
        tiers: Option<PathBuf>,
    },
    /// Create and check request files
    Request {
        #[command(subcommand)]
        action: RequestAction,
    },
}

#[derive(Subcommand)]
enum RequestAction {
    /// Print a request with every section filled in
    Template,
    /// Validate a request file
    Validate {
        /// Path to JSON request file
        file: PathBuf,

        /// Custom delivery tier table (JSON)
        #[arg(short, long, value_name = "FILE")]
        tiers: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Evaluate {
            catalog,
            request,
            tiers,
            usd_rate,
            output,
            raw,
        } => commands::evaluate::run(catalog, request, tiers, usd_rate, &output, raw),
        Commands::Options { catalog, tiers } => commands::options::run(&catalog, tiers.as_deref()),
        Commands::Tiers { tiers } => commands::tiers::list(tiers.as_deref()),
        Commands::Request { action } => match action {
            RequestAction::Template => commands::request::template(),
            RequestAction::Validate { file, tiers } => {
                commands::request::validate(&file, tiers.as_deref())
            }
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
