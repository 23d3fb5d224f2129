//! Trade enrichment batch CLI.
//!
//! Loads the five CSV sources, enriches trades into the 16-column output
//! contract and replaces the destination table wholesale.
//!
//! Usage: `cargo run --bin mart -- [DATA_DIR] [--table NAME]`
//! Example: `cargo run --bin mart -- data --table milestone1_cleaned_dataset`

use std::env;
use std::path::PathBuf;

use trademart::ingest::load_sources;
use trademart::pipeline::enrich;
use trademart::store::{DbConfig, LoadOutcome, Provisioned, TableName};

/// Directory searched for the source CSVs when none is given.
const DEFAULT_DATA_DIR: &str = "data";

/// Destination table when `--table` is not given.
const DEFAULT_TABLE: &str = "milestone1_cleaned_dataset";

#[tokio::main]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let (data_dir, table_name) = parse_args(&args);

    if let Err(e) = run(&data_dir, &table_name).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> (PathBuf, String) {
    let mut data_dir = PathBuf::from(DEFAULT_DATA_DIR);
    let mut table = DEFAULT_TABLE.to_string();

    let mut i = 1;
    while i < args.len() {
        if args[i] == "--table" && i + 1 < args.len() {
            table = args[i + 1].clone();
            i += 2;
        } else if args[i] == "--help" || args[i] == "-h" {
            eprintln!("Usage: mart [DATA_DIR] [--table NAME]");
            eprintln!("Example: mart data --table milestone1_cleaned_dataset");
            std::process::exit(0);
        } else {
            data_dir = PathBuf::from(&args[i]);
            i += 1;
        }
    }

    (data_dir, table)
}

async fn run(data_dir: &std::path::Path, table_name: &str) -> Result<(), Box<dyn std::error::Error>> {
    let table = TableName::new(table_name)?;
    let config = DbConfig::from_env();

    println!("Loading sources from {}...", data_dir.display());
    let sources = load_sources(data_dir)?;
    println!("  trades: {} rows", sources.trades.height());

    let enriched = enrich(
        &sources.prices,
        &sources.customers,
        &sources.dates,
        &sources.stocks,
        &sources.trades,
    )?;
    println!("Enriched {} trades:", enriched.height());
    println!("{}", enriched.head(Some(5)));

    match trademart::store::ensure_database(&config).await? {
        Provisioned::Created => println!("Database {} created", config.database),
        Provisioned::AlreadyExists => println!("Database {} already exists", config.database),
    }

    match trademart::store::replace_table(&config, &table, &enriched).await? {
        LoadOutcome::Replaced { rows } => {
            println!("Replaced table {table} with {rows} rows");
        }
        LoadOutcome::Conflict => {
            println!("Table {table} was recreated by a concurrent run; nothing loaded");
        }
    }

    Ok(())
}
