//! Barcode Mapper CLI
//!
//! Joins `barcodes.csv` and `orders.csv` into a new csv file that maps
//! customer ids to barcodes.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- --data-dir ./assignment_data -o customer_ids_to_barcodes.csv
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Set to `info` or `debug` to control logging verbosity

use barcode_mapper::{LogSink, MappingPipeline, PipelineConfig, Result, TieBreak};
use clap::Parser;
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "barcode-mapper", version)]
#[command(about = "Joins ticket barcodes with purchase orders and maps customer ids to barcodes")]
struct Cli {
    /// Directory containing barcodes.csv and orders.csv
    #[arg(long, default_value = "./assignment_data")]
    data_dir: PathBuf,

    /// The filepath where the output csv will be saved
    #[arg(short, long, default_value = "./customer_ids_to_barcodes.csv")]
    output: PathBuf,

    /// When a barcode is duplicated, keep the record without an order id
    /// instead of the one with an order id
    #[arg(long)]
    prefer_unassigned: bool,

    /// The number of top customers logged
    #[arg(short = 'n', long, default_value_t = 5)]
    top_customers: usize,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    let tie_break = if cli.prefer_unassigned {
        TieBreak::PreferUnassigned
    } else {
        TieBreak::PreferAssigned
    };
    let config = PipelineConfig {
        tie_break,
        top_customers: cli.top_customers,
    };

    let barcodes = File::open(cli.data_dir.join("barcodes.csv"))?;
    let orders = File::open(cli.data_dir.join("orders.csv"))?;

    let mut pipeline = MappingPipeline::new(config, LogSink);
    let mapping = pipeline.run(BufReader::new(barcodes), BufReader::new(orders))?;

    info!("Writing output to filepath: {}", cli.output.display());
    mapping.write_csv_atomic(&cli.output)?;

    Ok(())
}
