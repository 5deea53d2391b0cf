//! rxcode - CLI tool to generate pharmacy barcodes and GS1 Data Matrix payloads.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use rxcode_core::{
    generate_with_file_store, BarcodeId, FieldSet, FileStore, Generation, Generator,
    GeneratorConfig, Selection,
};

/// Generate Rx/NDC barcodes and GS1 Data Matrix payloads.
#[derive(Parser, Debug)]
#[command(name = "rxcode")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the saved history
    #[arg(long, global = true, default_value = ".rxcode")]
    data_dir: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate barcodes from field values and save them to history
    Generate {
        #[command(flatten)]
        fields: FieldArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// List saved entries, most recent first
    History {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Regenerate a saved entry without adding it to history
    Recall {
        /// Entry index as shown by `history` (0 = most recent)
        index: usize,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Delete all saved entries
    Clear,
}

#[derive(Args, Debug)]
struct FieldArgs {
    /// Prescription code (required)
    #[arg(long, default_value = "")]
    rx: String,

    /// National Drug Code, 10 digits, hyphens allowed (required)
    #[arg(long, default_value = "")]
    ndc: String,

    /// Lot number
    #[arg(long, default_value = "")]
    lot: String,

    /// Serial number
    #[arg(long, default_value = "")]
    serial: String,

    /// Expiration date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    expiration: String,

    /// Extra barcode text
    #[arg(long, default_value = "")]
    barcode1: String,

    /// Second extra barcode text
    #[arg(long, default_value = "")]
    barcode2: String,
}

impl From<FieldArgs> for FieldSet {
    fn from(args: FieldArgs) -> Self {
        FieldSet {
            rx: args.rx,
            ndc: args.ndc,
            lot_number: args.lot,
            serial_number: args.serial,
            expiration_date: args.expiration,
            barcode1: args.barcode1,
            barcode2: args.barcode2,
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Show only this barcode (rx, ndc, gs1, barcode1, barcode2)
    #[arg(long)]
    focus: Option<BarcodeId>,

    /// Output as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Generate { fields, output } => {
            let fields = FieldSet::from(fields);
            let generation = generate_with_file_store(&cli.data_dir, fields, output.focus)?;
            print_generation(&generation, &GeneratorConfig::default(), output.json)?;
            info!("Saved to {}", cli.data_dir.display());
        }
        Command::History { json } => {
            let generator = open_generator(&cli.data_dir)?;
            let records = generator.history().records();
            if json {
                println!("{}", serde_json::to_string_pretty(records)?);
            } else if records.is_empty() {
                info!("No saved entries");
            } else {
                for (i, record) in records.iter().enumerate() {
                    let when = record
                        .created_at()
                        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                        .unwrap_or_default();
                    println!("{:>2}  {}  {}", i, when, record.fields.summary());
                }
            }
        }
        Command::Recall { index, output } => {
            let mut generator = open_generator(&cli.data_dir)?;
            generator.set_selection(Selection::from(output.focus));
            let generation = generator
                .recall(index)
                .with_context(|| format!("Failed to recall entry {}", index))?
                .clone();
            print_generation(&generation, generator.config(), output.json)?;
        }
        Command::Clear => {
            let mut generator = open_generator(&cli.data_dir)?;
            generator.clear_history()?;
            info!("History cleared");
        }
    }

    Ok(())
}

/// Open the file-backed generator under `data_dir`.
fn open_generator(data_dir: &Path) -> Result<Generator<FileStore>> {
    let store = FileStore::open(data_dir)
        .with_context(|| format!("Failed to open data directory {}", data_dir.display()))?;
    Ok(Generator::new(store, GeneratorConfig::default()))
}

/// Print the visible outputs of a generation.
fn print_generation(generation: &Generation, config: &GeneratorConfig, json: bool) -> Result<()> {
    let plan = generation.render_plan(config.linear_format);

    if json {
        let value = serde_json::json!({
            "fields": generation.fields,
            "outputs": generation.outputs,
            "visible": generation.visible,
            "render": plan,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    for request in &plan.linear {
        println!(
            "{:<10} {}  {}",
            request.target.label(),
            request.format,
            request.text
        );
    }
    if plan.gs1_text.visible {
        println!("GTIN-14    {}", generation.outputs.gtin14);
        println!("GS1        {}", plan.gs1_text.value);
        println!("DataMatrix {}", plan.data_matrix.value);
    }
    if generation.visible.is_empty() {
        warn!("Nothing to show for focus {}", generation.selection);
    }

    Ok(())
}
