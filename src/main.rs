use clap::{Parser, Subcommand};
use std::path::PathBuf;
use stocktake::cli;
use stocktake::error::StocktakeResult;
use stocktake::layout::PREVIEW_ROWS;

#[derive(Parser)]
#[command(name = "stocktake")]
#[command(about = "Cost ledger (원가수불부) → physical count template (재고실사 양식)")]
#[command(long_about = "Stocktake - cost ledger to inventory count workbook

Reads the first sheet of a cost ledger (.xlsx or .xls), keeps the columns a
stock count needs, adds blank count and location columns, and writes one
formatted sheet per item category group.

COMMANDS:
  convert   - Ledger to count workbook (.xlsx)
  preview   - Show the first transformed rows

SHEETS:
  제품,상품   제품, 상품, 제품(OEM)
  반제품     반제품
  원재료     원재료
  부재료     부재료
  Rows with any other category are left out (a warning reports how many).

NOTE: the first data row of the ledger is always dropped; ledger exports
repeat the header there.

EXAMPLES:
  stocktake convert 원가수불부.xlsx
  stocktake convert ledger.xls -o count.xlsx --month 6
  stocktake preview ledger.xlsx --rows 20")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a ledger into the count workbook
    Convert {
        /// Path to the ledger (.xlsx or .xls)
        input: PathBuf,

        /// Output workbook path (default: 원가수불부_실사양식_최종.xlsx next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Closing month of the ledger (labels the quantity columns)
        #[arg(short, long, default_value = "12", env = "STOCKTAKE_MONTH")]
        month: u32,

        /// Show verbose conversion steps
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show the first transformed rows
    Preview {
        /// Path to the ledger (.xlsx or .xls)
        input: PathBuf,

        /// Number of rows to show
        #[arg(short, long, default_value_t = PREVIEW_ROWS)]
        rows: usize,

        /// Closing month of the ledger (labels the quantity columns)
        #[arg(short, long, default_value = "12", env = "STOCKTAKE_MONTH")]
        month: u32,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "stocktake=debug"
    } else {
        "stocktake=warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> StocktakeResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Convert {
            input,
            output,
            month,
            verbose,
        } => {
            init_tracing(verbose);
            cli::convert(input, output, month, verbose)
        }

        Commands::Preview { input, rows, month } => {
            init_tracing(false);
            cli::preview(input, rows, month)
        }
    }
}
