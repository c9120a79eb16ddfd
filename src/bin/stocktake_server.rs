//! Stocktake API Server binary
//!
//! HTTP upload/download surface for the ledger → count workbook converter.

use clap::Parser;
use stocktake::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "stocktake-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Stocktake API Server - upload a cost ledger, download the count workbook")]
#[command(long_about = r#"
Stocktake API Server

Endpoints:
  - POST /api/v1/convert   - Ledger (.xlsx/.xls) as body → count workbook download
  - POST /api/v1/preview   - Ledger as body → first transformed rows (JSON)

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Example usage:
  stocktake-server                           # Start on localhost:8080
  stocktake-server --host 0.0.0.0 --port 3000 --month 6

  curl -X POST http://localhost:8080/api/v1/convert \
    --data-binary @원가수불부.xlsx -OJ
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "STOCKTAKE_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "STOCKTAKE_PORT")]
    port: u16,

    /// Closing month of the ledger (labels the quantity columns)
    #[arg(short, long, default_value = "12", env = "STOCKTAKE_MONTH")]
    month: u32,

    /// Largest accepted upload, in megabytes
    #[arg(long, default_value = "20", env = "STOCKTAKE_MAX_UPLOAD_MB")]
    max_upload_mb: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
        max_upload_bytes: ApiConfig::upload_limit_from_mb(args.max_upload_mb)?,
        period_month: args.month,
    };

    run_api_server(config).await
}
