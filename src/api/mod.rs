//! Stocktake API Server module
//!
//! HTTP upload → download surface for the converter.
//! Run with `stocktake-server`.

pub mod handlers;
pub mod server;

pub use server::{router, run_api_server};
