//! candleview: OHLCV CSV files rendered as candlestick/volume charts
//!
//! A load runs acquisition → parsing → chart building → status, once per
//! trigger. The browser page hands the resulting chart description to
//! `lightweight-charts`.

pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod server;
pub mod services;
pub mod utils;

pub use error::{AppError, Error, Result};
