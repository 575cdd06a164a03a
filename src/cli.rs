use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "candleview")]
#[command(about = "Candlestick/volume charts from OHLCV CSV files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chart server
    Serve {
        /// Port to listen on (default: $PORT or 3000)
        #[arg(short, long)]
        port: Option<u16>,

        /// CSV served at /data.csv and charted on page load (default: $CANDLEVIEW_DATA_FILE or data.csv)
        #[arg(long)]
        data_file: Option<PathBuf>,

        /// Fetch the page-load CSV from this URL instead of the local file
        #[arg(long)]
        data_url: Option<String>,

        /// Directory for static files and index.html (default: $CANDLEVIEW_PUBLIC_DIR or public)
        #[arg(long)]
        public_dir: Option<PathBuf>,

        /// How to treat a -05:00 suffix: legacy (read as UTC) or honor
        #[arg(long)]
        offset_mode: Option<String>,

        /// Do not add the volume histogram
        #[arg(long)]
        no_volume: bool,
    },
    /// Render a standalone HTML chart from a CSV file or URL
    Render {
        /// CSV file to chart
        #[arg(required_unless_present = "url")]
        input: Option<PathBuf>,

        /// Fetch the CSV from this URL instead
        #[arg(long, conflicts_with = "input")]
        url: Option<String>,

        /// Output HTML file
        #[arg(short, long, default_value = "chart.html")]
        output: PathBuf,

        /// Read columns with the CSV tokenizer and header names
        #[arg(long)]
        tokenized: bool,

        /// How to treat a -05:00 suffix: legacy (read as UTC) or honor
        #[arg(long)]
        offset_mode: Option<String>,

        /// Do not add the volume histogram
        #[arg(long)]
        no_volume: bool,
    },
    /// Parse a CSV file and report accepted and skipped rows
    Check {
        /// CSV file to check
        path: PathBuf,

        /// Read columns with the CSV tokenizer and header names
        #[arg(long)]
        tokenized: bool,

        /// How to treat a -05:00 suffix: legacy (read as UTC) or honor
        #[arg(long)]
        offset_mode: Option<String>,
    },
}

pub async fn run() {
    init_tracing();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            data_file,
            data_url,
            public_dir,
            offset_mode,
            no_volume,
        } => {
            let args = commands::serve::ServeArgs {
                port,
                data_file,
                data_url,
                public_dir,
                offset_mode,
                no_volume,
            };
            commands::serve::run(args).await;
        }
        Commands::Render {
            input,
            url,
            output,
            tokenized,
            offset_mode,
            no_volume,
        } => {
            commands::render::run(input, url, output, tokenized, offset_mode, no_volume).await;
        }
        Commands::Check {
            path,
            tokenized,
            offset_mode,
        } => {
            commands::check::run(path, tokenized, offset_mode);
        }
    }
}

/// Initialize tracing, `RUST_LOG` overrides the default `info` level
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}
