use crate::server::{self, ServerConfig};
use crate::utils::{get_data_file, get_data_url, get_port, get_public_dir};
use std::path::PathBuf;

/// Command-line overrides for the server; unset values fall back to the environment
#[derive(Debug, Default)]
pub struct ServeArgs {
    pub port: Option<u16>,
    pub data_file: Option<PathBuf>,
    pub data_url: Option<String>,
    pub public_dir: Option<PathBuf>,
    pub offset_mode: Option<String>,
    pub no_volume: bool,
}

pub async fn run(args: ServeArgs) {
    let port = args.port.unwrap_or_else(get_port);
    println!("🚀 Starting candleview server on port {}", port);

    let config = ServerConfig {
        data_file: args.data_file.unwrap_or_else(get_data_file),
        data_url: args.data_url.or_else(get_data_url),
        public_dir: args.public_dir.unwrap_or_else(get_public_dir),
        // Each entry point picks its own splitter
        load: super::load_options(args.offset_mode, false, args.no_volume),
    };

    match &config.data_url {
        Some(url) => println!("🌐 Page-load data: {}", url),
        None => {
            println!("📁 Page-load data: {}", config.data_file.display());
            if !config.data_file.exists() {
                println!(
                    "⚠️  {} does not exist yet; /api/chart will report an error until it does",
                    config.data_file.display()
                );
            }
        }
    }
    println!("🕒 Offset mode: {}", config.load.parse.offset_mode.as_str());
    println!();

    if let Err(e) = server::serve(config, port).await {
        eprintln!("❌ Server error: {}", e);
        std::process::exit(1);
    }
}
