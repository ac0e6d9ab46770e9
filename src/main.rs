use std::path::PathBuf;

use clap::Parser;
use ukiyo::config::Config;

/// Ukiyo image manipulation service
#[derive(Parser, Debug)]
#[command(name = "ukiyo")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Test configuration and exit
    #[arg(long)]
    test: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging subsystem
    ukiyo::logging::init_subscriber().expect("Failed to initialize logging subsystem");

    // Parse command-line arguments
    let args = Args::parse();

    // Load configuration; an absent default file runs with built-in defaults
    let config = if args.config.is_file() {
        Config::from_file(&args.config).unwrap_or_else(|e| {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        })
    } else {
        tracing::info!(
            config_file = %args.config.display(),
            "Configuration file not found, using defaults"
        );
        Config::default()
    };

    tracing::info!(
        config_file = %args.config.display(),
        server_address = %config.server.address,
        server_port = config.server.port,
        font_cache_dir = %config.fonts.cache_dir.display(),
        "Configuration loaded"
    );

    if args.test {
        println!("Configuration OK");
        return Ok(());
    }

    ukiyo::server::run(config).await
}
