//! Gazette feed CLI
//!
//! Local execution entry point. For AWS Lambda, use `gazette-feed-lambda`.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use gazette_feed::{
    api::FeedResponse,
    error::Result,
    models::Config,
    pipeline::FeedPipeline,
    utils::http::HttpFetcher,
};

/// gazette-feed - Gazette Notification Feed
#[derive(Parser, Debug)]
#[command(
    name = "gazette-feed",
    version,
    about = "Discovers recent gazette notifications and serves them as JSON"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the target year
    #[arg(long, global = true)]
    year: Option<i32>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline once and print the feed
    Fetch {
        /// Maximum number of items (clamped like the HTTP endpoint)
        #[arg(short, long)]
        limit: Option<String>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Serve `GET /notifications` over HTTP
    #[cfg(feature = "server")]
    Serve {
        /// Address to listen on (default: server.bind from config)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load_or_default(&cli.config);
    if let Some(year) = cli.year {
        config.source.target_year = year;
    }
    log::debug!("Loaded configuration from {}", cli.config.display());

    match cli.command {
        Command::Fetch { limit, pretty } => {
            let pipeline = build_pipeline(config)?;
            let response = gazette_feed::api::respond(&pipeline, limit.as_deref()).await;
            print_response(&response, pretty)?;

            if !response.is_success() {
                std::process::exit(1);
            }
        }

        #[cfg(feature = "server")]
        Command::Serve { bind } => {
            let addr = bind.unwrap_or_else(|| config.server.bind.clone());
            let pipeline = Arc::new(build_pipeline(config)?);
            gazette_feed::api::server::serve(pipeline, &addr).await?;
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!(
                "✓ Config OK (index {}, target year {})",
                config.source.index_url,
                config.source.target_year
            );
        }
    }

    Ok(())
}

fn build_pipeline(config: Config) -> Result<FeedPipeline> {
    config.validate()?;
    let fetcher = HttpFetcher::from_config(&config.crawler)?;
    FeedPipeline::new(Arc::new(config), Arc::new(fetcher))
}

fn print_response(response: &FeedResponse, pretty: bool) -> Result<()> {
    if pretty {
        let value: serde_json::Value = serde_json::from_str(&response.body)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", response.body);
    }
    Ok(())
}
