use std::path::Path;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use dealpost_bot::PostOutcome;
use dealpost_core::rules::RulesFile;
use dealpost_scraper::PageClient;

#[derive(Debug, Parser)]
#[command(name = "dealpost")]
#[command(about = "Turn product links into formatted deal posts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the full pipeline for one URL and print the reply.
    Post {
        url: String,
        /// 6-digit pin code to render; defaults to the configured pin.
        #[arg(long)]
        pin: Option<String>,
    },
    /// Print the canonical form of a URL (shortener expansion + cleaning).
    Clean { url: String },
    /// Load the rule set, validate it, and print a summary.
    Rules,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = dealpost_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let rules = load_rules_or_builtin(&config.rules_path);
    let client = PageClient::new(
        config.fetch_timeout_secs,
        config.head_timeout_secs,
        &config.user_agent,
    )?;

    let cli = Cli::parse();
    match cli.command {
        Commands::Post { url, pin } => {
            let pin = pin.unwrap_or_else(|| rules.default_pin.clone());
            let outcome =
                dealpost_bot::process_url(&client, &rules, &url, &pin, config.max_redirect_hops)
                    .await;
            match outcome {
                PostOutcome::Post { record, text } => {
                    println!("{text}");
                    if let Some(image_url) = record.image_url {
                        tracing::info!(image_url = %image_url, "product image resolved");
                    }
                }
                PostOutcome::OutOfStock { .. } => println!("{}", dealpost_bot::MSG_OUT_OF_STOCK),
                PostOutcome::Unsupported { .. } => println!("{}", dealpost_bot::MSG_UNSUPPORTED),
                PostOutcome::Failed { .. } => println!("{}", dealpost_bot::MSG_EXTRACTION_FAILED),
            }
        }
        Commands::Clean { url } => {
            let canonical =
                dealpost_scraper::normalize_url(&client, &rules, &url, config.max_redirect_hops)
                    .await;
            println!("{canonical}");
        }
        Commands::Rules => {
            println!("default pin: {}", rules.default_pin);
            println!("shorteners:  {}", rules.shorteners.join(", "));
            println!("platforms:");
            for entry in &rules.platforms {
                println!("  {:<10} {}", entry.name.to_string(), entry.domain);
            }
        }
    }

    Ok(())
}

/// Loads the configured rules file, falling back to the builtin copy when
/// it is missing or invalid.
fn load_rules_or_builtin(path: &Path) -> RulesFile {
    match dealpost_core::load_rules(path) {
        Ok(rules) => rules,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "falling back to builtin rules");
            RulesFile::builtin()
        }
    }
}
