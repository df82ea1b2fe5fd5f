//! Command-line front end for the local URL shortener.
//!
//! # Usage
//!
//! ```bash
//! # Shorten up to five URLs, optionally with custom codes (matched by position)
//! shortener shorten example.com https://rust-lang.org --code promo --validity 60
//!
//! # Resolve a code, recording a click
//! shortener open promo
//!
//! # Totals and the table of records
//! shortener stats
//!
//! # One record with click analytics
//! shortener show promo
//!
//! # Remove a record or everything
//! shortener delete promo
//! shortener clear -y
//!
//! # Recent activity
//! shortener logs --limit 50
//! ```
//!
//! # Environment Variables
//!
//! See [`local_url_shortener::config`]. A `.env` file is loaded if present.
//!
//! Diagnostics go to stderr through `tracing`; command output goes to stdout.

use local_url_shortener::application::services::Resolution;
use local_url_shortener::config::{Config, load_from_env};
use local_url_shortener::domain::clock::SystemClock;
use local_url_shortener::domain::entities::{ClickContext, LogLevel, UrlRecord};
use local_url_shortener::dto::{ShortenRequest, ShortenResultItem, UrlItem};
use local_url_shortener::infrastructure::store::{FileStore, KeyValueStore};
use local_url_shortener::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use std::sync::Arc;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const URL_DISPLAY_WIDTH: usize = 50;

/// Shorten URLs and track clicks, stored in a local file.
#[derive(Parser)]
#[command(name = "shortener")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Shorten one or more URLs
    Shorten {
        /// URLs to shorten (scheme optional, https assumed)
        #[arg(required = true)]
        urls: Vec<String>,

        /// Custom shortcode for the URL at the same position
        #[arg(short, long = "code")]
        codes: Vec<String>,

        /// Validity in minutes (1-10080), applied to every URL
        #[arg(short, long)]
        validity: Option<u32>,
    },

    /// Resolve a shortcode and record a click
    Open {
        shortcode: String,

        /// User agent recorded with the click
        #[arg(long)]
        user_agent: Option<String>,

        /// Referrer recorded with the click
        #[arg(long)]
        referrer: Option<String>,
    },

    /// Show totals and all records
    Stats,

    /// Show one record with its click analytics
    Show { shortcode: String },

    /// Delete a record
    Delete {
        shortcode: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show recent activity log entries
    Logs {
        #[arg(short, long, default_value_t = 20)]
        limit: usize,
    },

    /// Delete every record and log entry
    Clear {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = load_from_env().context("Invalid configuration")?;
    init_tracing(&config);
    config.print_summary();

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(&config.store_path));
    let state = AppState::new(&config, store, Arc::new(SystemClock));

    match cli.command {
        Commands::Shorten {
            urls,
            codes,
            validity,
        } => shorten(&state, urls, codes, validity).await?,
        Commands::Open {
            shortcode,
            user_agent,
            referrer,
        } => open(&state, &shortcode, user_agent, referrer)?,
        Commands::Stats => stats(&state)?,
        Commands::Show { shortcode } => show(&state, &shortcode)?,
        Commands::Delete { shortcode, yes } => delete(&state, &shortcode, yes)?,
        Commands::Logs { limit } => logs(&state, limit)?,
        Commands::Clear { yes } => clear(&state, yes)?,
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    if config.log_format == "json" {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

/// Shortens a batch and prints one line per URL in submission order.
async fn shorten(
    state: &AppState,
    urls: Vec<String>,
    codes: Vec<String>,
    validity: Option<u32>,
) -> Result<()> {
    println!("{}", "✂️  Shorten URLs".bright_blue().bold());
    println!();

    let items = urls
        .into_iter()
        .enumerate()
        .map(|(i, url)| UrlItem {
            url,
            custom_shortcode: codes.get(i).cloned(),
            validity_minutes: validity,
        })
        .collect();

    let response = state
        .link_service
        .shorten_batch(ShortenRequest::new(items))
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    for item in &response.items {
        match item {
            ShortenResultItem::Success {
                original_url,
                short_url,
                is_custom_shortcode,
                validity_minutes,
                expires_at,
                ..
            } => {
                let badge = if *is_custom_shortcode {
                    " [custom]".bright_magenta().to_string()
                } else {
                    String::new()
                };
                println!(
                    "  {} {}{}",
                    "✅".green(),
                    short_url.bright_yellow().bold(),
                    badge
                );
                println!("     {} {}", "→".bright_black(), truncate(original_url).cyan());
                let expiry = expires_at
                    .map(|at| at.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_else(|| "never".to_string());
                println!(
                    "     {}",
                    format!("valid {} min, expires {}", validity_minutes, expiry).bright_black()
                );
            }
            ShortenResultItem::Error {
                original_url,
                error,
            } => {
                println!("  {} {}", "❌".red(), truncate(original_url).cyan());
                println!("     {}", error.message.red());
            }
        }
    }

    println!();
    println!(
        "  Total: {}  Successful: {}  Failed: {}",
        response.summary.total.to_string().bright_white().bold(),
        response.summary.successful.to_string().green().bold(),
        response.summary.failed.to_string().red().bold()
    );
    println!();

    Ok(())
}

/// Resolves a shortcode and prints where it points.
fn open(
    state: &AppState,
    shortcode: &str,
    user_agent: Option<String>,
    referrer: Option<String>,
) -> Result<()> {
    let context = ClickContext::new(user_agent.as_deref(), referrer.as_deref());

    let resolution = state
        .link_service
        .resolve(shortcode, context)
        .map_err(|e| anyhow::anyhow!("An error occurred while redirecting: {}", e))?;

    match resolution {
        Resolution::Redirect { original_url } => {
            println!("{}", original_url);
        }
        Resolution::Expired { expires_at } => {
            eprintln!(
                "{} {}",
                "This short URL has expired".red().bold(),
                format!("({})", expires_at.format("%Y-%m-%d %H:%M UTC")).bright_black()
            );
            std::process::exit(1);
        }
        Resolution::NotFound => {
            eprintln!("{}", "Short URL not found".red().bold());
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Prints the overview cards and the records table.
fn stats(state: &AppState) -> Result<()> {
    println!("{}", "📊 URL Statistics".bright_blue().bold());
    println!();

    let records = state
        .link_service
        .list()
        .map_err(|e| anyhow::anyhow!("Error loading URLs for stats: {}", e))?;

    state
        .activity
        .info("URLs loaded for stats", serde_json::json!({ "count": records.len() }));

    if records.is_empty() {
        println!("{}", "  No URLs found".yellow());
        println!();
        println!("  Shorten one with: {}", "shortener shorten <URL>".bright_cyan());
        return Ok(());
    }

    let overview = state
        .stats_service
        .overview()
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!(
        "  Total URLs:        {}",
        overview.total_urls.to_string().bright_green().bold()
    );
    println!(
        "  Total clicks:      {}",
        overview.total_clicks.to_string().bright_green().bold()
    );
    println!(
        "  Custom shortcodes: {}",
        overview.custom_shortcodes.to_string().bright_green().bold()
    );
    println!();

    println!(
        "  {:<22} {:<52} {:>6}  {:<17} {}",
        "Short code".bright_white().bold(),
        "Original URL".bright_white().bold(),
        "Clicks".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(110).bright_black());

    let now = state.stats_service.now();
    for record in &records {
        let status = if record.is_expired_at(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };
        let code = if record.is_custom_shortcode {
            format!("{}*", record.shortcode)
        } else {
            record.shortcode.clone()
        };

        println!(
            "  {:<22} {:<52} {:>6}  {:<17} {}",
            code.cyan(),
            truncate(&record.original_url),
            record.click_count,
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!("  {}", "* custom shortcode".bright_black());
    println!();

    Ok(())
}

/// Prints one record with its click breakdown.
fn show(state: &AppState, shortcode: &str) -> Result<()> {
    let record = state
        .link_service
        .get(shortcode)
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let analytics = state
        .stats_service
        .analytics(shortcode)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    print_record(state, &record);

    println!("{}", "Clicks by day:".bright_white().bold());
    if analytics.clicks_by_day.is_empty() {
        println!("  {}", "No clicks yet".bright_black());
    }
    for (day, count) in &analytics.clicks_by_day {
        println!("  {}  {}", day, count.to_string().bright_green());
    }
    println!();

    println!("{}", "Clicks by hour (UTC):".bright_white().bold());
    for (hour, count) in &analytics.clicks_by_hour {
        println!("  {:02}:00  {}", hour, count.to_string().bright_green());
    }
    println!();

    println!("{}", "Recent clicks:".bright_white().bold());
    for click in &analytics.recent_clicks {
        println!(
            "  {}  {}  {}",
            state.stats_service.time_ago(click.timestamp).bright_black(),
            click.user_agent.as_deref().unwrap_or("unknown agent"),
            click.referrer.as_deref().unwrap_or("direct").bright_black()
        );
    }
    println!();

    Ok(())
}

fn print_record(state: &AppState, record: &UrlRecord) {
    let now = state.stats_service.now();

    println!(
        "{}",
        state
            .link_service
            .short_url(&record.shortcode)
            .bright_yellow()
            .bold()
    );
    println!();
    println!("  Original URL: {}", record.original_url.cyan());
    println!(
        "  Shortcode:    {}{}",
        record.shortcode,
        if record.is_custom_shortcode { " (custom)" } else { "" }
    );
    println!(
        "  Created:      {} ({})",
        record.created_at.format("%Y-%m-%d %H:%M UTC"),
        state.stats_service.time_ago(record.created_at)
    );
    println!("  Validity:     {} minutes", record.validity_minutes);
    if let Some(expires_at) = record.expires_at {
        let status = if record.is_expired_at(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };
        println!(
            "  Expires:      {} {}",
            expires_at.format("%Y-%m-%d %H:%M UTC"),
            status
        );
    }
    println!(
        "  Clicks:       {}",
        record.click_count.to_string().bright_green().bold()
    );
    println!();
}

/// Deletes a record after confirmation (default: No).
fn delete(state: &AppState, shortcode: &str, skip_confirm: bool) -> Result<()> {
    let record = state
        .link_service
        .get(shortcode)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Shortcode: {}", record.shortcode.cyan());
    println!("  URL:       {}", truncate(&record.original_url));
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Are you sure you want to delete this URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state
        .link_service
        .delete(shortcode)
        .map_err(|e| anyhow::anyhow!("Failed to delete URL: {}", e))?;

    println!("{}", "✅ URL deleted".green().bold());

    Ok(())
}

/// Prints the newest `limit` activity log entries.
fn logs(state: &AppState, limit: usize) -> Result<()> {
    println!("{}", "📋 Activity Log".bright_blue().bold());
    println!();

    let entries = state
        .activity
        .recent(limit)
        .map_err(|e| anyhow::anyhow!("Error reading logs: {}", e))?;

    if entries.is_empty() {
        println!("{}", "  No log entries".yellow());
        println!();
        return Ok(());
    }

    for entry in &entries {
        let level = match entry.level {
            LogLevel::Error => "ERROR".red().bold(),
            LogLevel::Warn => "WARN ".yellow().bold(),
            LogLevel::Info => "INFO ".green(),
            LogLevel::Debug => "DEBUG".bright_black(),
        };
        let data = if entry.data.as_object().is_some_and(|o| o.is_empty()) || entry.data.is_null()
        {
            String::new()
        } else {
            entry.data.to_string()
        };

        println!(
            "  {} {} {} {}",
            entry
                .timestamp
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            level,
            entry.message,
            data.bright_black()
        );
    }

    println!();

    Ok(())
}

/// Clears both collections after confirmation (default: No).
fn clear(state: &AppState, skip_confirm: bool) -> Result<()> {
    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete every short URL and log entry?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    state
        .link_service
        .clear_all()
        .map_err(|e| anyhow::anyhow!("Error clearing data: {}", e))?;

    println!("{}", "✅ All data cleared".green().bold());

    Ok(())
}

fn truncate(url: &str) -> String {
    if url.chars().count() > URL_DISPLAY_WIDTH {
        let head: String = url.chars().take(URL_DISPLAY_WIDTH).collect();
        format!("{}...", head)
    } else {
        url.to_string()
    }
}
