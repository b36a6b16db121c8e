//! pagespeed-watcher CLI
//!
//! Thin driver over the library: runs PSI tests, probes connectivity,
//! and reports API usage. Exit code 0 on success, 1 on any classified
//! failure.

use clap::{Parser, Subcommand};
use pagespeed_watcher::config::models::thresholds::ScoreGrade;
use pagespeed_watcher::config::Config;
use pagespeed_watcher::core::client::{ProviderErrorKind, PsiClient, PsiError, Strategy};
use pagespeed_watcher::core::counters::{CounterStore, MemoryCounterStore};
use pagespeed_watcher::core::ledger::{DailyUsage, UsageLedger};
use pagespeed_watcher::core::rate_limiter::RateLimiter;
use pagespeed_watcher::storage::database::Database;
use pagespeed_watcher::utils::logging;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "watcher", version, about = "PageSpeed Insights watcher")]
struct Cli {
    /// Path to a YAML config file; environment variables are used when absent
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a PSI test and print performance metrics
    TestPage {
        /// URL to test (defaults to app_url)
        #[arg(long)]
        url: Option<String>,
        /// Strategy to test: mobile or desktop
        #[arg(long, default_value = "mobile")]
        strategy: String,
    },
    /// Validate connectivity to the PSI API using the configured key
    CheckKey {
        /// URL to test (defaults to app_url)
        #[arg(long)]
        url: Option<String>,
        /// Strategy to test: mobile or desktop
        #[arg(long, default_value = "mobile")]
        strategy: String,
    },
    /// Display API usage statistics
    Usage,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    logging::init("info");

    match run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path).await?,
        None => Config::from_env()?,
    };

    let db = Arc::new(Database::new(&config.storage().database).await?);
    db.migrate().await?;

    let store = build_counter_store(&config).await?;
    let limiter = Arc::new(RateLimiter::new(store, config.quota().clone()));
    let ledger = Arc::new(UsageLedger::new(db, config.quota().clone()));
    let client = PsiClient::new(&config.watcher, limiter, ledger.clone())?;

    match cli.command {
        Command::TestPage { url, strategy } => test_page(&config, &client, url, &strategy).await,
        Command::CheckKey { url, strategy } => check_key(&config, &client, url, &strategy).await,
        Command::Usage => usage(&config, &ledger, &client).await,
    }
}

/// Counter store selection: shared Redis when enabled, otherwise
/// process-local memory (one-shot invocations then only throttle
/// themselves; multi-process deployments want Redis).
async fn build_counter_store(config: &Config) -> anyhow::Result<Arc<dyn CounterStore>> {
    #[cfg(feature = "redis")]
    {
        use anyhow::Context;
        use pagespeed_watcher::storage::redis::{RedisCounterStore, RedisPool};

        if config.storage().redis.enabled {
            let pool = RedisPool::new(&config.storage().redis)
                .await
                .context("failed to connect to Redis")?;
            return Ok(Arc::new(RedisCounterStore::new(pool)));
        }
    }

    let _ = config;
    Ok(Arc::new(MemoryCounterStore::new()))
}

async fn test_page(
    config: &Config,
    client: &PsiClient,
    url: Option<String>,
    strategy: &str,
) -> anyhow::Result<ExitCode> {
    let Some(target) = url.or_else(|| config.watcher.app_url.clone()) else {
        eprintln!("No URL given and app_url is not set");
        return Ok(ExitCode::FAILURE);
    };

    let strategy: Strategy = match strategy.parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("Testing {} ({})...", target, strategy);

    match client.run_test(&target, strategy).await {
        Ok(report) => {
            if let Some(percent) = score_percent(report.metrics.score) {
                println!("Performance Score: {}%", percent);
                print_grade(config, percent);
            } else {
                println!("Performance Score: unavailable");
            }
            print_metric("LCP", report.metrics.lcp_ms, "ms");
            print_metric("INP", report.metrics.inp_ms, "ms");
            print_metric("FCP", report.metrics.fcp_ms, "ms");
            print_metric("TTFB", report.metrics.ttfb_ms, "ms");
            if let Some(cls) = report.metrics.cls {
                println!("  CLS: {:.3}", cls);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Test failed: {}", e);
            print_error_hint(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn check_key(
    config: &Config,
    client: &PsiClient,
    url: Option<String>,
    strategy: &str,
) -> anyhow::Result<ExitCode> {
    if !config.watcher.has_api_key() {
        eprintln!("PSI_API_KEY is not set");
        return Ok(ExitCode::FAILURE);
    }

    let Some(target) = url.or_else(|| config.watcher.app_url.clone()) else {
        eprintln!("No URL given and app_url is not set");
        return Ok(ExitCode::FAILURE);
    };

    let strategy: Strategy = match strategy.parse() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
    };

    println!("Testing PSI connectivity for {} ({})...", target, strategy);

    match client.run_test(&target, strategy).await {
        Ok(report) => {
            println!("OK: PSI API reachable.");
            if let Some(percent) = score_percent(report.metrics.score) {
                println!("Score: {}%", percent);
                print_grade(config, percent);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("Error connecting to PSI API: {}", e);
            print_error_hint(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn usage(
    config: &Config,
    ledger: &UsageLedger,
    client: &PsiClient,
) -> anyhow::Result<ExitCode> {
    println!("PageSpeed Insights API Usage Statistics");
    println!();

    let today = chrono::Utc::now().date_naive();
    let Some(today_usage) = ledger.get_record(today).await? else {
        println!("No usage recorded yet.");
        return Ok(ExitCode::SUCCESS);
    };

    let daily_limit = config.quota().daily_limit;

    println!("Today:");
    println!("  Total Requests: {}", today_usage.requests_total);
    println!("  Successful: {}", today_usage.requests_ok);
    println!("  Errors: {}", today_usage.requests_error);
    println!("  Cost Estimate: ${:.4}", today_usage.cost_usd_estimate);

    let percent = (today_usage.requests_total as f64 / daily_limit as f64) * 100.0;
    println!("  Progress: {:.1}%", percent);
    if percent > 80.0 {
        println!("  Warning: daily limit nearly reached");
    }
    println!();

    let week = ledger
        .get_range(today - chrono::Duration::days(6), today)
        .await?;
    if week.len() > 1 {
        println!("Last 7 Days:");
        println!("  Total Requests: {}", sum(&week, |u| u.requests_total));
        println!("  Successful: {}", sum(&week, |u| u.requests_ok));
        println!("  Errors: {}", sum(&week, |u| u.requests_error));
        let cost: f64 = week.iter().map(|u| u.cost_usd_estimate).sum();
        println!("  Total Cost Estimate: ${:.4}", cost);
        println!();
    }

    let stats = client.usage_stats().await?;
    println!("Rate Limiting:");
    println!(
        "  Minute window: {}/{} used, {} remaining",
        stats.minute_used, stats.minute_limit, stats.minute_remaining
    );
    println!();

    println!("Daily Limit: {} requests", daily_limit);
    println!("Remaining Today: {} requests", stats.daily_remaining);
    if stats.daily_remaining < 100 {
        println!("Warning: daily limit nearly reached");
    }

    if today_usage.requests_error > 0 {
        println!();
        println!("Recommendation: check for API errors in your configuration");
    }
    if today_usage.cost_usd_estimate > 0.0 {
        println!();
        println!("Recommendation: consider reducing test frequency to avoid costs");
    }

    Ok(ExitCode::SUCCESS)
}

fn score_percent(score: Option<f64>) -> Option<u8> {
    score.map(|s| (s * 100.0).round() as u8)
}

fn print_grade(config: &Config, percent: u8) {
    match config.thresholds().grade(percent) {
        ScoreGrade::Excellent => println!("Performance: Excellent"),
        ScoreGrade::Good => println!("Performance: Good"),
        ScoreGrade::NeedsImprovement => println!("Performance: Needs improvement"),
    }
}

fn print_metric(name: &str, value: Option<i64>, unit: &str) {
    if let Some(v) = value {
        println!("  {}: {}{}", name, v, unit);
    }
}

/// Operator guidance keyed off the classification, not message text
fn print_error_hint(error: &PsiError) {
    match error {
        PsiError::MissingCredential => {
            eprintln!("Please check your PSI_API_KEY configuration.");
        }
        PsiError::Provider {
            kind: ProviderErrorKind::AuthError,
            ..
        } => {
            eprintln!("Please check your PSI_API_KEY configuration.");
        }
        PsiError::Provider {
            kind: ProviderErrorKind::QuotaExceeded,
            ..
        } => {
            eprintln!("You may have exceeded your daily API quota.");
        }
        PsiError::RateLimitExceeded => {
            eprintln!("Local rate limit reached; wait for the window to roll over.");
        }
        e if e.is_retryable() => {
            eprintln!("This error is transient; retrying later may succeed.");
        }
        _ => {}
    }
}

fn sum<F: Fn(&DailyUsage) -> i64>(usage: &[DailyUsage], field: F) -> i64 {
    usage.iter().map(field).sum()
}
