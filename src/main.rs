//! Link-Spider main entry point
//!
//! This is the command-line interface for the Link-Spider manifest crawler.

use anyhow::Context;
use clap::Parser;
use link_spider::config::{
    expand_tilde, load_config_with_hash, load_seeds, Config, Credentials,
};
use link_spider::crawler::crawl;
use link_spider::output::{render, write_manifest};
use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Link-Spider: a download-manifest crawler
///
/// Link-Spider walks HTML pages reachable from a list of seed URIs, stays
/// inside a whitelist of domains, and prints a manifest of every non-HTML
/// resource it found for a download tool to fetch.
#[derive(Parser, Debug)]
#[command(name = "link-spider")]
#[command(version)]
#[command(about = "A download-manifest crawler", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG", env = "CONFIG_FILE", default_value = "./config.toml")]
    config: String,

    /// Seed list to use instead of the configured `uri-file`
    #[arg(long, value_name = "PATH", env = "URI_FILE")]
    uri_file: Option<String>,

    /// HTTP basic-auth user name
    #[arg(long, env = "HTTP_USER")]
    http_user: Option<String>,

    /// HTTP basic-auth password
    #[arg(long, env = "HTTP_PW", hide_env_values = true)]
    http_password: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and seeds and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let home = std::env::var("HOME").ok();
    let config_path = expand_tilde(&cli.config, home.as_deref());

    tracing::info!("Loading configuration from: {}", config_path.display());
    let (mut config, config_hash) = load_config_with_hash(&config_path)
        .with_context(|| format!("Failed to load configuration {}", config_path.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if let Some(uri_file) = cli.uri_file {
        tracing::info!("Overriding uri-file with: {}", uri_file);
        config.uri_file = uri_file;
    }

    let credentials = Credentials::from_parts(cli.http_user, cli.http_password);
    if credentials.is_some() {
        tracing::info!("HTTP basic auth enabled");
    }

    if cli.dry_run {
        handle_dry_run(&config, credentials.as_ref())
    } else {
        handle_crawl(&config, credentials).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr; stdout is reserved for the manifest.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("link_spider=info,warn"),
            1 => EnvFilter::new("link_spider=debug,info"),
            2 => EnvFilter::new("link_spider=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and seeds and shows what would be crawled
fn handle_dry_run(config: &Config, credentials: Option<&Credentials>) -> anyhow::Result<()> {
    let seed_file = config.seed_file_path()?;
    let seeds = load_seeds(&seed_file)
        .with_context(|| format!("Failed to load seeds from {}", seed_file.display()))?;

    println!("=== Link-Spider Dry Run ===\n");

    println!("Seeds ({}) from {}:", seeds.len(), seed_file.display());
    for seed in &seeds {
        println!("  - {}", seed);
    }

    println!("\nOutput:");
    println!("  Download path: {}", config.download_path);
    println!(
        "  Strip from paths: {}",
        config.uri_strip_paths.as_deref().unwrap_or("(none)")
    );

    println!("\nFetcher:");
    println!("  User agent: {}", config.fetcher.user_agent);
    println!("  Timeout: {}s", config.fetcher.timeout_secs);
    println!(
        "  Basic auth: {}",
        credentials.map_or("disabled".to_string(), |c| format!("as {}", c.username))
    );

    print_patterns("URI Blacklist", &config.uri_blacklist);
    print_patterns("URI Path Blacklist", &config.uri_path_blacklist);
    print_patterns("Domain Whitelist", &config.domain_whitelist);

    println!("\n✓ Configuration is valid");
    println!("✓ Would start crawling with {} seed URIs", seeds.len());

    Ok(())
}

fn print_patterns(title: &str, patterns: &[String]) {
    println!("\n{} ({}):", title, patterns.len());
    for pattern in patterns {
        println!("  - {}", pattern);
    }
}

/// Handles the main crawl operation and prints the manifest
async fn handle_crawl(config: &Config, credentials: Option<Credentials>) -> anyhow::Result<()> {
    tracing::info!(
        "Blacklist: {}, Path blacklist: {}, Whitelist: {}",
        config.uri_blacklist.len(),
        config.uri_path_blacklist.len(),
        config.domain_whitelist.len()
    );

    let report = crawl(config, credentials).await.context("Crawl failed")?;

    let entries = render(
        &report.downloads,
        &config.download_path,
        config.uri_strip_paths.as_deref(),
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "\nfinished")?;
    write_manifest(&mut out, &entries).context("Failed to write manifest")?;

    tracing::info!("Manifest written with {} entries", entries.len());
    Ok(())
}
