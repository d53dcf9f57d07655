//! SonarQube Exporter binary
//!
//! Serves SonarQube metrics for Prometheus, or prints a single scrape.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use sonarqube_exporter::{
    encode_text, start_web_server, Collector, Endpoint, SonarClient, WebConfig,
    DEFAULT_METRICS_PATH, DEFAULT_TIMEOUT_SECS, DEFAULT_WEB_PORT, SONARQUBE_METRICS,
};
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{filter::LevelFilter, EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "sonarqube_exporter")]
#[command(about = "Prometheus exporter for SonarQube")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = "Queries the SonarQube REST API on every scrape and exposes health, activity and statistics as Prometheus gauges")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// SonarQube base URL
    #[arg(long, global = true, env = "SONAR_URL", default_value = "")]
    sonar_url: String,

    /// SonarQube user
    #[arg(long, global = true, env = "SONAR_USER", default_value = "")]
    sonar_user: String,

    /// SonarQube password or token
    #[arg(long, global = true, env = "SONAR_PASSWORD", default_value = "", hide_env_values = true)]
    sonar_password: String,

    /// Per-request timeout against SonarQube in seconds (0 disables it)
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve metrics over HTTP (default)
    Serve(ServeArgs),

    /// Run one scrape, print it and exit
    Scrape(ScrapeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_WEB_PORT)]
    port: u16,

    /// Path serving the metrics
    #[arg(long, default_value = DEFAULT_METRICS_PATH)]
    metrics_path: String,
}

impl Default for ServeArgs {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: DEFAULT_WEB_PORT,
            metrics_path: DEFAULT_METRICS_PATH.to_string(),
        }
    }
}

#[derive(Args)]
struct ScrapeArgs {
    /// Output format: text or json
    #[arg(short, long, default_value = "text")]
    format: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(&cli)?;

    let collector = build_collector(&cli)?;

    match &cli.command {
        Some(Commands::Serve(args)) => serve_command(args, collector).await?,
        Some(Commands::Scrape(args)) => scrape_command(args, collector).await?,
        None => serve_command(&ServeArgs::default(), collector).await?,
    }

    Ok(())
}

fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let level = if cli.debug {
        Level::DEBUG
    } else if cli.verbose {
        Level::INFO
    } else {
        Level::WARN
    };

    // RUST_LOG directives refine the flag-selected level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(level).into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to install tracing subscriber")?;

    Ok(())
}

fn build_collector(cli: &Cli) -> anyhow::Result<Collector<SonarClient>> {
    let endpoint = Endpoint::new(&cli.sonar_url).with_credentials(&cli.sonar_user, &cli.sonar_password);
    let timeout = (cli.timeout_secs > 0).then(|| Duration::from_secs(cli.timeout_secs));

    if cli.sonar_url.is_empty() {
        tracing::warn!("SONAR_URL is not set, every scrape will report the target down");
    }

    let client = SonarClient::new(endpoint, timeout)?;
    Ok(Collector::new(client, &SONARQUBE_METRICS))
}

async fn serve_command(args: &ServeArgs, collector: Collector<SonarClient>) -> anyhow::Result<()> {
    let config = WebConfig::new(&args.host, args.port).with_metrics_path(&args.metrics_path);

    info!("Exporter configuration:");
    info!("  - SonarQube: {}", collector.api().endpoint().base_url());
    info!("  - Bind address: {}", config.bind_address());
    info!("  - Metrics path: {}", config.metrics_path);

    start_web_server(config, collector).await?;
    Ok(())
}

async fn scrape_command(args: &ScrapeArgs, collector: Collector<SonarClient>) -> anyhow::Result<()> {
    let result = collector.scrape().await;

    match args.format.as_str() {
        "text" => print!("{}", encode_text(&result, collector.descriptors())?),
        "json" => println!("{}", serde_json::to_string_pretty(&result)?),
        other => anyhow::bail!("Unsupported format: {}. Use 'text' or 'json'", other),
    }

    Ok(())
}
