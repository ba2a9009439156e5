use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use reqwest::Url;
use tracing::info;
use tracing_subscriber::EnvFilter;

use stationwatch::config::ConsoleConfig;
use stationwatch::page::{self, Page};
use stationwatch::poll::{HealthPoller, LiveFeedPoller};
use stationwatch::render;
use stationwatch::{ApiClient, ReadingsQuery};

/// Title of the mirrored console document.
const PAGE_TITLE: &str = "estation — consola de administración";

#[derive(Parser, Debug)]
#[command(name = "stationwatch")]
#[command(about = "Headless admin console for estation sensor-station servers")]
struct Args {
    /// Base URL of the estation server
    #[arg(short, long)]
    server: Option<String>,

    /// Path the rendered HTML document is written to
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Health polling period in seconds (minimum 5)
    #[arg(long)]
    health_every: Option<u64>,

    /// Live-feed polling period in seconds (minimum 1)
    #[arg(long)]
    live_every: Option<u64>,

    /// Path to a TOML config file (default: stationwatch.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Run one tick of each poller, write the document, and exit
    #[arg(long, conflicts_with = "query")]
    once: bool,

    /// Run a readings query and render the result table instead of watching
    #[arg(short, long)]
    query: bool,

    /// Query: start timestamp (yyyy-MM-ddHH:mm:ss)
    #[arg(long, requires = "query")]
    start: Option<String>,

    /// Query: end timestamp (yyyy-MM-ddHH:mm:ss)
    #[arg(long, requires = "query")]
    end: Option<String>,

    /// Query: only rows from this sensor id
    #[arg(long, requires = "query")]
    sensor: Option<String>,

    /// Query: maximum number of rows (the server caps this at 200)
    #[arg(long, requires = "query")]
    limit: Option<u32>,

    /// Query: row offset for paging
    #[arg(long, requires = "query")]
    offset: Option<u32>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = effective_config(&args)?;

    let base = Url::parse(&cfg.server)
        .with_context(|| format!("invalid server url: {}", cfg.server))?;
    let client = ApiClient::new(base);

    if args.query {
        return run_query(&args, client).await;
    }
    if args.once {
        return run_once(&cfg, client).await;
    }
    run_watch(&cfg, client).await
}

/// File config overridden by whichever flags were actually given.
fn effective_config(args: &Args) -> Result<ConsoleConfig> {
    let mut cfg = ConsoleConfig::load(args.config.as_deref())?;
    if let Some(server) = &args.server {
        cfg.server = server.clone();
    }
    if let Some(out) = &args.out {
        cfg.out = out.display().to_string();
    }
    if let Some(every) = args.health_every {
        cfg.health_every = every;
    }
    if let Some(every) = args.live_every {
        cfg.live_every = every;
    }
    Ok(cfg)
}

/// Watch mode: poll until Ctrl-C, mirroring the page to disk on change.
async fn run_watch(cfg: &ConsoleConfig, client: ApiClient) -> Result<()> {
    let page = Page::admin();
    let mut changes = page.subscribe();

    let health = HealthPoller::new(client.clone(), &page, Duration::from_secs(cfg.health_every))
        .context("page is missing the health region")?;
    let live = LiveFeedPoller::new(client, &page, Duration::from_secs(cfg.live_every))
        .context("page is missing the live regions")?;

    info!(server = %cfg.server, out = %cfg.out, "stationwatch starting");

    let health_handle = health.start();
    let live_handle = live.start();

    // Write the empty page up front so the file exists before the first
    // tick lands.
    write_document(&cfg.out, &page)?;

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                write_document(&cfg.out, &page)?;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    health_handle.stop();
    live_handle.stop();
    Ok(())
}

/// One-shot mode: a single tick of each poller, one document write.
async fn run_once(cfg: &ConsoleConfig, client: ApiClient) -> Result<()> {
    let page = Page::admin();

    let health = HealthPoller::new(client.clone(), &page, Duration::from_secs(cfg.health_every))
        .context("page is missing the health region")?;
    let live = LiveFeedPoller::new(client, &page, Duration::from_secs(cfg.live_every))
        .context("page is missing the live regions")?;

    health.refresh().await;
    live.refresh().await;

    write_document(&cfg.out, &page)?;
    println!("Wrote console snapshot to: {}", cfg.out);
    Ok(())
}

/// Query mode: run one readings query and render the result table.
async fn run_query(args: &Args, client: ApiClient) -> Result<()> {
    let query = ReadingsQuery {
        start: args.start.clone(),
        end: args.end.clone(),
        // The server defaults the comparison operator to `=`, which is
        // exactly what an id lookup wants.
        filter: args.sensor.as_ref().map(|_| "sensor_id".to_string()),
        value: args.sensor.clone(),
        limit: args.limit,
        offset: args.offset,
        ..ReadingsQuery::default()
    };

    let rows = client.query_readings(&query).await?;
    info!(rows = rows.len(), "readings query finished");

    match &args.out {
        Some(path) => {
            let page = Page::admin();
            page.show_table(page::QUERY_RESULTS, &rows);
            std::fs::write(path, page.document(PAGE_TITLE))
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Wrote query results to: {}", path.display());
        }
        None => println!("{}", render::records_table(&rows)),
    }
    Ok(())
}

fn write_document(path: &str, page: &Page) -> Result<()> {
    std::fs::write(path, page.document(PAGE_TITLE))
        .with_context(|| format!("failed to write {path}"))
}
