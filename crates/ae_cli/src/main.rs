use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::info;

use ae_core::{Result, SystemClock};
use ae_extract::{ContentExtractor, HttpFetcher};
use ae_pipeline::{Orchestrator, PipelineConfig};
use ae_rewrite::{create_model, Rewriter};
use ae_search::{CompetitorFinder, GoogleSearch};
use ae_storage::create_store;

#[derive(Parser, Debug)]
#[command(author, version, about = "AI article enhancement pipeline", long_about = None)]
struct Cli {
    /// Store backend: memory or api
    #[arg(long, default_value = "api")]
    store: String,

    /// Base url of the article CRUD API (env: API_BASE_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Text model: gemini or echo
    #[arg(long, default_value = "gemini")]
    model: String,

    /// Articles per batch (env: BATCH_SIZE)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Retry budget per article (env: RETRY_ATTEMPTS)
    #[arg(long)]
    retry_attempts: Option<u32>,

    /// Seconds to pause between articles (env: RATE_LIMIT_DELAY)
    #[arg(long)]
    rate_limit_delay: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Enhance every un-enhanced article in the store
    Run,
    /// Probe the text-model backend and exit
    Check,
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

fn env_parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env_var(name).and_then(|value| value.parse().ok())
}

fn pipeline_config(cli: &Cli) -> PipelineConfig {
    let defaults = PipelineConfig::default();
    PipelineConfig {
        batch_size: cli
            .batch_size
            .or_else(|| env_parsed("BATCH_SIZE"))
            .unwrap_or(defaults.batch_size),
        retry_attempts: cli
            .retry_attempts
            .or_else(|| env_parsed("RETRY_ATTEMPTS"))
            .unwrap_or(defaults.retry_attempts),
        rate_limit_delay: cli
            .rate_limit_delay
            .or_else(|| env_parsed("RATE_LIMIT_DELAY"))
            .map(Duration::from_secs)
            .unwrap_or(defaults.rate_limit_delay),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let model = create_model(&cli.model, env_var("GEMINI_API_KEY"))?;
    info!("🧠 Text model initialized (using {})", model.name());

    match cli.command {
        Commands::Check => {
            model.check().await?;
            info!("✨ Model connection test successful");
            return Ok(());
        }
        Commands::Run => {}
    }

    let api_url = cli
        .api_url
        .clone()
        .or_else(|| env_var("API_BASE_URL"))
        .unwrap_or_else(|| "http://localhost:5000/api".to_string());
    let store = create_store(&cli.store, Some(&api_url))?;
    info!("🏦 Article store initialized (using {})", cli.store);

    let clock = Arc::new(SystemClock);
    let search = GoogleSearch::new(
        env_var("GOOGLE_API_KEY").unwrap_or_default(),
        env_var("GOOGLE_CSE_ID").unwrap_or_default(),
    )?;
    let finder = CompetitorFinder::new(Arc::new(search), clock.clone());
    let extractor = ContentExtractor::new(Arc::new(HttpFetcher::new()?), clock.clone());
    let rewriter = Rewriter::new(model);

    let pipeline = Orchestrator::new(
        store,
        finder,
        extractor,
        rewriter,
        clock,
        pipeline_config(&cli),
    );
    let summary = pipeline.run().await?;

    println!(
        "Processed {} articles: {} enhanced, {} skipped, {} failed",
        summary.attempted, summary.succeeded, summary.skipped, summary.failed
    );
    Ok(())
}
