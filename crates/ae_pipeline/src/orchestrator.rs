use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};

use ae_core::{Article, ArticleFilter, ArticleStore, Clock, Error, Result};
use ae_extract::extractor::{collapse_whitespace, truncate_chars};
use ae_extract::ContentExtractor;
use ae_rewrite::Rewriter;
use ae_search::{fallback_competitors, CompetitorFinder};

use crate::config::PipelineConfig;

const RETRY_DELAY: Duration = Duration::from_secs(5);
const URL_SUFFIX: &str = "-updated";
const EXCERPT_LEN: usize = 200;

/// Counts for the final run report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

enum Outcome {
    Published,
    Skipped,
}

/// Drives one original article through search, competitor scraping, rewrite
/// and publish, for every un-enhanced article in the store.
pub struct Orchestrator {
    store: Arc<dyn ArticleStore>,
    finder: CompetitorFinder,
    extractor: ContentExtractor,
    rewriter: Rewriter,
    clock: Arc<dyn Clock>,
    config: PipelineConfig,
}

impl Orchestrator {
    pub fn new(
        store: Arc<dyn ArticleStore>,
        finder: CompetitorFinder,
        extractor: ContentExtractor,
        rewriter: Rewriter,
        clock: Arc<dyn Clock>,
        config: PipelineConfig,
    ) -> Self {
        Self {
            store,
            finder,
            extractor,
            rewriter,
            clock,
            config,
        }
    }

    /// Processes every original article in the store, one at a time. A
    /// single article's failure never aborts the run.
    pub async fn run(&self) -> Result<RunSummary> {
        info!("🚀 Starting enhancement run");

        let originals = self.store.list(ArticleFilter::originals()).await?;
        if originals.is_empty() {
            info!("No original articles to process");
            return Ok(RunSummary::default());
        }
        info!("Found {} articles to process", originals.len());

        let mut summary = RunSummary::default();
        for batch in originals.chunks(self.config.batch_size.max(1)) {
            for article in batch {
                summary.attempted += 1;
                match self.process_with_retries(article).await {
                    Ok(Outcome::Published) => summary.succeeded += 1,
                    Ok(Outcome::Skipped) => summary.skipped += 1,
                    Err(err) => {
                        error!("Giving up on \"{}\": {}", article.title, err);
                        summary.failed += 1;
                    }
                }
                self.clock.sleep(self.config.rate_limit_delay).await;
            }
        }

        info!(
            "✅ Run finished: {} attempted, {} succeeded, {} skipped, {} failed",
            summary.attempted, summary.succeeded, summary.skipped, summary.failed
        );
        Ok(summary)
    }

    /// Retries the whole per-article pipeline with a fresh budget for each
    /// article. Conflicts are terminal: the derived url is deterministic
    /// and would collide again on every retry.
    async fn process_with_retries(&self, article: &Article) -> Result<Outcome> {
        let mut remaining = self.config.retry_attempts;
        loop {
            match self.process(article).await {
                Ok(outcome) => return Ok(outcome),
                Err(err) if err.is_retryable() && remaining > 0 => {
                    remaining -= 1;
                    warn!(
                        "Failed to process \"{}\": {} ({} retries left)",
                        article.title, err, remaining
                    );
                    self.clock.sleep(RETRY_DELAY).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn process(&self, article: &Article) -> Result<Outcome> {
        info!("📰 Processing: {}", article.title);

        info!("Step 1: searching for competitor articles");
        let mut competitors = match self.finder.find(&article.title).await {
            Ok(results) => results,
            Err(Error::SearchUnavailable(reason)) => {
                warn!("Search unavailable ({}), using fallback table", reason);
                Vec::new()
            }
            Err(err) => return Err(err),
        };

        if competitors.is_empty() {
            warn!("No competitors from search, consulting fallback table");
            competitors = fallback_competitors(&article.title);
        }
        if competitors.is_empty() {
            warn!("No competitor candidates at all, skipping");
            return Ok(Outcome::Skipped);
        }

        info!("Step 2: scraping {} competitor pages", competitors.len());
        let urls: Vec<String> = competitors.iter().map(|c| c.url.clone()).collect();
        let extracts = self.extractor.extract_many(&urls).await;
        if extracts.is_empty() {
            warn!("Could not scrape any competitor content, skipping");
            return Ok(Outcome::Skipped);
        }

        info!("Step 3: rewriting article");
        let rewritten = self
            .rewriter
            .rewrite(&article.title, &article.content, &extracts)
            .await?;

        info!("Step 4: publishing enhanced article");
        let enhanced = enhanced_article(article, rewritten, urls);
        let published = self.store.create(&enhanced).await?;
        info!(
            "✅ Published \"{}\" as {} ({} references)",
            published.title,
            published.id.as_deref().unwrap_or("?"),
            published.references.len()
        );
        Ok(Outcome::Published)
    }
}

/// Builds the enhanced record from the rewrite output. The url is derived
/// from the original's, so rerunning against the same original collides in
/// the store rather than silently duplicating.
fn enhanced_article(original: &Article, rewritten: String, references: Vec<String>) -> Article {
    let stripped = collapse_whitespace(&strip_tags(&rewritten));
    let excerpt = format!("{}...", truncate_chars(&stripped, EXCERPT_LEN));

    Article {
        id: None,
        title: original.title.clone(),
        url: format!("{}{}", original.url, URL_SUFFIX),
        author: original.author.clone(),
        published_date: Some(Utc::now()),
        image_url: original.image_url.clone(),
        excerpt: Some(excerpt),
        content: rewritten,
        is_updated: true,
        original_article_id: original.id.clone(),
        references,
    }
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => {
                in_tag = false;
                out.push(' ');
            }
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}
