use std::sync::Arc;
use std::time::Duration;

use scraper::{ElementRef, Html, Selector};
use tracing::{info, warn};

use ae_core::{Clock, ExtractedContent};

use crate::fetch::PageFetcher;

/// Containers tried for the main article body, most specific first.
const CONTENT_CONTAINERS: &[&str] = &[
    "article",
    "main",
    "[role='main']",
    "#content",
    ".post-content",
    ".article-content",
    ".entry-content",
    "body",
];

/// Elements whose text counts as readable content. Collecting only these
/// drops navigation, scripts, ads and other boilerplate.
const TEXT_ELEMENTS: &str = "p, h2, h3, h4, li, blockquote, pre";

const EXCERPT_LEN: usize = 200;
const INTER_REQUEST_DELAY: Duration = Duration::from_secs(2);

/// Fetches competitor pages and reduces them to plain readable text.
pub struct ContentExtractor {
    fetcher: Arc<dyn PageFetcher>,
    clock: Arc<dyn Clock>,
}

impl ContentExtractor {
    pub fn new(fetcher: Arc<dyn PageFetcher>, clock: Arc<dyn Clock>) -> Self {
        Self { fetcher, clock }
    }

    /// Extracts the readable content of a page. Returns `None` on fetch
    /// failure, parse failure or empty extraction; never an error.
    pub async fn extract(&self, url: &str) -> Option<ExtractedContent> {
        info!("📄 Scraping content from: {}", url);

        let html = match self.fetcher.fetch(url).await {
            Ok(html) => html,
            Err(err) => {
                warn!("Fetch failed for {}: {}", url, err);
                return None;
            }
        };

        match extract_from_html(url, &html) {
            Some(content) => {
                info!(
                    "Extracted {} chars of content from: {}",
                    content.length, url
                );
                Some(content)
            }
            None => {
                warn!("Could not extract content from: {}", url);
                None
            }
        }
    }

    /// Extracts several URLs strictly one after another, pausing between
    /// requests so competitor hosts are not hammered. Failed URLs are
    /// skipped; successes keep their input order.
    pub async fn extract_many(&self, urls: &[String]) -> Vec<ExtractedContent> {
        let mut results = Vec::new();
        for url in urls {
            if let Some(content) = self.extract(url).await {
                results.push(content);
            }
            self.clock.sleep(INTER_REQUEST_DELAY).await;
        }
        results
    }
}

/// Readability-style extraction over already-fetched HTML.
pub fn extract_from_html(url: &str, html: &str) -> Option<ExtractedContent> {
    let document = Html::parse_document(html);

    let content = main_content(&document)?;

    let title = select_text(&document, "h1")
        .or_else(|| select_text(&document, "title"))
        .unwrap_or_default();

    let excerpt = meta_description(&document)
        .unwrap_or_else(|| truncate_chars(&content, EXCERPT_LEN).to_string());

    Some(ExtractedContent {
        url: url.to_string(),
        title,
        length: content.len(),
        excerpt,
        content,
    })
}

/// Walks the candidate containers in declaration order and takes the first
/// one with readable text, so `body` only catches pages with no recognizable
/// content wrapper.
fn main_content(document: &Html) -> Option<String> {
    let text_selector = Selector::parse(TEXT_ELEMENTS).ok()?;

    for container in CONTENT_CONTAINERS {
        let Ok(selector) = Selector::parse(container) else {
            continue;
        };
        for element in document.select(&selector) {
            let text = readable_text(element, &text_selector);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }

    None
}

fn readable_text(container: ElementRef<'_>, text_selector: &Selector) -> String {
    let chunks: Vec<String> = container
        .select(text_selector)
        .filter(|el| !in_boilerplate(el))
        .map(|el| el.text().collect::<String>())
        .collect();
    collapse_whitespace(&chunks.join(" "))
}

/// Chrome elements whose text never belongs to the article body. Text
/// elements under any of these are dropped even when the `body` fallback is
/// the container.
const BOILERPLATE_TAGS: &[&str] = &["nav", "header", "footer", "aside", "form"];

fn in_boilerplate(element: &ElementRef<'_>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| BOILERPLATE_TAGS.contains(&ancestor.value().name()))
}

fn select_text(document: &Html, selector: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .next()
        .map(|el| collapse_whitespace(&el.text().collect::<String>()))
        .filter(|text| !text.is_empty())
}

fn meta_description(document: &Html) -> Option<String> {
    let selector = Selector::parse("meta[name='description']").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("content"))
        .map(|content| collapse_whitespace(content))
        .filter(|text| !text.is_empty())
}

pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ae_core::{NoopClock, Result};
    use async_trait::async_trait;
    use std::collections::HashMap;

    const PAGE: &str = r#"
        <html>
          <head>
            <title>Page Title</title>
            <meta name="description" content="A short description.">
            <script>var tracking = "do not include";</script>
          </head>
          <body>
            <nav><ul><li><a href="/">Home</a></li><li><a href="/about">About</a></li></ul></nav>
            <article>
              <h1>Chatbots in Practice</h1>
              <p>First    paragraph about
              chatbots.</p>
              <h2>Adoption</h2>
              <p>Second paragraph.</p>
            </article>
            <footer><p>Copyright notice. All rights reserved.</p></footer>
          </body>
        </html>"#;

    #[test]
    fn test_extracts_readable_content() {
        let extracted = extract_from_html("https://example.com/post", PAGE).unwrap();
        assert_eq!(extracted.title, "Chatbots in Practice");
        assert_eq!(
            extracted.content,
            "First paragraph about chatbots. Adoption Second paragraph."
        );
        assert_eq!(extracted.excerpt, "A short description.");
        assert_eq!(extracted.length, extracted.content.len());
    }

    #[test]
    fn test_boilerplate_is_dropped() {
        let extracted = extract_from_html("https://example.com/post", PAGE).unwrap();
        assert!(!extracted.content.contains("Home"));
        assert!(!extracted.content.contains("About"));
        assert!(!extracted.content.contains("Copyright"));
        assert!(!extracted.content.contains("tracking"));
    }

    #[test]
    fn test_body_fallback_still_drops_chrome_text() {
        // No article/main wrapper at all, and the nav/footer/aside carry
        // paragraph and list text of their own.
        let page = r#"
            <html><body>
              <nav><ul><li>Home</li><li>Pricing</li></ul></nav>
              <aside><p>Subscribe to our newsletter.</p></aside>
              <div><p>The actual article text.</p></div>
              <footer><p>Copyright 2024 Example Corp. All rights reserved.</p></footer>
            </body></html>"#;

        let extracted = extract_from_html("https://example.com/post", page).unwrap();
        assert_eq!(extracted.content, "The actual article text.");
    }

    #[test]
    fn test_specific_container_wins_over_body() {
        // The longer promotional text sits outside the article wrapper; the
        // wrapper still wins because it is matched first.
        let page = r#"
            <html><body>
              <div class="promo"><p>Buy our product. It is the best product. Truly the best.</p></div>
              <article><p>Short article body.</p></article>
            </body></html>"#;

        let extracted = extract_from_html("https://example.com/post", page).unwrap();
        assert_eq!(extracted.content, "Short article body.");
    }

    #[test]
    fn test_empty_page_yields_none() {
        assert!(extract_from_html("https://example.com", "<html><body></body></html>").is_none());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a\n\t b   c "), "a b c");
    }

    #[test]
    fn test_truncate_chars_respects_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("ab", 5), "ab");
    }

    struct MapFetcher {
        pages: HashMap<String, String>,
    }

    #[async_trait]
    impl PageFetcher for MapFetcher {
        async fn fetch(&self, url: &str) -> Result<String> {
            self.pages
                .get(url)
                .cloned()
                .ok_or_else(|| ae_core::Error::Extraction(format!("no page for {}", url)))
        }
    }

    #[tokio::test]
    async fn test_extract_many_skips_failures_and_keeps_order() {
        let mut pages = HashMap::new();
        pages.insert("https://a.example.com".to_string(), PAGE.to_string());
        pages.insert("https://c.example.com".to_string(), PAGE.to_string());

        let clock = Arc::new(NoopClock::new());
        let extractor = ContentExtractor::new(Arc::new(MapFetcher { pages }), clock.clone());
        let urls = vec![
            "https://a.example.com".to_string(),
            "https://b.example.com".to_string(),
            "https://c.example.com".to_string(),
        ];
        let results = extractor.extract_many(&urls).await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].url, "https://a.example.com");
        assert_eq!(results[1].url, "https://c.example.com");
        // One pause per attempted URL, failures included.
        assert_eq!(clock.slept().len(), 3);
    }

    #[tokio::test]
    async fn test_unreachable_url_returns_none() {
        let fetcher = crate::fetch::HttpFetcher::new().unwrap();
        let extractor = ContentExtractor::new(Arc::new(fetcher), Arc::new(NoopClock::new()));
        assert!(extractor.extract("::not-a-url::").await.is_none());
    }
}
