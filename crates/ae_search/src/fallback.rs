use tracing::info;

use ae_core::CompetitorResult;

/// Curated competitor pages per topic keyword. Matched by substring against
/// the lowercased title, first entry wins, so declaration order matters.
const FALLBACK_TABLE: &[(&str, [(&str, &str); 2])] = &[
    (
        "chatbot",
        [
            (
                "https://www.zendesk.com/blog/chatbot-guide/",
                "Complete Guide to Chatbots",
            ),
            (
                "https://www.intercom.com/blog/chatbots/",
                "How to Build a Chatbot",
            ),
        ],
    ),
    (
        "ai",
        [
            (
                "https://www.ibm.com/topics/artificial-intelligence",
                "What is Artificial Intelligence",
            ),
            (
                "https://www.forbes.com/advisor/business/software/what-is-ai/",
                "AI Guide for Businesses",
            ),
        ],
    ),
    (
        "healthcare",
        [
            (
                "https://www.healthit.gov/topic/artificial-intelligence",
                "AI in Healthcare",
            ),
            (
                "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC6616181/",
                "Artificial Intelligence in Healthcare",
            ),
        ],
    ),
    (
        "customer",
        [
            (
                "https://www.salesforce.com/resources/articles/customer-service/",
                "Customer Service Best Practices",
            ),
            (
                "https://www.zendesk.com/blog/customer-service-skills/",
                "Essential Customer Service Skills",
            ),
        ],
    ),
    (
        "support",
        [
            (
                "https://www.helpscout.com/blog/customer-support/",
                "Customer Support Guide",
            ),
            (
                "https://www.freshworks.com/freshdesk/customer-support/",
                "What is Customer Support",
            ),
        ],
    ),
];

const DEFAULT_FALLBACK: [(&str, &str); 2] = [
    (
        "https://www.zendesk.com/blog/customer-service-skills/",
        "Customer Service Guide",
    ),
    (
        "https://www.intercom.com/blog/customer-support/",
        "Customer Support Best Practices",
    ),
];

/// Static competitor candidates for when live search is unavailable or came
/// back empty. Always yields exactly two entries, trading topical precision
/// for pipeline liveness.
pub fn fallback_competitors(title: &str) -> Vec<CompetitorResult> {
    let title_lower = title.to_lowercase();

    let pairs = FALLBACK_TABLE
        .iter()
        .find(|(keyword, _)| title_lower.contains(keyword))
        .map(|(keyword, pairs)| {
            info!("Matched fallback keyword \"{}\" for: {}", keyword, title);
            pairs
        })
        .unwrap_or_else(|| {
            info!("No fallback keyword matched, using default pair");
            &DEFAULT_FALLBACK
        });

    pairs
        .iter()
        .map(|(url, title)| CompetitorResult {
            title: title.to_string(),
            url: url.to_string(),
            snippet: String::new(),
        })
        .collect()
}
