/// Stop words dropped from search queries. Articles, prepositions and the
/// common auxiliary verbs.
const STOP_WORDS: &[&str] = &[
    "the", "a", "an", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with", "by",
    "from", "is", "are", "was", "were", "been", "be", "have", "has", "had", "do", "does", "did",
    "will", "would", "should", "could", "may", "might", "must", "can",
];

const MAX_KEYWORDS: usize = 4;

/// Reduces an article title to a compact search query: lowercase, strip
/// punctuation, drop stop words and tokens of two characters or fewer, keep
/// the first four survivors.
///
/// Never fails; a title with no meaningful tokens yields an empty string.
pub fn extract_keywords(title: &str) -> String {
    tokenize(title).join(" ")
}

/// A more generic query for when the primary one keeps getting throttled:
/// the first two keywords plus a fixed "guide tutorial" suffix.
pub fn relaxed_query(title: &str) -> String {
    let keywords = tokenize(title);
    if keywords.len() >= 2 {
        format!("{} {} guide tutorial", keywords[0], keywords[1])
    } else {
        format!("{} guide", keywords.join(" "))
    }
}

fn tokenize(title: &str) -> Vec<String> {
    let cleaned: String = title
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() {
                c
            } else {
                ' '
            }
        })
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.len() > 2 && !STOP_WORDS.contains(word))
        .take(MAX_KEYWORDS)
        .map(|word| word.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_at_most_four_keywords() {
        let query = extract_keywords("How Artificial Intelligence Chatbots Transform Customer Support Teams");
        assert_eq!(query.split_whitespace().count(), 4);
        assert_eq!(query, "how artificial intelligence chatbots");
    }

    #[test]
    fn test_drops_stop_words_and_short_tokens() {
        let query = extract_keywords("The Rise of AI in the Modern Era");
        for word in query.split_whitespace() {
            assert!(!STOP_WORDS.contains(&word));
            assert!(word.len() > 2);
        }
        assert_eq!(query, "rise modern era");
    }

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(extract_keywords("Chatbots: What's Next?"), "chatbots what next");
    }

    #[test]
    fn test_empty_title() {
        assert_eq!(extract_keywords(""), "");
        assert_eq!(extract_keywords("a an of!"), "");
    }

    #[test]
    fn test_relaxed_query_uses_first_two_keywords() {
        assert_eq!(
            relaxed_query("Healthcare Chatbots Improve Patient Outcomes"),
            "healthcare chatbots guide tutorial"
        );
    }

    #[test]
    fn test_relaxed_query_single_keyword() {
        assert_eq!(relaxed_query("The Chatbot"), "chatbot guide");
    }
}
