use ae_core::ExtractedContent;

/// Longest slice of any article fed into the prompt.
const MAX_CONTENT_CHARS: usize = 3000;

const PLACEHOLDER_TITLE: &str = "N/A";
const PLACEHOLDER_CONTENT: &str = "Not available";

/// Builds the rewriting prompt. The shape is always the same: instruction
/// block, the original, exactly two competitor slots (missing ones filled
/// with placeholders) and the two reference URL lines.
pub fn build_prompt(title: &str, content: &str, competitors: &[ExtractedContent]) -> String {
    let (comp1_title, comp1_content) = slot(competitors, 0);
    let (comp2_title, comp2_content) = slot(competitors, 1);

    format!(
        r#"You are a professional content writer and SEO expert. Your task is to rewrite an article by analyzing competitor articles and incorporating their best practices.

**INSTRUCTIONS:**
1. Analyze the structure, formatting, and depth of the two competitor articles
2. Rewrite the original article to be more comprehensive and engaging
3. Incorporate relevant sections and topics from competitors that the original lacks
4. Maintain the core message and intent of the original article
5. Use proper HTML formatting with headings (h2, h3), paragraphs, lists, and bold text
6. Make the content SEO-friendly with clear structure
7. Aim for similar or greater word count than competitors
8. Use a professional, informative tone
9. Add a "References" section at the end with the competitor article links

**ORIGINAL ARTICLE:**
Title: {title}
Content: {original_content}

**COMPETITOR ARTICLE 1:**
Title: {comp1_title}
Content: {comp1_content}

**COMPETITOR ARTICLE 2:**
Title: {comp2_title}
Content: {comp2_content}

**COMPETITOR URLS FOR REFERENCES:**
1. {url1}
2. {url2}

Please provide the complete rewritten article in HTML format with proper structure. Include a References section at the end with the competitor URLs."#,
        title = title,
        original_content = truncate_chars(content, MAX_CONTENT_CHARS),
        comp1_title = comp1_title,
        comp1_content = truncate_chars(comp1_content, MAX_CONTENT_CHARS),
        comp2_title = comp2_title,
        comp2_content = truncate_chars(comp2_content, MAX_CONTENT_CHARS),
        url1 = reference_url(competitors, 0),
        url2 = reference_url(competitors, 1),
    )
}

fn slot(competitors: &[ExtractedContent], index: usize) -> (&str, &str) {
    competitors
        .get(index)
        .map(|c| (c.title.as_str(), c.content.as_str()))
        .unwrap_or((PLACEHOLDER_TITLE, PLACEHOLDER_CONTENT))
}

fn reference_url(competitors: &[ExtractedContent], index: usize) -> &str {
    competitors
        .get(index)
        .map(|c| c.url.as_str())
        .unwrap_or(PLACEHOLDER_TITLE)
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
