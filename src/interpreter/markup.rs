use regex::Regex;
use std::sync::LazyLock;

use crate::models::{escape_html, Inline, Paragraph};

static BOLD_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").ok());

static PARAGRAPH_END_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\s*</p>\s*").ok());

static PARAGRAPH_OPEN_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^<p(?:\s[^>]*)?>").ok());

static INLINE_TAG_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)<strong>(.*?)</strong>|<br\s*/?>").ok());

/// Convert the model's lightweight markdown into inline markup.
///
/// Rules run in a fixed order: `**x**` → `<strong>x</strong>`,
/// blank line → paragraph boundary, newline → `<br>`. Model text is
/// escaped first so it cannot inject tags of its own.
pub fn apply_inline_markup(raw: &str) -> String {
    let escaped = escape_html(raw);
    let bolded = match BOLD_PATTERN.as_ref() {
        Some(pattern) => pattern
            .replace_all(&escaped, "<strong>$1</strong>")
            .into_owned(),
        None => escaped,
    };

    bolded.replace("\n\n", "</p><p>").replace('\n', "<br>")
}

/// Split inline markup into paragraphs, dropping empty ones, keeping order.
pub fn format_paragraphs(markup: &str) -> Vec<Paragraph> {
    let chunks: Vec<&str> = match PARAGRAPH_END_PATTERN.as_ref() {
        Some(pattern) => pattern.split(markup).collect(),
        None => vec![markup],
    };

    chunks
        .into_iter()
        .map(str::trim)
        .filter(|chunk| !chunk.is_empty())
        .map(strip_paragraph_open)
        .map(parse_inlines)
        .filter(|paragraph| !paragraph.is_empty())
        .collect()
}

fn strip_paragraph_open(chunk: &str) -> &str {
    match PARAGRAPH_OPEN_PATTERN.as_ref().and_then(|p| p.find(chunk)) {
        Some(open) => chunk[open.end()..].trim(),
        None => chunk,
    }
}

fn parse_inlines(chunk: &str) -> Paragraph {
    let mut inlines = Vec::new();

    let Some(pattern) = INLINE_TAG_PATTERN.as_ref() else {
        push_text(&mut inlines, chunk);
        return Paragraph { inlines };
    };

    let mut last = 0;
    for caps in pattern.captures_iter(chunk) {
        let Some(whole) = caps.get(0) else { continue };
        push_text(&mut inlines, &chunk[last..whole.start()]);

        match caps.get(1) {
            Some(strong) => {
                let text = unescape_html(strong.as_str());
                if !text.is_empty() {
                    inlines.push(Inline::Emphasis(text));
                }
            }
            None => inlines.push(Inline::LineBreak),
        }
        last = whole.end();
    }
    push_text(&mut inlines, &chunk[last..]);

    Paragraph { inlines }
}

fn push_text(inlines: &mut Vec<Inline>, raw: &str) {
    if !raw.is_empty() {
        inlines.push(Inline::Text(unescape_html(raw)));
    }
}

fn unescape_html(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Inline {
        Inline::Text(s.to_string())
    }

    #[test]
    fn test_markup_rule_order() {
        assert_eq!(
            apply_inline_markup("**Składniki:**\nryż\n\nkurczak"),
            "<strong>Składniki:</strong><br>ryż</p><p>kurczak"
        );
    }

    #[test]
    fn test_markup_escapes_model_html() {
        assert_eq!(apply_inline_markup("a <b> & c"), "a &lt;b&gt; &amp; c");
    }

    #[test]
    fn test_bold_does_not_span_lines() {
        assert_eq!(apply_inline_markup("**a\nb**"), "**a<br>b**");
    }

    #[test]
    fn test_wrapped_paragraphs_keep_order() {
        let paragraphs = format_paragraphs("<p>A</p><p>B</p>");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[0].inlines, vec![text("A")]);
        assert_eq!(paragraphs[1].inlines, vec![text("B")]);
    }

    #[test]
    fn test_empty_input_yields_no_paragraphs() {
        assert!(format_paragraphs("").is_empty());
        assert!(format_paragraphs("   \n ").is_empty());
        assert!(format_paragraphs(&apply_inline_markup("")).is_empty());
    }

    #[test]
    fn test_drops_empty_chunks() {
        let paragraphs = format_paragraphs("A</p><p></p>  <p> B </p>");
        assert_eq!(paragraphs.len(), 2);
        assert_eq!(paragraphs[1].inlines, vec![text("B")]);
    }

    #[test]
    fn test_full_answer_formatting() {
        let raw = "**Składniki:**\n- ryż 150 g\n- kurczak 120 g\n\n\
                   **Całkowita szacowana kaloryczność posiłku: 650 kcal**";
        let paragraphs = format_paragraphs(&apply_inline_markup(raw));

        assert_eq!(paragraphs.len(), 2);
        assert_eq!(
            paragraphs[0].inlines,
            vec![
                Inline::Emphasis("Składniki:".to_string()),
                Inline::LineBreak,
                text("- ryż 150 g"),
                Inline::LineBreak,
                text("- kurczak 120 g"),
            ]
        );
        assert_eq!(
            paragraphs[1].inlines,
            vec![Inline::Emphasis(
                "Całkowita szacowana kaloryczność posiłku: 650 kcal".to_string()
            )]
        );
    }

    #[test]
    fn test_entities_decoded_into_text_nodes() {
        let paragraphs = format_paragraphs(&apply_inline_markup("sos <50 g> & chleb"));
        assert_eq!(paragraphs[0].inlines, vec![text("sos <50 g> & chleb")]);
        assert_eq!(paragraphs[0].to_html(), "<p>sos &lt;50 g&gt; &amp; chleb</p>");
    }
}
