use ego_tree::iter::Edge;
use regex::{Captures, Regex};
use scraper::{Html, Node};
use std::sync::LazyLock;

/// 不會被渲染的元素，其文字內容一律略過
const NON_RENDERED_ELEMENTS: [&str; 5] = ["head", "script", "style", "noscript", "template"];

/// 會產生換行或欄位間隔的元素；其餘 inline 元素的文字直接相連
const BREAKING_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "br", "caption", "dd", "details",
    "dialog", "div", "dl", "dt", "fieldset", "figcaption", "figure", "footer", "form", "h1",
    "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "main", "nav", "ol", "option", "p",
    "pre", "section", "summary", "table", "tbody", "td", "tfoot", "th", "thead", "tr", "ul",
];

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Failed to compile whitespace regex"));

// `<b`, `</`, `<!`, `<?` in decoded text would open markup on a second pass.
static TAG_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z/!?])").expect("Failed to compile tag start regex"));

static ENTITY_LIKE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&[A-Za-z0-9#]+;?").expect("Failed to compile entity regex")
});

/// Converts raw markup into flattened plain text.
///
/// Tags are stripped and text of non-rendered elements is dropped. Block-level
/// elements and `<br>` separate words, inline elements do not. Every run of
/// whitespace collapses to a single space. Broken markup is recovered by the
/// HTML5 parser instead of failing. `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(markup: &str) -> String {
    let document = Html::parse_document(markup);

    let mut raw = String::with_capacity(markup.len() / 2);
    let mut hidden_depth = 0usize;
    for edge in document.tree.root().traverse() {
        match edge {
            Edge::Open(node) => match node.value() {
                Node::Element(element) if NON_RENDERED_ELEMENTS.contains(&element.name()) => {
                    hidden_depth += 1;
                }
                Node::Element(element) if BREAKING_ELEMENTS.contains(&element.name()) => {
                    raw.push(' ');
                }
                Node::Text(text) if hidden_depth == 0 => raw.push_str(text),
                _ => {}
            },
            Edge::Close(node) => match node.value() {
                Node::Element(element) if NON_RENDERED_ELEMENTS.contains(&element.name()) => {
                    hidden_depth = hidden_depth.saturating_sub(1);
                }
                Node::Element(element) if BREAKING_ELEMENTS.contains(&element.name()) => {
                    raw.push(' ');
                }
                _ => {}
            },
        }
    }

    collapse_whitespace(&defuse_markup(&raw))
}

/// Splits only the sequences the HTML parser would re-interpret, so a second
/// pass sees the same text. Ordinary `&` and `<` are left alone.
fn defuse_markup(text: &str) -> String {
    let text = TAG_START.replace_all(text, "< ${1}");
    ENTITY_LIKE
        .replace_all(&text, |caps: &Captures| {
            let token = &caps[0];
            if reparses_unchanged(token) {
                token.to_string()
            } else {
                format!("& {}", &token[1..])
            }
        })
        .into_owned()
}

fn reparses_unchanged(token: &str) -> bool {
    let fragment = Html::parse_fragment(token);
    let text: String = fragment.root_element().text().collect();
    text == token
}

pub fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RUN.replace_all(text, " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_tags_and_collapses_whitespace() {
        let html = "<html><body><h1>Acme\n\tCorp</h1>\r\n<p>123   Main St,<br>Springfield</p></body></html>";
        assert_eq!(normalize(html), "Acme Corp 123 Main St, Springfield");
    }

    #[test]
    fn test_drops_script_and_style_content() {
        let html = r#"<html><head><title>Home</title><style>p { color: red; }</style></head>
            <body><script>var x = "1 Fake St";</script><p>Visible</p><noscript>enable js</noscript></body></html>"#;
        assert_eq!(normalize(html), "Visible");
    }

    #[test]
    fn test_malformed_markup_degrades_gracefully() {
        let html = "<div><p>Open paragraph <b>bold <i>nested</div> trailing <";
        let text = normalize(html);
        assert!(text.contains("Open paragraph bold nested"));
        assert!(text.contains("trailing"));
    }

    #[test]
    fn test_inline_markup_does_not_split_words() {
        let text = normalize("<p>123 Main St, Springfield, IL 627<span>04</span></p>");
        assert_eq!(text, "123 Main St, Springfield, IL 62704");
        assert!(crate::core::extractor::FieldExtractor::default()
            .extract(&text)
            .is_some());

        assert_eq!(
            normalize("<p>1 Main St, Spring<b>field</b>, IL 62704</p>"),
            "1 Main St, Springfield, IL 62704"
        );
    }

    #[test]
    fn test_block_elements_separate_words() {
        let html = "<div>Acme</div><div>Corp</div><table><tr><td>Berlin</td><td>10115</td></tr></table>";
        assert_eq!(normalize(html), "Acme Corp Berlin 10115");
    }

    #[test]
    fn test_ampersand_in_text_is_kept() {
        assert_eq!(normalize("<p>AT&amp;T Plaza</p>"), "AT&T Plaza");
        assert_eq!(normalize("<p>Smith &amp; Sons, 5 &lt; 6</p>"), "Smith & Sons, 5 < 6");
    }

    #[test]
    fn test_decoded_entities_are_not_decoded_again() {
        let once = normalize("<p>&amp;copy2023 &amp;amp; &lt;b&gt;</p>");
        assert_eq!(once, "& copy2023 & amp; < b>");
        assert_eq!(normalize(&once), once);
    }

    #[test]
    fn test_plain_text_passes_through() {
        assert_eq!(normalize("  just\n\ntext  "), "just text");
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let samples = [
            "<p>123 Main St, Springfield, IL 62704</p>",
            "<div>AT&amp;T &lt;b&gt;store&lt;/b&gt; &amp;amp;</div>",
            "<ul><li>one</li><li>two</li></ul>\n\n<!-- comment --> three",
            "plain text with   gaps",
            "&nbsp;&nbsp;padded&nbsp;",
            "<p>AT&amp;T Plaza, 1 Spring<b>field</b> Rd</p>",
            "<span>a</span><span>&amp;lt</span><i>&lt;!x</i>",
        ];
        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
