use crate::core::normalizer::normalize;
use crate::core::patterns::{CONTACT_KEYWORDS, CONTACT_PATH_PREFIXES, CONTACT_PHRASES};
use regex::Regex;
use scraper::{Html, Selector};
use std::sync::LazyLock;
use url::Url;

static ANCHOR_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a[href]").expect("Failed to parse anchor selector"));

static CONTACT_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = CONTACT_KEYWORDS.iter().map(|k| regex::escape(k)).collect();
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternatives.join("|")))
        .expect("Failed to compile contact keyword regex")
});

static CONTACT_PHRASE: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = CONTACT_PHRASES.iter().map(|p| regex::escape(p)).collect();
    Regex::new(&format!(r"(?i)(?:{})", alternatives.join("|")))
        .expect("Failed to compile contact phrase regex")
});

/// Returns the `href` of the first anchor, in document order, whose visible
/// text or attribute values mention a contact keyword.
pub fn locate(markup: &str) -> Option<String> {
    let document = Html::parse_document(markup);

    for anchor in document.select(&ANCHOR_SELECTOR) {
        let Some(href) = anchor.value().attr("href").map(str::trim) else {
            continue;
        };
        if !is_fetchable(href) {
            continue;
        }

        let text: String = anchor.text().collect::<Vec<_>>().join(" ");
        let matches_text = CONTACT_KEYWORD.is_match(&text);
        let matches_attr = anchor
            .value()
            .attrs()
            .any(|(_, value)| CONTACT_KEYWORD.is_match(value));

        if matches_text || matches_attr {
            tracing::debug!("Contact link candidate: {}", href);
            return Some(href.to_string());
        }
    }

    None
}

/// Whether a fetched page looks like a contact page, judged by its final URL
/// path or by call-to-action phrases in its visible text.
pub fn classify(markup: &str, final_url: &str) -> bool {
    if has_contact_path(final_url) {
        return true;
    }
    CONTACT_PHRASE.is_match(&normalize(markup))
}

fn has_contact_path(final_url: &str) -> bool {
    let path = match Url::parse(final_url) {
        Ok(url) => url.path().to_lowercase(),
        // 相對路徑
        Err(_) => final_url.to_lowercase(),
    };
    CONTACT_PATH_PREFIXES
        .iter()
        .any(|prefix| path.starts_with(prefix))
}

/// Relative links and absolute http(s) links; fragments, `mailto:`, `tel:`,
/// `skype:` and other schemes never lead to a page.
fn is_fetchable(href: &str) -> bool {
    if href.is_empty() || href.starts_with('#') {
        return false;
    }
    match Url::parse(href) {
        Ok(url) => matches!(url.scheme(), "http" | "https"),
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate_by_anchor_text() {
        let html = r#"<nav><a href="/">Home</a><a href="/kontakt">Kontakt</a></nav>"#;
        assert_eq!(locate(html), Some("/kontakt".to_string()));
    }

    #[test]
    fn test_locate_by_attribute() {
        let html = r#"<a href="/reach-us" class="nav-contact">Reach us</a>"#;
        // "nav-contact" has a word boundary at the hyphen
        assert_eq!(locate(html), Some("/reach-us".to_string()));

        let html = r#"<a href="/team" title="Contacto">Equipo</a>"#;
        assert_eq!(locate(html), Some("/team".to_string()));
    }

    #[test]
    fn test_locate_returns_first_in_document_order() {
        let html = r#"
            <a href="/about">About</a>
            <a href="https://example.com/contact-us">CONTACT US</a>
            <a href="/kontakt">Kontakt</a>"#;
        assert_eq!(
            locate(html),
            Some("https://example.com/contact-us".to_string())
        );
    }

    #[test]
    fn test_locate_skips_mailto_and_fragments() {
        let html = r##"
            <a href="mailto:contact@example.com">Contact</a>
            <a href="#contact">Contact</a>
            <a href="/contacto">Contáctenos</a>"##;
        assert_eq!(locate(html), Some("/contacto".to_string()));
    }

    #[test]
    fn test_locate_skips_non_http_schemes() {
        let html = r#"<a href="skype:acme?call">Contact us on Skype</a>
            <a href="sms:+15550100">Contact by SMS</a>
            <a href="https://acme.example/contact-us">Contact</a>"#;
        assert_eq!(
            locate(html),
            Some("https://acme.example/contact-us".to_string())
        );
    }

    #[test]
    fn test_locate_none_without_keywords() {
        let html = r#"<a href="/">Home</a><a href="/blog">Blog</a><p>contact</p>"#;
        assert_eq!(locate(html), None);
        assert_eq!(locate("<a>Contact</a>"), None);
        assert_eq!(locate(""), None);
    }

    #[test]
    fn test_classify_by_url_path() {
        assert!(classify("<p>nothing</p>", "https://example.com/contact"));
        assert!(classify("<p>nothing</p>", "https://example.com/About-Us"));
        assert!(classify("<p>nothing</p>", "http://example.de/kontakt.html"));
        assert!(!classify("<p>nothing</p>", "https://example.com/products"));
    }

    #[test]
    fn test_classify_by_call_to_action() {
        assert!(classify(
            "<h1>Get in touch</h1><p>We reply within a day.</p>",
            "https://example.com/hello"
        ));
        assert!(classify(
            "<button>Get a Quote</button>",
            "https://example.com/services"
        ));
        assert!(!classify(
            "<script>var s = 'contact us';</script><p>Shop</p>",
            "https://example.com/shop"
        ));
    }
}
