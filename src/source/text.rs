//! Converts the HTML-flavoured text the question API returns into plain text.
//!
//! Tags are dropped and character references are resolved. Nothing is ever
//! interpreted as markup.

use std::collections::HashSet;

/// Elements whose content is dropped along with the tag.
const DROPPED_CONTENT: [&str; 2] = ["script", "style"];

pub fn to_plain_text(input: &str) -> String {
    let clean_content: HashSet<&str> = DROPPED_CONTENT.into_iter().collect();

    // An empty whitelist keeps only text nodes, re-escaped as HTML.
    let escaped = ammonia::Builder::empty()
        .clean_content_tags(clean_content)
        .clean(input)
        .to_string();

    html_escape::decode_html_entities(&escaped).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_common_references() {
        assert_eq!(
            to_plain_text("Which of these is &quot;Rust&quot;&#039;s mascot?"),
            "Which of these is \"Rust\"'s mascot?"
        );
        assert_eq!(to_plain_text("Caf&eacute; &amp; Bar"), "Café & Bar");
        assert_eq!(to_plain_text("&#x41;&#66;"), "AB");
    }

    #[test]
    fn test_decodes_less_common_named_references() {
        assert_eq!(to_plain_text("Fran&ccedil;ais"), "Français");
        assert_eq!(to_plain_text("&Ouml;sterreich"), "Österreich");
        assert_eq!(to_plain_text("&Aring;land"), "Åland");
        assert_eq!(to_plain_text("na&iuml;ve"), "naïve");
        assert_eq!(to_plain_text("&euro;5"), "€5");
    }

    #[test]
    fn test_markup_becomes_inert_text() {
        assert_eq!(
            to_plain_text("<script>alert(1)</script>Pick <b>one</b>"),
            "Pick one"
        );
        // Escaped markup stays visible as text instead of turning into tags.
        assert_eq!(to_plain_text("&lt;img src=x&gt;"), "<img src=x>");
    }

    #[test]
    fn test_unknown_or_broken_references_pass_through() {
        assert_eq!(to_plain_text("AT&T"), "AT&T");
        assert_eq!(to_plain_text("&bogus;"), "&bogus;");
        assert_eq!(to_plain_text("a & b; c"), "a & b; c");
        assert_eq!(to_plain_text("1 < 2"), "1 < 2");
    }
}
