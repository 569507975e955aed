//! Small helpers shared by the listing parsers.

use scraper::{ElementRef, Selector};
use url::Url;

use crate::domain::RawHeadline;

/// Compile a selector literal owned by a parser.
pub(crate) fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector {:?}: {:?}", css, e))
}

/// Text content with runs of whitespace collapsed.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve `href` against the source origin. Only http(s) targets are accepted.
pub(crate) fn resolve_link(origin: &Url, href: Option<&str>) -> Option<String> {
    let href = href?.trim();
    if href.is_empty() {
        return None;
    }

    let resolved = origin.join(href).ok()?;
    match resolved.scheme() {
        "http" | "https" => Some(resolved.to_string()),
        _ => None,
    }
}

/// `datetime` attribute if present, otherwise the element's text.
pub(crate) fn timestamp(element: ElementRef<'_>) -> String {
    match element.value().attr("datetime") {
        Some(value) if !value.trim().is_empty() => value.trim().to_string(),
        _ => element_text(element),
    }
}

/// Closest ancestor carrying `class`.
pub(crate) fn enclosing<'a>(element: ElementRef<'a>, class: &str) -> Option<ElementRef<'a>> {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().classes().any(|c| c == class))
}

/// Build an item, dropping it when the title or link is missing.
pub(crate) fn headline(
    title: String,
    url: Option<String>,
    published_at: Option<String>,
) -> Option<RawHeadline> {
    let url = url?;
    if title.is_empty() {
        return None;
    }
    Some(RawHeadline::new(title, url).with_published(published_at.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn origin() -> Url {
        Url::parse("https://www.bbc.com/news").unwrap()
    }

    #[test]
    fn test_resolve_relative_link() {
        assert_eq!(
            resolve_link(&origin(), Some("/news/world-1")),
            Some("https://www.bbc.com/news/world-1".to_string())
        );
    }

    #[test]
    fn test_resolve_absolute_link_kept() {
        assert_eq!(
            resolve_link(&origin(), Some("https://example.org/a")),
            Some("https://example.org/a".to_string())
        );
    }

    #[test]
    fn test_resolve_rejects_empty_and_non_http() {
        assert_eq!(resolve_link(&origin(), None), None);
        assert_eq!(resolve_link(&origin(), Some("  ")), None);
        assert_eq!(resolve_link(&origin(), Some("javascript:void(0)")), None);
        assert_eq!(resolve_link(&origin(), Some("mailto:desk@bbc.co.uk")), None);
    }

    #[test]
    fn test_element_text_collapses_whitespace() {
        let html = Html::parse_fragment("<h2>  Breaking:\n   <b>markets</b>  rally </h2>");
        let h2 = html.select(&selector("h2")).next().unwrap();
        assert_eq!(element_text(h2), "Breaking: markets rally");
    }

    #[test]
    fn test_timestamp_prefers_datetime_attribute() {
        let html = Html::parse_fragment(
            r#"<time datetime="2025-01-05T08:00:00Z">5 Jan</time><span class="date"> 6 Jan </span>"#,
        );
        let time = html.select(&selector("time")).next().unwrap();
        let date = html.select(&selector(".date")).next().unwrap();
        assert_eq!(timestamp(time), "2025-01-05T08:00:00Z");
        assert_eq!(timestamp(date), "6 Jan");
    }

    #[test]
    fn test_headline_requires_title_and_link() {
        assert!(headline(String::new(), Some("https://a.b/".to_string()), None).is_none());
        assert!(headline("Title".to_string(), None, None).is_none());

        let item = headline("Title".to_string(), Some("https://a.b/".to_string()), None).unwrap();
        assert_eq!(item.published_at, "");
    }
}
