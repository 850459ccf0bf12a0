use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::models::{Fragment, OgpEntry};

static TITLE_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("title").expect("valid title selector"));
static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("valid meta selector"));
static ANY_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("*").expect("valid selector"));

fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Text of the first `<title>`, kept as-is (an empty title is still `Some`).
pub fn extract_title(doc: &Html) -> Option<String> {
    doc.select(&TITLE_SELECTOR).next().map(text_content)
}

/// Resolve `hash` to an element by `id`, falling back to a `name`
/// attribute. Attribute values are compared literally, never spliced into
/// a selector.
pub fn extract_fragment(doc: &Html, hash: &str) -> Fragment {
    let content = doc
        .select(&ANY_SELECTOR)
        .find(|el| el.value().id() == Some(hash))
        .or_else(|| {
            doc.select(&ANY_SELECTOR)
                .find(|el| el.value().attr("name") == Some(hash))
        })
        .map(text_content);

    Fragment {
        hash: format!("#{hash}"),
        content,
    }
}

/// One entry per `<meta>` in document order. `property` prefers the `name`
/// attribute over `property`; every other attribute is dropped.
pub fn extract_ogps(doc: &Html) -> Vec<OgpEntry> {
    doc.select(&META_SELECTOR)
        .map(|meta| {
            let el = meta.value();
            OgpEntry {
                property: el.attr("name").or_else(|| el.attr("property")).map(str::to_string),
                content: el.attr("content").map(str::to_string),
            }
        })
        .collect()
}
