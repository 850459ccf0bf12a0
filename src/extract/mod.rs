pub mod encoding;
pub mod metadata;

use scraper::Html;

use crate::fetch::FetchedPage;
use crate::models::PageInfo;

use self::encoding::{resolve_encoding, DecodeError, TextDecoder};

/// Turn a fetched page into a `PageInfo`: resolve the charset, re-decode
/// the body with it, parse, then extract title, fragment and meta tags.
pub fn build_page_info(
    url: &str,
    hash: Option<&str>,
    page: &FetchedPage,
    decoder: &dyn TextDecoder,
) -> Result<PageInfo, DecodeError> {
    let resolved = resolve_encoding(page.content_type.as_deref(), &page.body);
    tracing::debug!(
        url = %url,
        encoding = %resolved.name,
        source = ?resolved.source,
        "Resolved page encoding"
    );

    let decoded = decoder.decode(&page.body, &resolved.name)?;
    let document = Html::parse_document(&decoded.text);

    let mut info = PageInfo::new(url);
    info.title = metadata::extract_title(&document);
    if let Some(hash) = hash {
        info.fragment = Some(metadata::extract_fragment(&document, hash));
    }
    info.ogps = Some(metadata::extract_ogps(&document));
    info.encoding = decoded.encoding;

    Ok(info)
}
