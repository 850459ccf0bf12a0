use axum::extract::{RawQuery, State};
use axum::http::{header, HeaderMap};
use url::{form_urlencoded, Url};

use crate::error::{AppError, AppResult};
use crate::extract::build_page_info;
use crate::models::PageInfo;
use crate::response::PrettyJson;
use crate::state::AppState;

// ── Query params ───────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub url: Option<String>,
    pub hash: Option<String>,
}

impl PageQuery {
    /// Decode a raw query string. Repeated keys keep their first value and
    /// unknown keys are ignored, so no query string is ever rejected here.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut query = PageQuery::default();
        for (key, value) in form_urlencoded::parse(raw.unwrap_or_default().as_bytes()) {
            match key.as_ref() {
                "url" if query.url.is_none() => query.url = Some(value.into_owned()),
                "hash" if query.hash.is_none() => query.hash = Some(value.into_owned()),
                _ => {}
            }
        }
        query
    }
}

/// Validated request: a non-empty target URL and an optional non-empty hash.
#[derive(Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub url: String,
    pub hash: Option<String>,
}

pub fn parse_request(params: PageQuery) -> AppResult<PageRequest> {
    let url = params
        .url
        .filter(|u| !u.is_empty())
        .ok_or(AppError::MissingUrl)?;
    let hash = params.hash.filter(|h| !h.is_empty());
    Ok(PageRequest { url, hash })
}

/// Public origin of the inbound request as seen by the client, rebuilt from
/// the `X-Forwarded-*` headers a proxy adds, falling back to `Host`.
pub fn forwarded_origin(headers: &HeaderMap) -> Option<String> {
    let host = first_header_value(headers, "x-forwarded-host")
        .or_else(|| first_header_value(headers, header::HOST.as_str()))?;
    let proto = first_header_value(headers, "x-forwarded-proto").unwrap_or("http");
    Some(format!("{proto}://{host}"))
}

// Proxies may append to these headers; the client-facing value comes first.
fn first_header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

// ── Handler ────────────────────────────────────────────────────────────────

/// GET /page?url=<encoded-url>&hash=<id>
///
/// Fetches the target once and returns its title, meta tags, the text of
/// the `hash` element (when requested) and the encoding used to decode it.
pub async fn get_page_info(
    State(state): State<AppState>,
    headers: HeaderMap,
    RawQuery(raw): RawQuery,
) -> AppResult<PrettyJson<PageInfo>> {
    let request = parse_request(PageQuery::from_query(raw.as_deref()))?;

    let target_host = Url::parse(&request.url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string));
    tracing::info!(
        url = %request.url,
        host = ?target_host,
        hash = ?request.hash,
        origin = ?forwarded_origin(&headers),
        "Fetching HTML for page info"
    );

    let page = state.fetcher.fetch(&request.url).await.map_err(|e| {
        tracing::warn!(error = ?e, url = %request.url, "Failed to fetch URL for page info");
        AppError::from(e)
    })?;
    tracing::info!(
        url = %request.url,
        status = page.status,
        bytes = page.body.len(),
        content_type = ?page.content_type,
        "Fetched page"
    );

    let info = build_page_info(
        &request.url,
        request.hash.as_deref(),
        &page,
        state.decoder.as_ref(),
    )?;
    tracing::debug!(?info, "Returning page info");

    Ok(PrettyJson(info))
}

// ── Unit tests ─────────────────────────────────────────────────────────────
