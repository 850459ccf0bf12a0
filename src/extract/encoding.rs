//! Charset resolution and byte-to-text decoding.
//!
//! The encoding is taken from the first of these that declares one:
//! 1. the `charset=` parameter of the HTTP `Content-Type` header;
//! 2. a `<meta charset>` or `<meta http-equiv="content-type">` tag, found by
//!    a preliminary lossy UTF-8 parse of the raw bytes;
//! 3. [`DEFAULT_ENCODING`].

use encoding_rs::Encoding;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

pub const DEFAULT_ENCODING: &str = "utf-8";

static CHARSET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)charset\s*=\s*["']?([A-Za-z0-9_.:-]+)"#).expect("valid charset regex")
});

static META_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("meta").expect("valid meta selector"));

#[derive(Error, Debug, PartialEq, Eq)]
pub enum DecodeError {
    #[error("unsupported encoding '{0}'")]
    UnsupportedEncoding(String),
}

/// Where the resolved encoding came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodingSource {
    Header,
    Document,
    Default,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEncoding {
    pub name: String,
    pub source: EncodingSource,
}

/// Decoded text together with the encoding that actually produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub text: String,
    /// The requested label, unless a byte order mark selected another
    /// encoding, in which case its lowercased canonical name.
    pub encoding: String,
}

/// Byte-to-text conversion for a named encoding.
pub trait TextDecoder: Send + Sync {
    fn decode(&self, bytes: &[u8], label: &str) -> Result<Decoded, DecodeError>;
}

/// `TextDecoder` over the WHATWG encoding labels known to `encoding_rs`.
/// A UTF-8 or UTF-16 BOM overrides the label, as browsers do. Malformed
/// sequences are replaced with U+FFFD rather than rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodingRsDecoder;

impl TextDecoder for EncodingRsDecoder {
    fn decode(&self, bytes: &[u8], label: &str) -> Result<Decoded, DecodeError> {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| DecodeError::UnsupportedEncoding(label.to_string()))?;

        let (text, used, had_errors) = encoding.decode(bytes);
        if had_errors {
            tracing::debug!(
                label = %label,
                used = used.name(),
                "Replaced malformed byte sequences while decoding"
            );
        }

        let encoding = if used == encoding {
            label.to_string()
        } else {
            tracing::debug!(
                label = %label,
                used = used.name(),
                "Byte order mark overrode encoding"
            );
            used.name().to_ascii_lowercase()
        };
        Ok(Decoded {
            text: text.into_owned(),
            encoding,
        })
    }
}

/// Extract the `charset=<token>` value from a header or `content` attribute.
pub fn charset_from_content_type(value: &str) -> Option<String> {
    CHARSET_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First `<meta>` in document order that declares a charset, either
/// directly or through `http-equiv="content-type"`.
///
/// Both forms are checked per element, so whichever declaration comes
/// first in the document wins. This is the order the HTML prescan
/// ("prescan a byte stream to determine its encoding") uses.
pub fn charset_from_document(doc: &Html) -> Option<String> {
    doc.select(&META_SELECTOR).find_map(|meta| {
        let el = meta.value();
        if let Some(charset) = el.attr("charset") {
            let charset = charset.trim();
            if !charset.is_empty() {
                return Some(charset.to_string());
            }
        }
        let is_content_type = el
            .attr("http-equiv")
            .is_some_and(|v| v.trim().eq_ignore_ascii_case("content-type"));
        if is_content_type {
            return el.attr("content").and_then(charset_from_content_type);
        }
        None
    })
}

/// Lowercase the label and rewrite `shift_jis` to `shift-jis`.
pub fn normalize_encoding(label: &str) -> String {
    let label = label.trim().to_ascii_lowercase();
    if label == "shift_jis" {
        "shift-jis".to_string()
    } else {
        label
    }
}

/// Decide which encoding to decode `raw` with. The preliminary document
/// parse only happens when the header carries no charset.
pub fn resolve_encoding(content_type: Option<&str>, raw: &[u8]) -> ResolvedEncoding {
    if let Some(charset) = content_type.and_then(charset_from_content_type) {
        return ResolvedEncoding {
            name: normalize_encoding(&charset),
            source: EncodingSource::Header,
        };
    }

    let preliminary = Html::parse_document(&String::from_utf8_lossy(raw));
    if let Some(charset) = charset_from_document(&preliminary) {
        return ResolvedEncoding {
            name: normalize_encoding(&charset),
            source: EncodingSource::Document,
        };
    }

    ResolvedEncoding {
        name: DEFAULT_ENCODING.to_string(),
        source: EncodingSource::Default,
    }
}
