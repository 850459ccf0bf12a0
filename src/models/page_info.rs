use serde::{Deserialize, Serialize};

/// Metadata summary returned by `GET /page`.
///
/// Optional fields are omitted from the JSON entirely rather than sent as
/// `null`; a missing `fragment` means no hash was requested, while a
/// `fragment` without `content` means the hash matched nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageInfo {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<Fragment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ogps: Option<Vec<OgpEntry>>,
    pub encoding: String,
}

impl PageInfo {
    pub fn new(url: impl Into<String>) -> Self {
        PageInfo {
            url: url.into(),
            title: None,
            fragment: None,
            ogps: None,
            encoding: crate::extract::encoding::DEFAULT_ENCODING.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Fragment {
    /// Always prefixed with `#`.
    pub hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// One `<meta>` element. Both fields may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OgpEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn new_page_info_has_only_url_and_default_encoding() {
        let value = serde_json::to_value(PageInfo::new("https://example.com")).unwrap();
        assert_eq!(
            value,
            json!({ "url": "https://example.com", "encoding": "utf-8" })
        );
    }

    #[test]
    fn fragment_without_content_omits_content_key() {
        let fragment = Fragment {
            hash: "#foo".into(),
            content: None,
        };
        assert_eq!(serde_json::to_value(fragment).unwrap(), json!({ "hash": "#foo" }));
    }

    #[test]
    fn empty_meta_entry_serializes_as_empty_object() {
        assert_eq!(
            serde_json::to_value(OgpEntry::default()).unwrap(),
            json!({})
        );
    }

    #[test]
    fn rejects_unknown_fields_on_parse() {
        let parsed = serde_json::from_value::<PageInfo>(json!({
            "url": "https://example.com",
            "encoding": "utf-8",
            "extra": true,
        }));
        assert!(parsed.is_err());
    }
}
