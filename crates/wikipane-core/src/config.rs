use serde::Deserialize;
use serde_json::Value;

use crate::version::{CompareVersion, ViewVersion};

/// Endpoints the page is wired to: `content` serves revision bodies,
/// `draft` is the collaborative draft channel (consumed by the external
/// editor transport, not by this crate), `page` is the canonical URL prefix
/// the derived location is built on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageUrls {
    pub content: String,
    pub draft: String,
    pub page: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub edit_visible: bool,
    pub view_visible: bool,
    pub compare_visible: bool,
    pub can_edit: bool,
    pub view_version: ViewVersion,
    pub compare_version: CompareVersion,
    pub urls: PageUrls,
    /// Opaque blob handed to the external editor transport.
    pub metadata: Value,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            edit_visible: false,
            view_visible: true,
            compare_visible: false,
            can_edit: true,
            view_version: ViewVersion::Current,
            compare_version: CompareVersion::Current,
            urls: PageUrls::default(),
            metadata: Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::version::{CompareVersion, ViewVersion};

    use super::PageConfig;

    #[test]
    fn defaults_match_a_plain_view_page() {
        let config = PageConfig::default();
        assert!(!config.edit_visible);
        assert!(config.view_visible);
        assert!(!config.compare_visible);
        assert!(config.can_edit);
        assert_eq!(config.view_version, ViewVersion::Current);
        assert_eq!(config.compare_version, CompareVersion::Current);
        assert_eq!(config.urls.content, "");
    }

    #[test]
    fn deserializes_partial_json() {
        let config: PageConfig = serde_json::from_str(
            r#"{
                "edit_visible": true,
                "view_version": "preview",
                "urls": {"content": "/api/wiki/content/", "page": "/p/wiki/Home/"}
            }"#,
        )
        .expect("config");

        assert!(config.edit_visible);
        assert_eq!(config.view_version, ViewVersion::Preview);
        assert_eq!(config.urls.content, "/api/wiki/content/");
        assert_eq!(config.urls.page, "/p/wiki/Home/");
        assert_eq!(config.urls.draft, "");
        assert_eq!(config.compare_version, CompareVersion::Current);
    }

    #[test]
    fn rejects_preview_compare_version() {
        let err = serde_json::from_str::<PageConfig>(r#"{"compare_version": "preview"}"#)
            .expect_err("invalid compare version");
        assert!(err.to_string().contains("only valid for the view panel"));
    }
}
