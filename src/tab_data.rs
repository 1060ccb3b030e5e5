/// Data structures for Tab URL Exporter
use serde::{Deserialize, Serialize};

/// Information about a browser tab, as returned by `chrome.tabs.query`.
///
/// The browser leaves `url` out for tabs the extension is not allowed to inspect,
/// so every field is optional or defaulted.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TabInfo {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub index: i32,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

/// Query object passed to `chrome.tabs.query`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabQuery {
    pub current_window: bool,
}

impl TabQuery {
    pub fn current_window() -> TabQuery {
        TabQuery {
            current_window: true,
        }
    }
}

/// Ordered URLs of the tabs in one window, empty entries removed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabUrlList {
    urls: Vec<String>,
}

impl TabUrlList {
    /// Keep tab order; drop tabs with a missing or empty URL
    pub fn from_tabs(tabs: &[TabInfo]) -> TabUrlList {
        let urls = tabs
            .iter()
            .filter_map(|tab| tab.url.as_deref())
            .filter(|url| !url.is_empty())
            .map(str::to_string)
            .collect();

        TabUrlList { urls }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    /// One URL per line
    pub fn to_display_text(&self) -> String {
        self.urls.join("\n")
    }
}
