//! Objects handed back to WordPress. Field names are fixed by WordPress core.

use serde::{Deserialize, Serialize};

/// Entry for the `response` map of the `update_plugins` site transient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCheckPayload {
    pub new_version: String,
    /// Download URL of the new release
    pub package: String,
    pub slug: String,
}

/// Answer to a `plugin_information` request, rendered in the "View details" popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsPayload {
    pub name: String,
    pub version: String,
    pub slug: String,
    pub download_link: String,
    pub tested: String,
    pub requires: String,
    pub last_updated: String,
    pub homepage: String,
    pub sections: DetailsSections,
    pub banners: Banners,
    /// Tells WordPress the plugin is not hosted on wordpress.org
    pub external: bool,
}

/// Tabs of the details popup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetailsSections {
    pub description: String,
    /// Only present when the server sent one; no empty tab otherwise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub changelog: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banners {
    pub low: String,
    pub high: String,
}
