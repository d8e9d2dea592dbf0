//! The `update_plugins` site transient.

use crate::updates::UpdateCheckPayload;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// WordPress's aggregate record of the last plugin update check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTransient {
    /// Installed version per plugin basename. Empty until WordPress has scanned the plugins directory.
    #[serde(default)]
    pub checked: BTreeMap<String, String>,
    /// Available updates per plugin basename
    #[serde(default)]
    pub response: BTreeMap<String, UpdateCheckPayload>,
}

impl UpdateTransient {
    /// Transient after a scan that found `plugins` (basename, installed version) installed.
    pub fn checked<I, S, V>(plugins: I) -> Self
    where
        I: IntoIterator<Item = (S, V)>,
        S: Into<String>,
        V: Into<String>,
    {
        Self {
            checked: plugins.into_iter().map(|(s, v)| (s.into(), v.into())).collect(),
            response: BTreeMap::new(),
        }
    }

    pub fn insert_update(&mut self, payload: UpdateCheckPayload) {
        self.response.insert(payload.slug.clone(), payload);
    }
}
