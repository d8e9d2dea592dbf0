//! Filter hooks the updater plugs into, and a registry that dispatches them.
//!
//! Mirrors WordPress `add_filter` / `apply_filters`: handlers run in priority order (registration order
//! within a priority), each receiving the previous handler's return value.

use super::transient::UpdateTransient;
use crate::updates::DetailsPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize, Serializer};
use std::sync::Arc;

/// Priority WordPress uses when none is given.
pub const DEFAULT_PRIORITY: i32 = 10;

/// The `plugins_api` action asking for a plugin's details.
pub const PLUGIN_INFORMATION_ACTION: &str = "plugin_information";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hook {
    /// `pre_set_site_transient_update_plugins`, runs before WordPress saves the update transient
    PreSetSiteTransientUpdatePlugins,
    /// `plugins_api`, answers plugin information requests
    PluginsApi,
}

impl Hook {
    pub fn name(self) -> &'static str {
        match self {
            Self::PreSetSiteTransientUpdatePlugins => "pre_set_site_transient_update_plugins",
            Self::PluginsApi => "plugins_api",
        }
    }

    /// Number of arguments WordPress passes to the callback.
    pub fn accepted_args(self) -> u8 {
        match self {
            Self::PreSetSiteTransientUpdatePlugins => 1,
            Self::PluginsApi => 3,
        }
    }
}

/// Arguments object of a `plugins_api` request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginsApiArgs {
    #[serde(default)]
    pub slug: Option<String>,
}

impl PluginsApiArgs {
    pub fn for_slug(slug: impl Into<String>) -> Self {
        Self { slug: Some(slug.into()) }
    }
}

/// Value flowing through the `plugins_api` filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginsApiResult {
    /// `false`: let WordPress (or the next handler) answer
    NotHandled,
    Handled(Box<DetailsPayload>),
}

impl PluginsApiResult {
    pub fn is_handled(&self) -> bool {
        matches!(self, Self::Handled(_))
    }

    pub fn details(&self) -> Option<&DetailsPayload> {
        match self {
            Self::NotHandled => None,
            Self::Handled(details) => Some(details),
        }
    }
}

impl Serialize for PluginsApiResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::NotHandled => serializer.serialize_bool(false),
            Self::Handled(details) => details.serialize(serializer),
        }
    }
}

/// The two callbacks a plugin updater exposes to the host.
#[async_trait]
pub trait PluginUpdateHooks: Send + Sync {
    /// Filter for [`Hook::PreSetSiteTransientUpdatePlugins`].
    async fn check_for_update(&self, transient: UpdateTransient) -> UpdateTransient;

    /// Filter for [`Hook::PluginsApi`]. Returns `result` unchanged when the request is not for this plugin.
    async fn plugins_api(&self, result: PluginsApiResult, action: &str, args: &PluginsApiArgs) -> PluginsApiResult;
}

struct Registration {
    hook: Hook,
    priority: i32,
    handler: Arc<dyn PluginUpdateHooks>,
}

/// Host-side registry of filter callbacks.
#[derive(Default)]
pub struct HookRegistry {
    registrations: Vec<Registration>,
}

impl HookRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_filter(&mut self, hook: Hook, priority: i32, handler: Arc<dyn PluginUpdateHooks>) {
        let position = self
            .registrations
            .iter()
            .position(|r| r.priority > priority)
            .unwrap_or(self.registrations.len());
        log::debug!("Registering {} filter at priority {priority}", hook.name());
        self.registrations.insert(
            position,
            Registration {
                hook,
                priority,
                handler,
            },
        );
    }

    pub fn is_registered(&self, hook: Hook) -> bool {
        self.registrations.iter().any(|r| r.hook == hook)
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn handlers(&self, hook: Hook) -> impl Iterator<Item = &Arc<dyn PluginUpdateHooks>> {
        self.registrations
            .iter()
            .filter(move |r| r.hook == hook)
            .map(|r| &r.handler)
    }

    /// Run the update transient through every registered handler.
    pub async fn apply_update_plugins(&self, mut transient: UpdateTransient) -> UpdateTransient {
        for handler in self.handlers(Hook::PreSetSiteTransientUpdatePlugins) {
            transient = handler.check_for_update(transient).await;
        }
        transient
    }

    /// Run a `plugins_api` request through every registered handler, starting from `NotHandled`.
    pub async fn apply_plugins_api(&self, action: &str, args: &PluginsApiArgs) -> PluginsApiResult {
        let mut result = PluginsApiResult::NotHandled;
        for handler in self.handlers(Hook::PluginsApi) {
            result = handler.plugins_api(result, action, args).await;
        }
        result
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.registrations.iter().map(|r| (r.hook.name(), r.priority)))
            .finish()
    }
}
