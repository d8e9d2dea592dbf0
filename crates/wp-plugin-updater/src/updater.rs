//! The updater for one licensed plugin.
//!
//! Ties the license lookup, the update decision and the host hooks together:
//! - `pre_set_site_transient_update_plugins`: adds an entry to the update transient when a newer release exists
//! - `plugins_api`: answers "View details" requests for this plugin's slug

use crate::config::UpdaterConfig;
use crate::host::{
    DEFAULT_PRIORITY, HostContext, Hook, HookRegistry, LocalVersionProvider, PLUGIN_INFORMATION_ACTION, PluginFile,
    PluginUpdateHooks, PluginsApiArgs, PluginsApiResult, SlugResolver, UpdateTransient,
};
use crate::licensing::{Absent, LicenseApiClient, LicenseCredentials, LicenseInfoResponse};
use crate::updates::{self, UpdateDecision};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

pub struct Updater<P = PluginFile> {
    product_name: String,
    plugin: P,
    credentials: LicenseCredentials,
    client: LicenseApiClient,
}

impl Updater<PluginFile> {
    /// Updater for the plugin whose main file is `plugin_file`.
    pub fn new(
        product_id: impl Into<String>,
        product_name: impl Into<String>,
        plugin_file: impl Into<PathBuf>,
        email: impl Into<String>,
        key: impl Into<String>,
        config: UpdaterConfig,
    ) -> Self {
        Self::with_plugin(
            PluginFile::new(plugin_file),
            product_name,
            LicenseCredentials::new(product_id, email, key),
            config,
        )
    }
}

impl<P> Updater<P>
where
    P: LocalVersionProvider + SlugResolver,
{
    pub fn with_plugin(
        plugin: P,
        product_name: impl Into<String>,
        credentials: LicenseCredentials,
        config: UpdaterConfig,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            plugin,
            credentials,
            client: LicenseApiClient::new(config),
        }
    }

    pub fn slug(&self) -> String {
        self.plugin.slug()
    }

    /// Register both filters, but only in the admin area. Returns whether anything was registered.
    pub fn register(self: &Arc<Self>, registry: &mut HookRegistry, context: HostContext) -> bool
    where
        P: Send + Sync + 'static,
    {
        if !context.is_admin {
            log::debug!("{}: not in admin, skipping update hooks", self.product_name);
            return false;
        }

        registry.add_filter(Hook::PreSetSiteTransientUpdatePlugins, DEFAULT_PRIORITY, self.clone());
        registry.add_filter(Hook::PluginsApi, DEFAULT_PRIORITY, self.clone());
        true
    }

    pub async fn license_info(&self) -> Result<LicenseInfoResponse, Absent> {
        self.client.fetch_license_info(&self.credentials).await
    }

    /// Compare the server's current release with the installed version.
    pub async fn update_is_available(&self) -> UpdateDecision {
        let Some(local_version) = self.plugin.local_version() else {
            log::warn!("{}: installed version unknown, skipping update check", self.product_name);
            return UpdateDecision::NoUpdate;
        };

        let response = self.license_info().await;
        updates::evaluate(&local_version, response)
    }
}

#[async_trait]
impl<P> PluginUpdateHooks for Updater<P>
where
    P: LocalVersionProvider + SlugResolver + Send + Sync,
{
    async fn check_for_update(&self, mut transient: UpdateTransient) -> UpdateTransient {
        // WordPress hasn't scanned the installed plugins yet
        if transient.checked.is_empty() {
            return transient;
        }

        let decision = self.update_is_available().await;
        if let Some(payload) = updates::project_for_update_check(&decision, &self.plugin.slug()) {
            log::info!(
                "{}: update to {} available for {}",
                self.product_name,
                payload.new_version,
                payload.slug
            );
            transient.insert_update(payload);
        }
        transient
    }

    async fn plugins_api(&self, result: PluginsApiResult, action: &str, args: &PluginsApiArgs) -> PluginsApiResult {
        if action != PLUGIN_INFORMATION_ACTION {
            return result;
        }

        let slug = self.plugin.slug();
        if args.slug.as_deref() != Some(slug.as_str()) {
            return result;
        }

        let details = self
            .license_info()
            .await
            .and_then(|info| updates::project_for_details_view(&info, &slug));

        match details {
            Ok(details) => PluginsApiResult::Handled(Box::new(details)),
            Err(absent) => {
                log::warn!("{}: cannot show plugin details: {absent}", self.product_name);
                result
            }
        }
    }
}
