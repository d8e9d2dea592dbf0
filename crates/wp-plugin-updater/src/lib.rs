//! Auto-update client for commercial WordPress plugins.
//!
//! Looks up the latest version of a licensed plugin on the license server, compares it with the installed
//! version, and shapes the result into the objects WordPress expects from its `update_plugins` transient
//! filter and its `plugins_api` ("view details") filter.
//!
//! Every failure on the way (network, malformed JSON, API-reported error, missing fields) degrades to
//! "no update information". Nothing here panics or surfaces an error to the host.

// Use log::* macros instead of println!/eprintln! for proper log level control

pub mod config;
pub mod host;
pub mod licensing;
pub mod updater;
pub mod updates;


pub use config::UpdaterConfig;
pub use host::{
    HostContext, Hook, HookRegistry, PluginFile, PluginUpdateHooks, PluginsApiArgs, PluginsApiResult, UpdateTransient,
};
pub use licensing::{Absent, LicenseApiClient, LicenseCredentials, LicenseInfoResponse};
pub use updater::Updater;
pub use updates::{DetailsPayload, UpdateCheckPayload, UpdateDecision};
