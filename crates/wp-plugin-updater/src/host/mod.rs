//! What the updater needs from, and gives to, the WordPress host.
//!
//! The host owns the installed plugin's metadata and decides whether hooks are registered at all.
//! [`PluginFile`] is the filesystem-backed implementation used outside of tests.

mod hooks;
mod plugin_header;
mod transient;

pub use hooks::{
    DEFAULT_PRIORITY, Hook, HookRegistry, PLUGIN_INFORMATION_ACTION, PluginUpdateHooks, PluginsApiArgs,
    PluginsApiResult,
};
pub use plugin_header::{PluginHeader, parse_plugin_header, read_plugin_header};
pub use transient::UpdateTransient;

use std::path::{Component, Path, PathBuf};

/// Installed version of the plugin, if it can be determined.
pub trait LocalVersionProvider {
    fn local_version(&self) -> Option<String>;
}

/// The plugin's basename, e.g. `my-plugin/my-plugin.php`. Used as its key in the update transient and to
/// recognize `plugins_api` requests addressed to it.
pub trait SlugResolver {
    fn slug(&self) -> String;
}

/// Request context the host runs in. Hooks are only registered in the admin area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostContext {
    pub is_admin: bool,
}

impl HostContext {
    pub fn admin() -> Self {
        Self { is_admin: true }
    }

    pub fn front_end() -> Self {
        Self { is_admin: false }
    }
}

/// A plugin's main file on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginFile {
    path: PathBuf,
    plugins_dir: PathBuf,
}

impl PluginFile {
    /// Plugin file under a standard WordPress install. The plugins directory is the nearest ancestor named
    /// `plugins` or `mu-plugins`; without one, the file is assumed to sit in `<plugins dir>/<plugin dir>/`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let plugins_dir = path
            .ancestors()
            .skip(1)
            .find(|dir| matches!(dir.file_name().and_then(|n| n.to_str()), Some("plugins" | "mu-plugins")))
            .or_else(|| path.parent().and_then(Path::parent))
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self { path, plugins_dir }
    }

    pub fn with_plugins_dir(path: impl Into<PathBuf>, plugins_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            plugins_dir: plugins_dir.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn header(&self) -> Option<PluginHeader> {
        match read_plugin_header(&self.path) {
            Ok(header) => Some(header),
            Err(e) => {
                log::warn!("Failed to read plugin header from {}: {e}", self.path.display());
                None
            }
        }
    }
}

impl LocalVersionProvider for PluginFile {
    fn local_version(&self) -> Option<String> {
        self.header()?.version
    }
}

impl SlugResolver for PluginFile {
    fn slug(&self) -> String {
        plugin_basename(&self.path, &self.plugins_dir)
    }
}

/// Path of `file` relative to `plugins_dir`, `/`-separated. Falls back to the file name for files outside
/// the plugins directory.
pub fn plugin_basename(file: &Path, plugins_dir: &Path) -> String {
    let relative = match file.strip_prefix(plugins_dir) {
        Ok(relative) if !plugins_dir.as_os_str().is_empty() => relative,
        _ => return file_name(file),
    };

    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() { file_name(file) } else { parts.join("/") }
}

fn file_name(file: &Path) -> String {
    file.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
