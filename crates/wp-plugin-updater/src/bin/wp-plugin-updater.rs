//! Command-line front end for the plugin updater.
//!
//! Runs the same hooks WordPress would for one plugin and prints the resulting payload as JSON.
//!
//! Usage:
//!   wp-plugin-updater check --plugin-file PATH [options]
//!   wp-plugin-updater info --plugin-file PATH [options]
//!
//! Options:
//!   --plugins-dir DIR     Plugins directory (default: two levels above the plugin file)
//!   --product-id ID       License product id
//!   --product-name NAME   Product name used in log messages
//!   --email EMAIL         License email
//!   --key KEY             License key
//!   --endpoint URL        License API base URL
//!
//! Environment variables:
//!   WP_UPDATER_PRODUCT_ID, WP_UPDATER_EMAIL, WP_UPDATER_KEY - credentials when not given as flags
//!   WP_UPDATER_ENDPOINT, WP_UPDATER_TIMEOUT_SECS, WP_UPDATER_USER_AGENT - client configuration
//!   RUST_LOG - log filter (default: info)

use serde::Serialize;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use wp_plugin_updater::host::{LocalVersionProvider, PLUGIN_INFORMATION_ACTION, SlugResolver};
use wp_plugin_updater::{
    HookRegistry, HostContext, LicenseCredentials, PluginFile, PluginsApiArgs, UpdateTransient, Updater,
    UpdaterConfig,
};

const USAGE: &str = "Usage: wp-plugin-updater <check|info> --plugin-file PATH [--plugins-dir DIR] \
[--product-id ID] [--product-name NAME] [--email EMAIL] [--key KEY] [--endpoint URL]";

const ENV_PRODUCT_ID: &str = "WP_UPDATER_PRODUCT_ID";
const ENV_EMAIL: &str = "WP_UPDATER_EMAIL";
const ENV_KEY: &str = "WP_UPDATER_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Print the update transient entry, or `null`
    Check,
    /// Print the details popup object, or `false`
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct CliArgs {
    command: Command,
    plugin_file: PathBuf,
    plugins_dir: Option<PathBuf>,
    product_id: String,
    product_name: String,
    email: String,
    key: String,
    endpoint: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum CliError {
    MissingCommand,
    UnknownCommand(String),
    UnknownFlag(String),
    MissingValue(String),
    MissingArgument(&'static str),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCommand => write!(f, "No command given"),
            Self::UnknownCommand(cmd) => write!(f, "Unknown command: {cmd}"),
            Self::UnknownFlag(flag) => write!(f, "Unknown option: {flag}"),
            Self::MissingValue(flag) => write!(f, "Option {flag} needs a value"),
            Self::MissingArgument(name) => write!(f, "Missing required argument: {name}"),
        }
    }
}

fn parse_args(args: &[String], lookup: impl Fn(&str) -> Option<String>) -> Result<CliArgs, CliError> {
    let mut iter = args.iter();
    let command = match iter.next().map(String::as_str) {
        Some("check") => Command::Check,
        Some("info") => Command::Info,
        Some(other) => return Err(CliError::UnknownCommand(other.to_string())),
        None => return Err(CliError::MissingCommand),
    };

    let mut plugin_file = None;
    let mut plugins_dir = None;
    let mut product_id = None;
    let mut product_name = None;
    let mut email = None;
    let mut key = None;
    let mut endpoint = None;

    while let Some(flag) = iter.next() {
        let slot = match flag.as_str() {
            "--plugin-file" => &mut plugin_file,
            "--plugins-dir" => &mut plugins_dir,
            "--product-id" => &mut product_id,
            "--product-name" => &mut product_name,
            "--email" => &mut email,
            "--key" => &mut key,
            "--endpoint" => &mut endpoint,
            other => return Err(CliError::UnknownFlag(other.to_string())),
        };
        let value = iter.next().ok_or_else(|| CliError::MissingValue(flag.clone()))?;
        *slot = Some(value.clone());
    }

    let product_id = product_id
        .or_else(|| lookup(ENV_PRODUCT_ID))
        .ok_or(CliError::MissingArgument("--product-id"))?;

    Ok(CliArgs {
        command,
        plugin_file: plugin_file
            .map(PathBuf::from)
            .ok_or(CliError::MissingArgument("--plugin-file"))?,
        plugins_dir: plugins_dir.map(PathBuf::from),
        product_name: product_name.unwrap_or_else(|| product_id.clone()),
        product_id,
        email: email
            .or_else(|| lookup(ENV_EMAIL))
            .ok_or(CliError::MissingArgument("--email"))?,
        key: key.or_else(|| lookup(ENV_KEY)).ok_or(CliError::MissingArgument("--key"))?,
        endpoint,
    })
}

fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Failed to serialize output: {e}");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // Respects RUST_LOG env var (default: info)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = match parse_args(&args, |name| env::var(name).ok()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("wp-plugin-updater: {e}\n{USAGE}");
            return ExitCode::from(2);
        }
    };

    let plugin = match &cli.plugins_dir {
        Some(dir) => PluginFile::with_plugins_dir(&cli.plugin_file, dir),
        None => PluginFile::new(&cli.plugin_file),
    };
    let slug = plugin.slug();
    let installed = plugin.local_version();
    if installed.is_none() && cli.command == Command::Check {
        log::warn!("No Version header in {}, nothing to compare against", cli.plugin_file.display());
    }
    let config = UpdaterConfig::from_settings_and_env(cli.endpoint.clone(), None, None);

    let updater = Arc::new(Updater::with_plugin(
        plugin,
        cli.product_name.clone(),
        LicenseCredentials::new(cli.product_id.clone(), cli.email.clone(), cli.key.clone()),
        config,
    ));

    // The CLI always acts as the admin area
    let mut registry = HookRegistry::new();
    updater.register(&mut registry, HostContext::admin());

    match cli.command {
        Command::Check => {
            let checked = installed.map(|version| (slug.clone(), version));
            let transient = registry.apply_update_plugins(UpdateTransient::checked(checked)).await;
            print_json(&transient.response.get(&slug))
        }
        Command::Info => {
            let result = registry
                .apply_plugins_api(PLUGIN_INFORMATION_ACTION, &PluginsApiArgs::for_slug(slug))
                .await;
            print_json(&result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_parse_full_flags() {
        let cli = parse_args(
            &args(&[
                "check",
                "--plugin-file",
                "/srv/plugins/a/a.php",
                "--product-id",
                "7",
                "--email",
                "me@example.com",
                "--key",
                "K",
                "--endpoint",
                "http://localhost:8080/v1",
            ]),
            no_env,
        )
        .unwrap();

        assert_eq!(cli.command, Command::Check);
        assert_eq!(cli.plugin_file, PathBuf::from("/srv/plugins/a/a.php"));
        assert_eq!(cli.product_id, "7");
        assert_eq!(cli.product_name, "7");
        assert_eq!(cli.endpoint.as_deref(), Some("http://localhost:8080/v1"));
        assert_eq!(cli.plugins_dir, None);
    }

    #[test]
    fn test_credentials_fall_back_to_env() {
        let cli = parse_args(&args(&["info", "--plugin-file", "a.php"]), |name| match name {
            ENV_PRODUCT_ID => Some("9".to_string()),
            ENV_EMAIL => Some("env@example.com".to_string()),
            ENV_KEY => Some("ENVKEY".to_string()),
            _ => None,
        })
        .unwrap();

        assert_eq!(cli.command, Command::Info);
        assert_eq!(cli.product_id, "9");
        assert_eq!(cli.email, "env@example.com");
        assert_eq!(cli.key, "ENVKEY");
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_args(&[], no_env), Err(CliError::MissingCommand));
        assert_eq!(
            parse_args(&args(&["upgrade"]), no_env),
            Err(CliError::UnknownCommand("upgrade".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["check", "--force"]), no_env),
            Err(CliError::UnknownFlag("--force".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["check", "--key"]), no_env),
            Err(CliError::MissingValue("--key".to_string()))
        );
        assert_eq!(
            parse_args(&args(&["check", "--product-id", "1", "--email", "e", "--key", "k"]), no_env),
            Err(CliError::MissingArgument("--plugin-file"))
        );
        assert_eq!(
            parse_args(&args(&["check", "--plugin-file", "a.php"]), no_env),
            Err(CliError::MissingArgument("--product-id"))
        );
    }
}
