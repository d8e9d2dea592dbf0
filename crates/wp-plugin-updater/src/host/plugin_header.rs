//! Plugin header parsing.
//!
//! WordPress reads plugin metadata from a comment block at the top of the plugin's main file:
//!
//! ```text
//! /**
//!  * Plugin Name: Example Plugin
//!  * Version: 1.4.2
//!  */
//! ```
//!
//! Only the first 8 KiB of the file are considered, same as WordPress.

use regex::Regex;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::LazyLock;

const HEADER_READ_LIMIT: u64 = 8 * 1024;

static PLUGIN_NAME: LazyLock<Regex> = LazyLock::new(|| header_regex("Plugin Name"));
static VERSION: LazyLock<Regex> = LazyLock::new(|| header_regex("Version"));

fn header_regex(name: &str) -> Regex {
    Regex::new(&format!(r"(?mi)^(?:[ \t]*<\?php)?[ \t/*#@]*{}:(.*)$", regex::escape(name)))
        .expect("valid header regex")
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginHeader {
    pub name: Option<String>,
    pub version: Option<String>,
}

/// Read and parse the header of a plugin's main file.
pub fn read_plugin_header(path: &Path) -> io::Result<PluginHeader> {
    let mut bytes = Vec::new();
    File::open(path)?.take(HEADER_READ_LIMIT).read_to_end(&mut bytes)?;
    Ok(parse_plugin_header(&String::from_utf8_lossy(&bytes)))
}

pub fn parse_plugin_header(contents: &str) -> PluginHeader {
    let contents = contents.replace('\r', "\n");
    PluginHeader {
        name: header_value(&PLUGIN_NAME, &contents),
        version: header_value(&VERSION, &contents),
    }
}

fn header_value(regex: &Regex, contents: &str) -> Option<String> {
    let raw = regex.captures(contents)?.get(1)?.as_str();
    let value = cleanup_header_comment(raw);
    (!value.is_empty()).then_some(value)
}

/// Strip a trailing comment close or PHP close tag from a header value.
fn cleanup_header_comment(value: &str) -> String {
    let value = value.trim();
    let value = match value.find("*/") {
        Some(i) => &value[..i],
        None => value,
    };
    let value = match value.find("?>") {
        Some(i) => &value[..i],
        None => value,
    };
    value.trim().to_string()
}
