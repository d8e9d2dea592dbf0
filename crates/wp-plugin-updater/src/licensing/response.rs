//! Response body of the `/info` endpoint.

use super::Absent;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// License info as returned by the server.
///
/// Every field is optional on the wire. `version` is contractually required, and `package_url` is required
/// whenever an update is offered; callers check that themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenseInfoResponse {
    #[serde(default, deserialize_with = "loose_string")]
    pub version: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub package_url: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub name: Option<String>,
    /// Highest WordPress version the plugin was tested with
    #[serde(default, deserialize_with = "loose_string")]
    pub tested: Option<String>,
    /// Minimum WordPress version
    #[serde(default, deserialize_with = "loose_string")]
    pub requires: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub last_updated: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub description_url: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub banner_low: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub banner_high: Option<String>,
    #[serde(default, deserialize_with = "loose_string")]
    pub changelog: Option<String>,
}

/// Accepts strings, and renders numbers and booleans to text (`"version": 2.1` is common in hand-edited
/// server data). `null`, arrays and objects count as absent.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(if b { "1".to_string() } else { String::new() }),
        _ => None,
    })
}

/// Parse a response body, classifying anything other than an error-free JSON object as [`Absent`].
pub fn parse_license_info(body: &str) -> Result<LicenseInfoResponse, Absent> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| Absent::MalformedResponse(format!("JSON parse error: {e}")))?;

    let Value::Object(fields) = value else {
        return Err(Absent::MalformedResponse(format!(
            "expected a JSON object, got {}",
            json_kind(&value)
        )));
    };

    // A null `error` is the same as no error
    match fields.get("error") {
        None | Some(Value::Null) => {}
        Some(Value::String(msg)) => return Err(Absent::ApiReportedError(msg.clone())),
        Some(other) => return Err(Absent::ApiReportedError(other.to_string())),
    }

    serde_json::from_value(Value::Object(fields)).map_err(|e| Absent::MalformedResponse(e.to_string()))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
