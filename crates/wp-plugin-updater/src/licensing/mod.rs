//! License server lookups.
//!
//! The license server answers one question for us: which version of the product is current for this
//! license, and where to download it. Anything that goes wrong on the way is reported as [`Absent`].

mod info_client;
mod response;

#[cfg(test)]
mod info_client_test;

pub use info_client::LicenseApiClient;
pub use response::{LicenseInfoResponse, parse_license_info};

/// Credentials sent with every lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseCredentials {
    pub product_id: String,
    pub email: String,
    pub key: String,
}

impl LicenseCredentials {
    pub fn new(product_id: impl Into<String>, email: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            email: email.into(),
            key: key.into(),
        }
    }
}

/// No usable license information.
///
/// All lookup failures collapse into this one outcome. The variant only says why, for logs and tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Absent {
    /// The request could not be sent or its body could not be read
    TransportFailure(String),
    /// The body is not a JSON object
    MalformedResponse(String),
    /// The server answered with an `error` field
    ApiReportedError(String),
    /// A field the caller needs is missing from an otherwise valid response
    MissingRequiredField(&'static str),
}

impl std::fmt::Display for Absent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TransportFailure(msg) => write!(f, "License server unreachable: {msg}"),
            Self::MalformedResponse(msg) => write!(f, "Malformed license server response: {msg}"),
            Self::ApiReportedError(msg) => write!(f, "License server error: {msg}"),
            Self::MissingRequiredField(field) => write!(f, "License server response is missing `{field}`"),
        }
    }
}

impl std::error::Error for Absent {}
