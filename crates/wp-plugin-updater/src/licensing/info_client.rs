//! HTTP client for the license manager API.
//!
//! One GET per lookup, no retries. Failures are never propagated, they become [`Absent`].

use super::response::parse_license_info;
use super::{Absent, LicenseCredentials, LicenseInfoResponse};
use crate::config::UpdaterConfig;
use reqwest::Url;

/// Action segment appended to the endpoint for license info lookups.
const INFO_ACTION: &str = "info";

#[derive(Debug, Clone)]
pub struct LicenseApiClient {
    config: UpdaterConfig,
}

impl LicenseApiClient {
    pub fn new(config: UpdaterConfig) -> Self {
        Self { config }
    }

    /// Build `<endpoint>/<action>?<params>`, form-encoding the parameters.
    pub fn action_url(&self, action: &str, params: &[(&str, &str)]) -> Result<Url, Absent> {
        let raw = format!("{}/{}", self.config.endpoint.trim_end_matches('/'), action);
        let mut url =
            Url::parse(&raw).map_err(|e| Absent::TransportFailure(format!("Invalid endpoint URL {raw}: {e}")))?;
        url.query_pairs_mut().extend_pairs(params.iter().copied());
        Ok(url)
    }

    /// URL of the info lookup: `p` is the product id, `e` the license email, `l` the license key.
    pub fn info_url(&self, credentials: &LicenseCredentials) -> Result<Url, Absent> {
        self.action_url(
            INFO_ACTION,
            &[
                ("p", credentials.product_id.as_str()),
                ("e", credentials.email.as_str()),
                ("l", credentials.key.as_str()),
            ],
        )
    }

    /// Look up the current release for the licensed product.
    pub async fn fetch_license_info(&self, credentials: &LicenseCredentials) -> Result<LicenseInfoResponse, Absent> {
        let url = self.info_url(credentials)?;
        log::debug!(
            "License lookup: product {} at {}",
            credentials.product_id,
            self.config.endpoint
        );

        let result = self.get_body(url).await.and_then(|body| {
            log::trace!("License lookup: raw response body: {body}");
            parse_license_info(&body)
        });

        if let Err(absent) = &result {
            log::warn!("License lookup for product {} failed: {absent}", credentials.product_id);
        }
        result
    }

    async fn get_body(&self, url: Url) -> Result<String, Absent> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = &self.config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        let client = builder
            .build()
            .map_err(|e| Absent::TransportFailure(format!("Failed to create HTTP client: {e}")))?;

        let response = client
            .get(url)
            .send()
            .await
            .map_err(|e| Absent::TransportFailure(e.to_string()))?;

        // The status code is not inspected: error responses carry an `error` field in the body
        let status = response.status();
        if !status.is_success() {
            log::debug!("License lookup: HTTP {status}");
        }

        response.text().await.map_err(|e| Absent::TransportFailure(e.to_string()))
    }
}

impl Default for LicenseApiClient {
    fn default() -> Self {
        Self::new(UpdaterConfig::default())
    }
}
