//! Update decision and payload projections.
//!
//! Pure functions: a decision is recomputed from scratch on every check.

use super::payload::{Banners, DetailsPayload, DetailsSections, UpdateCheckPayload};
use super::version;
use crate::licensing::{Absent, LicenseInfoResponse};

/// Outcome of an update check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateDecision {
    NoUpdate,
    UpdateAvailable {
        version: String,
        download_url: String,
        /// The full server response, for callers that want more than version and URL
        info: Box<LicenseInfoResponse>,
    },
}

impl UpdateDecision {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::UpdateAvailable { .. })
    }
}

/// Decide whether the server offers something newer than `local_version`.
///
/// Never fails: an absent response, a missing version or a missing download URL all mean no update.
pub fn evaluate(local_version: &str, response: Result<LicenseInfoResponse, Absent>) -> UpdateDecision {
    let info = match response {
        Ok(info) => info,
        Err(absent) => {
            log::debug!("Update check: no license info ({absent}), assuming no update");
            return UpdateDecision::NoUpdate;
        }
    };

    let Some(remote_version) = info.version.clone() else {
        log::warn!("Update check: {}", Absent::MissingRequiredField("version"));
        return UpdateDecision::NoUpdate;
    };

    if !version::is_newer(&remote_version, local_version) {
        log::debug!("Update check: remote {remote_version} is not newer than installed {local_version}");
        return UpdateDecision::NoUpdate;
    }

    // An update WordPress can't download is no update
    let Some(download_url) = info.package_url.clone().filter(|url| !url.is_empty()) else {
        log::warn!(
            "Update check: {remote_version} is newer than {local_version}, but {}",
            Absent::MissingRequiredField("package_url")
        );
        return UpdateDecision::NoUpdate;
    };

    log::debug!("Update check: {remote_version} available (installed {local_version})");
    UpdateDecision::UpdateAvailable {
        version: remote_version,
        download_url,
        info: Box::new(info),
    }
}

/// Transient entry for an available update. `None` means leave the transient alone.
pub fn project_for_update_check(decision: &UpdateDecision, slug: &str) -> Option<UpdateCheckPayload> {
    match decision {
        UpdateDecision::NoUpdate => None,
        UpdateDecision::UpdateAvailable {
            version, download_url, ..
        } => Some(UpdateCheckPayload {
            new_version: version.clone(),
            package: download_url.clone(),
            slug: slug.to_string(),
        }),
    }
}

/// Details popup contents, independent of whether an update is available.
///
/// Optional fields default to an empty string. The changelog is the exception: the tab only exists when
/// the server sent one. `version`, `description` and `package_url` are required.
pub fn project_for_details_view(
    response: &LicenseInfoResponse,
    requested_slug: &str,
) -> Result<DetailsPayload, Absent> {
    let version = required(&response.version, "version")?;
    let description = required(&response.description, "description")?;
    let download_link = required(&response.package_url, "package_url")?;

    Ok(DetailsPayload {
        name: or_empty(&response.name),
        version,
        slug: requested_slug.to_string(),
        download_link,
        tested: or_empty(&response.tested),
        requires: or_empty(&response.requires),
        last_updated: or_empty(&response.last_updated),
        homepage: or_empty(&response.description_url),
        sections: DetailsSections {
            description,
            changelog: response.changelog.clone(),
        },
        banners: Banners {
            low: or_empty(&response.banner_low),
            high: or_empty(&response.banner_high),
        },
        external: true,
    })
}

fn required(field: &Option<String>, name: &'static str) -> Result<String, Absent> {
    field.clone().ok_or(Absent::MissingRequiredField(name))
}

fn or_empty(field: &Option<String>) -> String {
    field.clone().unwrap_or_default()
}
