//! Update resolution: is the server's release newer, and what do we tell WordPress about it.

mod payload;
mod resolver;
pub mod version;

#[cfg(test)]
mod version_test;

pub use payload::{Banners, DetailsPayload, DetailsSections, UpdateCheckPayload};
pub use resolver::{UpdateDecision, evaluate, project_for_details_view, project_for_update_check};
