use navigation::ViewState;

pub mod api;
pub mod catalog;
pub mod detail;
pub mod error;
pub mod generation;
pub mod navigation;
pub mod random;
mod slot;
pub mod view_model;

pub use api::{ApiConfig, CatalogApi, HttpCatalogClient, ListQuery, DEFAULT_API_BASE_URL};
pub use catalog::{CatalogLoader, PER_PAGE};
pub use detail::DetailLoader;
pub use error::ApiClientError;
pub use navigation::{DispatchOutcome, Intent, NavigationController};
pub use random::RandomPicker;
pub use view_model::{ActiveView, LoadOutcome, ViewContext};

/// State-change notifications for the presentation layer. They carry no data;
/// receivers re-read [`NavigationController::active_view`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ViewChanged(ViewState),
    CatalogUpdated,
    DetailUpdated,
    RandomUpdated,
}

#[cfg(test)]
#[path = "tests/support.rs"]
mod test_support;
