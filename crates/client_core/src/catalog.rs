//! Paged, sortable catalog listing.

use std::sync::Arc;

use shared::{domain::SortSpec, error::ErrorKind, protocol::PageResult};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    api::{CatalogApi, ListQuery},
    generation::GenerationCounter,
    view_model::{CatalogView, Listing, LoadOutcome, ViewModel},
    ClientEvent,
};

/// Page size requested for every listing.
pub const PER_PAGE: u32 = 10;

struct CatalogState {
    page: PageResult,
    sort: SortSpec,
    requested_page: u32,
    loading: bool,
    error: Option<ErrorKind>,
    generation: GenerationCounter,
}

pub struct CatalogLoader {
    api: Arc<dyn CatalogApi>,
    inner: Mutex<CatalogState>,
    events: broadcast::Sender<ClientEvent>,
}

impl CatalogLoader {
    pub fn new(api: Arc<dyn CatalogApi>, events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            api,
            inner: Mutex::new(CatalogState {
                page: PageResult::empty(),
                sort: SortSpec::default(),
                requested_page: 1,
                loading: true,
                error: None,
                generation: GenerationCounter::default(),
            }),
            events,
        }
    }

    pub async fn snapshot(&self) -> CatalogView {
        let guard = self.inner.lock().await;
        ViewModel {
            data: Listing {
                page: guard.page.clone(),
                sort: guard.sort,
                requested_page: guard.requested_page,
            },
            loading: guard.loading,
            error: guard.error,
        }
    }

    /// Re-issues the listing for the current page and sort.
    pub async fn refresh(&self) -> LoadOutcome {
        self.reload(|_| true).await
    }

    /// Switches ordering; page numbers from the old ordering no longer apply,
    /// so the listing restarts at page 1.
    pub async fn set_sort(&self, sort: SortSpec) -> LoadOutcome {
        self.reload(|state| {
            state.sort = sort;
            state.requested_page = 1;
            true
        })
        .await
    }

    /// Ignored unless `page` lies within the last reported page range.
    pub async fn set_page(&self, page: u32) -> LoadOutcome {
        self.reload(|state| {
            if !state.page.contains_page(page) {
                debug!(
                    page,
                    total_pages = state.page.total_pages,
                    "catalog: ignoring out-of-range page"
                );
                return false;
            }
            state.requested_page = page;
            true
        })
        .await
    }

    async fn reload(&self, prepare: impl FnOnce(&mut CatalogState) -> bool) -> LoadOutcome {
        let (generation, query) = {
            let mut guard = self.inner.lock().await;
            if !prepare(&mut guard) {
                return LoadOutcome::Skipped;
            }
            guard.loading = true;
            guard.error = None;
            let query = ListQuery {
                page: guard.requested_page,
                per_page: PER_PAGE,
                sort: guard.sort,
            };
            (guard.generation.advance(), query)
        };
        self.notify();
        debug!(
            generation = generation.value(),
            page = query.page,
            sort = %query.sort,
            "catalog: listing requested"
        );

        let result = self.api.list_movies(query).await;

        let outcome = {
            let mut guard = self.inner.lock().await;
            if !guard.generation.is_current(generation) {
                debug!(
                    generation = generation.value(),
                    current = guard.generation.current().value(),
                    "catalog: discarding superseded listing"
                );
                return LoadOutcome::Discarded;
            }
            guard.loading = false;
            match result {
                Ok(page) => {
                    info!(
                        requested_page = query.page,
                        current_page = page.current_page,
                        total_pages = page.total_pages,
                        movies = page.movies.len(),
                        "catalog: listing loaded"
                    );
                    guard.requested_page = page.current_page;
                    guard.page = page;
                    LoadOutcome::Applied
                }
                Err(err) => {
                    warn!(page = query.page, error = %err, "catalog: listing failed");
                    let kind = err.kind();
                    guard.error = Some(kind);
                    LoadOutcome::Failed(kind)
                }
            }
        };
        self.notify();
        outcome
    }

    fn notify(&self) {
        let _ = self.events.send(ClientEvent::CatalogUpdated);
    }
}

#[cfg(test)]
#[path = "tests/catalog_tests.rs"]
mod tests;
