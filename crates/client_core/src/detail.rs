use std::sync::Arc;

use shared::domain::MovieId;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    api::CatalogApi,
    slot::MovieSlot,
    view_model::{LoadOutcome, MovieView},
    ClientEvent,
};

#[derive(Default)]
struct DetailState {
    movie_id: Option<MovieId>,
    slot: MovieSlot,
}

/// Fetches one movie by id. Every `load` goes to the API, including repeats
/// of the id already shown.
pub struct DetailLoader {
    api: Arc<dyn CatalogApi>,
    inner: Mutex<DetailState>,
    events: broadcast::Sender<ClientEvent>,
}

impl DetailLoader {
    pub fn new(api: Arc<dyn CatalogApi>, events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            api,
            inner: Mutex::new(DetailState::default()),
            events,
        }
    }

    pub async fn snapshot(&self) -> MovieView {
        self.inner.lock().await.slot.view()
    }

    /// Id of the most recent `load`, whether or not it has landed.
    pub async fn movie_id(&self) -> Option<MovieId> {
        self.inner.lock().await.movie_id.clone()
    }

    pub async fn load(&self, movie_id: MovieId) -> LoadOutcome {
        let generation = {
            let mut guard = self.inner.lock().await;
            guard.movie_id = Some(movie_id.clone());
            guard.slot.begin()
        };
        self.notify();
        debug!(
            movie_id = %movie_id,
            generation = generation.value(),
            "detail: movie requested"
        );

        let result = self.api.get_movie(&movie_id).await;
        if let Err(err) = &result {
            warn!(movie_id = %movie_id, error = %err, "detail: lookup failed");
        }

        let outcome = {
            let mut guard = self.inner.lock().await;
            let current = guard.slot.current();
            let outcome = guard.slot.settle(generation, result);
            if outcome == LoadOutcome::Discarded {
                debug!(
                    movie_id = %movie_id,
                    generation = generation.value(),
                    current = current.value(),
                    "detail: discarding superseded response"
                );
                return outcome;
            }
            outcome
        };
        if outcome == LoadOutcome::Applied {
            info!(movie_id = %movie_id, "detail: movie loaded");
        }
        self.notify();
        outcome
    }

    fn notify(&self) {
        let _ = self.events.send(ClientEvent::DetailUpdated);
    }
}

#[cfg(test)]
#[path = "tests/detail_tests.rs"]
mod tests;
