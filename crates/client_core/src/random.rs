use std::sync::Arc;

use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use crate::{
    api::CatalogApi,
    slot::MovieSlot,
    view_model::{LoadOutcome, MovieView},
    ClientEvent,
};

/// Random recommendation that can be re-rolled in place.
pub struct RandomPicker {
    api: Arc<dyn CatalogApi>,
    inner: Mutex<MovieSlot>,
    events: broadcast::Sender<ClientEvent>,
}

impl RandomPicker {
    pub fn new(api: Arc<dyn CatalogApi>, events: broadcast::Sender<ClientEvent>) -> Self {
        Self {
            api,
            inner: Mutex::new(MovieSlot::default()),
            events,
        }
    }

    pub async fn snapshot(&self) -> MovieView {
        self.inner.lock().await.view()
    }

    pub async fn reroll(&self) -> LoadOutcome {
        let generation = self.inner.lock().await.begin();
        self.notify();
        debug!(generation = generation.value(), "random: pick requested");

        // An empty catalog surfaces as whatever error the server sends.
        let result = self.api.get_random_movie().await;
        match &result {
            Ok(movie) => debug!(movie_id = %movie.id, "random: pick received"),
            Err(err) => warn!(error = %err, "random: pick failed"),
        }

        let outcome = {
            let mut guard = self.inner.lock().await;
            let current = guard.current();
            match guard.settle(generation, result) {
                LoadOutcome::Discarded => {
                    debug!(
                        generation = generation.value(),
                        current = current.value(),
                        "random: discarding superseded pick"
                    );
                    return LoadOutcome::Discarded;
                }
                outcome => outcome,
            }
        };
        if outcome == LoadOutcome::Applied {
            info!(generation = generation.value(), "random: pick loaded");
        }
        self.notify();
        outcome
    }

    fn notify(&self) {
        let _ = self.events.send(ClientEvent::RandomUpdated);
    }
}

#[cfg(test)]
#[path = "tests/random_tests.rs"]
mod tests;
