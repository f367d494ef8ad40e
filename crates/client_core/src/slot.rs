use shared::{error::ErrorKind, protocol::Movie};

use crate::{
    error::ApiClientError,
    generation::{Generation, GenerationCounter},
    view_model::{LoadOutcome, MovieView, ViewModel},
};

/// Fetch lifecycle for a view that shows at most one movie.
#[derive(Debug, Default)]
pub(crate) struct MovieSlot {
    movie: Option<Movie>,
    loading: bool,
    error: Option<ErrorKind>,
    generation: GenerationCounter,
}

impl MovieSlot {
    /// Drops the previous result and opens a new request.
    pub(crate) fn begin(&mut self) -> Generation {
        self.movie = None;
        self.error = None;
        self.loading = true;
        self.generation.advance()
    }

    /// Applies `result` only when `generation` is still the latest request.
    pub(crate) fn settle(
        &mut self,
        generation: Generation,
        result: Result<Movie, ApiClientError>,
    ) -> LoadOutcome {
        if !self.generation.is_current(generation) {
            return LoadOutcome::Discarded;
        }
        self.loading = false;
        match result {
            Ok(movie) => {
                self.movie = Some(movie);
                LoadOutcome::Applied
            }
            Err(err) => {
                let kind = err.kind();
                self.error = Some(kind);
                LoadOutcome::Failed(kind)
            }
        }
    }

    pub(crate) fn current(&self) -> Generation {
        self.generation.current()
    }

    pub(crate) fn view(&self) -> MovieView {
        ViewModel {
            data: self.movie.clone(),
            loading: self.loading,
            error: self.error,
        }
    }
}
