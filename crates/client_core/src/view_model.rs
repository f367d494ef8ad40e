//! Read-only snapshots handed to the presentation layer.

use shared::{
    domain::{MovieId, SortSpec},
    error::ErrorKind,
    protocol::{Movie, PageResult},
};

/// What happened to a fetch a loader issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied,
    Failed(ErrorKind),
    /// A newer request was issued before this one completed.
    Discarded,
    /// The request was rejected before reaching the API (e.g. out-of-range page).
    Skipped,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel<T> {
    pub data: T,
    pub loading: bool,
    pub error: Option<ErrorKind>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub page: PageResult,
    pub sort: SortSpec,
    /// Page of the most recent request; matches `page.current_page` once it lands.
    pub requested_page: u32,
}

pub type CatalogView = ViewModel<Listing>;
pub type MovieView = ViewModel<Option<Movie>>;

/// Which of the three views a message is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContext {
    List,
    Detail,
    Random,
}

impl ViewContext {
    pub fn failure_message(self) -> &'static str {
        match self {
            Self::List => "Failed to load the movie list, please retry later.",
            Self::Detail => "Failed to load movie details, please retry later.",
            Self::Random => "Failed to load a random movie, please retry later.",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            Self::List => "Loading movies...",
            Self::Detail => "Loading movie details...",
            Self::Random => "Picking a random movie...",
        }
    }

    pub fn empty_message(self) -> &'static str {
        match self {
            Self::List => "No movies found.",
            Self::Detail | Self::Random => "Movie information not found.",
        }
    }
}

/// Single-movie view reduced to the one thing worth showing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoviePhase<'a> {
    Loading,
    Failed(ErrorKind),
    Missing,
    Ready(&'a Movie),
}

impl MovieView {
    pub fn phase(&self) -> MoviePhase<'_> {
        if self.loading {
            return MoviePhase::Loading;
        }
        if let Some(kind) = self.error {
            return MoviePhase::Failed(kind);
        }
        match &self.data {
            Some(movie) => MoviePhase::Ready(movie),
            None => MoviePhase::Missing,
        }
    }
}

/// The only loader data the presentation layer may render at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveView {
    Listing(CatalogView),
    Detail { movie_id: MovieId, view: MovieView },
    Random(MovieView),
}

impl ActiveView {
    pub fn context(&self) -> ViewContext {
        match self {
            Self::Listing(_) => ViewContext::List,
            Self::Detail { .. } => ViewContext::Detail,
            Self::Random(_) => ViewContext::Random,
        }
    }

    pub fn error(&self) -> Option<ErrorKind> {
        match self {
            Self::Listing(view) => view.error,
            Self::Detail { view, .. } | Self::Random(view) => view.error,
        }
    }

    pub fn is_loading(&self) -> bool {
        match self {
            Self::Listing(view) => view.loading,
            Self::Detail { view, .. } | Self::Random(view) => view.loading,
        }
    }
}
