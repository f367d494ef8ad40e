//! Top-level view state machine.
//!
//! | from        | intent          | to         | loader work           |
//! |-------------|-----------------|------------|-----------------------|
//! | any         | select movie    | Detail(id) | detail load           |
//! | Listing     | request random  | Random     | random reroll         |
//! | Random      | reroll          | Random     | random reroll         |
//! | Detail/Random | back          | Listing    | none                  |
//!
//! Pairs not listed above are ignored. Page, sort and refresh intents
//! only apply while the listing is shown.

use std::sync::Arc;

use shared::domain::{MovieId, SortSpec};
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info};

use crate::{
    api::CatalogApi,
    catalog::CatalogLoader,
    detail::DetailLoader,
    random::RandomPicker,
    view_model::{ActiveView, LoadOutcome},
    ClientEvent,
};

const EVENT_CAPACITY: usize = 256;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewState {
    Listing,
    Detail(MovieId),
    Random,
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Listing => "listing",
            Self::Detail(_) => "detail",
            Self::Random => "random",
        }
    }
}

/// User intents emitted by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    SelectMovie(MovieId),
    RequestRandom,
    Back,
    Reroll,
    ChangePage(u32),
    ChangeSort(SortSpec),
    Refresh,
}

/// Loader work that accompanies a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffect {
    None,
    LoadDetail(MovieId),
    Reroll,
    SetPage(u32),
    SetSort(SortSpec),
    RefreshCatalog,
}

/// Pure transition table. `None` means the intent does not apply to `current`.
pub fn transition(current: &ViewState, intent: Intent) -> Option<(ViewState, SideEffect)> {
    use ViewState::{Detail, Listing, Random};

    match (current, intent) {
        (_, Intent::SelectMovie(id)) => {
            Some((Detail(id.clone()), SideEffect::LoadDetail(id)))
        }
        (Listing, Intent::RequestRandom) => Some((Random, SideEffect::Reroll)),
        (Random, Intent::Reroll) => Some((Random, SideEffect::Reroll)),
        (Detail(_) | Random, Intent::Back) => Some((Listing, SideEffect::None)),
        (Listing, Intent::ChangePage(page)) => Some((Listing, SideEffect::SetPage(page))),
        (Listing, Intent::ChangeSort(sort)) => Some((Listing, SideEffect::SetSort(sort))),
        (Listing, Intent::Refresh) => Some((Listing, SideEffect::RefreshCatalog)),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The intent does not apply to the active view; nothing changed.
    Ignored,
    /// The view changed without touching a loader.
    Navigated,
    /// A loader ran; carries what became of its request.
    Loaded(LoadOutcome),
}

struct NavigationState {
    view: ViewState,
    selected_movie: Option<MovieId>,
}

pub struct NavigationController {
    catalog: CatalogLoader,
    detail: DetailLoader,
    random: RandomPicker,
    inner: Mutex<NavigationState>,
    events: broadcast::Sender<ClientEvent>,
}

impl NavigationController {
    pub fn new(api: Arc<dyn CatalogApi>) -> Arc<Self> {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Arc::new(Self {
            catalog: CatalogLoader::new(Arc::clone(&api), events.clone()),
            detail: DetailLoader::new(Arc::clone(&api), events.clone()),
            random: RandomPicker::new(api, events.clone()),
            inner: Mutex::new(NavigationState {
                view: ViewState::Listing,
                selected_movie: None,
            }),
            events,
        })
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<ClientEvent> {
        self.events.subscribe()
    }

    /// Issues the first listing fetch of the session.
    pub async fn start(&self) -> LoadOutcome {
        info!("navigation: session started");
        self.catalog.refresh().await
    }

    pub async fn view_state(&self) -> ViewState {
        self.inner.lock().await.view.clone()
    }

    /// Last movie opened in the detail view; kept across returns to the listing.
    pub async fn selected_movie(&self) -> Option<MovieId> {
        self.inner.lock().await.selected_movie.clone()
    }

    pub async fn active_view(&self) -> ActiveView {
        match self.view_state().await {
            ViewState::Listing => ActiveView::Listing(self.catalog.snapshot().await),
            ViewState::Detail(movie_id) => ActiveView::Detail {
                movie_id,
                view: self.detail.snapshot().await,
            },
            ViewState::Random => ActiveView::Random(self.random.snapshot().await),
        }
    }

    pub async fn dispatch(&self, intent: Intent) -> DispatchOutcome {
        let (next, effect) = {
            let mut guard = self.inner.lock().await;
            let Some((next, effect)) = transition(&guard.view, intent.clone()) else {
                debug!(view = guard.view.name(), ?intent, "navigation: intent ignored");
                return DispatchOutcome::Ignored;
            };
            if let ViewState::Detail(movie_id) = &next {
                guard.selected_movie = Some(movie_id.clone());
            }
            let changed = guard.view != next;
            guard.view = next.clone();
            (changed.then_some(next), effect)
        };

        if let Some(view) = next {
            debug!(view = view.name(), "navigation: view changed");
            let _ = self.events.send(ClientEvent::ViewChanged(view));
        }

        let outcome = match effect {
            SideEffect::None => return DispatchOutcome::Navigated,
            SideEffect::LoadDetail(movie_id) => self.detail.load(movie_id).await,
            SideEffect::Reroll => self.random.reroll().await,
            SideEffect::SetPage(page) => self.catalog.set_page(page).await,
            SideEffect::SetSort(sort) => self.catalog.set_sort(sort).await,
            SideEffect::RefreshCatalog => self.catalog.refresh().await,
        };
        DispatchOutcome::Loaded(outcome)
    }
}

#[cfg(test)]
#[path = "tests/navigation_tests.rs"]
mod tests;
