use super::*;
use crate::error::ApiClientError;
use crate::test_support::{movie, next_call, ApiCall, PendingCall, ScriptedApi};
use shared::error::ErrorKind;
use tokio::sync::mpsc;

fn loader() -> (DetailLoader, mpsc::UnboundedReceiver<PendingCall>) {
    let (api, calls) = ScriptedApi::new();
    let (events, _) = broadcast::channel(16);
    (DetailLoader::new(Arc::new(api), events), calls)
}

#[tokio::test]
async fn loads_requested_movie() {
    let (loader, mut calls) = loader();
    let (outcome, ()) = tokio::join!(loader.load(MovieId::from("42")), async {
        let call = next_call(&mut calls).await;
        assert_eq!(call.call, ApiCall::Get(MovieId::from("42")));
        call.respond_movie(movie("42", "Solaris"));
    });

    assert_eq!(outcome, LoadOutcome::Applied);
    let view = loader.snapshot().await;
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.data, Some(movie("42", "Solaris")));
    assert_eq!(loader.movie_id().await, Some(MovieId::from("42")));
}

#[tokio::test]
async fn unknown_id_leaves_movie_absent() {
    let (loader, mut calls) = loader();
    let (outcome, ()) = tokio::join!(loader.load(MovieId::from("bad-id")), async {
        next_call(&mut calls)
            .await
            .fail(ApiClientError::not_found(MovieId::from("bad-id")));
    });

    assert_eq!(outcome, LoadOutcome::Failed(ErrorKind::NotFound));
    let view = loader.snapshot().await;
    assert_eq!(view.data, None);
    assert!(!view.loading);
    assert_eq!(view.error, Some(ErrorKind::NotFound));
}

#[tokio::test]
async fn new_load_clears_previous_movie_and_error() {
    let (loader, mut calls) = loader();
    let (_, ()) = tokio::join!(loader.load(MovieId::from("1")), async {
        next_call(&mut calls).await.respond_movie(movie("1", "Mirror"));
    });

    let (_, ()) = tokio::join!(loader.load(MovieId::from("2")), async {
        let call = next_call(&mut calls).await;
        let view = loader.snapshot().await;
        assert!(view.loading);
        assert_eq!(view.data, None);
        assert_eq!(view.error, None);
        call.fail(ApiClientError::transport("/api/movies/2", "connection refused"));
    });

    let view = loader.snapshot().await;
    assert_eq!(view.data, None);
    assert_eq!(view.error, Some(ErrorKind::Transport));
}

#[tokio::test]
async fn same_id_is_fetched_again() {
    let (loader, mut calls) = loader();
    for title in ["Nostalghia", "Nostalghia (restored)"] {
        let (outcome, ()) = tokio::join!(loader.load(MovieId::from("7")), async {
            next_call(&mut calls).await.respond_movie(movie("7", title));
        });
        assert_eq!(outcome, LoadOutcome::Applied);
    }
    let view = loader.snapshot().await;
    assert_eq!(view.data.map(|m| m.title), Some("Nostalghia (restored)".to_string()));
}

#[tokio::test]
async fn only_latest_selection_lands() {
    let (loader, mut calls) = loader();
    let (first, second, ()) = tokio::join!(
        loader.load(MovieId::from("1")),
        loader.load(MovieId::from("2")),
        async {
            let one = next_call(&mut calls).await;
            let two = next_call(&mut calls).await;
            two.respond_movie(movie("2", "Ivan's Childhood"));
            one.respond_movie(movie("1", "Andrei Rublev"));
        }
    );

    assert_eq!(first, LoadOutcome::Discarded);
    assert_eq!(second, LoadOutcome::Applied);
    let view = loader.snapshot().await;
    assert_eq!(view.data.map(|m| m.id), Some(MovieId::from("2")));
}
