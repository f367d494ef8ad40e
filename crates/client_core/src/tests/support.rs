//! Scripted [`CatalogApi`] whose calls stay pending until the test answers
//! them, so response arrival order is under test control.

use async_trait::async_trait;
use shared::{
    domain::MovieId,
    protocol::{Movie, PageResult},
};
use tokio::sync::{mpsc, oneshot};

use crate::{
    api::{CatalogApi, ListQuery},
    error::ApiClientError,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List(ListQuery),
    Get(MovieId),
    Random,
}

pub enum Reply {
    Page(Result<PageResult, ApiClientError>),
    Movie(Result<Movie, ApiClientError>),
}

pub struct PendingCall {
    pub call: ApiCall,
    reply: oneshot::Sender<Reply>,
}

impl PendingCall {
    pub fn respond_page(self, page: PageResult) {
        let _ = self.reply.send(Reply::Page(Ok(page)));
    }

    pub fn respond_movie(self, movie: Movie) {
        let _ = self.reply.send(Reply::Movie(Ok(movie)));
    }

    pub fn fail(self, err: ApiClientError) {
        let reply = match self.call {
            ApiCall::List(_) => Reply::Page(Err(err)),
            ApiCall::Get(_) | ApiCall::Random => Reply::Movie(Err(err)),
        };
        let _ = self.reply.send(reply);
    }
}

pub struct ScriptedApi {
    calls: mpsc::UnboundedSender<PendingCall>,
}

impl ScriptedApi {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingCall>) {
        let (calls, rx) = mpsc::unbounded_channel();
        (Self { calls }, rx)
    }

    async fn call(&self, call: ApiCall) -> Reply {
        let (reply, rx) = oneshot::channel();
        self.calls
            .send(PendingCall { call, reply })
            .expect("test dropped the call receiver");
        rx.await.expect("test dropped a pending call")
    }
}

#[async_trait]
impl CatalogApi for ScriptedApi {
    async fn list_movies(&self, query: ListQuery) -> Result<PageResult, ApiClientError> {
        match self.call(ApiCall::List(query)).await {
            Reply::Page(result) => result,
            Reply::Movie(_) => panic!("answered a listing with a movie"),
        }
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Movie, ApiClientError> {
        match self.call(ApiCall::Get(id.clone())).await {
            Reply::Movie(result) => result,
            Reply::Page(_) => panic!("answered a movie lookup with a page"),
        }
    }

    async fn get_random_movie(&self) -> Result<Movie, ApiClientError> {
        match self.call(ApiCall::Random).await {
            Reply::Movie(result) => result,
            Reply::Page(_) => panic!("answered a random pick with a page"),
        }
    }
}

pub fn movie(id: &str, title: &str) -> Movie {
    Movie {
        id: MovieId::from(id),
        title: title.to_string(),
        image: None,
        rating: Some(8.0),
        time: Some("2023-04-01 12:00:00".to_string()),
        synopsis: None,
    }
}

/// `count` movies on `current_page` of `total_pages`, ids derived from the page.
pub fn page(current_page: u32, total_pages: u32, count: usize) -> PageResult {
    PageResult {
        movies: (0..count)
            .map(|i| {
                let id = format!("{current_page}-{i}");
                movie(&id, &format!("Movie {id}"))
            })
            .collect(),
        current_page,
        total_pages,
        total_count: None,
    }
}

pub async fn next_call(calls: &mut mpsc::UnboundedReceiver<PendingCall>) -> PendingCall {
    calls.recv().await.expect("loader issued no api call")
}
