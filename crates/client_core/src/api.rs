//! Remote catalog API: the [`CatalogApi`] seam and its reqwest-backed client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use shared::{
    domain::{MovieId, SortSpec},
    error::ServerErrorBody,
    protocol::{HealthResponse, Movie, MovieListResponse, MovieResponse, PageResult},
};
use tracing::debug;
use url::Url;

use crate::error::ApiClientError;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub per_page: u32,
    pub sort: SortSpec,
}

/// Read-only catalog operations. Implementations never retry and never cache.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    async fn list_movies(&self, query: ListQuery) -> Result<PageResult, ApiClientError>;
    async fn get_movie(&self, id: &MovieId) -> Result<Movie, ApiClientError>;
    async fn get_random_movie(&self) -> Result<Movie, ApiClientError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: Url,
    pub timeout: Option<Duration>,
}

impl ApiConfig {
    pub fn new(base_url: &str) -> Result<Self, ApiClientError> {
        let raw = base_url.trim();
        let invalid = |reason: &str| ApiClientError::InvalidBaseUrl {
            url: raw.to_string(),
            reason: reason.to_string(),
        };
        let parsed = Url::parse(raw).map_err(|err| invalid(&err.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("scheme must be http or https"));
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("url cannot carry a path"));
        }
        if parsed.query().is_some() || parsed.fragment().is_some() {
            return Err(invalid("url must not carry a query or fragment"));
        }
        Ok(Self {
            base_url: parsed,
            timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

pub struct HttpCatalogClient {
    http: Client,
    config: ApiConfig,
}

impl HttpCatalogClient {
    pub fn new(config: ApiConfig) -> Result<Self, ApiClientError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(|err| {
            ApiClientError::transport(config.base_url.as_str(), err.to_string())
        })?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub async fn health(&self) -> Result<HealthResponse, ApiClientError> {
        let url = self.config.endpoint(&["health"]);
        let endpoint = url.path().to_string();
        self.fetch_json(&endpoint, self.http.get(url)).await
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiClientError> {
        debug!(endpoint, "catalog api: request");
        let response = request
            .send()
            .await
            .map_err(|err| ApiClientError::transport(endpoint, err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ServerErrorBody>()
                .await
                .ok()
                .map(|body| body.error);
            return Err(ApiClientError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|err| ApiClientError::transport(endpoint, err.to_string()))?;
        serde_json::from_slice(&body).map_err(|err| ApiClientError::Decode {
            endpoint: endpoint.to_string(),
            reason: err.to_string(),
        })
    }
}

#[async_trait]
impl CatalogApi for HttpCatalogClient {
    async fn list_movies(&self, query: ListQuery) -> Result<PageResult, ApiClientError> {
        let url = self.config.endpoint(&["movies"]);
        let endpoint = url.path().to_string();
        let request = self.http.get(url).query(&[
            ("page", query.page.to_string()),
            ("per_page", query.per_page.to_string()),
            ("sort_by", query.sort.sort_by.as_str().to_string()),
            ("order", query.sort.order.as_str().to_string()),
        ]);
        let response: MovieListResponse = self.fetch_json(&endpoint, request).await?;
        Ok(response.into())
    }

    async fn get_movie(&self, id: &MovieId) -> Result<Movie, ApiClientError> {
        let url = self.config.endpoint(&["movies", id.as_str()]);
        let endpoint = url.path().to_string();
        match self
            .fetch_json::<MovieResponse>(&endpoint, self.http.get(url))
            .await
        {
            // Ids share the path namespace with routes like `movies/random`.
            Ok(response) if response.movie.id != *id => {
                debug!(
                    requested = %id,
                    returned = %response.movie.id,
                    "catalog api: id did not resolve to a movie"
                );
                Err(ApiClientError::not_found(id.clone()))
            }
            Ok(response) => Ok(response.movie),
            Err(ApiClientError::Status {
                status: 404,
                message,
                ..
            }) => Err(ApiClientError::NotFound {
                id: id.clone(),
                message,
            }),
            Err(err) => Err(err),
        }
    }

    async fn get_random_movie(&self) -> Result<Movie, ApiClientError> {
        let url = self.config.endpoint(&["movies", "random"]);
        let endpoint = url.path().to_string();
        let response: MovieResponse = self.fetch_json(&endpoint, self.http.get(url)).await?;
        Ok(response.movie)
    }
}

#[cfg(test)]
#[path = "tests/api_tests.rs"]
mod tests;
