use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::MovieId;

/// Upper bound of the rating scale reported by the catalog.
pub const MAX_RATING: f32 = 10.0;
/// Number of stars the rating scale is displayed on.
pub const MAX_STARS: f32 = 5.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub image: Option<String>,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: Option<f32>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub time: Option<String>,
    #[serde(
        rename = "abstract",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    pub synopsis: Option<String>,
}

impl Movie {
    /// Rating halved onto the five-star scale, rounded to the nearest half star.
    pub fn star_rating(&self) -> Option<f32> {
        let rating = self.rating?;
        // Half-star steps on a 5-star scale are whole points on the 10-point one.
        Some((rating.round() / 2.0).clamp(0.0, MAX_STARS))
    }

    /// Synopsis split on embedded line breaks. Blank lines are kept so the
    /// paragraph structure survives.
    pub fn synopsis_lines(&self) -> Vec<&str> {
        match self.synopsis.as_deref() {
            Some(text) => text
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Date the movie was added to the catalog, when `time` is parseable.
    pub fn added_on(&self) -> Option<NaiveDate> {
        let raw = self.time.as_deref()?.trim();
        if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
            return Some(at.date());
        }
        if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
            return Some(date);
        }
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|at| at.date_naive())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieListResponse {
    pub movies: Vec<Movie>,
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieResponse {
    pub movie: Movie,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_ok(&self) -> bool {
        self.status.eq_ignore_ascii_case("ok")
    }
}

/// One page of the catalog as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct PageResult {
    pub movies: Vec<Movie>,
    pub current_page: u32,
    pub total_pages: u32,
    pub total_count: Option<u64>,
}

impl PageResult {
    /// Placeholder page held before the first listing arrives.
    pub fn empty() -> Self {
        Self {
            movies: Vec::new(),
            current_page: 1,
            total_pages: 1,
            total_count: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn contains_page(&self, page: u32) -> bool {
        (1..=self.total_pages).contains(&page)
    }
}

impl Default for PageResult {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<MovieListResponse> for PageResult {
    fn from(value: MovieListResponse) -> Self {
        // An empty catalog reports zero pages; pages stay 1-indexed here.
        Self {
            movies: value.movies,
            current_page: value.pagination.current_page.max(1),
            total_pages: value.pagination.total_pages.max(1),
            total_count: value.pagination.total_count,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|text| !text.trim().is_empty()))
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawRating {
        Number(f32),
        Text(String),
    }

    let rating = match Option::<RawRating>::deserialize(deserializer)? {
        None => None,
        Some(RawRating::Number(value)) => Some(value),
        Some(RawRating::Text(text)) => text.trim().parse::<f32>().ok(),
    };
    Ok(rating.filter(|value| value.is_finite() && (0.0..=MAX_RATING).contains(value)))
}
