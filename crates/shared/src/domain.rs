use std::{fmt, str::FromStr};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// Opaque catalog identifier. The server hands out integers today, but the
/// client never does arithmetic on it, so it is kept as text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MovieId(pub String);

impl MovieId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MovieId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl<'de> Deserialize<'de> for MovieId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Int(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Int(value) => Self(value.to_string()),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    #[default]
    Time,
    Rating,
    Title,
}

impl SortBy {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Time => "time",
            Self::Rating => "rating",
            Self::Title => "title",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSortError {
    #[error("unknown sort field '{0}' (expected time, rating or title)")]
    UnknownField(String),
    #[error("unknown sort order '{0}' (expected asc or desc)")]
    UnknownOrder(String),
    #[error("malformed sort key '{0}' (expected <field>-<order>, e.g. rating-desc)")]
    MalformedKey(String),
}

impl FromStr for SortBy {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "time" => Ok(Self::Time),
            "rating" => Ok(Self::Rating),
            "title" => Ok(Self::Title),
            other => Err(ParseSortError::UnknownField(other.to_string())),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(ParseSortError::UnknownOrder(other.to_string())),
        }
    }
}

/// Ordering applied to a catalog listing. Defaults to newest additions first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct SortSpec {
    pub sort_by: SortBy,
    pub order: SortOrder,
}

impl SortSpec {
    pub const fn new(sort_by: SortBy, order: SortOrder) -> Self {
        Self { sort_by, order }
    }

    /// Stable `<field>-<order>` key, e.g. `rating-desc`.
    pub fn key(&self) -> String {
        format!("{}-{}", self.sort_by.as_str(), self.order.as_str())
    }

    /// Human label of the matching entry in [`SORT_OPTIONS`].
    pub fn label(&self) -> &'static str {
        SORT_OPTIONS
            .iter()
            .find(|option| option.spec == *self)
            .map(|option| option.label)
            .unwrap_or("custom")
    }
}

impl fmt::Display for SortSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.sort_by.as_str(), self.order.as_str())
    }
}

impl FromStr for SortSpec {
    type Err = ParseSortError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, order) = s
            .trim()
            .split_once('-')
            .ok_or_else(|| ParseSortError::MalformedKey(s.to_string()))?;
        Ok(Self::new(field.parse()?, order.parse()?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOption {
    pub spec: SortSpec,
    pub label: &'static str,
}

/// Sort choices offered to the user, in menu order.
pub const SORT_OPTIONS: [SortOption; 6] = [
    SortOption {
        spec: SortSpec::new(SortBy::Time, SortOrder::Desc),
        label: "Time (newest)",
    },
    SortOption {
        spec: SortSpec::new(SortBy::Time, SortOrder::Asc),
        label: "Time (oldest)",
    },
    SortOption {
        spec: SortSpec::new(SortBy::Rating, SortOrder::Desc),
        label: "Rating (high to low)",
    },
    SortOption {
        spec: SortSpec::new(SortBy::Rating, SortOrder::Asc),
        label: "Rating (low to high)",
    },
    SortOption {
        spec: SortSpec::new(SortBy::Title, SortOrder::Asc),
        label: "Title (A-Z)",
    },
    SortOption {
        spec: SortSpec::new(SortBy::Title, SortOrder::Desc),
        label: "Title (Z-A)",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_sort_is_newest_first() {
        let spec = SortSpec::default();
        assert_eq!(spec.sort_by, SortBy::Time);
        assert_eq!(spec.order, SortOrder::Desc);
        assert_eq!(spec.key(), "time-desc");
    }

    #[test]
    fn parses_every_offered_sort_key() {
        for option in SORT_OPTIONS {
            let parsed: SortSpec = option.spec.key().parse().expect("parse key");
            assert_eq!(parsed, option.spec);
            assert_eq!(parsed.label(), option.label);
        }
    }

    #[test]
    fn rejects_unknown_sort_field() {
        assert_eq!(
            "year-desc".parse::<SortSpec>(),
            Err(ParseSortError::UnknownField("year".to_string()))
        );
        assert!(matches!(
            "rating".parse::<SortSpec>(),
            Err(ParseSortError::MalformedKey(_))
        ));
    }

    #[test]
    fn movie_id_accepts_numbers_and_strings() {
        let numeric: MovieId = serde_json::from_str("42").expect("numeric id");
        let text: MovieId = serde_json::from_str("\"tt-42\"").expect("text id");
        assert_eq!(numeric, MovieId::from("42"));
        assert_eq!(text.as_str(), "tt-42");
        assert_eq!(serde_json::to_string(&numeric).expect("serialize"), "\"42\"");
    }
}
