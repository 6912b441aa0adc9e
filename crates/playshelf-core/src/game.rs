use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Category selection meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Identifier of a game in the catalog.
///
/// Catalog documents use either numbers or strings. Equality is exact on
/// both kind and value, so `Number(1)` and `Text("1")` are different ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GameId {
    Number(i64),
    Text(String),
}

impl GameId {
    /// Whether a location query parameter names this id.
    ///
    /// The parameter is compared verbatim against the id's printed form, so
    /// `"1"` names both `Number(1)` and `Text("1")` but `"+1"` and `"01"`
    /// name neither.
    pub fn matches_param(&self, param: &str) -> bool {
        match self {
            Self::Number(n) => n.to_string() == param,
            Self::Text(s) => s == param,
        }
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for GameId {
    fn from(n: i64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for GameId {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

/// A single game in the catalog. Immutable for the lifetime of a load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameRecord {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub rating: f64,
    pub image: String,
    pub embed: String,
}

impl GameRecord {
    /// Case-insensitive substring match over title, description, tags and
    /// category. `needle` must already be lowercased.
    pub(crate) fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
            || self
                .tags
                .iter()
                .any(|tag| tag.to_lowercase().contains(needle))
            || self.category.to_lowercase().contains(needle)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Persistent ordering applied to the stored catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Rating,
    Title,
    /// Chronological order. Records carry no release date yet, so this mode
    /// is accepted but leaves the stored order untouched.
    Newest,
}

impl SortOption {
    /// Parse a sort name. Unrecognized names fall back to `Rating`.
    pub fn parse(name: &str) -> Self {
        match name {
            "title" => Self::Title,
            "newest" => Self::Newest,
            _ => Self::Rating,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Title => "title",
            Self::Newest => "newest",
        }
    }

    /// Whether this mode actually reorders the catalog.
    pub fn is_supported(self) -> bool {
        !matches!(self, Self::Newest)
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descending rating. Stable sorts keep catalog order among equal ratings.
pub fn by_rating_desc(a: &GameRecord, b: &GameRecord) -> Ordering {
    b.rating.total_cmp(&a.rating)
}

/// Ascending title collation. See [`collate`].
pub fn by_title(a: &GameRecord, b: &GameRecord) -> Ordering {
    collate(&a.title, &b.title)
}

/// Three-level comparison in the manner of a locale collator: base letters
/// first (accents and case folded away), then accents, then case with
/// lowercase ahead of uppercase.
pub(crate) fn collate(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(&base_letters(b))
        .then_with(|| decomposed_lowercase(a).cmp(&decomposed_lowercase(b)))
        .then_with(|| b.cmp(a))
}

fn base_letters(s: &str) -> String {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

fn decomposed_lowercase(s: &str) -> String {
    s.nfd().flat_map(char::to_lowercase).collect()
}
