use std::path::Path;

use serde::Deserialize;

use crate::error::CatalogError;
use crate::game::SortOption;
use crate::store::{
    DEFAULT_FEATURED_LIMIT, DEFAULT_POPULAR_LIMIT, DEFAULT_RELATED_LIMIT, StoreOptions,
};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "playshelf.toml";

/// Top-level configuration, loaded from `playshelf.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayshelfConfig {
    /// Catalog location: a file path or an `http(s)://` URL.
    pub source: String,
    pub site_name: String,
    pub language: String,
    #[serde(deserialize_with = "lenient_sort")]
    pub default_sort: SortOption,
    pub limits: LimitsConfig,
    pub store: StoreConfig,
}

impl Default for PlayshelfConfig {
    fn default() -> Self {
        Self {
            source: "data/games.json".to_string(),
            site_name: "FreeCasualGame.com".to_string(),
            language: "en".to_string(),
            default_sort: SortOption::Rating,
            limits: LimitsConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

/// Result sizes for the bounded listings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub featured: usize,
    pub popular: usize,
    pub related: usize,
    /// Tags shown on a listing card.
    pub card_tags: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            featured: DEFAULT_FEATURED_LIMIT,
            popular: DEFAULT_POPULAR_LIMIT,
            related: DEFAULT_RELATED_LIMIT,
            card_tags: 3,
        }
    }
}

/// Store behaviour switches.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub sort_on_load: bool,
    pub featured_by_rating: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sort_on_load: true,
            featured_by_rating: true,
        }
    }
}

/// Unknown sort names fall back to rating order instead of failing the file.
fn lenient_sort<'de, D>(deserializer: D) -> Result<SortOption, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let name = String::deserialize(deserializer)?;
    Ok(SortOption::parse(&name))
}

impl PlayshelfConfig {
    pub fn store_options(&self) -> StoreOptions {
        StoreOptions {
            default_sort: self.default_sort,
            sort_on_load: self.store.sort_on_load,
            featured_by_rating: self.store.featured_by_rating,
        }
    }

    /// Check limits and locations, logging soft issues.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.source.trim().is_empty() {
            return Err(CatalogError::config("source must not be empty"));
        }
        if self.limits.featured == 0 {
            return Err(CatalogError::config("limits.featured must be > 0"));
        }
        if self.limits.popular == 0 {
            return Err(CatalogError::config("limits.popular must be > 0"));
        }
        if self.limits.related == 0 {
            return Err(CatalogError::config("limits.related must be > 0"));
        }
        if !self.default_sort.is_supported() {
            tracing::warn!(
                sort = %self.default_sort,
                "default_sort is not supported yet, catalog keeps source order"
            );
        }
        if self.limits.card_tags == 0 {
            tracing::warn!("limits.card_tags is 0, cards will show no tags");
        }
        Ok(())
    }

    /// Load `playshelf.toml` from the working directory if it exists, then
    /// apply environment overrides.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Self {
        let mut config = match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content, path),
            Err(_) => {
                tracing::info!(path = %path.display(), "No config file found, using defaults");
                Self::default()
            },
        };
        config.apply_env(|key| std::env::var(key).ok());
        config
    }

    fn from_toml(content: &str, path: &Path) -> Self {
        match toml::from_str::<PlayshelfConfig>(content) {
            Ok(cfg) => {
                tracing::info!(path = %path.display(), "Loaded configuration");
                cfg
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    "Failed to parse config: {e}, using defaults"
                );
                Self::default()
            },
        }
    }

    /// Apply `PLAYSHELF_*` overrides read through `var`.
    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(source) = var("PLAYSHELF_SOURCE")
            && !source.is_empty()
        {
            self.source = source;
        }
        if let Some(sort) = var("PLAYSHELF_DEFAULT_SORT")
            && !sort.is_empty()
        {
            self.default_sort = SortOption::parse(&sort);
        }
        if let Some(lang) = var("PLAYSHELF_LANGUAGE")
            && !lang.is_empty()
        {
            self.language = lang;
        }
        if let Some(val) = var("PLAYSHELF_FEATURED_LIMIT")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.featured = n;
        }
        if let Some(val) = var("PLAYSHELF_POPULAR_LIMIT")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.popular = n;
        }
        if let Some(val) = var("PLAYSHELF_RELATED_LIMIT")
            && let Ok(n) = val.parse::<usize>()
        {
            self.limits.related = n;
        }
    }
}
