use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::game::{ALL_CATEGORIES, GameId, GameRecord, SortOption, by_rating_desc, by_title};
use crate::source::CatalogSource;

/// Default number of related games shown beside a game.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

/// Default size of the featured selection.
pub const DEFAULT_FEATURED_LIMIT: usize = 8;

/// Default size of the popular listing.
pub const DEFAULT_POPULAR_LIMIT: usize = 8;

/// Behaviour switches for a [`CatalogStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Sort option in effect before any explicit `sort_games` call.
    pub default_sort: SortOption,
    /// Re-sort by the current sort option after every load.
    pub sort_on_load: bool,
    /// Order the shuffled featured selection by descending rating.
    pub featured_by_rating: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            default_sort: SortOption::Rating,
            sort_on_load: true,
            featured_by_rating: true,
        }
    }
}

/// In-memory game catalog plus the page's category and sort selections.
///
/// Queries hand out owned copies, so callers can never reorder or edit the
/// stored sequence. Only `load`, `sort_games` and `set_current_sort` change it.
pub struct CatalogStore {
    games: Vec<GameRecord>,
    current_category: String,
    current_sort: SortOption,
    options: StoreOptions,
    rng: StdRng,
}

impl Default for CatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::with_options(StoreOptions::default())
    }

    pub fn with_options(options: StoreOptions) -> Self {
        Self::build(options, StdRng::from_os_rng())
    }

    /// Create a store whose featured selection is reproducible.
    pub fn with_seed(options: StoreOptions, seed: u64) -> Self {
        Self::build(options, StdRng::seed_from_u64(seed))
    }

    fn build(options: StoreOptions, rng: StdRng) -> Self {
        Self {
            games: Vec::new(),
            current_category: ALL_CATEGORIES.to_string(),
            current_sort: options.default_sort,
            options,
            rng,
        }
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    /// Replace the catalog. The new sequence is fully prepared before it is
    /// swapped in, so no reader ever sees a partial catalog.
    pub fn load(&mut self, records: Vec<GameRecord>) -> usize {
        let mut games = records;
        if self.options.sort_on_load {
            apply_sort(&mut games, self.current_sort);
        }
        self.games = games;
        tracing::info!(
            count = self.games.len(),
            sort = %self.current_sort,
            "Loaded game catalog"
        );
        self.games.len()
    }

    /// Load from an external source. Failures are logged and leave an empty
    /// catalog behind; they are never returned to the caller.
    pub async fn load_from<S: CatalogSource>(&mut self, source: &S) -> usize {
        match source.fetch().await {
            Ok(records) => self.load(records),
            Err(e) => {
                tracing::error!(
                    source = %source.describe(),
                    error = %e,
                    "Error loading games data"
                );
                self.games = Vec::new();
                0
            },
        }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Copy of the whole catalog in stored order.
    pub fn all(&self) -> Vec<GameRecord> {
        self.games.clone()
    }

    /// Games whose category equals `category` exactly. `"all"` returns every game.
    pub fn by_category(&self, category: &str) -> Vec<GameRecord> {
        if category == ALL_CATEGORIES {
            return self.all();
        }
        self.games
            .iter()
            .filter(|g| g.category == category)
            .cloned()
            .collect()
    }

    pub fn by_id(&self, id: &GameId) -> Option<&GameRecord> {
        self.games.iter().find(|g| &g.id == id)
    }

    /// First game whose id prints exactly as `param`, for ids taken verbatim
    /// from a page location.
    pub fn by_param(&self, param: &str) -> Option<&GameRecord> {
        self.games.iter().find(|g| g.id.matches_param(param))
    }

    /// Case-insensitive substring search over title, description, tags and
    /// category. Blank terms return the whole catalog.
    pub fn search(&self, term: &str) -> Vec<GameRecord> {
        let term = term.trim();
        if term.is_empty() {
            return self.all();
        }
        let needle = term.to_lowercase();
        self.games
            .iter()
            .filter(|g| g.matches_lowercase(&needle))
            .cloned()
            .collect()
    }

    /// Up to `limit` other games in the same category, in catalog order.
    pub fn related(&self, id: &GameId, limit: usize) -> Vec<GameRecord> {
        let Some(current) = self.by_id(id) else {
            return Vec::new();
        };
        self.games
            .iter()
            .filter(|g| g.category == current.category && &g.id != id)
            .take(limit)
            .cloned()
            .collect()
    }

    /// Games carrying exactly `tag` (case-sensitive).
    pub fn by_tag(&self, tag: &str) -> Vec<GameRecord> {
        self.games
            .iter()
            .filter(|g| g.has_tag(tag))
            .cloned()
            .collect()
    }

    /// Random selection of up to `limit` games.
    ///
    /// A shuffled copy of the catalog is stably re-sorted by descending rating
    /// when `featured_by_rating` is set, so the shuffle only breaks rating ties.
    pub fn featured(&mut self, limit: usize) -> Vec<GameRecord> {
        let mut shuffled = self.games.clone();
        shuffled.shuffle(&mut self.rng);
        if self.options.featured_by_rating {
            shuffled.sort_by(by_rating_desc);
        }
        shuffled.truncate(limit);
        shuffled
    }

    /// Top `limit` games by descending rating. Stored order is not touched.
    pub fn popular(&self, limit: usize) -> Vec<GameRecord> {
        let mut games = self.sorted_view(SortOption::Rating);
        games.truncate(limit);
        games
    }

    /// Copy of the catalog ordered by `option`, leaving stored order alone.
    pub fn sorted_view(&self, option: SortOption) -> Vec<GameRecord> {
        let mut games = self.games.clone();
        apply_sort(&mut games, option);
        games
    }

    /// Reorder the stored catalog and remember `option` as the current sort.
    pub fn sort_games(&mut self, option: SortOption) -> &[GameRecord] {
        self.current_sort = option;
        if !option.is_supported() {
            tracing::warn!(
                sort = %option,
                "Sort option not supported yet, keeping current order"
            );
        }
        apply_sort(&mut self.games, option);
        tracing::debug!(sort = %option, count = self.games.len(), "Sorted catalog");
        &self.games
    }

    pub fn current_category(&self) -> &str {
        &self.current_category
    }

    pub fn set_current_category(&mut self, category: impl Into<String>) {
        self.current_category = category.into();
    }

    pub fn current_sort(&self) -> SortOption {
        self.current_sort
    }

    /// Record a new sort option and immediately reorder the catalog.
    pub fn set_current_sort(&mut self, option: SortOption) {
        self.sort_games(option);
    }
}

fn apply_sort(games: &mut [GameRecord], option: SortOption) {
    match option {
        SortOption::Rating => games.sort_by(by_rating_desc),
        SortOption::Title => games.sort_by(by_title),
        SortOption::Newest => {},
    }
}
