pub mod config;
pub mod error;
pub mod game;
pub mod page;
pub mod source;
pub mod store;

pub use config::PlayshelfConfig;
pub use error::CatalogError;
pub use game::{ALL_CATEGORIES, GameId, GameRecord, SortOption};
pub use page::{DetailOutcome, DetailPage, ListingPage, PageOptions, PageQuery};
pub use source::{CatalogLocation, CatalogSource, FileSource, HttpSource, InlineSource};
pub use store::{CatalogStore, StoreOptions};
