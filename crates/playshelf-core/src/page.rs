//! Page models for the listing (index) and detail (play) pages.
//!
//! These hold everything the pages derive from the store, so the DOM layer
//! only has to copy fields into templates.

use serde::Serialize;
use url::form_urlencoded;

use crate::config::PlayshelfConfig;
use crate::game::{ALL_CATEGORIES, GameId, GameRecord};
use crate::store::{CatalogStore, DEFAULT_FEATURED_LIMIT, DEFAULT_RELATED_LIMIT};

pub const INDEX_PAGE: &str = "index.html";
pub const PLAY_PAGE: &str = "play.html";

pub const NO_GAMES_MESSAGE: &str = "No games found. Try a different search or category.";
pub const NO_RELATED_MESSAGE: &str = "No related games found.";
pub const FEATURED_HEADING: &str = "Featured Games";

/// Parameters read from a page location's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub id: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
    pub search: Option<String>,
}

impl PageQuery {
    /// Parse `?id=..&category=..&tag=..&q=..`. The leading `?` is optional and
    /// the first occurrence of a repeated key wins.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut out = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "id" => &mut out.id,
                "category" => &mut out.category,
                "tag" => &mut out.tag,
                "q" => &mut out.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        out
    }
}

/// Page-level sizes and labels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageOptions {
    pub site_name: String,
    pub featured_limit: usize,
    pub related_limit: usize,
    pub card_tags: usize,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            site_name: "FreeCasualGame.com".to_string(),
            featured_limit: DEFAULT_FEATURED_LIMIT,
            related_limit: DEFAULT_RELATED_LIMIT,
            card_tags: 3,
        }
    }
}

impl From<&PlayshelfConfig> for PageOptions {
    fn from(config: &PlayshelfConfig) -> Self {
        Self {
            site_name: config.site_name.clone(),
            featured_limit: config.limits.featured,
            related_limit: config.limits.related,
            card_tags: config.limits.card_tags,
        }
    }
}

/// A game tile on the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameCard {
    pub id: GameId,
    pub title: String,
    pub description: String,
    pub image: String,
    pub tags: Vec<String>,
    pub play_href: String,
}

impl GameCard {
    pub fn new(game: &GameRecord, tag_limit: usize) -> Self {
        Self {
            id: game.id.clone(),
            title: game.title.clone(),
            description: game.description.clone(),
            image: game.image.clone(),
            tags: game.tags.iter().take(tag_limit).cloned().collect(),
            play_href: play_href(&game.id),
        }
    }
}

/// What the listing grid is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum ListingKind {
    Featured,
    Category(String),
    Tag(String),
    Search(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingPage {
    pub kind: ListingKind,
    pub heading: String,
    pub active_category: String,
    pub cards: Vec<GameCard>,
    pub empty_message: Option<&'static str>,
}

impl ListingPage {
    /// Pick the listing for `query` (search, then tag, then category, then
    /// featured) and record the active category on the store. Blank
    /// parameters count as absent.
    pub fn build(store: &mut CatalogStore, query: &PageQuery, options: &PageOptions) -> Self {
        let search = non_blank(query.search.as_deref());
        let (kind, games) = if let Some(term) = search {
            (ListingKind::Search(term.to_string()), store.search(term))
        } else if let Some(tag) = non_blank(query.tag.as_deref()) {
            (ListingKind::Tag(tag.to_string()), store.by_tag(tag))
        } else if let Some(category) = non_blank(query.category.as_deref()) {
            store.set_current_category(category);
            (
                ListingKind::Category(category.to_string()),
                store.by_category(category),
            )
        } else {
            store.set_current_category(ALL_CATEGORIES);
            (ListingKind::Featured, store.featured(options.featured_limit))
        };

        let heading = match &kind {
            ListingKind::Featured => FEATURED_HEADING.to_string(),
            ListingKind::Category(c) => category_heading(c),
            ListingKind::Tag(t) => format!("Games tagged \"{t}\""),
            ListingKind::Search(s) => format!("Search results for \"{}\"", s.trim()),
        };
        let cards: Vec<GameCard> = games
            .iter()
            .map(|g| GameCard::new(g, options.card_tags))
            .collect();
        let empty_message = cards.is_empty().then_some(NO_GAMES_MESSAGE);

        Self {
            kind,
            heading,
            active_category: store.current_category().to_string(),
            cards,
            empty_message,
        }
    }
}

fn non_blank(param: Option<&str>) -> Option<&str> {
    param.filter(|p| !p.trim().is_empty())
}

/// Heading for a category listing: `"all"` reads as the featured heading.
pub fn category_heading(category: &str) -> String {
    if category == ALL_CATEGORIES {
        FEATURED_HEADING.to_string()
    } else {
        format!("{} Games", capitalize(category))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagLink {
    pub label: String,
    pub href: String,
}

/// Smaller card used in the related-games strip.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedCard {
    pub id: GameId,
    pub title: String,
    pub image: String,
    pub play_href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DetailPage {
    pub id: GameId,
    pub document_title: String,
    pub title: String,
    pub category_label: String,
    pub category_href: String,
    pub description: String,
    pub embed: String,
    pub tags: Vec<TagLink>,
    pub related: Vec<RelatedCard>,
    pub related_empty_message: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum DetailOutcome {
    /// No id was given; send the visitor back to the index.
    Redirect { location: String },
    NotFound,
    Found(Box<DetailPage>),
}

impl DetailPage {
    /// Resolve the `id` parameter of a play page. The parameter is matched
    /// against each game id's printed form, so any card's `play_href` leads
    /// back to its game whether the catalog uses numeric or string ids.
    pub fn resolve(
        store: &CatalogStore,
        query: &PageQuery,
        options: &PageOptions,
    ) -> DetailOutcome {
        let Some(param) = query.id.as_deref().filter(|id| !id.is_empty()) else {
            return DetailOutcome::Redirect {
                location: INDEX_PAGE.to_string(),
            };
        };
        let Some(game) = store.by_param(param) else {
            tracing::debug!(id = param, "Game not found");
            return DetailOutcome::NotFound;
        };

        let related: Vec<RelatedCard> = store
            .related(&game.id, options.related_limit)
            .iter()
            .map(|g| RelatedCard {
                id: g.id.clone(),
                title: g.title.clone(),
                image: g.image.clone(),
                play_href: play_href(&g.id),
            })
            .collect();
        let related_empty_message = related.is_empty().then_some(NO_RELATED_MESSAGE);

        DetailOutcome::Found(Box::new(Self {
            id: game.id.clone(),
            document_title: format!("{} - {}", game.title, options.site_name),
            title: game.title.clone(),
            category_label: capitalize(&game.category),
            category_href: index_href("category", &game.category),
            description: game.description.clone(),
            embed: game.embed.clone(),
            tags: game
                .tags
                .iter()
                .map(|t| TagLink {
                    label: t.clone(),
                    href: index_href("tag", t),
                })
                .collect(),
            related,
            related_empty_message,
        }))
    }
}

pub fn play_href(id: &GameId) -> String {
    let id = id.to_string();
    let encoded: String = form_urlencoded::byte_serialize(id.as_bytes()).collect();
    format!("{PLAY_PAGE}?id={encoded}")
}

fn index_href(key: &str, value: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(value.as_bytes()).collect();
    format!("{INDEX_PAGE}?{key}={encoded}")
}

/// Uppercase the first character, leaving the rest untouched.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Language selector hook. Content is not localized; the choice is only logged.
pub fn change_language(language: &str) {
    tracing::info!(language, "Language changed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOptions;
    use crate::test_helpers::make_game;

    fn store() -> CatalogStore {
        let mut store = CatalogStore::with_seed(StoreOptions::default(), 3);
        store.load(vec![
            make_game(1, "Bubble Pop", "puzzle", &["match3", "casual", "bubbles", "kids"], 4.5),
            make_game(2, "Speed Race", "racing", &["fast"], 3.0),
            make_game(3, "Block Drop", "puzzle", &["tetris"], 4.8),
            make_game(4, "Lone Knight", "adventure", &[], 4.0),
        ]);
        store
    }

    fn found(outcome: DetailOutcome) -> DetailPage {
        match outcome {
            DetailOutcome::Found(page) => *page,
            other => panic!("expected a detail page, got {other:?}"),
        }
    }

    #[test]
    fn parse_query_string() {
        let q = PageQuery::parse("?id=12&category=puzzle&tag=match%203&q=bubble+pop");
        assert_eq!(q.id.as_deref(), Some("12"));
        assert_eq!(q.category.as_deref(), Some("puzzle"));
        assert_eq!(q.tag.as_deref(), Some("match 3"));
        assert_eq!(q.search.as_deref(), Some("bubble pop"));
    }

    #[test]
    fn parse_query_first_value_wins() {
        let q = PageQuery::parse("id=1&id=2&utm_source=x");
        assert_eq!(q.id.as_deref(), Some("1"));
        assert_eq!(PageQuery::parse(""), PageQuery::default());
    }

    #[test]
    fn capitalize_first_char_only() {
        assert_eq!(capitalize("puzzle"), "Puzzle");
        assert_eq!(capitalize("io games"), "Io games");
        assert_eq!(capitalize("éclair"), "Éclair");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn listing_defaults_to_featured() {
        let mut store = store();
        store.set_current_category("racing");
        let page = ListingPage::build(&mut store, &PageQuery::default(), &PageOptions::default());
        assert_eq!(page.kind, ListingKind::Featured);
        assert_eq!(page.heading, "Featured Games");
        assert_eq!(page.active_category, "all");
        assert_eq!(page.cards.len(), 4);
        assert_eq!(page.cards[0].title, "Block Drop");
        assert!(page.empty_message.is_none());
    }

    #[test]
    fn listing_featured_respects_limit() {
        let mut store = store();
        let options = PageOptions {
            featured_limit: 2,
            ..PageOptions::default()
        };
        let page = ListingPage::build(&mut store, &PageQuery::default(), &options);
        assert_eq!(page.cards.len(), 2);
    }

    #[test]
    fn listing_by_category_sets_active_category() {
        let mut store = store();
        let query = PageQuery::parse("category=puzzle");
        let page = ListingPage::build(&mut store, &query, &PageOptions::default());
        assert_eq!(page.heading, "Puzzle Games");
        assert_eq!(page.active_category, "puzzle");
        assert_eq!(store.current_category(), "puzzle");
        assert_eq!(page.cards.len(), 2);
    }

    #[test]
    fn listing_all_category_shows_everything_under_featured_heading() {
        let mut store = store();
        let page = ListingPage::build(
            &mut store,
            &PageQuery::parse("category=all"),
            &PageOptions::default(),
        );
        assert_eq!(page.kind, ListingKind::Category("all".to_string()));
        assert_eq!(page.heading, "Featured Games");
        assert_eq!(page.cards.len(), 4);
    }

    #[test]
    fn listing_search_wins_over_other_params() {
        let mut store = store();
        let query = PageQuery::parse("q=race&category=puzzle&tag=tetris");
        let page = ListingPage::build(&mut store, &query, &PageOptions::default());
        assert_eq!(page.kind, ListingKind::Search("race".to_string()));
        assert_eq!(page.heading, "Search results for \"race\"");
        assert_eq!(page.cards.len(), 1);
        assert_eq!(page.cards[0].id, GameId::Number(2));
    }

    #[test]
    fn listing_blank_search_is_ignored() {
        let mut store = store();
        let query = PageQuery::parse("q=+++&tag=tetris");
        let page = ListingPage::build(&mut store, &query, &PageOptions::default());
        assert_eq!(page.kind, ListingKind::Tag("tetris".to_string()));
        assert_eq!(page.heading, "Games tagged \"tetris\"");
        assert_eq!(page.cards.len(), 1);
    }

    #[test]
    fn listing_empty_result_has_message() {
        let mut store = store();
        let page = ListingPage::build(
            &mut store,
            &PageQuery::parse("category=sports"),
            &PageOptions::default(),
        );
        assert!(page.cards.is_empty());
        assert_eq!(page.empty_message, Some(NO_GAMES_MESSAGE));
    }

    #[test]
    fn card_truncates_tags_and_links_to_play_page() {
        let game = make_game(1, "Bubble Pop", "puzzle", &["a", "b", "c", "d"], 4.5);
        let card = GameCard::new(&game, 3);
        assert_eq!(card.tags, vec!["a", "b", "c"]);
        assert_eq!(card.play_href, "play.html?id=1");
    }

    #[test]
    fn detail_without_id_redirects() {
        let store = store();
        for query in ["", "?id=", "?category=puzzle"] {
            assert_eq!(
                DetailPage::resolve(&store, &PageQuery::parse(query), &PageOptions::default()),
                DetailOutcome::Redirect {
                    location: "index.html".to_string()
                }
            );
        }
    }

    #[test]
    fn detail_unknown_id_is_not_found() {
        let store = store();
        let outcome =
            DetailPage::resolve(&store, &PageQuery::parse("?id=99"), &PageOptions::default());
        assert_eq!(outcome, DetailOutcome::NotFound);
    }

    #[test]
    fn detail_page_fields() {
        let store = store();
        let page = found(DetailPage::resolve(
            &store,
            &PageQuery::parse("?id=1"),
            &PageOptions::default(),
        ));
        assert_eq!(page.document_title, "Bubble Pop - FreeCasualGame.com");
        assert_eq!(page.category_label, "Puzzle");
        assert_eq!(page.category_href, "index.html?category=puzzle");
        assert_eq!(page.embed, "https://embed.example/1");
        assert_eq!(page.tags.len(), 4);
        assert_eq!(page.tags[0].href, "index.html?tag=match3");
        assert_eq!(page.related.len(), 1);
        assert_eq!(page.related[0].play_href, "play.html?id=3");
        assert!(page.related_empty_message.is_none());
    }

    #[test]
    fn detail_without_related_games_has_message() {
        let store = store();
        let page = found(DetailPage::resolve(
            &store,
            &PageQuery::parse("?id=4"),
            &PageOptions::default(),
        ));
        assert!(page.related.is_empty());
        assert_eq!(page.related_empty_message, Some(NO_RELATED_MESSAGE));
    }

    #[test]
    fn detail_links_round_trip_through_query_parser() {
        let mut store = CatalogStore::new();
        store.load(vec![make_game(1, "Pair", "card games", &["two words"], 3.0)]);
        let page = found(DetailPage::resolve(
            &store,
            &PageQuery::parse("id=1"),
            &PageOptions::default(),
        ));
        let href = page.category_href.strip_prefix("index.html").unwrap();
        assert_eq!(PageQuery::parse(href).category.as_deref(), Some("card games"));
        let href = page.tags[0].href.strip_prefix("index.html").unwrap();
        assert_eq!(PageQuery::parse(href).tag.as_deref(), Some("two words"));
    }

    #[test]
    fn detail_resolves_text_ids() {
        let mut store = CatalogStore::new();
        let mut game = make_game(0, "Snake", "arcade", &[], 3.5);
        game.id = GameId::Text("snake-2".to_string());
        store.load(vec![game]);
        let page = found(DetailPage::resolve(
            &store,
            &PageQuery::parse("id=snake-2"),
            &PageOptions::default(),
        ));
        assert_eq!(page.title, "Snake");
    }

    #[test]
    fn card_links_reach_detail_pages_with_numeric_string_ids() {
        let mut store = CatalogStore::new();
        let mut first = make_game(0, "Bubble Pop", "puzzle", &[], 4.5);
        first.id = GameId::Text("1".to_string());
        let mut second = make_game(0, "Block Drop", "puzzle", &[], 4.8);
        second.id = GameId::Text("2".to_string());
        store.load(vec![first, second]);

        let options = PageOptions::default();
        let query = PageQuery::parse("category=puzzle");
        let listing = ListingPage::build(&mut store, &query, &options);
        for card in &listing.cards {
            let href = card.play_href.strip_prefix("play.html").unwrap();
            let page = found(DetailPage::resolve(&store, &PageQuery::parse(href), &options));
            assert_eq!(page.id, card.id);
            assert_eq!(page.related.len(), 1);
            assert_ne!(page.related[0].id, card.id);
        }
    }

    #[test]
    fn detail_id_must_match_printed_form() {
        let store = store();
        for query in ["?id=+1", "?id=01", "?id=1.0"] {
            assert_eq!(
                DetailPage::resolve(&store, &PageQuery::parse(query), &PageOptions::default()),
                DetailOutcome::NotFound
            );
        }
    }

    #[test]
    fn listing_blank_category_and_tag_fall_back_to_featured() {
        let mut store = store();
        for query in ["category=", "category=++", "tag=&category="] {
            let page =
                ListingPage::build(&mut store, &PageQuery::parse(query), &PageOptions::default());
            assert_eq!(page.kind, ListingKind::Featured);
            assert_eq!(page.heading, "Featured Games");
            assert_eq!(page.active_category, "all");
        }
    }

    #[test]
    fn listing_blank_tag_defers_to_category() {
        let mut store = store();
        let query = PageQuery::parse("tag=&category=racing");
        let page = ListingPage::build(&mut store, &query, &PageOptions::default());
        assert_eq!(page.kind, ListingKind::Category("racing".to_string()));
        assert_eq!(page.heading, "Racing Games");
    }
}
