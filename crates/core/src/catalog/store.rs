use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use crate::{
    models::{Category, CategoryFilter, Game},
    recent::{encode_recent_ids, parse_recent_ids, push_recent_id, RECENTLY_PLAYED_KEY},
    storage::KeyValueStore,
};

use super::{
    query::ReleaseQuery,
    source::{validate_catalog, GameSource},
};

/// Number of games shown in the trending and new-release rows.
pub const HIGHLIGHT_LIMIT: usize = 6;

/// Image used for a category with no games.
pub const FALLBACK_THUMBNAIL: &str =
    "https://images.unsplash.com/photo-1511512578047-dfb367046420?w=300&h=200&fit=crop";

/// Aggregates shown on the categories overview.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStats {
    /// Category these figures describe.
    pub category: Category,
    /// Number of games in the category.
    pub game_count: usize,
    /// Sum of plays across the category.
    pub total_plays: u64,
    /// Mean rating rounded to one decimal; `None` for an empty category.
    pub avg_rating: Option<f64>,
    /// First three games of the category in catalog order.
    pub top_games: Vec<Game>,
    /// Cover image for the category card.
    pub thumbnail: String,
}

/// Read-only catalog with derived views and an optional recently-played list.
pub struct CatalogStore {
    games: Vec<Game>,
    storage: Option<Arc<dyn KeyValueStore>>,
}

impl CatalogStore {
    /// Build a store over an already validated list of games.
    pub fn new(games: Vec<Game>) -> Self {
        Self {
            games,
            storage: None,
        }
    }

    /// Load and validate games from `source`.
    pub fn load(source: &dyn GameSource) -> Result<Self> {
        let games = source
            .load()
            .with_context(|| format!("failed to load {}", source.describe()))?;
        validate_catalog(&games)
            .with_context(|| format!("invalid catalog in {}", source.describe()))?;
        info!(total = games.len(), source = %source.describe(), "Catalog loaded");
        Ok(Self::new(games))
    }

    /// Attach persistent storage for the recently-played list.
    pub fn with_storage(mut self, storage: Arc<dyn KeyValueStore>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Whether recently-played state can be persisted.
    pub fn has_storage(&self) -> bool {
        self.storage.is_some()
    }

    /// Every game, in the order the source produced them.
    pub fn games(&self) -> &[Game] {
        &self.games
    }

    /// Number of games in the catalog.
    pub fn len(&self) -> usize {
        self.games.len()
    }

    /// True when the catalog holds no games.
    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Most played games first, at most six.
    pub fn trending(&self) -> Vec<Game> {
        let mut games = self.games.clone();
        games.sort_by(|a, b| b.plays.cmp(&a.plays));
        games.truncate(HIGHLIGHT_LIMIT);
        games
    }

    /// Best rated games first, at most six.
    pub fn new_releases(&self) -> Vec<Game> {
        let mut games = self.games.clone();
        games.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        games.truncate(HIGHLIGHT_LIMIT);
        games
    }

    /// Games flagged as featured.
    pub fn featured(&self) -> Vec<Game> {
        self.games.iter().filter(|game| game.featured).cloned().collect()
    }

    /// Games matching `filter`, in catalog order.
    pub fn by_category(&self, filter: CategoryFilter) -> Vec<Game> {
        self.games
            .iter()
            .filter(|game| filter.matches(game))
            .cloned()
            .collect()
    }

    /// String form of [`CatalogStore::by_category`]. Unknown names match nothing.
    pub fn by_category_name(&self, name: &str) -> Vec<Game> {
        match name.parse::<CategoryFilter>() {
            Ok(filter) => self.by_category(filter),
            Err(err) => {
                debug!("{err}; returning no games");
                Vec::new()
            }
        }
    }

    /// Game with the given id.
    pub fn by_id(&self, id: &str) -> Option<&Game> {
        self.games.iter().find(|game| game.id == id)
    }

    /// Trending games other than `id`.
    pub fn related(&self, id: &str, limit: usize) -> Vec<Game> {
        self.trending()
            .into_iter()
            .filter(|game| game.id != id)
            .take(limit)
            .collect()
    }

    /// Per-category aggregates in canonical category order.
    pub fn category_stats(&self) -> Vec<CategoryStats> {
        Category::ALL
            .into_iter()
            .map(|category| {
                let games = self.by_category(CategoryFilter::Only(category));
                let total_plays = games.iter().map(|game| game.plays).sum();
                let avg_rating = if games.is_empty() {
                    None
                } else {
                    let mean =
                        games.iter().map(|game| game.rating).sum::<f64>() / games.len() as f64;
                    Some((mean * 10.0).round() / 10.0)
                };
                let thumbnail = games
                    .first()
                    .map(|game| game.thumbnail.clone())
                    .unwrap_or_else(|| FALLBACK_THUMBNAIL.to_string());
                CategoryStats {
                    category,
                    game_count: games.len(),
                    total_plays,
                    avg_rating,
                    top_games: games.into_iter().take(3).collect(),
                    thumbnail,
                }
            })
            .collect()
    }

    /// New releases narrowed and ordered by `query`.
    pub fn releases(&self, query: &ReleaseQuery) -> Vec<Game> {
        query.apply(self.new_releases())
    }

    /// Recently played games, most recent first. Ids that no longer resolve are skipped.
    pub fn recently_played(&self) -> Vec<Game> {
        let Some(storage) = self.storage.as_ref() else {
            return Vec::new();
        };
        let raw = match storage.get(RECENTLY_PLAYED_KEY) {
            Ok(raw) => raw,
            Err(err) => {
                warn!("Failed to read recently played list: {err:#}");
                None
            }
        };
        parse_recent_ids(raw.as_deref())
            .iter()
            .filter_map(|id| self.by_id(id).cloned())
            .collect()
    }

    /// Record `id` as the most recently played game. No-op without storage.
    pub fn add_to_recently_played(&self, id: &str) -> Result<()> {
        let Some(storage) = self.storage.as_ref() else {
            return Ok(());
        };
        let current = match storage.get(RECENTLY_PLAYED_KEY) {
            Ok(raw) => parse_recent_ids(raw.as_deref()),
            Err(err) => {
                warn!("Failed to read recently played list: {err:#}");
                Vec::new()
            }
        };
        let updated = push_recent_id(current, id);
        storage
            .set(RECENTLY_PLAYED_KEY, &encode_recent_ids(&updated))
            .context("failed to persist recently played list")?;
        debug!(game_id = id, total = updated.len(), "Recently played updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{
            query::{SortDirection, SortKey},
            source::BuiltinSource,
        },
        format::format_play_count,
        recent::MAX_RECENTLY_PLAYED,
        storage::MemoryStore,
    };

    fn store() -> CatalogStore {
        CatalogStore::load(&BuiltinSource).expect("builtin catalog loads")
    }

    fn store_with_memory() -> (CatalogStore, Arc<MemoryStore>) {
        let memory = Arc::new(MemoryStore::new());
        let store = store().with_storage(memory.clone());
        (store, memory)
    }

    fn ids(games: &[Game]) -> Vec<&str> {
        games.iter().map(|game| game.id.as_str()).collect()
    }

    fn sample(id: &str, category: Category, plays: u64, rating: f64) -> Game {
        Game {
            id: id.to_string(),
            title: format!("Game {id}"),
            thumbnail: format!("{id}.png"),
            category,
            plays,
            rating,
            description: String::new(),
            game_url: None,
            featured: false,
        }
    }

    #[test]
    fn every_game_resolves_by_id() {
        let store = store();
        for game in store.games() {
            assert_eq!(store.by_id(&game.id), Some(game));
        }
        assert!(store.by_id("missing").is_none());
    }

    #[test]
    fn trending_orders_by_plays() {
        let trending = store().trending();
        assert_eq!(trending.len(), 6);
        assert_eq!(ids(&trending), ["4", "7", "3", "1", "6", "8"]);
        assert!(trending.windows(2).all(|pair| pair[0].plays >= pair[1].plays));
    }

    #[test]
    fn new_releases_order_by_rating_keeping_catalog_order_on_ties() {
        let releases = store().new_releases();
        assert_eq!(releases.len(), 6);
        // Speed Racer and Ocean Explorer tie at 4.5.
        assert_eq!(ids(&releases), ["6", "1", "3", "4", "2", "8"]);
        assert!(releases
            .windows(2)
            .all(|pair| pair[0].rating >= pair[1].rating));
    }

    #[test]
    fn ties_keep_catalog_order() {
        let store = CatalogStore::new(vec![
            sample("a", Category::Action, 5, 3.0),
            sample("b", Category::Action, 9, 3.0),
            sample("c", Category::Action, 5, 3.0),
        ]);
        assert_eq!(ids(&store.trending()), ["b", "a", "c"]);
        assert_eq!(ids(&store.new_releases()), ["a", "b", "c"]);
    }

    #[test]
    fn small_catalogs_are_not_padded() {
        let store = CatalogStore::new(vec![sample("a", Category::Racing, 1, 1.0)]);
        assert_eq!(store.trending().len(), 1);
        assert_eq!(store.new_releases().len(), 1);
        assert!(CatalogStore::new(Vec::new()).trending().is_empty());
    }

    #[test]
    fn queries_do_not_reorder_the_catalog() {
        let store = store();
        store.trending();
        store.new_releases();
        assert_eq!(
            ids(&store.by_category(CategoryFilter::All)),
            ["1", "2", "3", "4", "5", "6", "7", "8"]
        );
    }

    #[test]
    fn by_category_filters_in_catalog_order() {
        let store = store();
        let adventure = store.by_category(CategoryFilter::Only(Category::Adventure));
        assert_eq!(ids(&adventure), ["1", "8"]);
        assert_eq!(ids(&store.by_category_name("Racing")), ["2"]);
        assert_eq!(store.by_category_name("All").len(), 8);
        assert!(store.by_category_name("Horror").is_empty());
    }

    #[test]
    fn featured_and_related() {
        let store = store();
        assert_eq!(ids(&store.featured()), ["1", "4", "7"]);
        assert_eq!(ids(&store.related("4", 4)), ["7", "3", "1", "6"]);
        assert_eq!(ids(&store.related("2", 3)), ["4", "7", "3"]);
    }

    #[test]
    fn category_stats_aggregate_each_category() {
        let store = CatalogStore::new(vec![
            sample("1", Category::Adventure, 100, 4.8),
            sample("2", Category::Adventure, 50, 4.5),
            sample("3", Category::Adventure, 10, 4.0),
            sample("4", Category::Adventure, 1, 3.1),
            sample("5", Category::Puzzle, 7, 4.7),
        ]);
        let stats = store.category_stats();
        assert_eq!(stats.len(), Category::ALL.len());

        let adventure = stats
            .iter()
            .find(|stat| stat.category == Category::Adventure)
            .unwrap();
        assert_eq!(adventure.game_count, 4);
        assert_eq!(adventure.total_plays, 161);
        assert_eq!(adventure.avg_rating, Some(4.1));
        assert_eq!(ids(&adventure.top_games), ["1", "2", "3"]);
        assert_eq!(adventure.thumbnail, "1.png");

        let racing = stats
            .iter()
            .find(|stat| stat.category == Category::Racing)
            .unwrap();
        assert_eq!(racing.game_count, 0);
        assert_eq!(racing.avg_rating, None);
        assert_eq!(racing.thumbnail, FALLBACK_THUMBNAIL);
    }

    #[test]
    fn releases_filter_search_and_sort() {
        let store = store();

        let default = store.releases(&ReleaseQuery::default());
        assert_eq!(ids(&default), ["8", "6", "4", "3", "2", "1"]);

        let oldest = ReleaseQuery {
            sort: SortKey::Oldest,
            ..ReleaseQuery::default()
        };
        assert_eq!(ids(&store.releases(&oldest)), ["1", "2", "3", "4", "6", "8"]);

        let by_name = ReleaseQuery {
            sort: SortKey::Name,
            direction: SortDirection::Ascending,
            ..ReleaseQuery::default()
        };
        let titles: Vec<_> = store
            .releases(&by_name)
            .into_iter()
            .map(|game| game.title)
            .collect();
        assert_eq!(
            titles,
            [
                "Speed Racer",
                "Space Shooter",
                "Puzzle Master",
                "Ocean Explorer",
                "Epic Quest",
                "Castle Defense"
            ]
        );

        let adventure = ReleaseQuery {
            category: CategoryFilter::Only(Category::Adventure),
            sort: SortKey::Plays,
            ..ReleaseQuery::default()
        };
        assert_eq!(ids(&store.releases(&adventure)), ["1", "8"]);

        let search = ReleaseQuery {
            search: "  TREASURE ".to_string(),
            ..ReleaseQuery::default()
        };
        assert_eq!(ids(&store.releases(&search)), ["8", "1"]);

        let category_text = ReleaseQuery {
            search: "strat".to_string(),
            ..ReleaseQuery::default()
        };
        assert_eq!(ids(&store.releases(&category_text)), ["6"]);
    }

    #[test]
    fn non_numeric_ids_rank_oldest() {
        let store = CatalogStore::new(vec![
            sample("x", Category::Action, 1, 4.0),
            sample("2", Category::Action, 1, 4.0),
            sample("10", Category::Action, 1, 4.0),
        ]);
        assert_eq!(ids(&store.releases(&ReleaseQuery::default())), ["10", "2", "x"]);
    }

    #[test]
    fn recently_played_moves_repeat_to_front() -> Result<()> {
        let (store, _) = store_with_memory();
        store.add_to_recently_played("1")?;
        store.add_to_recently_played("3")?;
        store.add_to_recently_played("3")?;
        assert_eq!(ids(&store.recently_played()), ["3", "1"]);

        store.add_to_recently_played("1")?;
        assert_eq!(ids(&store.recently_played()), ["1", "3"]);
        Ok(())
    }

    #[test]
    fn recently_played_evicts_oldest() -> Result<()> {
        let (store, memory) = store_with_memory();
        for id in ["1", "2", "3", "4", "5", "6", "7"] {
            store.add_to_recently_played(id)?;
        }
        let recent = store.recently_played();
        assert_eq!(recent.len(), MAX_RECENTLY_PLAYED);
        assert_eq!(ids(&recent), ["7", "6", "5", "4", "3", "2"]);
        assert_eq!(
            memory.get(RECENTLY_PLAYED_KEY)?.as_deref(),
            Some(r#"["7","6","5","4","3","2"]"#)
        );
        Ok(())
    }

    #[test]
    fn recently_played_is_empty_when_unset_or_malformed() -> Result<()> {
        let (store, memory) = store_with_memory();
        assert!(store.recently_played().is_empty());

        memory.set(RECENTLY_PLAYED_KEY, "{broken")?;
        assert!(store.recently_played().is_empty());

        store.add_to_recently_played("2")?;
        assert_eq!(ids(&store.recently_played()), ["2"]);
        Ok(())
    }

    #[test]
    fn recently_played_skips_unknown_ids() -> Result<()> {
        let (store, memory) = store_with_memory();
        memory.set(RECENTLY_PLAYED_KEY, r#"["5","gone","2"]"#)?;
        assert_eq!(ids(&store.recently_played()), ["5", "2"]);
        Ok(())
    }

    #[test]
    fn without_storage_recently_played_is_a_no_op() -> Result<()> {
        let store = store();
        assert!(!store.has_storage());
        store.add_to_recently_played("1")?;
        assert!(store.recently_played().is_empty());
        Ok(())
    }

    #[test]
    fn play_counts_format_for_cards() {
        let store = store();
        let top = &store.trending()[0];
        assert_eq!(format_play_count(top.plays), "22.1K");
    }
}
