//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Genre tag carried by every game in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Fast reflex games.
    Action,
    /// Exploration and story driven games.
    Adventure,
    /// Logic and brain teasers.
    Puzzle,
    /// Driving games.
    Racing,
    /// Aim and fire.
    Shooter,
    /// Ball games and athletics.
    Sports,
    /// Planning and tower defense.
    Strategy,
}

impl Category {
    /// Every category in canonical display order.
    pub const ALL: [Category; 7] = [
        Category::Action,
        Category::Adventure,
        Category::Puzzle,
        Category::Racing,
        Category::Shooter,
        Category::Sports,
        Category::Strategy,
    ];

    /// English label used in the UI and in catalog files.
    pub fn name(self) -> &'static str {
        match self {
            Category::Action => "Action",
            Category::Adventure => "Adventure",
            Category::Puzzle => "Puzzle",
            Category::Racing => "Racing",
            Category::Shooter => "Shooter",
            Category::Sports => "Sports",
            Category::Strategy => "Strategy",
        }
    }

    /// Small glyph shown next to the category name.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Action => "⚡",
            Category::Adventure => "🗺",
            Category::Puzzle => "🧩",
            Category::Racing => "🏎",
            Category::Shooter => "🎯",
            Category::Sports => "⚽",
            Category::Strategy => "♟",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Category::ALL
            .into_iter()
            .find(|category| category.name().eq_ignore_ascii_case(needle))
            .ok_or_else(|| CatalogError::UnknownCategory(s.to_string()))
    }
}

/// Category selection including the "All" sentinel meaning no filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CategoryFilter {
    /// Every game, unfiltered.
    #[default]
    All,
    /// Games tagged with exactly this category.
    Only(Category),
}

impl CategoryFilter {
    /// `All` followed by every concrete category.
    pub fn options() -> Vec<CategoryFilter> {
        std::iter::once(CategoryFilter::All)
            .chain(Category::ALL.into_iter().map(CategoryFilter::Only))
            .collect()
    }

    /// Whether `game` passes this filter.
    pub fn matches(self, game: &Game) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(category) => game.category == category,
        }
    }

    /// Step through [`CategoryFilter::options`], wrapping at either end.
    pub fn cycle(self, delta: isize) -> CategoryFilter {
        let options = Self::options();
        let len = options.len() as isize;
        let current = options
            .iter()
            .position(|option| *option == self)
            .unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        options[next as usize]
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CategoryFilter::All => f.write_str("All"),
            CategoryFilter::Only(category) => category.fmt(f),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(CategoryFilter::All);
        }
        s.parse().map(CategoryFilter::Only)
    }
}

impl From<Category> for CategoryFilter {
    fn from(category: Category) -> Self {
        CategoryFilter::Only(category)
    }
}

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    /// Unique identifier (e.g. `4`).
    pub id: String,
    /// Human-readable game title.
    pub title: String,
    /// Thumbnail image URL.
    pub thumbnail: String,
    /// Genre tag.
    pub category: Category,
    /// Lifetime play count.
    pub plays: u64,
    /// Average user rating between 0.0 and 5.0.
    pub rating: f64,
    /// Short blurb shown on the detail page.
    pub description: String,
    /// Location of the playable build, if one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_url: Option<String>,
    /// Highlighted in the hero banner.
    #[serde(default)]
    pub featured: bool,
}

impl Game {
    /// Rough count of people currently playing, derived from lifetime plays.
    pub fn active_players(&self) -> u64 {
        self.plays / 10
    }

    /// Whether the game can be launched from the detail page.
    pub fn is_playable(&self) -> bool {
        self.game_url.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_names_parse_case_insensitively() {
        assert_eq!("racing".parse::<Category>().unwrap(), Category::Racing);
        assert_eq!(" Shooter ".parse::<Category>().unwrap(), Category::Shooter);
        assert!("Horror".parse::<Category>().is_err());
    }

    #[test]
    fn filter_parses_all_sentinel() {
        assert_eq!("All".parse::<CategoryFilter>().unwrap(), CategoryFilter::All);
        assert_eq!(
            "Puzzle".parse::<CategoryFilter>().unwrap(),
            CategoryFilter::Only(Category::Puzzle)
        );
        assert!(matches!(
            "Unknown".parse::<CategoryFilter>(),
            Err(CatalogError::UnknownCategory(name)) if name == "Unknown"
        ));
    }

    #[test]
    fn filter_options_start_with_all() {
        let options = CategoryFilter::options();
        assert_eq!(options.len(), 8);
        assert_eq!(options[0], CategoryFilter::All);
        assert_eq!(options[1], CategoryFilter::Only(Category::Action));
        assert_eq!(options[7], CategoryFilter::Only(Category::Strategy));
    }

    #[test]
    fn filter_cycle_wraps() {
        assert_eq!(
            CategoryFilter::All.cycle(-1),
            CategoryFilter::Only(Category::Strategy)
        );
        assert_eq!(
            CategoryFilter::Only(Category::Strategy).cycle(1),
            CategoryFilter::All
        );
        assert_eq!(
            CategoryFilter::All.cycle(2),
            CategoryFilter::Only(Category::Adventure)
        );
    }

    #[test]
    fn game_deserializes_camel_case_with_defaults() {
        let game: Game = serde_json::from_str(
            r#"{
                "id": "9",
                "title": "Tile Drop",
                "thumbnail": "https://example.com/tile.png",
                "category": "Puzzle",
                "plays": 1234,
                "rating": 4.1,
                "description": "Stack the tiles.",
                "gameUrl": "/games/tile-drop"
            }"#,
        )
        .unwrap();
        assert_eq!(game.category, Category::Puzzle);
        assert_eq!(game.game_url.as_deref(), Some("/games/tile-drop"));
        assert!(!game.featured);
        assert!(game.is_playable());
        assert_eq!(game.active_players(), 123);
    }
}
