use std::{collections::HashSet, fs, path::PathBuf};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use tracing::info;

use crate::{
    error::CatalogError,
    models::{Category, Game},
};

/// Provides the sequence of games the store is built from.
pub trait GameSource: Send + Sync {
    /// Produce the full catalog in display order.
    fn load(&self) -> Result<Vec<Game>>;

    /// Short description used in logs and the status bar.
    fn describe(&self) -> String;
}

/// The catalog compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinSource;

impl GameSource for BuiltinSource {
    fn load(&self) -> Result<Vec<Game>> {
        Ok(BUILTIN_GAMES.clone())
    }

    fn describe(&self) -> String {
        "built-in catalog".to_string()
    }
}

/// Reads a JSON array of game records from disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Build a source reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the catalog file.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl GameSource for JsonFileSource {
    fn load(&self) -> Result<Vec<Game>> {
        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read catalog {}", self.path.display()))?;
        let games: Vec<Game> = serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse catalog {}", self.path.display()))?;
        info!(path = %self.path.display(), total = games.len(), "Catalog file read");
        Ok(games)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Reject catalogs with duplicate ids or ratings outside 0.0..=5.0.
pub fn validate_catalog(games: &[Game]) -> Result<(), CatalogError> {
    let mut seen = HashSet::with_capacity(games.len());
    for game in games {
        if !seen.insert(game.id.as_str()) {
            return Err(CatalogError::DuplicateId(game.id.clone()));
        }
        if !(0.0..=5.0).contains(&game.rating) {
            return Err(CatalogError::RatingOutOfRange {
                id: game.id.clone(),
                rating: game.rating,
            });
        }
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn game(
    id: &str,
    title: &str,
    thumbnail: &str,
    category: Category,
    plays: u64,
    rating: f64,
    description: &str,
    slug: &str,
    featured: bool,
) -> Game {
    Game {
        id: id.to_string(),
        title: title.to_string(),
        thumbnail: format!("https://images.unsplash.com/{thumbnail}?w=300&h=200&fit=crop"),
        category,
        plays,
        rating,
        description: description.to_string(),
        game_url: Some(format!("/games/{slug}")),
        featured,
    }
}

static BUILTIN_GAMES: Lazy<Vec<Game>> = Lazy::new(|| {
    vec![
        game(
            "1",
            "Epic Quest",
            "photo-1542751371-adc38448a05e",
            Category::Adventure,
            12_543,
            4.8,
            "Embark on an epic adventure through mystical lands filled with treasures and dangers.",
            "epic-quest",
            true,
        ),
        game(
            "2",
            "Speed Racer",
            "photo-1558618666-fcd25c85cd64",
            Category::Racing,
            8_921,
            4.5,
            "High-speed racing action with customizable cars and challenging tracks.",
            "speed-racer",
            false,
        ),
        game(
            "3",
            "Puzzle Master",
            "photo-1606092195730-5d7b9af1efc5",
            Category::Puzzle,
            15_632,
            4.7,
            "Challenge your mind with hundreds of creative puzzles and brain teasers.",
            "puzzle-master",
            false,
        ),
        game(
            "4",
            "Space Shooter",
            "photo-1614732414444-096e5f1122d5",
            Category::Shooter,
            22_108,
            4.6,
            "Defend Earth from alien invasion in this action-packed space shooter.",
            "space-shooter",
            true,
        ),
        game(
            "5",
            "Football Pro",
            "photo-1431324155629-1a6deb1dec8d",
            Category::Sports,
            7_845,
            4.3,
            "Experience realistic football gameplay with advanced AI and stunning graphics.",
            "football-pro",
            false,
        ),
        game(
            "6",
            "Castle Defense",
            "photo-1578662996442-48f60103fc96",
            Category::Strategy,
            11_267,
            4.9,
            "Build and defend your castle against waves of enemies in this strategic tower defense game.",
            "castle-defense",
            false,
        ),
        game(
            "7",
            "Ninja Strike",
            "photo-1551103782-8ab07afd45c1",
            Category::Action,
            18_493,
            4.4,
            "Master the art of stealth and combat as a deadly ninja warrior.",
            "ninja-strike",
            true,
        ),
        game(
            "8",
            "Ocean Explorer",
            "photo-1559827260-dc66d52bef19",
            Category::Adventure,
            9_876,
            4.5,
            "Dive deep into the ocean and discover hidden treasures and mysterious creatures.",
            "ocean-explorer",
            false,
        ),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn builtin_catalog_is_valid() -> Result<()> {
        let games = BuiltinSource.load()?;
        assert_eq!(games.len(), 8);
        validate_catalog(&games)?;
        assert_eq!(games[0].title, "Epic Quest");
        assert_eq!(
            games[3].thumbnail,
            "https://images.unsplash.com/photo-1614732414444-096e5f1122d5?w=300&h=200&fit=crop"
        );
        let featured: Vec<_> = games
            .iter()
            .filter(|game| game.featured)
            .map(|game| game.id.as_str())
            .collect();
        assert_eq!(featured, ["1", "4", "7"]);
        Ok(())
    }

    #[test]
    fn reads_catalog_from_json_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("catalog.json");
        fs::write(
            &path,
            r#"[
  {"id": "a", "title": "Alpha", "thumbnail": "a.png", "category": "Action",
   "plays": 10, "rating": 3.5, "description": "First"},
  {"id": "b", "title": "Beta", "thumbnail": "b.png", "category": "Sports",
   "plays": 20, "rating": 4.0, "description": "Second", "featured": true}
]"#,
        )?;

        let source = JsonFileSource::new(&path);
        let games = source.load()?;
        assert_eq!(games.len(), 2);
        assert_eq!(games[1].category, Category::Sports);
        assert!(games[1].featured);
        assert!(games[0].game_url.is_none());
        assert_eq!(source.describe(), path.display().to_string());
        Ok(())
    }

    #[test]
    fn missing_catalog_file_reports_path() {
        let err = JsonFileSource::new("/nonexistent/catalog.json")
            .load()
            .unwrap_err();
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }

    #[test]
    fn validation_rejects_duplicates_and_bad_ratings() -> Result<()> {
        let mut games = BuiltinSource.load()?;
        games[1].id = "1".to_string();
        assert_eq!(
            validate_catalog(&games),
            Err(CatalogError::DuplicateId("1".to_string()))
        );

        let mut games = BuiltinSource.load()?;
        games[2].rating = 5.5;
        assert!(matches!(
            validate_catalog(&games),
            Err(CatalogError::RatingOutOfRange { id, .. }) if id == "3"
        ));

        games[2].rating = f64::NAN;
        assert!(validate_catalog(&games).is_err());
        Ok(())
    }
}
