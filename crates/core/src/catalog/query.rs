use std::{cmp::Ordering, fmt};

use crate::models::{CategoryFilter, Game};

/// Ordering applied on the releases page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Higher numeric id first.
    #[default]
    Newest,
    /// Lower numeric id first.
    Oldest,
    /// Highest rating first.
    Rating,
    /// Most plays first.
    Plays,
    /// Title A to Z.
    Name,
}

impl SortKey {
    /// Every key in menu order.
    pub const ALL: [SortKey; 5] = [
        SortKey::Newest,
        SortKey::Oldest,
        SortKey::Rating,
        SortKey::Plays,
        SortKey::Name,
    ];

    /// Next key in menu order, wrapping.
    pub fn next(self) -> SortKey {
        let idx = Self::ALL.iter().position(|key| *key == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn compare(self, a: &Game, b: &Game) -> Ordering {
        match self {
            SortKey::Newest => compare_ids(b, a),
            SortKey::Oldest => compare_ids(a, b),
            SortKey::Rating => b.rating.total_cmp(&a.rating),
            SortKey::Plays => b.plays.cmp(&a.plays),
            SortKey::Name => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortKey::Newest => "Newest First",
            SortKey::Oldest => "Oldest First",
            SortKey::Rating => "Rating",
            SortKey::Plays => "Popularity",
            SortKey::Name => "Name",
        };
        f.write_str(label)
    }
}

/// Whether the sort key is applied as-is or reversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Reverse the key's natural comparison.
    Ascending,
    /// Use the key's natural comparison.
    #[default]
    Descending,
}

impl SortDirection {
    /// The other direction.
    pub fn toggled(self) -> SortDirection {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Ascending => f.write_str("Ascending"),
            SortDirection::Descending => f.write_str("Descending"),
        }
    }
}

/// Filter and sort settings for the releases page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseQuery {
    /// Category restriction.
    pub category: CategoryFilter,
    /// Case-insensitive text matched against title, description and category.
    pub search: String,
    /// Ordering key.
    pub sort: SortKey,
    /// Ordering direction.
    pub direction: SortDirection,
}

impl ReleaseQuery {
    /// True when neither a category nor a search term narrows the results.
    pub fn is_unfiltered(&self) -> bool {
        self.category == CategoryFilter::All && self.search.trim().is_empty()
    }

    /// Drop category and search restrictions, keeping the ordering.
    pub fn clear_filters(&mut self) {
        self.category = CategoryFilter::All;
        self.search.clear();
    }

    pub(crate) fn apply(&self, games: Vec<Game>) -> Vec<Game> {
        let needle = self.search.trim().to_lowercase();
        let mut matched: Vec<Game> = games
            .into_iter()
            .filter(|game| self.category.matches(game))
            .filter(|game| needle.is_empty() || search_matches(game, &needle))
            .collect();

        matched.sort_by(|a, b| {
            let ordering = self.sort.compare(a, b);
            match self.direction {
                SortDirection::Descending => ordering,
                SortDirection::Ascending => ordering.reverse(),
            }
        });
        matched
    }
}

fn search_matches(game: &Game, needle: &str) -> bool {
    game.title.to_lowercase().contains(needle)
        || game.description.to_lowercase().contains(needle)
        || game.category.name().to_lowercase().contains(needle)
}

// Ids that are not integers rank as older than any numeric id.
fn compare_ids(a: &Game, b: &Game) -> Ordering {
    release_position(a).cmp(&release_position(b))
}

fn release_position(game: &Game) -> Option<i64> {
    game.id.trim().parse().ok()
}
