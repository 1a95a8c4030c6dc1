//! Genre presets offered to the dashboard.

use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Genre {
    pub id: &'static str,
    pub name: &'static str,
    /// Search term sent to the catalog.
    pub query: &'static str,
}

pub const GENRES: &[Genre] = &[
    Genre {
        id: "all",
        name: "All genres",
        query: "top",
    },
    Genre {
        id: "pop",
        name: "Pop",
        query: "pop",
    },
    Genre {
        id: "rock",
        name: "Rock",
        query: "rock",
    },
    Genre {
        id: "rap",
        name: "Rap/Hip-Hop",
        query: "rap",
    },
    Genre {
        id: "electronic",
        name: "Electronic",
        query: "electronic",
    },
    Genre {
        id: "jazz",
        name: "Jazz",
        query: "jazz",
    },
    Genre {
        id: "classical",
        name: "Classical",
        query: "classical",
    },
    Genre {
        id: "rnb",
        name: "R&B",
        query: "rnb",
    },
];

/// Maps a genre id to its search query. Anything that is not a preset id is
/// used as a search term as-is.
pub fn resolve_query(term: &str) -> &str {
    GENRES
        .iter()
        .find(|g| g.id == term)
        .map(|g| g.query)
        .unwrap_or(term)
}
