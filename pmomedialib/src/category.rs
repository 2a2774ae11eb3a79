//! Catégories racine de l'arbre de navigation et leurs espaces de noms

use serde::Serialize;
use std::fmt;

/// Media id of the browse root.
pub const ROOT_ID: &str = "root";

/// Prefix prepended to an entity browse id to form its shuffle entry id.
pub const SHUFFLE_PREFIX: &str = "shuffle_";

/// One of the four fixed children of the browse root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Recent,
    Playlists,
    Albums,
    Artists,
}

impl Category {
    /// Root order, as listed under [`ROOT_ID`].
    pub const ALL: [Category; 4] = [
        Category::Recent,
        Category::Playlists,
        Category::Albums,
        Category::Artists,
    ];

    /// Categories whose rows are browsable entities, in prefix resolution order.
    pub const ENTITIES: [Category; 3] = [Category::Playlists, Category::Albums, Category::Artists];

    /// Media id of the category node under the root.
    pub fn root_id(self) -> &'static str {
        match self {
            Category::Recent => "recent",
            Category::Playlists => "playlists",
            Category::Albums => "albums",
            Category::Artists => "artists",
        }
    }

    /// Top-level field of the library document feeding this category.
    pub fn json_field(self) -> &'static str {
        match self {
            Category::Recent => "recentTracks",
            Category::Playlists => "playlists",
            Category::Albums => "albums",
            Category::Artists => "artists",
        }
    }

    /// Namespace tag prepended to raw entity ids. `None` for recent tracks,
    /// which are plain playable leaves.
    pub fn prefix(self) -> Option<&'static str> {
        match self {
            Category::Recent => None,
            Category::Playlists => Some("playlist_"),
            Category::Albums => Some("album_"),
            Category::Artists => Some("artist_"),
        }
    }

    /// Resolves one of the four fixed category ids.
    pub fn from_root_id(id: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.root_id() == id)
    }

    /// Browse id of an entity of this category.
    pub fn entity_id(self, raw_id: &str) -> String {
        format!("{}{}", self.prefix().unwrap_or_default(), raw_id)
    }

    /// Id of the synthetic shuffle entry of an entity of this category.
    pub fn shuffle_id(self, raw_id: &str) -> String {
        format!("{}{}", SHUFFLE_PREFIX, self.entity_id(raw_id))
    }

    /// Splits an entity browse id into its category and raw id.
    pub fn split_entity_id(id: &str) -> Option<(Category, &str)> {
        Category::ENTITIES.into_iter().find_map(|category| {
            category
                .prefix()
                .and_then(|prefix| id.strip_prefix(prefix))
                .map(|raw| (category, raw))
        })
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.json_field())
    }
}

/// Decodes a `shuffle_<prefix><rawId>` media id back to the entity it shuffles.
///
/// ```
/// use pmomedialib::{parse_shuffle_id, Category};
///
/// assert_eq!(parse_shuffle_id("shuffle_album_1"), Some((Category::Albums, "1")));
/// assert_eq!(parse_shuffle_id("album_1"), None);
/// ```
pub fn parse_shuffle_id(id: &str) -> Option<(Category, &str)> {
    id.strip_prefix(SHUFFLE_PREFIX)
        .and_then(Category::split_entity_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_ids_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_root_id(category.root_id()), Some(category));
        }
        assert_eq!(Category::from_root_id(ROOT_ID), None);
        assert_eq!(Category::from_root_id("Playlists"), None);
    }

    #[test]
    fn test_entity_ids_are_namespaced() {
        assert_eq!(Category::Playlists.entity_id("1"), "playlist_1");
        assert_eq!(Category::Albums.entity_id("1"), "album_1");
        assert_eq!(Category::Artists.shuffle_id("x"), "shuffle_artist_x");
        assert_eq!(Category::Recent.entity_id("t1"), "t1");
    }

    #[test]
    fn test_split_entity_id() {
        assert_eq!(Category::split_entity_id("artist_42"), Some((Category::Artists, "42")));
        // Un id brut peut lui-même contenir un préfixe
        assert_eq!(
            Category::split_entity_id("playlist_album_7"),
            Some((Category::Playlists, "album_7"))
        );
        assert_eq!(Category::split_entity_id("recent"), None);
    }

    #[test]
    fn test_parse_shuffle_id() {
        assert_eq!(
            parse_shuffle_id("shuffle_playlist_p1"),
            Some((Category::Playlists, "p1"))
        );
        assert_eq!(parse_shuffle_id("shuffle_recent"), None);
        assert_eq!(parse_shuffle_id("t1"), None);
    }
}
