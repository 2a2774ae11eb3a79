//! Instantané immuable de la bibliothèque
//!
//! A snapshot is never mutated once published. Each category section sits
//! behind its own `Arc`, so a replace that only touches playlists shares the
//! recent, album and artist sections with the previous snapshot.

use crate::category::Category;
use crate::node::MediaNode;
use indexmap::IndexMap;
use serde::Serialize;
use std::sync::Arc;

/// Rows and contents of one entity category (playlists, albums or artists).
#[derive(Debug, Clone, Default)]
pub struct EntityCatalog {
    rows: Vec<MediaNode>,
    contents: IndexMap<String, Vec<MediaNode>>,
}

impl EntityCatalog {
    /// Appends an entity row and stores its children under the raw id.
    ///
    /// A repeated raw id keeps its first position in the content map but
    /// takes the children of the latest entity.
    pub(crate) fn insert(&mut self, raw_id: String, row: MediaNode, children: Vec<MediaNode>) {
        self.rows.push(row);
        self.contents.insert(raw_id, children);
    }

    /// Browse rows in document order.
    pub fn rows(&self) -> &[MediaNode] {
        &self.rows
    }

    /// Children of an entity, shuffle entry first.
    pub fn children(&self, raw_id: &str) -> Option<&[MediaNode]> {
        self.contents.get(raw_id).map(Vec::as_slice)
    }

    /// Content lists in insertion order.
    pub fn contents(&self) -> impl Iterator<Item = (&str, &[MediaNode])> {
        self.contents.iter().map(|(id, nodes)| (id.as_str(), nodes.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn track_count(&self) -> usize {
        self.contents
            .values()
            .map(|nodes| nodes.iter().filter(|n| n.is_track()).count())
            .sum()
    }
}

/// Counters describing a snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryStats {
    pub recent_tracks: usize,
    pub playlists: usize,
    pub albums: usize,
    pub artists: usize,
    /// Tracks reachable by search, duplicates included.
    pub indexed_tracks: usize,
}

/// The complete library state at a point in time.
#[derive(Debug, Clone, Default)]
pub struct LibrarySnapshot {
    recent: Arc<Vec<MediaNode>>,
    playlists: Arc<EntityCatalog>,
    albums: Arc<EntityCatalog>,
    artists: Arc<EntityCatalog>,
}

impl LibrarySnapshot {
    pub(crate) fn set_recent(&mut self, tracks: Vec<MediaNode>) {
        self.recent = Arc::new(tracks);
    }

    /// No-op for [`Category::Recent`], which has no catalog.
    pub(crate) fn set_catalog(&mut self, category: Category, catalog: EntityCatalog) {
        let slot = match category {
            Category::Recent => return,
            Category::Playlists => &mut self.playlists,
            Category::Albums => &mut self.albums,
            Category::Artists => &mut self.artists,
        };
        *slot = Arc::new(catalog);
    }

    pub fn recent_tracks(&self) -> &[MediaNode] {
        &self.recent
    }

    /// Catalog of an entity category, `None` for recent tracks.
    pub fn catalog(&self, category: Category) -> Option<&EntityCatalog> {
        match category {
            Category::Recent => None,
            Category::Playlists => Some(&self.playlists),
            Category::Albums => Some(&self.albums),
            Category::Artists => Some(&self.artists),
        }
    }

    /// Children of a root category node.
    pub fn listing(&self, category: Category) -> &[MediaNode] {
        match self.catalog(category) {
            Some(catalog) => catalog.rows(),
            None => self.recent_tracks(),
        }
    }

    pub fn entity_children(&self, category: Category, raw_id: &str) -> Option<&[MediaNode]> {
        self.catalog(category).and_then(|catalog| catalog.children(raw_id))
    }

    /// Every leaf reachable below the categories, in scan order: recent
    /// tracks, then playlist, album and artist contents. Shuffle entries
    /// are included.
    pub fn leaves(&self) -> impl Iterator<Item = &MediaNode> {
        let entities = Category::ENTITIES
            .into_iter()
            .filter_map(move |category| self.catalog(category))
            .flat_map(|catalog| catalog.contents().flat_map(|(_, nodes)| nodes.iter()));
        self.recent.iter().chain(entities)
    }

    pub fn stats(&self) -> LibraryStats {
        LibraryStats {
            recent_tracks: self.recent.len(),
            playlists: self.playlists.len(),
            albums: self.albums.len(),
            artists: self.artists.len(),
            indexed_tracks: self.recent.len()
                + self.playlists.track_count()
                + self.albums.track_count()
                + self.artists.track_count(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.recent.is_empty()
            && self.playlists.is_empty()
            && self.albums.is_empty()
            && self.artists.is_empty()
    }

    /// True when both snapshots share the section of `category`.
    pub fn shares_category(&self, other: &LibrarySnapshot, category: Category) -> bool {
        match category {
            Category::Recent => Arc::ptr_eq(&self.recent, &other.recent),
            Category::Playlists => Arc::ptr_eq(&self.playlists, &other.playlists),
            Category::Albums => Arc::ptr_eq(&self.albums, &other.albums),
            Category::Artists => Arc::ptr_eq(&self.artists, &other.artists),
        }
    }
}
