//! LibraryIndex : point d'entrée de la navigation et de la recherche
//!
//! Readers clone the current `Arc<LibrarySnapshot>` under a short read lock
//! and work on it without holding the lock. A replace builds the next
//! snapshot off to the side and swaps the pointer, so every query observes
//! either the complete previous library or the complete new one.

use crate::category::{Category, ROOT_ID};
use crate::error::Result;
use crate::labels::LibraryLabels;
use crate::node::MediaNode;
use crate::parse::parse_library;
use crate::search;
use crate::snapshot::{LibrarySnapshot, LibraryStats};
use parking_lot::{Mutex, RwLock};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// In-memory index of the library pushed by the application.
///
/// # Examples
///
/// ```
/// use pmomedialib::LibraryIndex;
///
/// let index = LibraryIndex::new();
/// index
///     .replace_library(r#"{"playlists":[{"id":"p1","title":"Road Trip","items":[{"id":"t1","title":"Song A","artist":"X"}]}]}"#)
///     .unwrap();
///
/// let rows = index.list_children("playlists");
/// assert_eq!(rows[0].id, "playlist_p1");
/// assert_eq!(rows[0].subtitle.as_deref(), Some("1 tracks"));
///
/// let children: Vec<_> = index.list_children("playlist_p1").into_iter().map(|n| n.id).collect();
/// assert_eq!(children, ["shuffle_playlist_p1", "t1"]);
/// ```
#[derive(Debug)]
pub struct LibraryIndex {
    labels: LibraryLabels,
    root: Vec<MediaNode>,
    current: RwLock<Arc<LibrarySnapshot>>,
    // Sérialise les remplacements concurrents, les lecteurs ne le prennent jamais
    writer: Mutex<()>,
    update_id: AtomicU32,
}

impl Default for LibraryIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl LibraryIndex {
    /// Creates an empty index with the default labels.
    pub fn new() -> Self {
        Self::with_labels(LibraryLabels::default())
    }

    /// Creates an empty index displaying the given labels.
    pub fn with_labels(labels: LibraryLabels) -> Self {
        let root = Category::ALL
            .into_iter()
            .map(|category| MediaNode::category(category, labels.root(category)))
            .collect();
        Self {
            labels,
            root,
            current: RwLock::new(Arc::new(LibrarySnapshot::default())),
            writer: Mutex::new(()),
            update_id: AtomicU32::new(0),
        }
    }

    /// Media id of the browse root.
    pub fn root_id(&self) -> &'static str {
        ROOT_ID
    }

    pub fn labels(&self) -> &LibraryLabels {
        &self.labels
    }

    /// Current snapshot. The returned value stays valid, and unchanged,
    /// across later replaces.
    pub fn snapshot(&self) -> Arc<LibrarySnapshot> {
        self.current.read().clone()
    }

    /// Number of successful replaces since construction. Wraps on overflow.
    pub fn update_id(&self) -> u32 {
        self.update_id.load(Ordering::Acquire)
    }

    /// Replaces the categories present in `json`.
    ///
    /// Every present category is rebuilt from scratch; absent ones keep their
    /// current content. On error nothing is published.
    pub fn replace_library(&self, json: &str) -> Result<LibraryStats> {
        let _writer = self.writer.lock();
        let base = self.snapshot();

        let next = match parse_library(json, &self.labels, &base) {
            Ok(next) => next,
            Err(err) => {
                warn!(
                    category = ?err.category(),
                    field = ?err.field(),
                    error = %err,
                    "❌ Library rejected, keeping previous snapshot"
                );
                return Err(err);
            }
        };

        let stats = next.stats();
        *self.current.write() = Arc::new(next);
        let update_id = self
            .update_id
            .fetch_add(1, Ordering::AcqRel)
            .wrapping_add(1);

        info!(
            update_id,
            recent = stats.recent_tracks,
            playlists = stats.playlists,
            albums = stats.albums,
            artists = stats.artists,
            tracks = stats.indexed_tracks,
            "📚 Library updated"
        );
        Ok(stats)
    }

    /// Children of `node_id`, or an empty list when the id is unknown.
    ///
    /// Resolution order: the four category ids, the root token, then the
    /// `playlist_`, `album_` and `artist_` prefixes.
    pub fn list_children(&self, node_id: &str) -> Vec<MediaNode> {
        let snapshot = self.snapshot();

        let children = if let Some(category) = Category::from_root_id(node_id) {
            snapshot.listing(category).to_vec()
        } else if node_id == ROOT_ID {
            self.root.clone()
        } else if let Some((category, raw_id)) = Category::split_entity_id(node_id) {
            snapshot
                .entity_children(category, raw_id)
                .map(<[MediaNode]>::to_vec)
                .unwrap_or_default()
        } else {
            Vec::new()
        };

        debug!(node_id = %node_id, count = children.len(), "📂 list_children");
        children
    }

    /// Case-insensitive substring search over track titles and subtitles.
    pub fn search(&self, query: &str) -> Vec<MediaNode> {
        let results = search::search(&self.snapshot(), query);
        debug!(query = %query, count = results.len(), "🔍 search");
        results
    }

    /// First playable node (track or shuffle entry) carrying `media_id`, in search scan order.
    pub fn find_playable(&self, media_id: &str) -> Option<MediaNode> {
        self.snapshot()
            .leaves()
            .find(|node| node.is_playable() && node.id == media_id)
            .cloned()
    }

    pub fn stats(&self) -> LibraryStats {
        self.snapshot().stats()
    }
}
