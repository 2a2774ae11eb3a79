//! Recherche plein texte sur les morceaux indexés
//!
//! Linear scan over every track of a snapshot. Libraries pushed by the app
//! are personal collections, small enough that no secondary index is kept.

use crate::node::MediaNode;
use crate::snapshot::LibrarySnapshot;

/// Tracks whose title or subtitle contains `query`, case-insensitively.
///
/// Results follow the scan order of [`LibrarySnapshot::leaves`] and are not
/// de-duplicated: a track listed in a playlist and in an album matches twice.
/// Entity rows and shuffle entries never match.
pub(crate) fn search(snapshot: &LibrarySnapshot, query: &str) -> Vec<MediaNode> {
    if query.is_empty() {
        return Vec::new();
    }
    let needle = query.to_lowercase();

    snapshot
        .leaves()
        .filter(|node| node.is_track() && matches(node, &needle))
        .cloned()
        .collect()
}

fn matches(node: &MediaNode, needle: &str) -> bool {
    contains(&node.title, needle)
        || node
            .subtitle
            .as_deref()
            .is_some_and(|subtitle| contains(subtitle, needle))
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
