//! Libellés affichés dans l'arbre de navigation

use crate::category::Category;

/// Title and subtitle of a root category node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootLabel {
    pub title: String,
    pub subtitle: String,
}

impl RootLabel {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
        }
    }
}

/// Display strings used when synthesizing nodes.
///
/// Entity rows without an explicit subtitle show `"<n> <tracks_suffix>"`,
/// where `n` never counts the shuffle entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryLabels {
    pub recent: RootLabel,
    pub playlists: RootLabel,
    pub albums: RootLabel,
    pub artists: RootLabel,
    pub shuffle_title: String,
    pub shuffle_subtitle: String,
    pub tracks_suffix: String,
}

impl Default for LibraryLabels {
    fn default() -> Self {
        Self {
            recent: RootLabel::new("Recent", "Recently played tracks"),
            playlists: RootLabel::new("Playlists", "Your playlists"),
            albums: RootLabel::new("Albums", "All albums"),
            artists: RootLabel::new("Artists", "All artists"),
            shuffle_title: "🔀 Shuffle play".to_string(),
            shuffle_subtitle: "Shuffle".to_string(),
            tracks_suffix: "tracks".to_string(),
        }
    }
}

impl LibraryLabels {
    pub fn root(&self, category: Category) -> &RootLabel {
        match category {
            Category::Recent => &self.recent,
            Category::Playlists => &self.playlists,
            Category::Albums => &self.albums,
            Category::Artists => &self.artists,
        }
    }

    pub fn root_mut(&mut self, category: Category) -> &mut RootLabel {
        match category {
            Category::Recent => &mut self.recent,
            Category::Playlists => &mut self.playlists,
            Category::Albums => &mut self.albums,
            Category::Artists => &mut self.artists,
        }
    }

    /// Computed subtitle for an entity holding `count` tracks.
    pub fn track_count(&self, count: usize) -> String {
        format!("{} {}", count, self.tracks_suffix)
    }
}
