//! Nœuds de l'arbre de navigation exposé à l'unité embarquée

use crate::category::Category;
use crate::labels::{LibraryLabels, RootLabel};
use serde::Serialize;

/// How a client may act on a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// Has children reachable through a follow-up listing request.
    Browsable,
    /// Leaf that can be handed to the playback layer directly.
    Playable,
}

/// Layout hint for the children of a node on the car display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStyle {
    List,
    Grid,
}

impl ContentStyle {
    /// Numeric value used by media browse clients.
    pub fn hint_value(self) -> i32 {
        match self {
            ContentStyle::List => 1,
            ContentStyle::Grid => 2,
        }
    }
}

/// Display hints attached to a browsable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleHints {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browsable: Option<ContentStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playable: Option<ContentStyle>,
}

/// Track-only metadata. Both fields default to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct TrackMetadata {
    pub artist: String,
    pub album: String,
}

/// A unit of the browse tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaNode {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Third display line; the album for tracks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artwork: Option<String>,
    pub kind: NodeKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleHints>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<TrackMetadata>,
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() { None } else { Some(value) }
}

impl MediaNode {
    /// Builds a playable track. The artist is shown as subtitle, the album as description.
    pub fn track(
        id: impl Into<String>,
        title: impl Into<String>,
        artist: impl Into<String>,
        album: impl Into<String>,
        artwork: impl Into<String>,
    ) -> Self {
        let artist = artist.into();
        let album = album.into();
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: Some(artist.clone()),
            description: non_empty(album.clone()),
            artwork: non_empty(artwork.into()),
            kind: NodeKind::Playable,
            style: None,
            extra: Some(TrackMetadata { artist, album }),
        }
    }

    /// Builds one of the four fixed category nodes listed under the root.
    pub fn category(category: Category, label: &RootLabel) -> Self {
        // Toutes les catégories affichent leurs sous-dossiers en grille
        let browsable = ContentStyle::Grid;
        let playable = match category {
            Category::Recent => ContentStyle::Grid,
            Category::Playlists | Category::Albums | Category::Artists => ContentStyle::List,
        };
        Self {
            id: category.root_id().to_string(),
            title: label.title.clone(),
            subtitle: Some(label.subtitle.clone()),
            description: None,
            artwork: None,
            kind: NodeKind::Browsable,
            style: Some(StyleHints {
                browsable: Some(browsable),
                playable: Some(playable),
            }),
            extra: None,
        }
    }

    /// Builds the browse row of a playlist, album or artist.
    pub fn entity(id: String, title: String, subtitle: String, artwork: Option<String>) -> Self {
        Self {
            id,
            title,
            subtitle: Some(subtitle),
            description: None,
            artwork,
            kind: NodeKind::Browsable,
            style: Some(StyleHints {
                browsable: None,
                playable: Some(ContentStyle::List),
            }),
            extra: None,
        }
    }

    /// Builds the synthetic "play in random order" entry of an entity.
    pub fn shuffle(entity_id: &str, artwork: Option<String>, labels: &LibraryLabels) -> Self {
        Self {
            id: format!("{}{}", crate::category::SHUFFLE_PREFIX, entity_id),
            title: labels.shuffle_title.clone(),
            subtitle: Some(labels.shuffle_subtitle.clone()),
            description: None,
            artwork,
            kind: NodeKind::Playable,
            style: None,
            extra: None,
        }
    }

    pub fn is_playable(&self) -> bool {
        matches!(self.kind, NodeKind::Playable)
    }

    pub fn is_browsable(&self) -> bool {
        matches!(self.kind, NodeKind::Browsable)
    }

    /// True for real tracks, false for category, entity and shuffle nodes.
    pub fn is_track(&self) -> bool {
        self.extra.is_some()
    }

    /// Artist of a track, `None` for other nodes.
    pub fn artist(&self) -> Option<&str> {
        self.extra.as_ref().map(|m| m.artist.as_str())
    }

    /// Album of a track, `None` for other nodes.
    pub fn album(&self) -> Option<&str> {
        self.extra.as_ref().map(|m| m.album.as_str())
    }
}
