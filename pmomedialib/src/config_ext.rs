//! Extension de pmoconfig pour les libellés de la bibliothèque

use crate::category::Category;
use crate::labels::{LibraryLabels, RootLabel};
use anyhow::Result;
use pmoconfig::Config;

const LABELS: &[&str] = &["library", "labels"];

/// Trait d'extension pour pmoconfig::Config
///
/// Missing keys fall back to [`LibraryLabels::default`].
pub trait MediaLibConfigExt {
    /// Libellés affichés dans l'arbre de navigation
    fn get_library_labels(&self) -> LibraryLabels;

    /// Modifie un libellé (`tracks_suffix`, `shuffle_title`, `albums_title`, ...)
    fn set_library_label(&self, key: &str, value: &str) -> Result<()>;
}

fn label_path(key: &str) -> [&str; 3] {
    [LABELS[0], LABELS[1], key]
}

impl MediaLibConfigExt for Config {
    fn get_library_labels(&self) -> LibraryLabels {
        let defaults = LibraryLabels::default();
        let get = |key: &str, default: &str| self.get_string_or(&label_path(key), default);

        let mut labels = LibraryLabels {
            shuffle_title: get("shuffle_title", &defaults.shuffle_title),
            shuffle_subtitle: get("shuffle_subtitle", &defaults.shuffle_subtitle),
            tracks_suffix: get("tracks_suffix", &defaults.tracks_suffix),
            ..defaults.clone()
        };

        for category in Category::ALL {
            let fallback = defaults.root(category);
            let key = category.root_id();
            *labels.root_mut(category) = RootLabel::new(
                get(&format!("{}_title", key), &fallback.title),
                get(&format!("{}_subtitle", key), &fallback.subtitle),
            );
        }

        labels
    }

    fn set_library_label(&self, key: &str, value: &str) -> Result<()> {
        self.set_string(&label_path(key), value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_from_yaml() {
        let config = Config::from_yaml_str(
            "library:\n  labels:\n    tracks_suffix: brani\n    artists_title: Artisti\n",
        )
        .unwrap();
        let labels = config.get_library_labels();
        assert_eq!(labels.tracks_suffix, "brani");
        assert_eq!(labels.artists.title, "Artisti");
        assert_eq!(labels.albums.title, "Albums");
    }

    #[test]
    fn test_defaults_match_embedded_config() {
        assert_eq!(Config::in_memory().get_library_labels(), LibraryLabels::default());
    }

    #[test]
    fn test_set_label() {
        let config = Config::in_memory();
        config.set_library_label("shuffle_subtitle", "Casuale").unwrap();
        assert_eq!(config.get_library_labels().shuffle_subtitle, "Casuale");
    }
}
