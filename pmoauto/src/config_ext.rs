//! Extension de pmoconfig pour la session voiture

use crate::artwork::ArtworkOptions;
use anyhow::Result;
use pmoconfig::Config;
use std::time::Duration;

const ARTWORK: &[&str] = &["auto", "artwork"];

fn artwork_path(key: &str) -> [&str; 3] {
    [ARTWORK[0], ARTWORK[1], key]
}

/// Trait d'extension pour pmoconfig::Config
pub trait AutoConfigExt {
    /// Les pochettes sont-elles chargées pour la session ?
    fn get_artwork_enabled(&self) -> bool;

    fn set_artwork_enabled(&self, enabled: bool) -> Result<()>;

    /// Délai maximal d'un chargement de pochette
    fn get_artwork_timeout(&self) -> Duration;

    fn get_artwork_options(&self) -> ArtworkOptions;
}

impl AutoConfigExt for Config {
    fn get_artwork_enabled(&self) -> bool {
        self.get_bool_or(&artwork_path("enabled"), ArtworkOptions::default().enabled)
    }

    fn set_artwork_enabled(&self, enabled: bool) -> Result<()> {
        self.set_bool(&artwork_path("enabled"), enabled)
    }

    fn get_artwork_timeout(&self) -> Duration {
        let default = ArtworkOptions::default().timeout.as_secs();
        // 0 désactiverait tout chargement
        match self.get_u64_or(&artwork_path("timeout_secs"), default) {
            0 => Duration::from_secs(default),
            secs => Duration::from_secs(secs),
        }
    }

    fn get_artwork_options(&self) -> ArtworkOptions {
        ArtworkOptions {
            enabled: self.get_artwork_enabled(),
            timeout: self.get_artwork_timeout(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_artwork_defaults() {
        let options = Config::in_memory().get_artwork_options();
        assert_eq!(options, ArtworkOptions::default());
    }

    #[test]
    fn test_artwork_settings_from_yaml() {
        let config =
            Config::from_yaml_str("auto:\n  artwork:\n    enabled: false\n    timeout_secs: 3\n").unwrap();
        assert!(!config.get_artwork_enabled());
        assert_eq!(config.get_artwork_timeout(), Duration::from_secs(3));

        config.set_artwork_enabled(true).unwrap();
        assert!(config.get_artwork_enabled());
    }

    #[test]
    fn test_zero_timeout_falls_back() {
        let config = Config::from_yaml_str("auto:\n  artwork:\n    timeout_secs: 0\n").unwrap();
        assert_eq!(config.get_artwork_timeout(), Duration::from_secs(10));
    }
}
