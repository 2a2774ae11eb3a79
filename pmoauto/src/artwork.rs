//! Chargement asynchrone des pochettes
//!
//! Fetches run on the tokio runtime and report back through an
//! [`ArtworkFetched`] event. The service applies the event only if the url
//! still matches the current track, so a slow fetch for a previous track
//! never overwrites the artwork of the current one.

use crate::error::{AutoError, Result};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Source of artwork images, implemented by the application (HTTP client,
/// local cache, ...).
#[async_trait]
pub trait ArtworkLoader: Send + Sync {
    async fn load(&self, url: &str) -> Result<Vec<u8>>;
}

/// Completion event of an artwork fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkFetched {
    pub url: String,
    pub image: Arc<[u8]>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArtworkOptions {
    pub enabled: bool,
    pub timeout: Duration,
}

impl Default for ArtworkOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Loads `url` with `loader`, giving up after `timeout`.
pub async fn fetch(loader: &dyn ArtworkLoader, url: &str, timeout: Duration) -> Result<ArtworkFetched> {
    debug!(url = %url, "🖼️ Fetching artwork");
    let image = tokio::time::timeout(timeout, loader.load(url))
        .await
        .map_err(|_| AutoError::ArtworkTimeout {
            url: url.to_string(),
        })??;

    if image.is_empty() {
        return Err(AutoError::artwork(url, "empty image"));
    }

    Ok(ArtworkFetched {
        url: url.to_string(),
        image: image.into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<u8>);

    #[async_trait]
    impl ArtworkLoader for Fixed {
        async fn load(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    struct Stalled;

    #[async_trait]
    impl ArtworkLoader for Stalled {
        async fn load(&self, _url: &str) -> Result<Vec<u8>> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(vec![1])
        }
    }

    #[tokio::test]
    async fn test_fetch_wraps_image() {
        let fetched = fetch(&Fixed(vec![1, 2, 3]), "http://x/a.jpg", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(fetched.url, "http://x/a.jpg");
        assert_eq!(&*fetched.image, &[1, 2, 3]);
    }

    #[tokio::test]
    async fn test_empty_image_is_an_error() {
        let err = fetch(&Fixed(Vec::new()), "http://x/a.jpg", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, AutoError::Artwork { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let err = fetch(&Stalled, "http://x/slow.jpg", Duration::from_secs(5))
            .await
            .unwrap_err();
        assert!(matches!(err, AutoError::ArtworkTimeout { url } if url == "http://x/slow.jpg"));
    }
}
