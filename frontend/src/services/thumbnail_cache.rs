//! Session cache of resolved board thumbnail URLs.
//!
//! Board items carry a storage key that has to be turned into a displayable
//! URL. The first lookup of a key goes to the injected resolver and the
//! result is kept for the lifetime of the cache; there is no eviction.
//! Failed resolutions are not cached, so a later lookup tries again.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, warn};
use std::collections::HashMap;

/// Turns a storage key into a displayable URL
#[async_trait]
pub trait ThumbnailResolver: Send + Sync {
    async fn resolve(&self, storage_key: &str) -> Result<String>;
}

#[derive(Debug, Clone, Default)]
pub struct ThumbnailCache {
    urls: HashMap<String, String>,
}

impl ThumbnailCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, storage_key: &str) -> Option<&str> {
        self.urls.get(storage_key).map(String::as_str)
    }

    pub fn insert(&mut self, storage_key: impl Into<String>, url: impl Into<String>) {
        self.urls.insert(storage_key.into(), url.into());
    }

    /// Cached URL for `storage_key`, resolving and storing it on first use
    pub async fn get_or_fetch(
        &mut self,
        storage_key: &str,
        resolver: &dyn ThumbnailResolver,
    ) -> Option<String> {
        if let Some(url) = self.urls.get(storage_key) {
            return Some(url.clone());
        }

        match resolver.resolve(storage_key).await {
            Ok(url) => {
                debug!("Resolved thumbnail {}", storage_key);
                self.urls.insert(storage_key.to_string(), url.clone());
                Some(url)
            }
            Err(e) => {
                warn!("⚠️ Could not resolve thumbnail {}: {}", storage_key, e);
                None
            }
        }
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}
