use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::RecipeSource;
use crate::model::{MealRecord, RawRecipe};
use crate::RecommendError;

type CacheMap = BTreeMap<String, Vec<MealRecord>>;

/// Wraps a source with a JSON file cache keyed by ingredient.
///
/// Only non-empty results are stored, so an outage of the inner source is
/// never cached as "no recipes". Cached records are validated on the way out
/// exactly like records fresh from TheMealDB.
pub struct CachedSource<S> {
    inner: S,
    path: PathBuf,
}

impl<S: RecipeSource> CachedSource<S> {
    pub fn new(inner: S, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> CacheMap {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return CacheMap::new(),
            Err(e) => {
                warn!("Could not read cache {}: {}", self.path.display(), e);
                return CacheMap::new();
            }
        };

        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!("Ignoring corrupt cache {}: {}", self.path.display(), e);
            CacheMap::new()
        })
    }

    async fn store(&self, cache: &CacheMap) -> Result<(), RecommendError> {
        let content = serde_json::to_string_pretty(cache)?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

fn cache_key(ingredient: &str) -> String {
    ingredient.trim().to_lowercase()
}

#[async_trait]
impl<S: RecipeSource> RecipeSource for CachedSource<S> {
    fn source_name(&self) -> &str {
        "cache"
    }

    async fn fetch(&self, ingredient: &str) -> Result<Vec<RawRecipe>, RecommendError> {
        let key = cache_key(ingredient);
        if key.is_empty() {
            return Ok(Vec::new());
        }

        let mut cache = self.load().await;
        if let Some(records) = cache.get(&key) {
            info!("Using cached data for ingredient: {}", key);
            return records.iter().cloned().map(RawRecipe::try_from).collect();
        }

        debug!(
            "Cache miss for '{}', asking {}",
            key,
            self.inner.source_name()
        );
        let recipes = self.inner.fetch(&key).await?;
        if !recipes.is_empty() {
            let records = recipes.iter().cloned().map(MealRecord::from).collect();
            cache.insert(key, records);
            match self.store(&cache).await {
                Ok(()) => info!("Cache saved to {}", self.path.display()),
                Err(e) => warn!("Could not save cache {}: {}", self.path.display(), e),
            }
        }

        Ok(recipes)
    }
}
