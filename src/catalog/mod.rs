//! Catalog sources
//!
//! Loading never fails: an absent, unreadable, malformed or empty catalog
//! file is replaced by the built-in sample catalog, so pricing always gets a
//! usable item list.

mod sample;

pub use sample::sample_catalog;

use async_trait::async_trait;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::error::CatalogError;
use crate::types::Item;

/// Read-only provider of catalog items
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Get the source name (used in logs)
    fn name(&self) -> &'static str;

    /// Load the full item list. Must return a non-empty list.
    async fn load(&self) -> Vec<Item>;
}

/// Catalog stored as a JSON array of items on disk
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and decode the file, dropping records that break item invariants
    async fn read_items(&self) -> Result<Vec<Item>, CatalogError> {
        let json = tokio::fs::read(&self.path).await?;
        let items: Option<Vec<Item>> = serde_json::from_slice(&json)?;

        // first record wins when an id repeats
        let mut seen = HashSet::new();
        let valid = items
            .unwrap_or_default()
            .into_iter()
            .filter(|item| match item.validate() {
                Ok(()) if seen.insert(item.id) => true,
                Ok(()) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        id = item.id,
                        name = %item.name,
                        "Skipping duplicate catalog item id"
                    );
                    false
                }
                Err(reason) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        id = item.id,
                        reason = %reason,
                        "Skipping invalid catalog item"
                    );
                    false
                }
            })
            .collect();

        Ok(valid)
    }
}

#[async_trait]
impl CatalogSource for JsonFileCatalog {
    fn name(&self) -> &'static str {
        "json_file"
    }

    async fn load(&self) -> Vec<Item> {
        if !tokio::fs::try_exists(&self.path).await.unwrap_or(false) {
            tracing::info!(path = %self.path.display(), "Catalog file not found, serving sample catalog");
            return sample_catalog();
        }

        match self.read_items().await {
            Ok(items) if !items.is_empty() => items,
            Ok(_) => {
                tracing::warn!(path = %self.path.display(), "Catalog file has no usable items, serving sample catalog");
                sample_catalog()
            }
            Err(e) => {
                tracing::error!(path = %self.path.display(), error = %e, "Error loading catalog, serving sample catalog");
                sample_catalog()
            }
        }
    }
}

/// Fixed in-memory catalog
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    items: Vec<Item>,
}

impl StaticCatalog {
    /// An empty list is replaced by the sample catalog
    pub fn new(items: Vec<Item>) -> Self {
        let items = if items.is_empty() {
            sample_catalog()
        } else {
            items
        };
        Self { items }
    }
}

#[async_trait]
impl CatalogSource for StaticCatalog {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn load(&self) -> Vec<Item> {
        self.items.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn temp_catalog(test_name: &str, contents: &str) -> JsonFileCatalog {
        let path = std::env::temp_dir().join(format!(
            "goldcatalog-{}-{}.json",
            test_name,
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        JsonFileCatalog::new(path)
    }

    #[tokio::test]
    async fn test_loads_items_from_file() {
        let catalog = temp_catalog(
            "valid",
            r#"[
                {"id": 10, "name": "Solitaire", "popularityScore": 0.4, "weight": 1.2,
                 "images": {"yellow": "y", "rose": "r", "white": "w"}},
                {"id": 11, "name": "Halo", "popularityScore": 0.6, "weight": 2}
            ]"#,
        );

        let items = catalog.load().await;
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, 10);
        assert_eq!(items[0].weight, dec!(1.2));
        assert_eq!(items[1].images.yellow, "");

        let _ = std::fs::remove_file(catalog.path());
    }

    #[tokio::test]
    async fn test_duplicate_ids_keep_first_record() {
        let catalog = temp_catalog(
            "duplicates",
            r#"[
                {"id": 10, "name": "Solitaire", "popularityScore": 0.4, "weight": 1.2},
                {"id": 11, "name": "Halo", "popularityScore": 0.6, "weight": 2},
                {"id": 10, "name": "Solitaire Copy", "popularityScore": 0.9, "weight": 3}
            ]"#,
        );

        let items = catalog.load().await;
        assert_eq!(items.iter().map(|i| i.id).collect::<Vec<_>>(), vec![10, 11]);
        assert_eq!(items[0].name, "Solitaire");

        let _ = std::fs::remove_file(catalog.path());
    }

    #[tokio::test]
    async fn test_missing_file_serves_sample() {
        let catalog = JsonFileCatalog::new("/nonexistent/goldcatalog/products.json");
        assert_eq!(catalog.load().await, sample_catalog());
    }

    #[tokio::test]
    async fn test_malformed_file_serves_sample() {
        let catalog = temp_catalog("malformed", "{ this is not a catalog");
        assert_eq!(catalog.load().await, sample_catalog());
        let _ = std::fs::remove_file(catalog.path());
    }

    #[tokio::test]
    async fn test_empty_or_null_file_serves_sample() {
        let empty = temp_catalog("empty", "[]");
        assert_eq!(empty.load().await, sample_catalog());
        let _ = std::fs::remove_file(empty.path());

        let null = temp_catalog("null", "null");
        assert_eq!(null.load().await, sample_catalog());
        let _ = std::fs::remove_file(null.path());
    }

    #[tokio::test]
    async fn test_invalid_records_are_dropped() {
        let catalog = temp_catalog(
            "partial",
            r#"[
                {"id": 1, "name": "Ok", "popularityScore": 0.4, "weight": 1.2},
                {"id": 2, "name": "", "popularityScore": 0.4, "weight": 1.2},
                {"id": 3, "name": "Heavy?", "popularityScore": 0.4, "weight": 0},
                {"id": 4, "name": "Too popular", "popularityScore": 1.5, "weight": 1}
            ]"#,
        );

        let items = catalog.load().await;
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, 1);
        let _ = std::fs::remove_file(catalog.path());
    }

    #[tokio::test]
    async fn test_static_catalog_never_empty() {
        assert_eq!(StaticCatalog::new(Vec::new()).load().await, sample_catalog());

        let one = sample_catalog().into_iter().take(1).collect::<Vec<_>>();
        assert_eq!(StaticCatalog::new(one.clone()).load().await, one);
    }
}
