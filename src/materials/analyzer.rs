//! # Material Analysis
//!
//! `MaterialService` answers "what are the machining properties of X":
//! cache first, then the configured analyzer. The analyzer result is cached
//! unconditionally, including heuristic fallbacks.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use super::cache::MaterialCache;
use super::errors::MaterialResult;
use super::record::MaterialRecord;

/// Source of material properties on a cache miss
///
/// Implementations never fail: a broken upstream degrades to the heuristic
/// record inside the implementation.
#[async_trait]
pub trait MaterialAnalyzer: Send + Sync {
    /// Short tag for logs
    fn source(&self) -> &'static str;

    async fn analyze(&self, material_name: &str) -> MaterialRecord;
}

/// Cache-backed material lookup
#[derive(Clone)]
pub struct MaterialService {
    cache: MaterialCache,
    analyzer: Arc<dyn MaterialAnalyzer>,
}

impl MaterialService {
    pub fn new(cache: MaterialCache, analyzer: Arc<dyn MaterialAnalyzer>) -> Self {
        Self { cache, analyzer }
    }

    pub fn analyzer_source(&self) -> &'static str {
        self.analyzer.source()
    }

    /// All cached records, ordered by cache key
    pub fn list(&self) -> BTreeMap<String, MaterialRecord> {
        self.cache.load_all()
    }

    /// Cached record, or analyze and cache
    pub async fn analyze_material(&self, material_name: &str) -> MaterialResult<MaterialRecord> {
        if let Some(record) = self.cache.get(material_name) {
            tracing::debug!(material = %material_name, "material cache hit");
            return Ok(record);
        }

        let record = self.analyzer.analyze(material_name).await;
        self.cache.save(material_name, &record)?;

        tracing::info!(
            material = %material_name,
            source = self.analyzer.source(),
            "material analysed and cached"
        );

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::fallback::fallback_material;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tempfile::TempDir;

    #[derive(Default)]
    struct CountingAnalyzer {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl MaterialAnalyzer for CountingAnalyzer {
        fn source(&self) -> &'static str {
            "counting"
        }

        async fn analyze(&self, material_name: &str) -> MaterialRecord {
            self.calls.fetch_add(1, Ordering::SeqCst);
            fallback_material(material_name)
        }
    }

    #[tokio::test]
    async fn test_miss_then_hit() {
        let temp = TempDir::new().unwrap();
        let analyzer = Arc::new(CountingAnalyzer::default());
        let service = MaterialService::new(MaterialCache::in_dir(temp.path()), analyzer.clone());

        let first = service.analyze_material("Титан ВТ6").await.unwrap();
        let second = service.analyze_material("титан вт6").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(service.list().len(), 1);
    }

    #[tokio::test]
    async fn test_cached_entry_skips_analyzer() {
        let temp = TempDir::new().unwrap();
        let cache = MaterialCache::in_dir(temp.path());
        let stored = MaterialRecord {
            name: "Бронза".to_string(),
            machinability_index: Some(0.9),
            ..Default::default()
        };
        cache.save("бронза", &stored).unwrap();

        let analyzer = Arc::new(CountingAnalyzer::default());
        let service = MaterialService::new(cache, analyzer.clone());

        let record = service.analyze_material("БРОНЗА").await.unwrap();
        assert_eq!(record, stored);
        assert_eq!(analyzer.calls.load(Ordering::SeqCst), 0);
    }
}
