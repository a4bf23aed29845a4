use crate::services::analyzer::{self, QueryAnalysis};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Cache entry for analyzed queries
struct CacheEntry {
    analysis: QueryAnalysis,
    timestamp: Instant,
}

/// Service wrapping the pure query analyzer with a TTL cache.
///
/// The analyzer itself is deterministic and stateless, so caching is purely
/// a latency optimization for repeated queries; cached and fresh results
/// are identical.
#[derive(Clone)]
pub struct QueryAnalyzerService {
    /// Cache for analyzed queries to avoid repeated processing
    cache: Arc<RwLock<HashMap<String, CacheEntry>>>,
    /// Cache TTL in seconds
    cache_ttl: Duration,
}

impl QueryAnalyzerService {
    /// Create a new QueryAnalyzerService with default settings
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: Duration::from_secs(3600), // 1 hour cache
        }
    }

    /// Create a new QueryAnalyzerService with custom cache TTL
    pub fn with_ttl(cache_ttl_seconds: u64) -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
            cache_ttl: Duration::from_secs(cache_ttl_seconds),
        }
    }

    /// Analyze a user query, serving repeated queries from the cache.
    pub fn analyze(&self, query: &str) -> QueryAnalysis {
        let query_trimmed = query.trim();

        // Check cache first
        if let Ok(cache) = self.cache.read() {
            if let Some(entry) = cache.get(query_trimmed) {
                if entry.timestamp.elapsed() < self.cache_ttl {
                    debug!("Cache HIT for query analysis: '{}'", query_trimmed);
                    return entry.analysis.clone();
                }
            }
        }

        info!(
            "Cache MISS for query analysis: '{}' - running analyzer",
            query_trimmed
        );

        let analysis = analyzer::analyze(query_trimmed);

        self.log_analysis(&analysis);

        // Update cache
        if let Ok(mut cache) = self.cache.write() {
            cache.insert(
                query_trimmed.to_string(),
                CacheEntry {
                    analysis: analysis.clone(),
                    timestamp: Instant::now(),
                },
            );

            // Cleanup old entries if cache is too large
            if cache.len() > 1000 {
                self.cleanup_cache(&mut cache);
            }
        }

        analysis
    }

    /// Log analysis results for debugging
    fn log_analysis(&self, analysis: &QueryAnalysis) {
        info!("Query Analysis Results:");
        info!("  Intent: {:?} ({:.2})", analysis.intent.intent_type, analysis.intent.confidence);

        if analysis.did_correct {
            info!(
                "  Corrected: '{}' -> '{}'",
                analysis.original_query, analysis.corrected_query
            );
        }

        if let Some(brand) = &analysis.entities.brand {
            info!("  Brand: {} ({:?})", brand, analysis.entities.brand_category);
        }

        if let Some(range) = &analysis.entities.price_range {
            info!(
                "  Price range: min={:?} max={:?} ('{}')",
                range.min, range.max, range.mentioned
            );
        }

        if let Some(location) = &analysis.entities.location {
            info!("  Location: {}", location);
        }

        debug!("  Expanded queries: {:?}", analysis.expanded_queries);
    }

    /// Clean up expired cache entries
    fn cleanup_cache(&self, cache: &mut HashMap<String, CacheEntry>) {
        let expired_keys: Vec<String> = cache
            .iter()
            .filter(|(_, entry)| entry.timestamp.elapsed() > self.cache_ttl)
            .map(|(k, _)| k.clone())
            .collect();

        for key in expired_keys {
            cache.remove(&key);
        }

        info!(
            "Cleaned up query analysis cache, remaining entries: {}",
            cache.len()
        );
    }

    /// Get cache statistics for monitoring
    pub fn cache_stats(&self) -> Option<CacheStats> {
        if let Ok(cache) = self.cache.read() {
            let valid_entries = cache
                .values()
                .filter(|entry| entry.timestamp.elapsed() < self.cache_ttl)
                .count();

            Some(CacheStats {
                total_entries: cache.len(),
                valid_entries,
                expired_entries: cache.len() - valid_entries,
            })
        } else {
            None
        }
    }

    /// Clear the cache (useful for testing or manual cache management)
    pub fn clear_cache(&self) {
        if let Ok(mut cache) = self.cache.write() {
            cache.clear();
            info!("Query analysis cache cleared");
        }
    }
}

impl Default for QueryAnalyzerService {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about the query analysis cache
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub total_entries: usize,
    pub valid_entries: usize,
    pub expired_entries: usize,
}
