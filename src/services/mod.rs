pub mod analyzer;
pub mod dictionaries;
pub mod query_analyzer;

// Re-export public types
pub use analyzer::{Intent, IntentType, QueryAnalysis, QueryEntity, SuggestedFilters};
pub use query_analyzer::QueryAnalyzerService;
