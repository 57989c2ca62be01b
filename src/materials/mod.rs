//! # Materials Module
//!
//! Material properties for the calculator: the `materials.json` cache, the
//! language-model analyzer and its deterministic offline fallback.

pub mod analyzer;
pub mod cache;
pub mod errors;
pub mod fallback;
pub mod openai;
pub mod record;

use std::sync::Arc;

pub use analyzer::{MaterialAnalyzer, MaterialService};
pub use cache::MaterialCache;
pub use errors::{MaterialError, MaterialResult};
pub use fallback::{fallback_material, HeuristicAnalyzer};
pub use openai::{OpenAiAnalyzer, OpenAiConfig};
pub use record::{MaterialRecord, DEFAULT_MACHINABILITY};

/// Pick the analyzer: the model when an API key is configured, else heuristics
pub fn analyzer_for(openai: Option<&OpenAiConfig>) -> MaterialResult<Arc<dyn MaterialAnalyzer>> {
    match openai {
        Some(config) => Ok(Arc::new(OpenAiAnalyzer::new(config.clone())?)),
        None => Ok(Arc::new(HeuristicAnalyzer)),
    }
}
