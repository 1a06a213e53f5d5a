pub mod engine;
pub mod metrics;
pub mod ordering;
pub mod params;

pub use engine::{Search, SearchResult};
pub use metrics::SearchMetrics;
pub use params::{Difficulty, SearchParams};
