pub mod analyzer;
pub mod classifier;
pub mod recommender;
pub mod tier;
pub mod types;
pub mod utils;
pub mod validation;

pub use analyzer::DatasetAnalyzer;
pub use classifier::{classify_column, profile_dataset};
pub use recommender::recommend;
pub use tier::select_tier;
pub use validation::{duplicate_warning, find_duplicate, validate};
