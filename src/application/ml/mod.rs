pub mod feature_builder;
pub mod trend_classifier;

pub use feature_builder::build_training_set;
pub use trend_classifier::{ClassifierState, MIN_TRAINING_ROWS, TrendClassifierService};
