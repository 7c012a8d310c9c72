pub mod artifact;
pub mod feature_registry;
pub mod logistic;
pub mod scaler;

pub use artifact::ModelArtifact;
pub use feature_registry::{FEATURE_NAMES, FeatureRow, TrainingSet};
