pub mod derived;
pub mod features;
pub mod request;
pub mod response;

pub use derived::DerivedFeatures;
pub use features::{FeatureCategory, FeatureName, FeatureVector, FEATURE_COUNT};
pub use request::{ClassificationRequest, Hyperparameters, ModelSelection, ModelSelector};
pub use response::{ClassifierResponse, Prediction};
