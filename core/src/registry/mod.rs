pub mod aggregate;
pub mod analysis;
pub mod detection;
pub mod naming;
pub mod query;
pub mod store;

pub use aggregate::Stats;
pub use analysis::{Carousel, FollowUp, PlanetProfile, PlanetType};
pub use detection::{Classification, Detection, DetectionId};
pub use naming::NameGenerator;
pub use query::{ClassificationFilter, SortOrder, ViewFilter};
pub use store::PlanetRegistry;
