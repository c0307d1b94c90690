// Core pipeline exports
pub mod builder;
pub mod explain;
pub mod geo;
pub mod normalize;
pub mod scoring;

pub use builder::{CardBuilder, ExploreResult};
pub use explain::explain_match;
pub use geo::{calculate_bounding_box, haversine_distance};
pub use normalize::{derive_mode, normalize_row, parse_price};
pub use scoring::calculate_match_score;
