// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    AiSignals, Availability, BoundingBox, Budget, GenderPreference, LocationFilter, Mode,
    NormalizedCard, PreferenceDraft, Pressure, ScoringWeights, TherapistCard, TherapistRow,
};
pub use requests::ExploreRequest;
pub use responses::{ErrorResponse, ExploreResponse, HealthResponse};
