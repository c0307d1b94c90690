//! Serenity Algo - match-scoring service for the Serenity massage marketplace
//!
//! This library powers the Explore feed: it normalizes raw therapist rows,
//! scores them against a user's stated preferences with a weighted
//! heuristic, and generates a short natural-language explanation per card.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    calculate_match_score, explain_match, normalize_row, parse_price, CardBuilder, ExploreResult,
};
pub use crate::models::{
    ExploreRequest, ExploreResponse, NormalizedCard, PreferenceDraft, ScoringWeights,
    TherapistCard, TherapistRow,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        assert_eq!(parse_price("$85/hr"), Some(85.0));
        let weights = ScoringWeights::default();
        assert_eq!(weights.type_match, 0.30);
    }
}
