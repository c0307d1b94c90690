use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pressure level the user prefers during a session.
///
/// Collected by the onboarding quiz but not currently consulted by the
/// scorer (the factor historically labelled "pressure" compares session
/// mode instead — see [`crate::core::scoring`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pressure {
    Light,
    Medium,
    Firm,
}

/// Therapist-gender preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenderPreference {
    Male,
    Female,
    Any,
}

/// Session mode: incall (client travels) vs outcall (therapist travels).
///
/// `Any` only exists on the preference side; the normalizer always derives
/// a concrete incall/outcall mode for a therapist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Incall,
    Outcall,
    Any,
}

/// Booking-urgency window selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Availability {
    Now,
    Today,
    ThisWeek,
    Anytime,
}

impl Availability {
    /// Ordinal urgency rank: now > today > this-week > anytime.
    pub fn urgency_rank(self) -> u8 {
        match self {
            Self::Now => 4,
            Self::Today => 3,
            Self::ThisWeek => 2,
            Self::Anytime => 1,
        }
    }
}

/// Where the user is searching from and how far they will travel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationFilter {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "zipCode", default)]
    pub zip_code: Option<String>,
    #[serde(rename = "radiusKm")]
    pub radius_km: f64,
}

/// Hourly budget range in USD. `min <= max` is expected but not enforced;
/// a `max` of zero is treated as "no budget" by the scorer.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Budget {
    #[serde(default)]
    pub min: f64,
    #[serde(default)]
    pub max: f64,
}

/// Optional affinity hints produced by the quiz-analysis step.
///
/// Only `specialties` is consumed by the scorer; the service and mode maps
/// are accepted so stored signal payloads round-trip untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AiSignals {
    #[serde(default)]
    pub specialties: HashMap<String, f64>,
    #[serde(default)]
    pub services: HashMap<String, f64>,
    #[serde(default)]
    pub modes: HashMap<String, f64>,
}

/// The user's discovery filters, as captured by the Explore quiz.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferenceDraft {
    pub location: LocationFilter,
    #[serde(rename = "massageTypes", default)]
    pub massage_types: Vec<String>,
    pub pressure: Pressure,
    pub gender: GenderPreference,
    pub mode: Mode,
    pub availability: Availability,
    #[serde(default)]
    pub budget: Budget,
    // Collected by the quiz but not scored yet.
    #[serde(rename = "painPoints", default)]
    pub pain_points: Vec<String>,
    #[serde(rename = "aiSignals", default)]
    pub ai_signals: Option<AiSignals>,
}

/// Raw therapist record as returned by the backend. Read-only input to the
/// normalizer; never mutated here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistRow {
    pub id: String,
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    /// Distance from the viewer in meters, when the backend computed it.
    #[serde(default)]
    pub distance_m: Option<f64>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub rate_60: Option<String>,
    #[serde(default)]
    pub rate_90: Option<String>,
    #[serde(default)]
    pub rate_outcall: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub mobile_service_radius: Option<f64>,
    #[serde(default)]
    pub mobile_extras: Vec<String>,
    /// Free/busy text from the backend. Carried through but not consulted
    /// by the scorer.
    #[serde(default)]
    pub availability: Option<String>,
}

/// Display-ready projection of a [`TherapistRow`]. Recomputed per scoring
/// pass, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedCard {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub headline: String,
    /// Kilometers, rounded to 1 decimal. The rounded value is what the
    /// scorer consumes as well.
    #[serde(rename = "distanceKm")]
    pub distance_km: Option<f64>,
    pub rating: f64,
    #[serde(rename = "reviewCount")]
    pub review_count: u32,
    pub tags: Vec<String>,
    pub price: Option<f64>,
    #[serde(rename = "priceLabel")]
    pub price_label: String,
    pub verified: bool,
    pub mobile: bool,
    pub mode: Mode,
    /// Not populated from the row; always `Any`. Kept so the gender factor
    /// has something to compare against.
    pub gender: GenderPreference,
    pub specialties: Vec<String>,
    pub services: Vec<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Final card handed to the UI: the normalized projection plus the match
/// score and its explanation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TherapistCard {
    #[serde(flatten)]
    pub card: NormalizedCard,
    #[serde(rename = "matchScore")]
    pub match_score: u8,
    #[serde(rename = "aiExplanation")]
    pub ai_explanation: String,
}

/// Geospatial bounding box used to pre-filter backend queries.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// Weights for the six scoring factors. Must sum to 1.0 for the score to
/// span the full 0-100 range.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub type_match: f64,
    /// Historically labelled the "pressure" weight; it gates on session
    /// mode agreement, not pressure level.
    pub mode_agreement: f64,
    pub gender: f64,
    pub distance: f64,
    pub price: f64,
    pub availability: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            type_match: 0.30,
            mode_agreement: 0.20,
            gender: 0.15,
            distance: 0.15,
            price: 0.10,
            availability: 0.10,
        }
    }
}
