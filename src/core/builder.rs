use rand::Rng;

use crate::core::{explain::explain_match, normalize::normalize_row, scoring::calculate_match_score};
use crate::models::{NormalizedCard, PreferenceDraft, ScoringWeights, TherapistCard, TherapistRow};

/// Result of building an explore feed
#[derive(Debug)]
pub struct ExploreResult {
    pub cards: Vec<TherapistCard>,
    pub total_candidates: usize,
}

/// Card-assembly orchestrator
///
/// # Pipeline stages
/// 1. Normalize each raw row into a display card
/// 2. Score the card against the preference draft
/// 3. Apply display jitter and the score floor
/// 4. Generate the explanation line
/// 5. Rank and truncate
///
/// The jitter (uniform, up to +/- `jitter` points) and the floor are a
/// presentation choice applied only here; the scorer itself stays
/// deterministic so tests can pin exact values.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    weights: ScoringWeights,
    jitter: f64,
    score_floor: u8,
}

impl CardBuilder {
    pub fn new(weights: ScoringWeights, jitter: f64, score_floor: u8) -> Self {
        Self {
            weights,
            jitter,
            score_floor: score_floor.min(100),
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), 2.0, 60)
    }

    /// Build the scored, explained, ranked feed using thread-local
    /// randomness for the display jitter.
    pub fn build_cards(
        &self,
        prefs: &PreferenceDraft,
        rows: Vec<TherapistRow>,
        limit: usize,
    ) -> ExploreResult {
        self.build_cards_with_rng(prefs, rows, limit, &mut rand::thread_rng())
    }

    /// Build the feed with an injected randomness source so callers (and
    /// tests) can make the jitter reproducible.
    pub fn build_cards_with_rng<R: Rng>(
        &self,
        prefs: &PreferenceDraft,
        rows: Vec<TherapistRow>,
        limit: usize,
        rng: &mut R,
    ) -> ExploreResult {
        let total_candidates = rows.len();

        let mut cards: Vec<TherapistCard> = rows
            .iter()
            .map(|row| {
                let card = normalize_row(row);
                let match_score = self.displayed_score(prefs, &card, rng);
                let ai_explanation = explain_match(prefs, &card);
                TherapistCard {
                    card,
                    match_score,
                    ai_explanation,
                }
            })
            .collect();

        // Sort by score (descending) and then by distance (ascending);
        // cards without a distance rank last within a score band
        cards.sort_by(|a, b| {
            b.match_score.cmp(&a.match_score).then_with(|| {
                let da = a.card.distance_km.unwrap_or(f64::MAX);
                let db = b.card.distance_km.unwrap_or(f64::MAX);
                da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
            })
        });

        cards.truncate(limit);

        ExploreResult {
            cards,
            total_candidates,
        }
    }

    /// Pure score plus jitter, clamped to [floor, 100], then rounded.
    fn displayed_score<R: Rng>(
        &self,
        prefs: &PreferenceDraft,
        card: &NormalizedCard,
        rng: &mut R,
    ) -> u8 {
        let raw = calculate_match_score(prefs, card, &self.weights);
        let jitter = if self.jitter > 0.0 {
            rng.gen_range(-self.jitter..=self.jitter)
        } else {
            0.0
        };
        (raw + jitter).clamp(self.score_floor as f64, 100.0).round() as u8
    }
}

impl Default for CardBuilder {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Availability, Budget, GenderPreference, LocationFilter, Mode, Pressure,
    };
    use rand::{rngs::StdRng, SeedableRng};

    fn create_row(id: &str, distance_m: Option<f64>, rate: &str, specialty: &str) -> TherapistRow {
        TherapistRow {
            id: id.to_string(),
            slug: format!("therapist-{}", id),
            name: format!("Therapist {}", id),
            headline: Some("Relaxation first".to_string()),
            bio: None,
            latitude: Some(34.05),
            longitude: Some(-118.24),
            distance_m,
            specialties: vec![specialty.to_string()],
            services: vec![],
            rate_60: Some(rate.to_string()),
            rate_90: None,
            rate_outcall: None,
            status: Some("active".to_string()),
            rating: Some(4.5),
            review_count: Some(10),
            mobile_service_radius: None,
            mobile_extras: vec![],
            availability: None,
        }
    }

    fn create_prefs() -> PreferenceDraft {
        PreferenceDraft {
            location: LocationFilter {
                latitude: 34.0522,
                longitude: -118.2437,
                zip_code: None,
                radius_km: 25.0,
            },
            massage_types: vec!["Deep Tissue".to_string()],
            pressure: Pressure::Firm,
            gender: GenderPreference::Any,
            mode: Mode::Incall,
            availability: Availability::Today,
            budget: Budget { min: 50.0, max: 150.0 },
            pain_points: vec![],
            ai_signals: None,
        }
    }

    #[test]
    fn test_build_cards_basic() {
        let builder = CardBuilder::with_default_weights();
        let rows = vec![
            create_row("1", Some(2000.0), "$100/hr", "Deep Tissue"),
            create_row("2", Some(20000.0), "$300/hr", "Thai"),
        ];

        let mut rng = StdRng::seed_from_u64(7);
        let result = builder.build_cards_with_rng(&create_prefs(), rows, 10, &mut rng);

        assert_eq!(result.total_candidates, 2);
        assert_eq!(result.cards.len(), 2);
        // The close deep-tissue match ranks first
        assert_eq!(result.cards[0].card.id, "1");
    }

    #[test]
    fn test_scores_floored_and_capped() {
        let builder = CardBuilder::with_default_weights();
        let rows: Vec<TherapistRow> = (0..30)
            .map(|i| {
                create_row(
                    &i.to_string(),
                    Some(1000.0 * (i as f64 + 1.0)),
                    "$500/hr",
                    "Thai",
                )
            })
            .collect();

        let mut rng = StdRng::seed_from_u64(42);
        let result = builder.build_cards_with_rng(&create_prefs(), rows, 30, &mut rng);

        for card in &result.cards {
            assert!(
                (60..=100).contains(&card.match_score),
                "displayed score {} outside [60, 100]",
                card.match_score
            );
        }
    }

    #[test]
    fn test_jitter_reproducible_with_seeded_rng() {
        let builder = CardBuilder::with_default_weights();
        let prefs = create_prefs();
        let rows = vec![create_row("1", Some(5000.0), "$120/hr", "Deep Tissue")];

        let mut rng_a = StdRng::seed_from_u64(99);
        let mut rng_b = StdRng::seed_from_u64(99);
        let a = builder.build_cards_with_rng(&prefs, rows.clone(), 10, &mut rng_a);
        let b = builder.build_cards_with_rng(&prefs, rows, 10, &mut rng_b);

        assert_eq!(a.cards[0].match_score, b.cards[0].match_score);
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let builder = CardBuilder::new(ScoringWeights::default(), 0.0, 0);
        let prefs = create_prefs();
        let rows = vec![create_row("1", Some(5000.0), "$120/hr", "Deep Tissue")];

        let result = builder.build_cards(&prefs, rows, 10);
        // 0.30 + 0.20 + 0.15 + 0.15*0.8 + 0.10 + 0.10*0.75 = 0.945
        assert_eq!(result.cards[0].match_score, 95);
    }

    #[test]
    fn test_respects_limit() {
        let builder = CardBuilder::with_default_weights();
        let rows: Vec<TherapistRow> = (0..20)
            .map(|i| create_row(&i.to_string(), Some(1000.0 * i as f64), "$90/hr", "Swedish"))
            .collect();

        let result = builder.build_cards(&create_prefs(), rows, 5);
        assert_eq!(result.cards.len(), 5);
        assert_eq!(result.total_candidates, 20);
    }

    #[test]
    fn test_explanations_attached() {
        let builder = CardBuilder::with_default_weights();
        let rows = vec![create_row("1", Some(5000.0), "$120/hr", "Deep Tissue")];

        let result = builder.build_cards(&create_prefs(), rows, 10);
        assert!(result.cards[0].ai_explanation.starts_with("Recommended because"));
    }
}
