use crate::models::{Mode, NormalizedCard, PreferenceDraft};

/// Maximum number of reason fragments in one explanation.
const MAX_REASONS: usize = 3;

/// Build the human-readable justification line for a card.
///
/// Up to three reason fragments are collected in a fixed priority order:
/// shared massage types, budget fit, distance fit, mode fit, then
/// verification. When nothing matches, a generic fragment cites the
/// card's rating, review count, and headline. The numeric match score is
/// never consulted; explanation and score are derived independently.
pub fn explain_match(prefs: &PreferenceDraft, card: &NormalizedCard) -> String {
    let mut reasons: Vec<String> = Vec::new();

    // 1. Shared massage types (name at most two)
    let shared: Vec<&String> = card
        .specialties
        .iter()
        .filter(|s| prefs.massage_types.contains(s))
        .take(2)
        .collect();
    if !shared.is_empty() {
        let names = shared
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(" and ");
        reasons.push(format!("they specialize in {}", names));
    }

    // 2. Budget fit
    if let Some(price) = card.price {
        if price > 0.0 && prefs.budget.max > 0.0 && price <= prefs.budget.max {
            reasons.push("the rate is within your budget".to_string());
        }
    }

    // 3. Distance fit
    if let Some(distance) = card.distance_km {
        if distance <= prefs.location.radius_km {
            reasons.push(format!("they are only {} km away", distance));
        }
    }

    // 4. Mode fit
    if prefs.mode != Mode::Any && card.mode == prefs.mode {
        let fragment = match card.mode {
            Mode::Outcall => "they travel to you for out-call sessions",
            _ => "they offer in-call sessions",
        };
        reasons.push(fragment.to_string());
    }

    // 5. Verification / popularity
    if card.tags.iter().any(|t| t == "Verified") {
        reasons.push(format!("they are verified with {} reviews", card.review_count));
    }

    reasons.truncate(MAX_REASONS);

    if reasons.is_empty() {
        reasons.push(format!(
            "they hold a {:.1} rating across {} reviews: {}",
            card.rating, card.review_count, card.headline
        ));
    }

    format!("Recommended because {}.", reasons.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Availability, Budget, GenderPreference, LocationFilter, Pressure,
    };

    fn test_prefs() -> PreferenceDraft {
        PreferenceDraft {
            location: LocationFilter {
                latitude: 34.0522,
                longitude: -118.2437,
                zip_code: None,
                radius_km: 25.0,
            },
            massage_types: vec!["Deep Tissue".to_string(), "Swedish".to_string()],
            pressure: Pressure::Medium,
            gender: GenderPreference::Any,
            mode: Mode::Incall,
            availability: Availability::Anytime,
            budget: Budget { min: 50.0, max: 150.0 },
            pain_points: vec![],
            ai_signals: None,
        }
    }

    fn test_card() -> NormalizedCard {
        NormalizedCard {
            id: "t1".to_string(),
            slug: "maya-l".to_string(),
            name: "Maya L".to_string(),
            headline: "Deep tissue specialist".to_string(),
            distance_km: Some(5.0),
            rating: 4.8,
            review_count: 42,
            tags: vec![
                "Deep Tissue".to_string(),
                "In-call".to_string(),
                "Verified".to_string(),
            ],
            price: Some(120.0),
            price_label: "$120/hr".to_string(),
            verified: true,
            mobile: false,
            mode: Mode::Incall,
            gender: GenderPreference::Any,
            specialties: vec!["Deep Tissue".to_string(), "Swedish".to_string()],
            services: vec![],
            latitude: None,
            longitude: None,
        }
    }

    #[test]
    fn test_truncates_to_three_reasons_in_priority_order() {
        // The card satisfies all five conditions at once
        let text = explain_match(&test_prefs(), &test_card());

        assert_eq!(text.matches("; ").count(), 2, "exactly 3 fragments: {}", text);
        assert!(text.starts_with("Recommended because they specialize in"));
        assert!(text.contains("within your budget"));
        assert!(text.contains("5 km away"));
        // Priorities 4 and 5 must have been cut
        assert!(!text.contains("in-call"));
        assert!(!text.contains("verified with"));
        assert!(text.ends_with('.'));
    }

    #[test]
    fn test_names_at_most_two_types() {
        let text = explain_match(&test_prefs(), &test_card());
        assert!(text.contains("Deep Tissue and Swedish"));
    }

    #[test]
    fn test_lower_priority_reasons_surface_when_higher_fail() {
        let mut card = test_card();
        card.specialties = vec!["Thai".to_string()];
        card.price = None;
        card.distance_km = Some(40.0); // outside the 25 km radius

        let text = explain_match(&test_prefs(), &card);
        assert!(text.contains("they offer in-call sessions"));
        assert!(text.contains("verified with 42 reviews"));
    }

    #[test]
    fn test_generic_fallback() {
        let mut prefs = test_prefs();
        prefs.mode = Mode::Any;
        let mut card = test_card();
        card.specialties = vec!["Thai".to_string()];
        card.price = None;
        card.distance_km = None;
        card.tags = vec!["Thai".to_string(), "In-call".to_string()];

        let text = explain_match(&prefs, &card);
        assert_eq!(
            text,
            "Recommended because they hold a 4.8 rating across 42 reviews: Deep tissue specialist."
        );
    }

    #[test]
    fn test_budget_boundary_counts_as_fit() {
        let mut card = test_card();
        card.price = Some(150.0);
        let text = explain_match(&test_prefs(), &card);
        assert!(text.contains("within your budget"));
    }
}
