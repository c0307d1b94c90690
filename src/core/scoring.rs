use crate::models::{GenderPreference, Mode, NormalizedCard, PreferenceDraft, ScoringWeights};

/// Affinity boost contributed per point of AI specialty signal.
const AI_BOOST_PER_POINT: f64 = 0.03;
/// Cap on the total AI specialty boost.
const AI_BOOST_CAP: f64 = 0.30;

/// Calculate a match score (0-100) for a normalized card against the
/// user's preference draft.
///
/// Scoring formula:
/// score = (
///     type_score * 0.30 +          # Shared massage types (+ AI boost)
///     mode_score * 0.20 +          # Session mode agreement
///     gender_score * 0.15 +        # Gender preference
///     distance_score * 0.15 +      # Closer = higher score
///     price_score * 0.10 +         # Within budget = higher
///     availability_score * 0.10    # User urgency only
/// ) * 100
///
/// Deterministic and total: every division is guarded and missing data
/// contributes a neutral factor instead of an error. Display jitter lives
/// in the card builder, never here.
pub fn calculate_match_score(
    prefs: &PreferenceDraft,
    card: &NormalizedCard,
    weights: &ScoringWeights,
) -> f64 {
    let type_score = calculate_type_score(prefs, card);
    let mode_score = calculate_mode_score(prefs.mode, card.mode);
    let gender_score = calculate_gender_score(prefs.gender, card.gender);
    let distance_score = calculate_distance_score(card.distance_km, prefs.location.radius_km);
    let price_score = calculate_price_score(card.price, prefs.budget.max);
    let availability_score = calculate_availability_score(prefs.availability.urgency_rank());

    let total = type_score * weights.type_match
        + mode_score * weights.mode_agreement
        + gender_score * weights.gender
        + distance_score * weights.distance
        + price_score * weights.price
        + availability_score * weights.availability;

    total.clamp(0.0, 1.0) * 100.0
}

/// Massage-type score (0-1): the fraction of the card's specialties and
/// services the user asked for, lifted by any AI specialty signals.
///
/// No selected types means the factor is neutral (0.5), not zero.
#[inline]
pub fn calculate_type_score(prefs: &PreferenceDraft, card: &NormalizedCard) -> f64 {
    let base = if prefs.massage_types.is_empty() {
        0.5
    } else {
        let offered = card.specialties.len() + card.services.len();
        if offered == 0 {
            0.0
        } else {
            let matched = card
                .specialties
                .iter()
                .chain(card.services.iter())
                .filter(|t| prefs.massage_types.contains(t))
                .count();
            (matched as f64 / offered as f64).clamp(0.0, 1.0)
        }
    };

    let boost = prefs
        .ai_signals
        .as_ref()
        .map(|signals| {
            let points: f64 = card
                .specialties
                .iter()
                .filter_map(|s| signals.specialties.get(s))
                .sum();
            (points * AI_BOOST_PER_POINT).min(AI_BOOST_CAP)
        })
        .unwrap_or(0.0);

    (base + boost).min(1.0)
}

/// Session-mode agreement score (0-1).
///
/// Full credit only when the user stated a concrete mode and the card
/// matches it; everything else is neutral. This factor carried the
/// "pressure" weight upstream even though it never reads the pressure
/// preference; that behavior is preserved for compatibility.
#[inline]
pub fn calculate_mode_score(preferred: Mode, offered: Mode) -> f64 {
    if preferred != Mode::Any && offered == preferred {
        1.0
    } else {
        0.5
    }
}

/// Gender preference score (0 or 1).
///
/// The normalizer never populates a card gender, so the card side is a
/// wildcard and this factor is 1.0 in practice.
#[inline]
pub fn calculate_gender_score(preferred: GenderPreference, offered: GenderPreference) -> f64 {
    if preferred == GenderPreference::Any
        || offered == GenderPreference::Any
        || preferred == offered
    {
        1.0
    } else {
        0.0
    }
}

/// Distance score (0-1): linear falloff toward the edge of the search
/// radius, zero at and beyond it. The radius is floored at 1 km so the
/// division is always defined. Unknown distance is neutral.
#[inline]
pub fn calculate_distance_score(distance_km: Option<f64>, radius_km: f64) -> f64 {
    match distance_km {
        Some(d) => (1.0 - d / radius_km.max(1.0)).max(0.0),
        None => 0.5,
    }
}

/// Price score (0-1): full credit within budget, linear falloff above it.
/// A missing price or an unset budget is neutral.
#[inline]
pub fn calculate_price_score(price: Option<f64>, budget_max: f64) -> f64 {
    let p = match price {
        Some(p) if p > 0.0 => p,
        _ => return 0.5,
    };
    if budget_max <= 0.0 {
        return 0.5;
    }
    if p <= budget_max {
        1.0
    } else {
        (1.0 - (p - budget_max) / budget_max).max(0.0)
    }
}

/// Availability score (0-1): the user's urgency rank normalized by the
/// highest rank. Reflects only the user's stated window, not the
/// therapist's own availability data (preserved upstream behavior).
#[inline]
pub fn calculate_availability_score(urgency_rank: u8) -> f64 {
    (urgency_rank as f64 / 4.0).min(1.0)
}
