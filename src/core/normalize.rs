use crate::models::{GenderPreference, Mode, NormalizedCard, TherapistRow};

/// Parse an hourly rate string into a numeric price.
///
/// Strips every character that is not a digit or a dot, then parses the
/// remainder. Empty or non-numeric input yields `None` rather than an
/// error; a missing price contributes a neutral score downstream.
pub fn parse_price(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse::<f64>().ok()
}

/// Derive the session mode for a row.
///
/// A therapist advertising a positive mobile-service radius or any mobile
/// extras is treated as outcall; everyone else is incall. "Any" is never
/// derived from a row.
#[inline]
pub fn derive_mode(row: &TherapistRow) -> Mode {
    if row.mobile_service_radius.unwrap_or(0.0) > 0.0 || !row.mobile_extras.is_empty() {
        Mode::Outcall
    } else {
        Mode::Incall
    }
}

/// Normalize a raw backend row into a display-ready card.
///
/// Pure transform: the row is never mutated and no defaults leak back.
/// The backend supplies distance in meters; it is converted to kilometers
/// and rounded to 1 decimal, and that rounded value is what the scorer
/// consumes as well.
pub fn normalize_row(row: &TherapistRow) -> NormalizedCard {
    let distance_km = row.distance_m.map(|m| ((m / 1000.0) * 10.0).round() / 10.0);

    // First non-empty rate wins; a garbled rate yields no price rather
    // than falling through to the next one.
    let price = [&row.rate_60, &row.rate_90, &row.rate_outcall]
        .into_iter()
        .flatten()
        .find(|r| !r.trim().is_empty())
        .and_then(|r| parse_price(r));

    let price_label = match price {
        Some(p) => format!("${}/hr", p.round() as i64),
        None => "Custom".to_string(),
    };

    let mode = derive_mode(row);
    let verified = row.status.as_deref() == Some("active");

    let mut tags: Vec<String> = row
        .specialties
        .iter()
        .chain(row.services.iter())
        .take(3)
        .cloned()
        .collect();

    if !row.mobile_extras.is_empty() {
        tags.push("Mobile".to_string());
    }
    tags.push(match mode {
        Mode::Outcall => "Out-call".to_string(),
        _ => "In-call".to_string(),
    });
    if verified {
        tags.push("Verified".to_string());
    }

    let headline = row
        .headline
        .clone()
        .filter(|h| !h.is_empty())
        .or_else(|| row.bio.clone())
        .unwrap_or_default();

    NormalizedCard {
        id: row.id.clone(),
        slug: row.slug.clone(),
        name: row.name.clone(),
        headline,
        distance_km,
        rating: row.rating.unwrap_or(0.0),
        review_count: row.review_count.unwrap_or(0),
        tags,
        price,
        price_label,
        verified,
        mobile: !row.mobile_extras.is_empty(),
        mode,
        // The backend row carries no gender the normalizer trusts; the
        // gender factor sees a wildcard.
        gender: GenderPreference::Any,
        specialties: row.specialties.clone(),
        services: row.services.clone(),
        latitude: row.latitude,
        longitude: row.longitude,
    }
}
