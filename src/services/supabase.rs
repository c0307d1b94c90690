use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::core::geo::{calculate_bounding_box, haversine_distance};
use crate::models::{LocationFilter, TherapistRow};

/// Errors that can occur when talking to Supabase
#[derive(Debug, Error)]
pub enum SupabaseError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// Supabase (PostgREST) client
///
/// Fetches therapist rows for the explore feed. Queries are pre-filtered
/// server-side by status and a geographic bounding box; exact distances
/// are filled in client-side for rows the backend left without one.
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    table: String,
    client: Client,
}

impl SupabaseClient {
    /// Create a new Supabase client
    pub fn new(base_url: String, api_key: String, table: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url,
            api_key,
            table,
            client,
        }
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }

    /// Fetch candidate therapist rows around the viewer's location.
    ///
    /// Rows come back pre-filtered to active listings inside the bounding
    /// box of the search radius. Each row without a backend-computed
    /// `distance_m` gets one derived from its coordinates, so the
    /// normalizer downstream sees a consistent shape.
    pub async fn fetch_therapists(
        &self,
        origin: &LocationFilter,
        limit: usize,
    ) -> Result<Vec<TherapistRow>, SupabaseError> {
        let bbox = calculate_bounding_box(origin.latitude, origin.longitude, origin.radius_km);

        let response = self
            .client
            .get(self.table_url())
            .query(&[
                ("select", "*".to_string()),
                ("status", "eq.active".to_string()),
                ("latitude", format!("gte.{}", bbox.min_lat)),
                ("latitude", format!("lte.{}", bbox.max_lat)),
                ("longitude", format!("gte.{}", bbox.min_lon)),
                ("longitude", format!("lte.{}", bbox.max_lon)),
                ("limit", limit.to_string()),
            ])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(SupabaseError::ApiError(format!(
                "Failed to query therapists: {}",
                response.status()
            )));
        }

        let json: Value = response.json().await?;

        let records = json
            .as_array()
            .ok_or_else(|| SupabaseError::InvalidResponse("Expected a JSON array".into()))?;

        let mut rows: Vec<TherapistRow> = records
            .iter()
            .filter_map(|record| serde_json::from_value(record.clone()).ok())
            .collect();

        for row in &mut rows {
            if row.distance_m.is_none() {
                if let (Some(lat), Some(lon)) = (row.latitude, row.longitude) {
                    let km = haversine_distance(origin.latitude, origin.longitude, lat, lon);
                    row.distance_m = Some(km * 1000.0);
                }
            }
        }

        tracing::debug!("Queried {} therapist rows (of {} records)", rows.len(), records.len());

        Ok(rows)
    }

    /// Lightweight reachability probe for the health endpoint.
    pub async fn health_check(&self) -> Result<bool, SupabaseError> {
        let response = self
            .client
            .get(self.table_url())
            .query(&[("select", "id"), ("limit", "1")])
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await?;

        Ok(response.status().is_success())
    }
}
