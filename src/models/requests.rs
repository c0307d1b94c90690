use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::PreferenceDraft;

/// Request to build a scored explore feed.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExploreRequest {
    pub preferences: PreferenceDraft,
    #[validate(range(min = 1, max = 100))]
    #[serde(default = "default_limit")]
    pub limit: u16,
}

fn default_limit() -> u16 {
    20
}
