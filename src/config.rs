use ::config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub supabase: SupabaseSettings,
    #[serde(default)]
    pub explore: ExploreSettings,
    pub scoring: ScoringSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSettings {
    pub url: String,
    pub api_key: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "therapists".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExploreSettings {
    /// Hard cap on the number of cards a single request may ask for.
    pub max_limit: Option<u16>,
    /// Largest search radius a preference draft is allowed to carry.
    pub max_radius_km: Option<u16>,
}

impl ExploreSettings {
    pub fn max_limit(&self) -> u16 {
        self.max_limit.unwrap_or(100)
    }

    pub fn max_radius_km(&self) -> f64 {
        f64::from(self.max_radius_km.unwrap_or(150))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
    /// Maximum display jitter in score points.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
    /// Lowest score ever shown on a card.
    #[serde(default = "default_score_floor")]
    pub score_floor: u8,
}

impl Default for ScoringSettings {
    fn default() -> Self {
        Self {
            weights: WeightsConfig::default(),
            jitter: default_jitter(),
            score_floor: default_score_floor(),
        }
    }
}

fn default_jitter() -> f64 {
    2.0
}

fn default_score_floor() -> u8 {
    60
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_type_match_weight")]
    pub type_match: f64,
    #[serde(default = "default_mode_agreement_weight")]
    pub mode_agreement: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
    #[serde(default = "default_distance_weight")]
    pub distance: f64,
    #[serde(default = "default_price_weight")]
    pub price: f64,
    #[serde(default = "default_availability_weight")]
    pub availability: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            type_match: default_type_match_weight(),
            mode_agreement: default_mode_agreement_weight(),
            gender: default_gender_weight(),
            distance: default_distance_weight(),
            price: default_price_weight(),
            availability: default_availability_weight(),
        }
    }
}

fn default_type_match_weight() -> f64 { 0.30 }
fn default_mode_agreement_weight() -> f64 { 0.20 }
fn default_gender_weight() -> f64 { 0.15 }
fn default_distance_weight() -> f64 { 0.15 }
fn default_price_weight() -> f64 { 0.10 }
fn default_availability_weight() -> f64 { 0.10 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with SERENITY__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with SERENITY__)
            // e.g., SERENITY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SERENITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Apply the conventional Supabase env vars as overrides
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SERENITY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Fold the hosting platform's standard Supabase variables into the
/// config tree. `SUPABASE_URL` / `SUPABASE_SERVICE_KEY` are checked first,
/// then the `SERENITY__`-prefixed equivalents.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let supabase_url = env::var("SUPABASE_URL")
        .or_else(|_| env::var("SERENITY__SUPABASE__URL"))
        .ok();
    let supabase_key = env::var("SUPABASE_SERVICE_KEY")
        .or_else(|_| env::var("SERENITY__SUPABASE__API_KEY"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(url) = supabase_url {
        builder = builder.set_override("supabase.url", url)?;
    }
    if let Some(key) = supabase_key {
        builder = builder.set_override("supabase.api_key", key)?;
    }

    builder.build()
}
