use std::env;
use std::fmt;

const DEFAULT_GEMINI_MODEL: &str = "gemini-1.5-flash";
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const OPENCAGE_BASE_URL: &str = "https://api.opencagedata.com";
const PIXABAY_BASE_URL: &str = "https://pixabay.com";
const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
const WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org";

#[derive(Debug)]
pub enum ConfigError {
    MissingVar(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingVar(name) => write!(f, "{} must be set", name),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Process-wide configuration, read once at startup and passed into each
/// service. Base URLs are part of the config so tests can substitute fake
/// endpoints without touching the process environment.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub opencage_api_key: String,
    pub opencage_base_url: String,
    pub pixabay_api_key: Option<String>,
    pub pixabay_base_url: String,
    pub unsplash_access_key: Option<String>,
    pub unsplash_base_url: String,
    pub wikipedia_base_url: String,
}

impl AppConfig {
    /// Build the configuration from environment variables.
    ///
    /// The Gemini and OpenCage keys are required; without them neither
    /// request flow can produce anything useful, so startup fails. The two
    /// image-service keys are optional and degrade to placeholder images at
    /// call time.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            gemini_api_key: require("GEMINI_API_KEY")?,
            gemini_model: env::var("GEMINI_MODEL")
                .unwrap_or_else(|_| DEFAULT_GEMINI_MODEL.to_string()),
            gemini_base_url: GEMINI_BASE_URL.to_string(),
            opencage_api_key: require("OPENCAGE_API_KEY")?,
            opencage_base_url: OPENCAGE_BASE_URL.to_string(),
            pixabay_api_key: optional("PIXABAY_API_KEY"),
            pixabay_base_url: PIXABAY_BASE_URL.to_string(),
            unsplash_access_key: optional("UNSPLASH_ACCESS_KEY"),
            unsplash_base_url: UNSPLASH_BASE_URL.to_string(),
            wikipedia_base_url: WIKIPEDIA_BASE_URL.to_string(),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    match optional(name) {
        Some(value) => Ok(value),
        None => Err(ConfigError::MissingVar(name)),
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
