//! Directions configuration: API credential, fixed route ends, request options. Loaded from env by the caller.

use anyhow::{Context, Result};
use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use address_parser::RESERVED_SEPARATOR;

/// Google Directions JSON endpoint.
pub const DEFAULT_API_URL: &str = "https://maps.googleapis.com/maps/api/directions/json";

/// Start and finish of every route unless ROUTE_START / ROUTE_END say otherwise.
pub const DEFAULT_BASE_POINT: &str = "Метро Харківська, Київ";

/// Travel mode passed to the directions service and the map link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelMode {
    #[default]
    Driving,
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "driving" => Ok(TravelMode::Driving),
            "walking" => Ok(TravelMode::Walking),
            "bicycling" => Ok(TravelMode::Bicycling),
            "transit" => Ok(TravelMode::Transit),
            other => anyhow::bail!(
                "Unknown travel mode '{}' (expected driving, walking, bicycling or transit)",
                other
            ),
        }
    }
}

/// Everything the Route Requester and the Google client need. Owned by the caller and injected.
#[derive(Debug, Clone)]
pub struct DirectionsConfig {
    /// GOOGLE_MAPS_API_KEY
    pub api_key: String,
    /// DIRECTIONS_API_URL
    pub api_url: String,
    /// ROUTE_START
    pub start: String,
    /// ROUTE_END
    pub end: String,
    /// TRAVEL_MODE
    pub travel_mode: TravelMode,
    /// DIRECTIONS_LANGUAGE
    pub language: Option<String>,
    /// DIRECTIONS_REGION
    pub region: Option<String>,
    /// DIRECTIONS_TIMEOUT_SECS
    pub timeout_secs: u64,
    /// ROUTE_OPTIMIZE_WAYPOINTS
    pub optimize_waypoints: bool,
    /// DIRECTIONS_MAX_RETRIES; 0 means a single attempt.
    pub max_retries: u32,
}

impl DirectionsConfig {
    /// Config with the given key and defaults for everything else.
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
            start: DEFAULT_BASE_POINT.to_string(),
            end: DEFAULT_BASE_POINT.to_string(),
            travel_mode: TravelMode::Driving,
            language: Some("uk".to_string()),
            region: Some("ua".to_string()),
            timeout_secs: 10,
            optimize_waypoints: false,
            max_retries: 0,
        }
    }

    /// Load from environment variables. GOOGLE_MAPS_API_KEY is required.
    pub fn from_env() -> Result<Self> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY").context("GOOGLE_MAPS_API_KEY not set")?;
        let defaults = Self::new(api_key);

        let api_url = non_empty_var("DIRECTIONS_API_URL").unwrap_or(defaults.api_url);
        let start = non_empty_var("ROUTE_START").unwrap_or(defaults.start);
        let end = non_empty_var("ROUTE_END").unwrap_or_else(|| start.clone());
        let travel_mode = match non_empty_var("TRAVEL_MODE") {
            Some(s) => s.parse()?,
            None => defaults.travel_mode,
        };
        let language = optional_var("DIRECTIONS_LANGUAGE", defaults.language);
        let region = optional_var("DIRECTIONS_REGION", defaults.region);
        let timeout_secs = parsed_var("DIRECTIONS_TIMEOUT_SECS")?.unwrap_or(defaults.timeout_secs);
        let optimize_waypoints =
            parsed_var("ROUTE_OPTIMIZE_WAYPOINTS")?.unwrap_or(defaults.optimize_waypoints);
        let max_retries = parsed_var("DIRECTIONS_MAX_RETRIES")?.unwrap_or(defaults.max_retries);

        Ok(Self {
            api_key: defaults.api_key,
            api_url,
            start,
            end,
            travel_mode,
            language,
            region,
            timeout_secs,
            optimize_waypoints,
            max_retries,
        })
    }

    /// Validate config (URL parses, route ends usable as waypoints, non-zero timeout).
    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            anyhow::bail!("GOOGLE_MAPS_API_KEY is empty");
        }
        if url::Url::parse(&self.api_url).is_err() {
            anyhow::bail!("DIRECTIONS_API_URL is not a valid URL: {}", self.api_url);
        }
        for (name, value) in [("ROUTE_START", &self.start), ("ROUTE_END", &self.end)] {
            if value.trim().is_empty() {
                anyhow::bail!("{} must not be empty", name);
            }
            if value.contains(RESERVED_SEPARATOR) {
                anyhow::bail!("{} must not contain '{}': {}", name, RESERVED_SEPARATOR, value);
            }
        }
        if self.timeout_secs == 0 {
            anyhow::bail!("DIRECTIONS_TIMEOUT_SECS must be greater than 0");
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Trimmed value; unset or blank gives None.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Unset keeps the default; set-but-empty disables the parameter.
fn optional_var(name: &str, default: Option<String>) -> Option<String> {
    match env::var(name) {
        Ok(s) if s.trim().is_empty() => None,
        Ok(s) => Some(s.trim().to_string()),
        Err(_) => default,
    }
}

fn parsed_var<T: FromStr>(name: &str) -> Result<Option<T>> {
    match non_empty_var(name) {
        Some(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| anyhow::anyhow!("{} has an invalid value: {}", name, s)),
        None => Ok(None),
    }
}
