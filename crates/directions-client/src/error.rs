//! Route request errors.

use thiserror::Error;

/// Failure of one route request. Every variant is scoped to a single message; none is fatal.
#[derive(Error, Debug)]
pub enum RouteError {
    /// The service resolved the request but found no viable route (e.g. unresolvable address).
    #[error("No route found ({status})")]
    NoRouteFound { status: String },

    /// The call could not complete: timeout, DNS, refused connection, or a transient server error.
    #[error("Directions service unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Rate limit or quota rejection.
    #[error("Directions quota exceeded ({status})")]
    QuotaExceeded { status: String },

    /// The service refused the request itself (bad key, too many waypoints, invalid request).
    #[error("Directions request rejected ({status}): {message}")]
    Rejected { status: String, message: String },

    #[error("Malformed directions response: {0}")]
    MalformedResponse(String),

    #[error("Invalid map URL: {0}")]
    MapUrl(#[from] url::ParseError),
}

impl RouteError {
    /// True when trying again later may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, RouteError::UpstreamUnavailable(_))
    }

    /// Maps a Directions API `status` value (anything but `OK`) to an error.
    pub fn from_status(status: &str, message: Option<String>) -> Self {
        let status_owned = status.to_string();
        match status {
            "ZERO_RESULTS" | "NOT_FOUND" | "MAX_ROUTE_LENGTH_EXCEEDED" => {
                RouteError::NoRouteFound {
                    status: status_owned,
                }
            }
            "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => RouteError::QuotaExceeded {
                status: status_owned,
            },
            "UNKNOWN_ERROR" => RouteError::UpstreamUnavailable(
                message.unwrap_or_else(|| "server error (UNKNOWN_ERROR)".to_string()),
            ),
            _ => RouteError::Rejected {
                status: status_owned,
                message: message.unwrap_or_default(),
            },
        }
    }
}
