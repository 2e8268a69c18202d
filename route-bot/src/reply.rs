//! Reply texts sent back to the user.

use std::fmt::Write;

use address_parser::AddressError;
use directions_client::{RouteError, RouteResult};

use crate::pipeline::PlanError;

fn endpoints(start: &str, end: &str) -> String {
    if start == end {
        format!("start/finish: {}", start)
    } else {
        format!("start: {}, finish: {}", start, end)
    }
}

/// Header, numbered stops in visiting order, map link and total distance.
pub fn route_reply(result: &RouteResult) -> String {
    let waypoints = result.waypoints();
    let mut text = format!(
        "🚗 Route for the day ({})\n\n",
        endpoints(waypoints.start(), waypoints.end())
    );
    for (i, stop) in waypoints.stops().iter().enumerate() {
        let _ = writeln!(text, "{}. {}", i + 1, stop);
    }
    let _ = write!(
        text,
        "\n🔗 Route: {}\n📏 Distance: {}",
        result.map_url(),
        result.formatted_distance()
    );
    text
}

/// User-facing explanation of a failed plan. Never contains a map link.
pub fn failure_reply(error: &PlanError) -> String {
    match error {
        PlanError::Address(AddressError::EmptyInput) => {
            "📭 No addresses found. Send one address per line or separate them with commas."
                .to_string()
        }
        PlanError::Address(AddressError::ReservedSeparator(address)) => format!(
            "✏️ The address \"{}\" contains the \"|\" character. Please remove it and try again.",
            address
        ),
        PlanError::Address(AddressError::InvalidHints(_)) => {
            "⚠️ The bot is misconfigured. Please contact the administrator.".to_string()
        }
        PlanError::Route(RouteError::NoRouteFound { .. }) => {
            "🗺️ No route found for these addresses. Check the spelling and try again.".to_string()
        }
        PlanError::Route(RouteError::QuotaExceeded { .. }) => {
            "⏳ The route limit is reached for now. Please try again later.".to_string()
        }
        PlanError::Route(RouteError::UpstreamUnavailable(_)) => {
            "⚠️ The directions service is unavailable right now. Please try again later."
                .to_string()
        }
        PlanError::Route(_) => {
            "❌ Could not calculate the route. Check the addresses and try again.".to_string()
        }
    }
}

/// Usage text for `/start` and `/help`.
pub fn help_reply(start: &str, end: &str) -> String {
    format!(
        "👋 Send me the addresses for today, one per line or separated by commas, \
         and I will build a route ({}) with a Google Maps link and the total distance.\n\n\
         Example:\nХрещатик 1\nВелика Васильківська 100\nСаксаганського 5",
        endpoints(start, end)
    )
}
