//! Shareable Google Maps directions links.

use address_parser::RESERVED_SEPARATOR;
use url::Url;

use crate::config::TravelMode;
use crate::types::RouteWaypoints;

/// Maps URLs "dir" endpoint.
pub const MAP_URL_BASE: &str = "https://www.google.com/maps/dir/";

/// Builds `https://www.google.com/maps/dir/?api=1&travelmode=..&origin=..&destination=..&waypoints=a|b`,
/// listing the waypoints in the given visiting order.
pub fn build_map_url(waypoints: &RouteWaypoints, mode: TravelMode) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(MAP_URL_BASE)?;
    {
        let mut query = url.query_pairs_mut();
        query
            .append_pair("api", "1")
            .append_pair("travelmode", mode.as_str())
            .append_pair("origin", waypoints.start())
            .append_pair("destination", waypoints.end());
        if !waypoints.stops().is_empty() {
            let separator = RESERVED_SEPARATOR.to_string();
            query.append_pair("waypoints", &waypoints.stops().join(&separator));
        }
    }
    Ok(url)
}

/// Reads the waypoints back from a map URL: origin, intermediate waypoints, destination.
pub fn map_url_waypoints(url: &Url) -> Vec<String> {
    let mut origin = None;
    let mut destination = None;
    let mut stops = Vec::new();
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "origin" => origin = Some(value.into_owned()),
            "destination" => destination = Some(value.into_owned()),
            "waypoints" => stops.extend(
                value
                    .split(RESERVED_SEPARATOR)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            ),
            _ => {}
        }
    }
    origin.into_iter().chain(stops).chain(destination).collect()
}
