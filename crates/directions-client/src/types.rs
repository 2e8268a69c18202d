//! Waypoints, request options, raw route and the final route result.

use address_parser::AddressList;
use url::Url;

use crate::config::{DirectionsConfig, TravelMode};

/// Fixed start, ordered intermediate stops, fixed end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteWaypoints {
    start: String,
    stops: AddressList,
    end: String,
}

impl RouteWaypoints {
    pub fn new(start: impl Into<String>, stops: AddressList, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            stops,
            end: end.into(),
        }
    }

    pub fn start(&self) -> &str {
        &self.start
    }

    pub fn stops(&self) -> &[String] {
        self.stops.as_slice()
    }

    pub fn end(&self) -> &str {
        &self.end
    }

    /// All waypoints in visiting order: start, stops..., end.
    pub fn ordered(&self) -> Vec<&str> {
        std::iter::once(self.start.as_str())
            .chain(self.stops.iter().map(String::as_str))
            .chain(std::iter::once(self.end.as_str()))
            .collect()
    }

    /// Number of legs a route through these waypoints has.
    pub fn leg_count(&self) -> usize {
        self.stops.len() + 1
    }

    /// Stops reordered by `order` (a permutation of stop indices). None when `order` is not one.
    pub fn reordered(&self, order: &[usize]) -> Option<Self> {
        let stops = self.stops.as_slice();
        if order.len() != stops.len() {
            return None;
        }
        let mut used = vec![false; stops.len()];
        let mut reordered = Vec::with_capacity(stops.len());
        for &index in order {
            if index >= stops.len() || used[index] {
                return None;
            }
            used[index] = true;
            reordered.push(stops[index].as_str());
        }
        let stops = AddressList::new(reordered).ok()?;
        Some(Self {
            start: self.start.clone(),
            stops,
            end: self.end.clone(),
        })
    }
}

/// Per-request options passed to the directions service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RouteOptions {
    pub travel_mode: TravelMode,
    pub language: Option<String>,
    pub region: Option<String>,
    /// Let the service reorder intermediate stops; the order comes back in [`Route::waypoint_order`].
    pub optimize_waypoints: bool,
}

impl From<&DirectionsConfig> for RouteOptions {
    fn from(config: &DirectionsConfig) -> Self {
        Self {
            travel_mode: config.travel_mode,
            language: config.language.clone(),
            region: config.region.clone(),
            optimize_waypoints: config.optimize_waypoints,
        }
    }
}

/// One segment between two consecutive waypoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leg {
    pub start_address: String,
    pub end_address: String,
    pub distance_meters: u64,
}

/// Route as reported by the directions service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Route {
    pub legs: Vec<Leg>,
    /// Visiting order of the intermediate stops when optimization was requested; empty otherwise.
    pub waypoint_order: Vec<usize>,
}

impl Route {
    pub fn total_distance_meters(&self) -> u64 {
        self.legs.iter().map(|leg| leg.distance_meters).sum()
    }
}

/// Outcome of a successful route request. Immutable.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    waypoints: RouteWaypoints,
    legs: Vec<Leg>,
    total_distance_meters: u64,
    map_url: Url,
}

impl RouteResult {
    pub(crate) fn new(waypoints: RouteWaypoints, legs: Vec<Leg>, map_url: Url) -> Self {
        let total_distance_meters = legs.iter().map(|leg| leg.distance_meters).sum();
        Self {
            waypoints,
            legs,
            total_distance_meters,
            map_url,
        }
    }

    /// Waypoints in the order the route visits them.
    pub fn waypoints(&self) -> &RouteWaypoints {
        &self.waypoints
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn total_distance_meters(&self) -> u64 {
        self.total_distance_meters
    }

    pub fn distance_km(&self) -> f64 {
        self.total_distance_meters as f64 / 1000.0
    }

    /// Distance with one decimal, e.g. `12.4 km`. Halves round up (12 350 m is `12.4 km`).
    pub fn formatted_distance(&self) -> String {
        let tenths = (self.total_distance_meters + 50) / 100;
        format!("{}.{} km", tenths / 10, tenths % 10)
    }

    pub fn map_url(&self) -> &Url {
        &self.map_url
    }
}
