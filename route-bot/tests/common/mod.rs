//! Shared test doubles: core messages, a recording [`route_bot::Bot`], and a canned directions service.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use address_parser::{AddressParser, ParserConfig};
use async_trait::async_trait;
use chrono::Utc;
use directions_client::{
    DirectionsConfig, DirectionsService, Leg, Route, RouteError, RouteOptions, RouteRequester,
    RouteWaypoints,
};
use route_bot::{Bot, Chat, Message, Result, RoutePipeline, User};

pub const START: &str = "Метро Харківська, Київ";

pub fn make_message(user_id: i64, content: &str) -> Message {
    Message {
        id: "42".to_string(),
        user: User {
            id: user_id,
            username: Some("courier".to_string()),
            first_name: Some("Олена".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 456,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        message_type: "text".to_string(),
        created_at: Utc::now(),
    }
}

pub fn make_non_text_message(user_id: i64) -> Message {
    Message {
        content: String::new(),
        message_type: "other".to_string(),
        ..make_message(user_id, "")
    }
}

/// Records every reply text in send order.
#[derive(Default)]
pub struct RecordingBot {
    sent: Mutex<Vec<String>>,
}

impl RecordingBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Bot for RecordingBot {
    async fn send_message(&self, _chat: &Chat, text: &str) -> Result<()> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }

    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        self.send_message(&message.chat, text).await
    }
}

type Outcome = Box<dyn Fn(&RouteWaypoints) -> std::result::Result<Route, RouteError> + Send + Sync>;

/// Directions service with a fixed answer; counts calls.
pub struct StubDirections {
    outcome: Outcome,
    calls: Mutex<usize>,
}

impl StubDirections {
    /// One leg per waypoint pair, with the given distances in meters.
    pub fn with_legs(meters: Vec<u64>) -> Arc<Self> {
        Arc::new(Self {
            outcome: Box::new(move |waypoints| {
                let ordered = waypoints.ordered();
                let legs = meters
                    .iter()
                    .enumerate()
                    .map(|(i, m)| Leg {
                        start_address: ordered.get(i).unwrap_or(&"").to_string(),
                        end_address: ordered.get(i + 1).unwrap_or(&"").to_string(),
                        distance_meters: *m,
                    })
                    .collect();
                Ok(Route {
                    legs,
                    waypoint_order: Vec::new(),
                })
            }),
            calls: Mutex::new(0),
        })
    }

    pub fn failing(make_error: fn() -> RouteError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Box::new(move |_| Err(make_error())),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl DirectionsService for StubDirections {
    async fn fetch_route(
        &self,
        waypoints: &RouteWaypoints,
        _options: &RouteOptions,
    ) -> std::result::Result<Route, RouteError> {
        *self.calls.lock().unwrap() += 1;
        (self.outcome)(waypoints)
    }
}

pub fn make_pipeline(service: Arc<StubDirections>) -> RoutePipeline {
    let config = DirectionsConfig::new("AIzaTestKey1234567890".to_string());
    let parser = AddressParser::new(ParserConfig::default()).unwrap();
    RoutePipeline::new(
        Arc::new(parser),
        Arc::new(RouteRequester::new(service, &config)),
    )
}
