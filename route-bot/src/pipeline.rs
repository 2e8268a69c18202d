//! Message text → addresses → route → reply text.

use std::sync::Arc;

use address_parser::{AddressError, AddressParser};
use directions_client::{RouteError, RouteRequester, RouteResult};
use thiserror::Error;
use tracing::{info, warn};

use crate::reply::{failure_reply, route_reply};

/// Why a message could not be turned into a route. Every variant ends up as a user-facing reply.
#[derive(Error, Debug)]
pub enum PlanError {
    #[error(transparent)]
    Address(#[from] AddressError),

    #[error(transparent)]
    Route(#[from] RouteError),
}

/// Parser and requester wired together; shared by the Telegram handler and the `route` command.
#[derive(Clone)]
pub struct RoutePipeline {
    parser: Arc<AddressParser>,
    requester: Arc<RouteRequester>,
}

impl RoutePipeline {
    pub fn new(parser: Arc<AddressParser>, requester: Arc<RouteRequester>) -> Self {
        Self { parser, requester }
    }

    pub fn start(&self) -> &str {
        self.requester.start()
    }

    pub fn end(&self) -> &str {
        self.requester.end()
    }

    /// Parses `text` and requests the route through the parsed stops.
    pub async fn plan(&self, text: &str) -> Result<RouteResult, PlanError> {
        let addresses = self.parser.parse(text)?;
        info!(stops = addresses.len(), "step: addresses parsed");
        let result = self.requester.request_route(&addresses).await?;
        info!(
            distance_m = result.total_distance_meters(),
            "step: route planned"
        );
        Ok(result)
    }

    /// Reply text for `text`: the route summary, or a message explaining what went wrong.
    pub async fn reply_for(&self, text: &str) -> String {
        match self.plan(text).await {
            Ok(result) => route_reply(&result),
            Err(e) => {
                warn!(error = %e, "Route planning failed");
                failure_reply(&e)
            }
        }
    }
}
