//! Integration tests for [`directions_client::RouteRequester`] against a mocked Directions API.
//!
//! HTTP upstream is a local mockito server; the timeout case uses a TCP listener that never answers.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use address_parser::{parse_addresses, AddressList};
use async_trait::async_trait;
use directions_client::{
    map_url_waypoints, BackoffRetry, DirectionsConfig, DirectionsService, GoogleDirectionsClient,
    Leg, Route, RouteError, RouteOptions, RouteRequester, RouteWaypoints,
};
use mockito::Matcher;

const API_PATH: &str = "/maps/api/directions/json";
const TEST_API_KEY: &str = "AIzaTestKey1234567890";

fn test_config(base_url: &str) -> DirectionsConfig {
    let mut config = DirectionsConfig::new(TEST_API_KEY.to_string());
    config.api_url = format!("{}{}", base_url, API_PATH);
    config.start = "Start Station".to_string();
    config.end = "End Station".to_string();
    config.timeout_secs = 2;
    config
}

fn google_requester(config: &DirectionsConfig) -> RouteRequester {
    let client = GoogleDirectionsClient::from_config(config).expect("client");
    RouteRequester::new(Arc::new(client), config)
}

fn legs_body(meters: &[u64], waypoint_order: &[usize]) -> String {
    let legs: Vec<String> = meters
        .iter()
        .map(|m| format!(r#"{{"distance":{{"value":{},"text":"{} m"}}}}"#, m, m))
        .collect();
    let order: Vec<String> = waypoint_order.iter().map(|i| i.to_string()).collect();
    format!(
        r#"{{"status":"OK","routes":[{{"legs":[{}],"waypoint_order":[{}]}}]}}"#,
        legs.join(","),
        order.join(",")
    )
}

fn status_body(status: &str) -> String {
    format!(r#"{{"status":"{}","routes":[]}}"#, status)
}

/// **Test: three legs of 5.0, 3.2 and 7.1 km sum to 15.3 km; request carries waypoints in order.**
#[tokio::test]
async fn request_route_sums_leg_distances() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("origin".into(), "Start Station".into()),
            Matcher::UrlEncoded("destination".into(), "End Station".into()),
            Matcher::UrlEncoded("waypoints".into(), "Addr One|Addr Two".into()),
            Matcher::UrlEncoded("mode".into(), "driving".into()),
            Matcher::UrlEncoded("key".into(), TEST_API_KEY.into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(legs_body(&[5000, 3200, 7100], &[]))
        .expect(1)
        .create_async()
        .await;

    let config = test_config(&server.url());
    let addresses = parse_addresses("Addr One, Addr Two").unwrap();

    let result = google_requester(&config)
        .request_route(&addresses)
        .await
        .expect("route");

    mock.assert_async().await;
    assert_eq!(result.total_distance_meters(), 15_300);
    assert!((result.distance_km() - 15.3).abs() < 1e-9);
    assert_eq!(result.formatted_distance(), "15.3 km");
    assert_eq!(result.legs().len(), 3);
}

/// **Test: the map URL parsed back lists the waypoints in exactly the request order.**
#[tokio::test]
async fn request_route_map_url_round_trips_order() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(legs_body(&[100, 200, 300, 400], &[]))
        .create_async()
        .await;

    let config = test_config(&server.url());
    let addresses = parse_addresses("вул. Хрещатик 1\nБуча, Вокзальна 2 & 3").unwrap();

    let result = google_requester(&config)
        .request_route(&addresses)
        .await
        .expect("route");

    assert_eq!(
        map_url_waypoints(result.map_url()),
        vec![
            "Start Station",
            "вул. Хрещатик 1",
            "Буча",
            "Вокзальна 2 & 3",
            "End Station"
        ]
    );
    assert_eq!(result.map_url().host_str(), Some("www.google.com"));
}

/// Runs one request against a server answering `http_status` with `body` and returns the error.
async fn request_error(http_status: usize, body: &str) -> RouteError {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(http_status)
        .with_body(body)
        .create_async()
        .await;
    google_requester(&test_config(&server.url()))
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err()
}

/// **Test: every documented status lands on its error kind.**
///
/// **Expected:** MAX_ROUTE_LENGTH_EXCEEDED → NoRouteFound; OVER_DAILY_LIMIT → QuotaExceeded;
/// UNKNOWN_ERROR → UpstreamUnavailable (transient); non-2xx with a non-JSON body → Rejected.
#[tokio::test]
async fn request_route_status_mapping() {
    let err = request_error(200, &status_body("MAX_ROUTE_LENGTH_EXCEEDED")).await;
    assert!(matches!(err, RouteError::NoRouteFound { .. }), "got {:?}", err);

    let err = request_error(200, &status_body("OVER_DAILY_LIMIT")).await;
    assert!(matches!(err, RouteError::QuotaExceeded { .. }), "got {:?}", err);
    assert!(!err.is_transient());

    let err = request_error(200, &status_body("UNKNOWN_ERROR")).await;
    assert!(matches!(err, RouteError::UpstreamUnavailable(_)), "got {:?}", err);
    assert!(err.is_transient());

    let err = request_error(403, "Forbidden").await;
    match err {
        RouteError::Rejected { status, message } => {
            assert!(status.contains("403"), "status {}", status);
            assert_eq!(message, "Forbidden");
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

/// **Test: OK with a route but no legs is NoRouteFound, not a 0.0 km result.**
#[tokio::test]
async fn request_route_ok_without_legs() {
    let err = request_error(200, &legs_body(&[], &[])).await;
    assert!(matches!(err, RouteError::NoRouteFound { .. }), "got {:?}", err);

    let err = request_error(200, r#"{"status":"OK","routes":[]}"#).await;
    assert!(matches!(err, RouteError::NoRouteFound { .. }), "got {:?}", err);
}

/// **Test: ZERO_RESULTS and NOT_FOUND fail with NoRouteFound (no result, so no map URL).**
#[tokio::test]
async fn request_route_no_route_found() {
    for status in ["ZERO_RESULTS", "NOT_FOUND"] {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", API_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(status_body(status))
            .create_async()
            .await;

        let config = test_config(&server.url());
        let err = google_requester(&config)
            .request_route(&parse_addresses("Nowhere 1").unwrap())
            .await
            .unwrap_err();

        assert!(
            matches!(err, RouteError::NoRouteFound { .. }),
            "{} should map to NoRouteFound, got {:?}",
            status,
            err
        );
    }
}

/// **Test: quota statuses and HTTP 429 fail with QuotaExceeded, distinct from NoRouteFound.**
#[tokio::test]
async fn request_route_quota_exceeded() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(status_body("OVER_QUERY_LIMIT"))
        .create_async()
        .await;
    let config = test_config(&server.url());
    let err = google_requester(&config)
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::QuotaExceeded { .. }));

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(429)
        .with_body("Too Many Requests")
        .create_async()
        .await;
    let config = test_config(&server.url());
    let err = google_requester(&config)
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::QuotaExceeded { .. }));
}

/// **Test: HTTP 5xx is UpstreamUnavailable; REQUEST_DENIED is Rejected; garbage JSON is MalformedResponse.**
#[tokio::test]
async fn request_route_other_failures() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(503)
        .create_async()
        .await;
    let err = google_requester(&test_config(&server.url()))
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::UpstreamUnavailable(_)));

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#)
        .create_async()
        .await;
    let err = google_requester(&test_config(&server.url()))
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::Rejected { .. }));

    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;
    let err = google_requester(&test_config(&server.url()))
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::MalformedResponse(_)));
}

/// **Test: an upstream that accepts but never answers fails with UpstreamUnavailable within the timeout bound.**
#[tokio::test]
async fn request_route_times_out() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let mut config = test_config(&format!("http://{}", addr));
    config.timeout_secs = 1;
    let requester = google_requester(&config);
    let addresses = parse_addresses("Slow street 1").unwrap();

    let started = Instant::now();
    let result = tokio::time::timeout(Duration::from_secs(10), requester.request_route(&addresses))
        .await
        .expect("request must not hang past the client timeout");
    let elapsed = started.elapsed();

    let err = result.unwrap_err();
    assert!(matches!(err, RouteError::UpstreamUnavailable(_)), "got {:?}", err);
    assert!(elapsed < Duration::from_secs(5), "took {:?}", elapsed);
    assert!(
        !err.to_string().contains(TEST_API_KEY),
        "error message must not leak the API key"
    );
}

/// **Test: a refused connection fails with UpstreamUnavailable.**
#[tokio::test]
async fn request_route_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = test_config(&format!("http://{}", addr));
    let err = google_requester(&config)
        .request_route(&parse_addresses("a").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, RouteError::UpstreamUnavailable(_)));
}

/// **Test: with optimization on, the service's waypoint_order reorders stops in result and map URL.**
#[tokio::test]
async fn request_route_applies_optimized_order() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", API_PATH)
        .match_query(Matcher::UrlEncoded(
            "waypoints".into(),
            "optimize:true|first|second|third".into(),
        ))
        .with_status(200)
        .with_body(legs_body(&[1, 2, 3, 4], &[2, 0, 1]))
        .create_async()
        .await;

    let mut config = test_config(&server.url());
    config.optimize_waypoints = true;
    let result = google_requester(&config)
        .request_route(&parse_addresses("first, second, third").unwrap())
        .await
        .expect("route");

    mock.assert_async().await;
    assert_eq!(result.waypoints().stops(), &["third", "first", "second"]);
    assert_eq!(
        map_url_waypoints(result.map_url()),
        vec!["Start Station", "third", "first", "second", "End Station"]
    );
}

/// Service stub that fails with UpstreamUnavailable a fixed number of times, then succeeds.
struct FlakyService {
    failures: usize,
    calls: AtomicUsize,
}

#[async_trait]
impl DirectionsService for FlakyService {
    async fn fetch_route(
        &self,
        waypoints: &RouteWaypoints,
        _options: &RouteOptions,
    ) -> Result<Route, RouteError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(RouteError::UpstreamUnavailable("connection reset".to_string()));
        }
        let legs = (0..waypoints.leg_count())
            .map(|_| Leg {
                start_address: String::new(),
                end_address: String::new(),
                distance_meters: 1000,
            })
            .collect();
        Ok(Route {
            legs,
            waypoint_order: Vec::new(),
        })
    }
}

/// **Test: default policy makes a single attempt and surfaces the failure.**
#[tokio::test]
async fn request_route_single_attempt_by_default() {
    let service = Arc::new(FlakyService {
        failures: 1,
        calls: AtomicUsize::new(0),
    });
    let config = DirectionsConfig::new("key".to_string());
    let requester = RouteRequester::new(service.clone(), &config);

    let err = requester
        .request_route(&AddressList::new(["a"]).unwrap())
        .await
        .unwrap_err();

    assert!(err.is_transient());
    assert_eq!(service.calls.load(Ordering::SeqCst), 1);
}

/// **Test: a backoff policy retries transient failures up to its bound.**
#[tokio::test]
async fn request_route_backoff_retries_transient_errors() {
    let service = Arc::new(FlakyService {
        failures: 2,
        calls: AtomicUsize::new(0),
    });
    let config = DirectionsConfig::new("key".to_string());
    let requester = RouteRequester::new(service.clone(), &config).with_retry_policy(Arc::new(
        BackoffRetry::new(2, Duration::from_millis(1), Duration::from_millis(5)),
    ));

    let result = requester
        .request_route(&AddressList::new(["a", "b"]).unwrap())
        .await
        .expect("route after retries");

    assert_eq!(service.calls.load(Ordering::SeqCst), 3);
    assert_eq!(result.formatted_distance(), "3.0 km");
}
