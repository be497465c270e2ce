//! HTTP API tests: the axum surface over the pipeline.
//!
//! Each test binds the router to an ephemeral port and drives it with a
//! plain blocking client, with wiremock standing in for the upstream
//! collaborator services.

use std::time::Duration;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use passwatch::config::{Endpoints, PredictorConfig};
use passwatch::server::build_router;

fn mock_config(server: &MockServer) -> PredictorConfig {
    PredictorConfig {
        endpoints: Endpoints {
            ip_url: format!("{}/ip", server.uri()),
            geo_url: format!("{}/geo", server.uri()),
            pass_url: format!("{}/passes", server.uri()),
        },
        timeout: Duration::from_secs(5),
        user_agent: "passwatch-test/1.0".to_string(),
    }
}

async fn spawn_app(config: PredictorConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = build_router(config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// GET a URL and return (status, parsed JSON body), for success and error
/// statuses alike.
async fn get_json(url: String) -> (u16, serde_json::Value) {
    tokio::task::spawn_blocking(move || match ureq::get(&url).call() {
        Ok(r) => (r.status(), r.into_json().unwrap()),
        Err(ureq::Error::Status(code, r)) => (code, r.into_json().unwrap()),
        Err(e) => panic!("transport failure: {}", e),
    })
    .await
    .unwrap()
}

// ─── Success bodies ─────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn passes_returns_ip_coords_and_windows() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ip":"162.245.144.188"}"#))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/geo/162.245.144.188"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"latitude":51.477,"longitude":-0.0015}"#),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passes"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"response":[{"risetime":1445569956,"duration":368},{"risetime":1445575814,"duration":619}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let base = spawn_app(mock_config(&server)).await;
    let (status, body) = get_json(format!("{}/api/passes", base)).await;

    assert_eq!(status, 200);
    assert_eq!(body["ip"], "162.245.144.188");
    assert_eq!(body["coords"]["lat"].as_f64().unwrap(), 51.477);
    assert_eq!(body["coords"]["lon"].as_f64().unwrap(), -0.0015);
    assert_eq!(body["passes"][0]["risetime"], 1445569956);
    assert_eq!(body["passes"][0]["duration"], 368);
    assert_eq!(body["passes"][1]["risetime"], 1445575814);
    assert_eq!(body["passes"].as_array().unwrap().len(), 2);
}

#[tokio::test(flavor = "multi_thread")]
async fn passes_with_coords_skips_upstream_stages() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"ip":"9.9.9.9"}"#))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/geo/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/passes"))
        .and(query_param("lat", "51.477"))
        .and(query_param("lon", "-0.0015"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"response":[{"risetime":1445569956,"duration":368}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let base = spawn_app(mock_config(&server)).await;
    let (status, body) = get_json(format!("{}/api/passes?lat=51.477&lon=-0.0015", base)).await;

    assert_eq!(status, 200);
    assert!(body["ip"].is_null());
    assert_eq!(body["passes"].as_array().unwrap().len(), 1);
}

// ─── Query validation ───────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn out_of_range_coords_are_rejected() {
    let server = MockServer::start().await;
    let base = spawn_app(mock_config(&server)).await;

    let (status, body) = get_json(format!("{}/api/passes?lat=91&lon=0", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("-90..90"));

    let (status, _) = get_json(format!("{}/api/passes?lat=0&lon=181", base)).await;
    assert_eq!(status, 400);
}

#[tokio::test(flavor = "multi_thread")]
async fn lat_without_lon_is_rejected() {
    let server = MockServer::start().await;
    let base = spawn_app(mock_config(&server)).await;

    let (status, body) = get_json(format!("{}/api/passes?lat=51.477", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["code"], 400);
    assert!(body["error"].as_str().unwrap().contains("together"));
}

// ─── Upstream failure mapping ───────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn upstream_status_failure_maps_to_bad_gateway() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/geo/.*"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(0)
        .mount(&server)
        .await;

    let base = spawn_app(mock_config(&server)).await;
    let (status, body) = get_json(format!("{}/api/passes", base)).await;

    assert_eq!(status, 502);
    assert_eq!(body["code"], 502);
    assert!(body["error"].as_str().unwrap().contains("status 500"));
}

#[tokio::test(flavor = "multi_thread")]
async fn upstream_transport_failure_maps_to_bad_gateway() {
    let dead_port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let config = PredictorConfig {
        endpoints: Endpoints {
            ip_url: format!("http://127.0.0.1:{}/ip", dead_port),
            geo_url: format!("http://127.0.0.1:{}/geo", dead_port),
            pass_url: format!("http://127.0.0.1:{}/passes", dead_port),
        },
        timeout: Duration::from_secs(2),
        user_agent: "passwatch-test/1.0".to_string(),
    };

    let base = spawn_app(config).await;
    let (status, body) = get_json(format!("{}/api/passes", base)).await;

    assert_eq!(status, 502);
    assert_eq!(body["code"], 502);
}

#[tokio::test(flavor = "multi_thread")]
async fn unintelligible_upstream_body_maps_to_internal_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ip"))
        .respond_with(ResponseTemplate::new(200).set_body_string("definitely not json"))
        .expect(1)
        .mount(&server)
        .await;

    let base = spawn_app(mock_config(&server)).await;
    let (status, body) = get_json(format!("{}/api/passes", base)).await;

    assert_eq!(status, 500);
    assert_eq!(body["code"], 500);
}
