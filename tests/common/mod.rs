//! Shared utilities for integration tests: a stub courier and a running relay.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use tokio::net::TcpListener;

use pincode_relay::config::RelayConfig;
use pincode_relay::courier::DelhiveryClient;
use pincode_relay::delivery::{DeliveryService, FixedClock};
use pincode_relay::{HttpServer, Shutdown};

pub const TEST_TOKEN: &str = "test-token";

/// Canned upstream answer.
#[derive(Clone)]
pub enum Reply {
    Json(u16, Value),
    Raw(u16, &'static str),
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, body) => (status_code(status), Json(body)).into_response(),
            Reply::Raw(status, body) => (status_code(status), body).into_response(),
        }
    }
}

fn status_code(status: u16) -> StatusCode {
    StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

/// A call the stub courier received.
#[derive(Debug, Clone)]
pub struct SeenCall {
    pub authorization: Option<String>,
    pub filter_codes: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct StubState {
    lookup: Reply,
    transit: HashMap<String, Reply>,
    seen: Arc<Mutex<Vec<SeenCall>>>,
}

/// Handle to a running stub courier.
pub struct StubCourier {
    pub addr: SocketAddr,
    seen: Arc<Mutex<Vec<SeenCall>>>,
}

impl StubCourier {
    pub fn calls(&self) -> Vec<SeenCall> {
        self.seen.lock().unwrap().clone()
    }

    pub fn pincode_url(&self) -> String {
        format!("http://{}/c/api/pin-codes/json/", self.addr)
    }

    pub fn transit_url(&self) -> String {
        format!("http://{}/api/dc/expected_tat", self.addr)
    }
}

fn authorization(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn lookup(
    State(state): State<StubState>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Reply {
    state.seen.lock().unwrap().push(SeenCall {
        authorization: authorization(&headers),
        filter_codes: query.get("filter_codes").cloned(),
        body: None,
    });
    state.lookup.clone()
}

async fn transit(State(state): State<StubState>, headers: HeaderMap, Json(body): Json<Value>) -> Reply {
    let mode = body["shipment_mode"].as_str().unwrap_or_default().to_string();
    state.seen.lock().unwrap().push(SeenCall {
        authorization: authorization(&headers),
        filter_codes: None,
        body: Some(body),
    });
    state
        .transit
        .get(&mode)
        .cloned()
        .unwrap_or(Reply::Raw(400, "unknown shipment_mode"))
}

/// Start a stub courier answering the lookup with `lookup` and each transit
/// mode ("Surface", "Air") with its reply.
pub async fn start_stub_courier(lookup_reply: Reply, surface: Reply, air: Reply) -> StubCourier {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        lookup: lookup_reply,
        transit: HashMap::from([("Surface".to_string(), surface), ("Air".to_string(), air)]),
        seen: seen.clone(),
    };

    let app = Router::new()
        .route("/c/api/pin-codes/json/", get(lookup))
        .route("/api/dc/expected_tat", post(transit))
        .with_state(state);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    StubCourier { addr, seen }
}

/// Lookup body for a serviceable pincode.
pub fn serviceable_lookup(pin: u32, district: &str, state_code: &str, cod: &str) -> Reply {
    Reply::Json(
        200,
        serde_json::json!({
            "delivery_codes": [{
                "postal_code": {
                    "pin": pin,
                    "district": district,
                    "state_code": state_code,
                    "cod": cod,
                    "pre_paid": "Y"
                }
            }]
        }),
    )
}

pub fn transit_days(days: u32) -> Reply {
    Reply::Json(200, serde_json::json!({ "estimated_days": days }))
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
}

/// A relay running on an ephemeral port.
pub struct RunningRelay {
    pub base_url: String,
    pub shutdown: Shutdown,
}

impl RunningRelay {
    pub fn check_url(&self) -> String {
        format!("{}/api/check-delivery", self.base_url)
    }
}

impl Drop for RunningRelay {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Relay configuration pointed at the stub courier.
pub fn relay_config(stub: &StubCourier, token: Option<&str>) -> RelayConfig {
    let mut config = RelayConfig::default();
    config.courier.pincode_url = stub.pincode_url();
    config.courier.transit_url = stub.transit_url();
    config.courier.request_timeout_secs = 5;
    config.api_token = token.map(str::to_string);
    config
}

/// Start the relay with the real courier client and a fixed clock.
pub async fn start_relay(config: RelayConfig) -> RunningRelay {
    let courier = Arc::new(DelhiveryClient::new(&config.courier).unwrap());
    let service = Arc::new(DeliveryService::new(
        &config,
        courier,
        Arc::new(FixedClock(fixed_today())),
    ));
    let server = HttpServer::with_service(&config, service);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    RunningRelay {
        base_url: format!("http://{}", addr),
        shutdown,
    }
}

pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}
