use axum::{
    body::Bytes,
    extract::State,
    http::{header::AUTHORIZATION, HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use gotobank_core::{Payment, Transfer, Verification};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc, Mutex,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

/// A request as the mock bank saw it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: String,
}

#[derive(Default)]
struct Ledger {
    requests: Mutex<Vec<RecordedRequest>>,
    fail_after: Mutex<Option<usize>>,
    served: AtomicU64,
}

/// In-process stand-in for the banking API. Every request is recorded.
#[derive(Clone)]
pub struct MockBank {
    addr: SocketAddr,
    ledger: Arc<Ledger>,
}

impl MockBank {
    /// Start on an ephemeral localhost port.
    pub async fn start() -> Self {
        Self::bind("127.0.0.1:0".parse().unwrap()).await
    }

    pub async fn bind(addr: SocketAddr) -> Self {
        let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
        let addr = listener.local_addr().unwrap();
        let ledger = Arc::new(Ledger::default());

        let app = Router::new()
            .fallback(handle)
            .with_state(ledger.clone())
            .layer(TraceLayer::new_for_http());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, ledger }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.ledger.requests.lock().unwrap().clone()
    }

    /// Answer every request after the first `n` with a 500.
    pub fn fail_after(&self, n: usize) {
        *self.ledger.fail_after.lock().unwrap() = Some(n);
    }

    /// Requests served since the last call.
    pub fn take_served(&self) -> u64 {
        self.ledger.served.swap(0, Ordering::Relaxed)
    }
}

async fn handle(
    State(ledger): State<Arc<Ledger>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    let seen = {
        let mut requests = ledger.requests.lock().unwrap();
        requests.push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            authorization: headers
                .get(AUTHORIZATION)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string),
            body: String::from_utf8_lossy(&body).into_owned(),
        });
        requests.len()
    };
    ledger.served.fetch_add(1, Ordering::Relaxed);

    if let Some(limit) = *ledger.fail_after.lock().unwrap() {
        if seen > limit {
            debug!("MOCK BANK ___ FAIL {method} {uri}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "unavailable" })),
            );
        }
    }

    respond(&method, uri.path(), uri.query(), &body)
}

fn respond(method: &Method, path: &str, query: Option<&str>, body: &[u8]) -> (StatusCode, Json<Value>) {
    let ok = |value: Value| (StatusCode::OK, Json(value));

    match (method.as_str(), path) {
        ("GET", "/api/account") => ok(json!({ "id": 1, "owner": "Test Account" })),
        ("GET", "/api/balance") => ok(json!({ "balance": 1000 })),
        ("GET", "/api/codes") => ok(json!({ "codes": [1234, 5678] })),
        ("GET", "/api/transaction") => {
            let id = query.and_then(|q| q.strip_prefix("id=")).unwrap_or_default();
            ok(json!({ "id": id, "amount": 100 }))
        }
        ("POST", "/api/transfer") => match serde_json::from_slice::<Transfer>(body) {
            Ok(transfer) => ok(json!({ "transaction_id": 1, "amount": transfer.amount })),
            Err(err) => unprocessable(err),
        },
        ("POST", "/api/payment") => match serde_json::from_slice::<Payment>(body) {
            Ok(payment) => ok(json!({ "transaction_id": 2, "amount": payment.amount })),
            Err(err) => unprocessable(err),
        },
        ("POST", "/api/verify") => match serde_json::from_slice::<Verification>(body) {
            Ok(_) => ok(json!({ "status": "verified" })),
            Err(err) => unprocessable(err),
        },
        _ => (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))),
    }
}

fn unprocessable(err: serde_json::Error) -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(json!({ "error": err.to_string() })),
    )
}

/** TPS Printer **/

pub async fn tps_measure_task(bank: MockBank) {
    loop {
        tokio::time::sleep(std::time::Duration::from_millis(1000)).await;
        let transactions = bank.take_served();
        println!("{transactions} TPS");
    }
}
