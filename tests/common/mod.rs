#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use vacancy_probe::client::VacancyClient;
use vacancy_probe::verifier::PageVerifier;

pub const TOKEN: &str = "test-token";
pub const AGENT: &str = "vacancy-probe-tests";

type ItemsFn = dyn Fn(Option<u32>) -> Vec<Value> + Send + Sync;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub params: HashMap<String, String>,
    pub authorization: Option<String>,
    pub user_agent: Option<String>,
}

impl RecordedRequest {
    pub fn page(&self) -> Option<u32> {
        self.params.get("page").map(|p| p.parse().unwrap())
    }
}

/// In-process stand-in for the vacancy search endpoint.
pub struct StubBackend {
    pub found: u64,
    pub pages: u32,
    pub fail_page: Option<(u32, StatusCode)>,
    pub fail_discovery: Option<StatusCode>,
    items: Box<ItemsFn>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl StubBackend {
    pub fn new(found: u64, pages: u32) -> Self {
        Self {
            found,
            pages,
            fail_page: None,
            fail_discovery: None,
            items: Box::new(|page: Option<u32>| {
                vec![json!({"id": format!("{}", page.unwrap_or(0)), "name": "Тестировщик"})]
            }),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn fail_page(mut self, page: u32, status: StatusCode) -> Self {
        self.fail_page = Some((page, status));
        self
    }

    pub fn fail_discovery(mut self, status: StatusCode) -> Self {
        self.fail_discovery = Some(status);
        self
    }

    pub fn items(mut self, items: impl Fn(Option<u32>) -> Vec<Value> + Send + Sync + 'static) -> Self {
        self.items = Box::new(items);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Page indices of the paged requests, in the order they arrived.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests().iter().filter_map(|r| r.page()).collect()
    }

    pub fn discovery_requests(&self) -> usize {
        self.requests().iter().filter(|r| r.page().is_none()).count()
    }
}

async fn search_handler(
    State(stub): State<Arc<StubBackend>>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let recorded = RecordedRequest {
        params,
        authorization: header("authorization"),
        user_agent: header("user-agent"),
    };
    let page = recorded.page();
    stub.requests.lock().unwrap().push(recorded);

    match (page, stub.fail_discovery, stub.fail_page) {
        (None, Some(status), _) => return (status, "discovery failed").into_response(),
        (Some(idx), _, Some((fail_idx, status))) if idx == fail_idx => {
            return (status, Json(json!({"errors": [{"type": "stub"}]}))).into_response();
        }
        _ => {}
    }

    Json(json!({
        "found": stub.found,
        "pages": stub.pages,
        "page": page.unwrap_or(0),
        "per_page": 100,
        "items": (stub.items)(page),
    }))
    .into_response()
}

/// Serves `stub` on an ephemeral port and returns its base URL.
pub async fn serve(stub: Arc<StubBackend>) -> String {
    let app = Router::new()
        .route("/vacancies", get(search_handler))
        .with_state(stub);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

pub async fn verifier_for(stub: &Arc<StubBackend>, max_pages: u32) -> PageVerifier {
    let base_url = serve(stub.clone()).await;
    let client = VacancyClient::new(&base_url, "/vacancies", TOKEN, AGENT);
    PageVerifier::new(client).per_page(100).max_pages(max_pages)
}
