// system-tests/tests/helpers/catalog_stub.rs
// ============================================================================
// Module: Catalog Stub
// Description: Local pattern directory serving a small fixture catalog.
// Purpose: Run every contract scenario without a sandbox.
// Dependencies: tiny_http, serde_json, url
// ============================================================================

//! ## Overview
//! [`CatalogStub`] answers `GET /patterns/1.0` like the real service does for
//! the queries the scenarios use: no filter, `pattern-categories`, and
//! `search` (title only). It routes on the `Host` header and returns 404 for
//! other virtual hosts. [`StubFault`] injects one contract break at a time.

use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use patterns_contract::ContractConfig;
use patterns_contract::config::DEFAULT_HOST;
use serde_json::Value;
use serde_json::json;
use tiny_http::Header;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

/// Route prefix served by the stub.
const API_PATH: &str = "/patterns/1.0";

/// Category term IDs and slugs in the fixture catalog.
const CATEGORIES: &[(u64, &str)] =
    &[(2, "buttons"), (3, "columns"), (4, "gallery"), (5, "header"), (6, "text")];

/// One fixture pattern.
#[derive(Debug, Clone)]
pub struct StubPattern {
    pub id: u64,
    pub title: &'static str,
    pub category_ids: &'static [u64],
    pub keywords: &'static [&'static str],
    pub description: &'static str,
}

/// Default fixture catalog.
pub const CATALOG: &[StubPattern] = &[
    StubPattern {
        id: 101,
        title: "Two buttons",
        category_ids: &[2],
        keywords: &["call to action"],
        description: "Two buttons placed next to each other.",
    },
    StubPattern {
        id: 102,
        title: "Three columns with images and text",
        category_ids: &[3],
        keywords: &["columns", "images"],
        description: "Three equal columns, each with an image and a paragraph.",
    },
    StubPattern {
        id: 103,
        title: "Images Side by Side",
        category_ids: &[3, 4],
        keywords: &["gallery"],
        description: "Two images in columns.",
    },
    StubPattern {
        id: 104,
        title: "Large header with a heading",
        category_ids: &[5],
        keywords: &["cover"],
        description: "A cover block with a centered heading.",
    },
    StubPattern {
        id: 105,
        title: "Side by side buttons with outline",
        category_ids: &[2],
        keywords: &[],
        description: "Outlined buttons aligned in a row.",
    },
    StubPattern {
        id: 106,
        title: "Quote",
        category_ids: &[6],
        keywords: &["testimonial"],
        description: "A pull quote on a bright gradient background.",
    },
];

/// Contract breaks the stub can inject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StubFault {
    /// Behave like the real service.
    None,
    /// Ignore `pattern-categories` and return everything.
    IgnoreCategoryFilter,
    /// Serialize empty results as `[ ]`.
    PaddedEmptyBody,
    /// Ignore `search` and return everything.
    IgnoreSearch,
    /// Report every pattern under the `buttons` category.
    SingleCategory,
    /// Answer every request with a 500.
    ServerError,
    /// Send `wpop_viewport_width` as a string.
    MistypedViewport,
}

/// One request as seen by the stub.
#[derive(Debug, Clone)]
pub struct SeenRequest {
    pub method: String,
    pub url: String,
    pub host: Option<String>,
    pub accept: Option<String>,
}

/// Running fixture catalog server.
pub struct CatalogStub {
    server: Arc<Server>,
    base_url: String,
    seen: Arc<Mutex<Vec<SeenRequest>>>,
    join: Option<thread::JoinHandle<()>>,
}

impl CatalogStub {
    /// Starts a well-behaved stub.
    pub fn start() -> Result<Self, String> {
        Self::with_fault(StubFault::None)
    }

    /// Starts a stub injecting `fault`.
    pub fn with_fault(fault: StubFault) -> Result<Self, String> {
        let server = Arc::new(
            Server::http("127.0.0.1:0").map_err(|err| format!("catalog stub bind failed: {err}"))?,
        );
        let addr = server
            .server_addr()
            .to_ip()
            .ok_or_else(|| "catalog stub is not bound to an IP address".to_string())?;
        let base_url = format!("http://{addr}{API_PATH}");
        let seen = Arc::new(Mutex::new(Vec::new()));

        let worker = Arc::clone(&server);
        let log = Arc::clone(&seen);
        let join = thread::spawn(move || {
            for request in worker.incoming_requests() {
                let seen = observe(&request);
                let (status, body) = route(fault, &seen);
                if let Ok(mut entries) = log.lock() {
                    entries.push(seen);
                }
                let mut response = Response::from_string(body).with_status_code(status);
                if let Ok(header) = Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                {
                    response.add_header(header);
                }
                let _ = request.respond(response);
            }
        });
        Ok(Self {
            server,
            base_url,
            seen,
            join: Some(join),
        })
    }

    /// Returns a config targeting this stub with default headers.
    pub fn config(&self) -> ContractConfig {
        ContractConfig::with_base_url(self.base_url.clone())
    }

    /// Returns every request received so far.
    pub fn requests(&self) -> Vec<SeenRequest> {
        self.seen.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl Drop for CatalogStub {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Captures the request fields the assertions care about.
fn observe(request: &Request) -> SeenRequest {
    let header = |name: &str| {
        request
            .headers()
            .iter()
            .find(|header| header.field.as_str().as_str().eq_ignore_ascii_case(name))
            .map(|header| header.value.as_str().to_string())
    };
    SeenRequest {
        method: request.method().to_string(),
        url: request.url().to_string(),
        host: header("Host"),
        accept: header("Accept"),
    }
}

/// Computes the status and body for one request.
fn route(fault: StubFault, request: &SeenRequest) -> (u16, String) {
    if fault == StubFault::ServerError {
        return (500, r#"{"code":"internal_error"}"#.to_string());
    }
    if request.method != "GET" {
        return (405, r#"{"code":"method_not_allowed"}"#.to_string());
    }
    if request.host.as_deref() != Some(DEFAULT_HOST) {
        return (404, "<html>unknown virtual host</html>".to_string());
    }
    let Ok(url) = Url::parse(&format!("http://stub{}", request.url)) else {
        return (400, r#"{"code":"bad_request"}"#.to_string());
    };
    if url.path().trim_end_matches('/') != API_PATH {
        return (404, r#"{"code":"rest_no_route"}"#.to_string());
    }

    let mut category = None;
    let mut search = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "pattern-categories" => category = value.parse::<u64>().ok(),
            "search" => search = Some(value.to_lowercase()),
            _ => {}
        }
    }
    if fault == StubFault::IgnoreCategoryFilter {
        category = None;
    }
    if fault == StubFault::IgnoreSearch {
        search = None;
    }

    let matches: Vec<Value> = CATALOG
        .iter()
        .filter(|pattern| category.is_none_or(|id| pattern.category_ids.contains(&id)))
        .filter(|pattern| {
            search.as_deref().is_none_or(|term| pattern.title.to_lowercase().contains(term))
        })
        .map(|pattern| pattern_json(pattern, fault))
        .collect();

    if matches.is_empty() && fault == StubFault::PaddedEmptyBody {
        return (200, "[ ]".to_string());
    }
    (200, Value::Array(matches).to_string())
}

/// Renders a fixture pattern the way the service does.
fn pattern_json(pattern: &StubPattern, fault: StubFault) -> Value {
    let slugs: Vec<&str> = if fault == StubFault::SingleCategory {
        vec!["buttons"]
    } else {
        pattern
            .category_ids
            .iter()
            .filter_map(|id| CATEGORIES.iter().find(|(term, _)| term == id).map(|(_, slug)| *slug))
            .collect()
    };
    let viewport = if fault == StubFault::MistypedViewport { json!("1200") } else { json!(1200) };
    json!({
        "id": pattern.id,
        "type": "wporg-pattern",
        "title": { "rendered": pattern.title },
        "pattern-categories": pattern.category_ids,
        "meta": {
            "wpop_description": pattern.description,
            "wpop_viewport_width": viewport,
            "wpop_category_slugs": slugs,
            "wpop_keyword_slugs": pattern.keywords,
        }
    })
}
