// tests/common.rs

use axum::body::Body;
use axum::extract::State;
use axum::http::{self, header, HeaderMap, StatusCode, Uri};
use axum::response::Response;
use axum::Router;
use std::collections::HashMap;
use std::process::Command;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;
use tokio::runtime::Runtime;

// Helper function to get the binary command
#[allow(dead_code)] // This is used by many integration tests, but not all.
pub fn groupmirror_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("groupmirror"));
    // Keep the caller's environment from leaking options into the test.
    for var in [
        "GITLAB_URL",
        "GITLAB_TOKEN",
        "GITLAB_API_VERSION",
        "GROUPMIRROR_GROUP",
        "GROUPMIRROR_IGNORE",
        "GROUPMIRROR_PROJECT_DIR",
        "GROUPMIRROR_GIT",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_PROXY", "127.0.0.1,localhost");
    cmd
}

/// A canned HTTP response.
#[allow(dead_code)]
#[derive(Clone)]
pub struct Reply {
    pub status: u16,
    pub body: String,
    pub next_page: Option<String>,
}

#[allow(dead_code)]
impl Reply {
    pub fn json(body: &str) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            next_page: Some(String::new()),
        }
    }

    pub fn page(body: &str, next_page: u32) -> Self {
        Self {
            status: 200,
            body: body.to_string(),
            next_page: Some(next_page.to_string()),
        }
    }

    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: r#"{"message":"error"}"#.to_string(),
            next_page: None,
        }
    }
}

/// A request received by `MockGitLab`.
#[allow(dead_code)]
#[derive(Debug, Clone)]
pub struct Received {
    pub path: String,
    pub headers: HashMap<String, String>,
}

/// A GitLab stand-in answering list requests from a route table.
///
/// Routes are keyed by the full request target (path and query). Anything not
/// in the table gets a 404. The server runs on its own tokio runtime so tests
/// can drive it with the blocking client.
#[allow(dead_code)]
pub struct MockGitLab {
    pub base_url: String,
    received: Arc<Mutex<Vec<Received>>>,
    _runtime: Runtime,
}

#[allow(dead_code)]
struct MockState {
    routes: HashMap<String, Reply>,
    received: Arc<Mutex<Vec<Received>>>,
}

#[allow(dead_code)]
async fn answer(State(state): State<Arc<MockState>>, uri: Uri, headers: HeaderMap) -> Response {
    let target = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());
    let headers = headers
        .iter()
        .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
        .collect();
    state.received.lock().unwrap().push(Received {
        path: target.clone(),
        headers,
    });

    let reply = state.routes.get(&target).cloned().unwrap_or(Reply {
        status: 404,
        body: r#"{"message":"404 Not Found"}"#.to_string(),
        next_page: None,
    });
    let mut response = http::Response::builder()
        .status(StatusCode::from_u16(reply.status).unwrap())
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(next) = &reply.next_page {
        response = response.header("X-Next-Page", next.as_str());
    }
    response.body(Body::from(reply.body)).unwrap()
}

#[allow(dead_code)]
impl MockGitLab {
    pub fn start(routes: Vec<(&str, Reply)>) -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .enable_all()
            .build()
            .unwrap();
        let received = Arc::new(Mutex::new(Vec::new()));
        let state = Arc::new(MockState {
            routes: routes
                .into_iter()
                .map(|(target, reply)| (target.to_string(), reply))
                .collect(),
            received: received.clone(),
        });
        let app = Router::new().fallback(answer).with_state(state);

        let listener = runtime
            .block_on(TcpListener::bind("127.0.0.1:0"))
            .unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        runtime.spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            received,
            _runtime: runtime,
        }
    }

    /// Every request target received so far, in order.
    pub fn paths(&self) -> Vec<String> {
        self.received
            .lock()
            .unwrap()
            .iter()
            .map(|r| r.path.clone())
            .collect()
    }

    /// Every request received so far, in order.
    pub fn received(&self) -> Vec<Received> {
        self.received.lock().unwrap().clone()
    }
}

/// JSON for a group listing entry.
#[allow(dead_code)]
pub fn group_json(id: u64, name: &str) -> String {
    format!(r#"{{"id":{},"name":"{}","path":"{}"}}"#, id, name, name)
}

/// JSON for a project listing entry; clone URLs point at gitlab.example.com.
#[allow(dead_code)]
pub fn project_json(id: u64, name: &str, namespace: &str) -> String {
    format!(
        r#"{{"id":{},"name":"{}","http_url_to_repo":"https://gitlab.example.com/{}/{}.git","path_with_namespace":"{}/{}","default_branch":"main"}}"#,
        id, name, namespace, name, namespace, name
    )
}

/// Wraps entries into a JSON array.
#[allow(dead_code)]
pub fn array(entries: &[String]) -> String {
    format!("[{}]", entries.join(","))
}
