// src/tests/utils.rs

use crate::domain::{PropertyGroup, Suggestion, SuggestionSummary, VerificationStatus};
use crate::errors::{Result, SuggestionError};
use crate::remote::{Action, SuggestionLocations, SuggestionsResponse, VerificationService};
use crate::Config;
use astra::{Body, Request, ResponseBuilder, Server};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::Read;
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Backend payload used across tests: two properties sharing case "C1",
/// plus one archived rejection.
pub fn sample_response() -> SuggestionsResponse {
    let summary = |case: &str, address: &str| SuggestionSummary {
        case_id: case.to_string(),
        address: address.to_string(),
        verification: VerificationStatus::Unverified,
    };

    SuggestionsResponse {
        suggestions: vec![
            PropertyGroup::new(1, "Riverside Commons", vec![summary("C1", "12 River Rd")]),
            PropertyGroup::new(
                2,
                "Lakeview Terrace",
                vec![summary("C1", "90 Lake St"), summary("C2", "92 Lake St")],
            ),
        ],
        archived_suggestions: vec![Suggestion {
            property_id: 2,
            case_id: "A9".to_string(),
            address: "94 Lake St".to_string(),
            verification: VerificationStatus::Rejected,
        }],
        num_suggestions: 3,
    }
}

/// Scripted, in-memory stand-in for the backend.
#[derive(Default)]
pub struct FakeService {
    pub fetches: RefCell<VecDeque<Result<SuggestionsResponse>>>,
    pub submit_failures: RefCell<VecDeque<SuggestionError>>,
    pub calls: RefCell<Vec<(Action, i64, String)>>,
}

impl FakeService {
    pub fn with_fetch(resp: SuggestionsResponse) -> Self {
        let fake = Self::default();
        fake.fetches.borrow_mut().push_back(Ok(resp));
        fake
    }

    pub fn push_fetch(&self, resp: Result<SuggestionsResponse>) {
        self.fetches.borrow_mut().push_back(resp);
    }

    pub fn fail_next_submit(&self, err: SuggestionError) {
        self.submit_failures.borrow_mut().push_back(err);
    }
}

impl VerificationService for FakeService {
    fn fetch_all(&self) -> Result<SuggestionsResponse> {
        self.fetches
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(SuggestionError::Network("no scripted fetch".into())))
    }

    fn submit(&self, action: Action, cares_id: i64, case_id: &str) -> Result<()> {
        self.calls
            .borrow_mut()
            .push((action, cares_id, case_id.to_string()));

        match self.submit_failures.borrow_mut().pop_front() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn locations(&self, _cares_id: i64, case_id: &str) -> Result<SuggestionLocations> {
        if case_id == "missing" {
            return Err(SuggestionError::Network("backend HTTP 400 Bad Request".into()));
        }
        Ok(SuggestionLocations {
            cares_location: [-93.1, 45.0],
            eviction_location: [-93.2, 45.1],
        })
    }
}

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: String,
}

pub type Handler = fn(&str, &str) -> (u16, String);

/// A throwaway HTTP backend on a local port. The server thread lives until
/// the test process exits.
pub struct FakeBackend {
    pub config: Config,
    pub requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl FakeBackend {
    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

/// `handler` gets `(method, path)` and returns `(status, json body)`.
pub fn spawn_backend(handler: Handler) -> FakeBackend {
    let addr = free_local_addr();
    let requests = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&requests);

    std::thread::spawn(move || {
        let _ = Server::bind(&addr).serve(move |mut req: Request, _info| {
            let mut body = String::new();
            let _ = req.body_mut().reader().read_to_string(&mut body);

            let method = req.method().as_str().to_string();
            let path = req.uri().path().to_string();
            let (status, payload) = handler(&method, &path);

            log.lock().unwrap().push(RecordedRequest {
                method,
                path,
                query: req.uri().query().unwrap_or("").to_string(),
                body,
            });

            ResponseBuilder::new()
                .status(status)
                .header(http::header::CONTENT_TYPE, "application/json")
                .body(Body::from(payload))
                .unwrap()
        });
    });

    wait_until_listening(addr);

    FakeBackend {
        config: Config::new(&format!("http://{addr}"))
            .unwrap()
            .with_timeout(Duration::from_secs(5)),
        requests,
    }
}

/// An address nothing listens on.
pub fn closed_local_addr() -> SocketAddr {
    free_local_addr()
}

fn free_local_addr() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn wait_until_listening(addr: SocketAddr) {
    for _ in 0..200 {
        if TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("fake backend never started on {addr}");
}
