// In-memory transport for client tests.
// Records every request and replays a canned response or failure.

use std::future::Future;
use std::sync::Mutex;

use reqwest::StatusCode;

use crate::error::{Result, TldrError};

use super::client::{HttpRequest, HttpResponse, Transport};

enum Reply {
    Respond(StatusCode, String),
    Reject(String),
}

pub struct RecordingTransport {
    reply: Reply,
    requests: Mutex<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn replying(status: StatusCode, body: &str) -> Self {
        Self {
            reply: Reply::Respond(status, body.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Fails every request before it reaches a server.
    pub fn rejecting(reason: &str) -> Self {
        Self {
            reply: Reply::Reject(reason.to_string()),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn send(&self, request: HttpRequest) -> impl Future<Output = Result<HttpResponse>> + Send {
        self.requests.lock().unwrap().push(request);
        let outcome = match &self.reply {
            Reply::Respond(status, body) => Ok(HttpResponse::new(*status, body.clone())),
            Reply::Reject(reason) => Err(TldrError::Other(reason.clone())),
        };
        async move { outcome }
    }
}
