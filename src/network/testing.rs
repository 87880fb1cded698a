//! In-process transport used by the network tests.

use std::sync::Mutex;
use std::time::Duration;

use futures::future::BoxFuture;

use crate::common::ApiError;

use super::transport::{HttpRequest, HttpResponse, HttpTransport};

type Handler = Box<dyn Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync>;

pub struct ScriptedTransport {
    handler: Handler,
    requests: Mutex<Vec<HttpRequest>>,
    delays: Vec<(String, Duration)>,
}

impl ScriptedTransport {
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(&HttpRequest) -> Result<HttpResponse, ApiError> + Send + Sync + 'static,
    {
        Self {
            handler: Box::new(handler),
            requests: Mutex::new(Vec::new()),
            delays: Vec::new(),
        }
    }

    /// Holds answers for `path` back by `delay`.
    pub fn delaying(mut self, path: &str, delay: Duration) -> Self {
        self.delays.push((path.to_string(), delay));
        self
    }

    /// Answers every request with the same status and body.
    pub fn replying(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::new(move |_| {
            Ok(HttpResponse {
                status,
                body: body.clone(),
            })
        })
    }

    pub fn offline() -> Self {
        Self::new(|_| Err(ApiError::Network("connection refused".into())))
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl HttpTransport for ScriptedTransport {
    fn execute(&self, request: HttpRequest) -> BoxFuture<'_, Result<HttpResponse, ApiError>> {
        let result = (self.handler)(&request);
        let delay = self
            .delays
            .iter()
            .find(|(path, _)| *path == request.path)
            .map(|(_, delay)| *delay);
        self.requests.lock().unwrap().push(request);
        Box::pin(async move {
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            result
        })
    }
}
