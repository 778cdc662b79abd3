//! Scripted transport shared by the authentication unit tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use http::header::{CONTENT_TYPE, HeaderValue};

use super::{AuthInterceptor, AuthPaths, AuthenticatedClient, TokenStore};
use crate::networking::{
    BaseUrl, PreparedRequest, RequestBuilder, Transport, TransportError, TransportResponse,
};

pub(crate) const BASE_URL: &str = "https://api.example.com/api/v1";

pub(crate) fn json_response(status: u16, body: &str) -> TransportResponse {
    let mut response = TransportResponse::new(
        StatusCode::from_u16(status).expect("test status should be valid"),
        body.as_bytes().to_vec(),
    );
    response
        .headers
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

/// Replies to refresh calls with a fixed response and to every other call
/// from a queue, recording each request it receives.
pub(crate) struct ScriptedTransport {
    resource_replies: Mutex<VecDeque<TransportResponse>>,
    refresh_reply: TransportResponse,
    refresh_delay: Duration,
    refresh_calls: AtomicUsize,
    sent: Mutex<Vec<PreparedRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn new(
        resource_replies: Vec<TransportResponse>,
        refresh_reply: TransportResponse,
    ) -> Self {
        Self {
            resource_replies: Mutex::new(resource_replies.into()),
            refresh_reply,
            refresh_delay: Duration::ZERO,
            refresh_calls: AtomicUsize::new(0),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn with_refresh_delay(mut self, delay: Duration) -> Self {
        self.refresh_delay = delay;
        self
    }

    pub(crate) fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn sent(&self) -> Vec<PreparedRequest> {
        self.sent.lock().expect("sent log should not be poisoned").clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: &PreparedRequest) -> Result<TransportResponse, TransportError> {
        self.sent
            .lock()
            .expect("sent log should not be poisoned")
            .push(request.clone());

        if AuthPaths::default().is_auth_path(request.url.path()) {
            self.refresh_calls.fetch_add(1, Ordering::SeqCst);
            if !self.refresh_delay.is_zero() {
                tokio::time::sleep(self.refresh_delay).await;
            }
            return Ok(self.refresh_reply.clone());
        }

        self.resource_replies
            .lock()
            .expect("reply queue should not be poisoned")
            .pop_front()
            .ok_or_else(|| TransportError::Other {
                message: format!("no scripted reply for {}", request.url),
            })
    }
}

pub(crate) fn request_builder() -> RequestBuilder {
    RequestBuilder::new(BaseUrl::parse(BASE_URL).expect("base URL should parse"))
}

pub(crate) fn client_over(
    transport: &Arc<ScriptedTransport>,
    store: Arc<dyn TokenStore>,
) -> AuthenticatedClient {
    let shared: Arc<dyn Transport> = Arc::clone(transport) as Arc<dyn Transport>;
    let interceptor = Arc::new(AuthInterceptor::new(
        Arc::clone(&shared),
        request_builder(),
        store,
        AuthPaths::default(),
    ));
    AuthenticatedClient::new(shared, interceptor)
}
