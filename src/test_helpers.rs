//! Scripted transport and fixtures shared by unit tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;
use futures::future::{self, BoxFuture};
use serde_json::{Value, json};

use crate::gateway::Gateway;
use crate::session::{MemoryStorage, SessionStore};
use crate::transport::{Transport, TransportError, WireRequest, WireResponse};

pub(crate) type Reply = BoxFuture<'static, Result<WireResponse, TransportError>>;
type Handler = Box<dyn Fn(&WireRequest) -> Reply + Send + Sync>;

/// Transport whose answers come from a closure. Every request is recorded.
pub(crate) struct MockTransport {
    handler: Handler,
    sent: Mutex<Vec<WireRequest>>,
}

impl MockTransport {
    pub(crate) fn new<F>(handler: F) -> Arc<Self>
    where
        F: Fn(&WireRequest) -> Reply + Send + Sync + 'static,
    {
        Arc::new(Self { handler: Box::new(handler), sent: Mutex::new(Vec::new()) })
    }

    pub(crate) fn sent(&self) -> Vec<WireRequest> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(crate) fn sent_to(&self, path: &str) -> Vec<WireRequest> {
        self.sent()
            .into_iter()
            .filter(|r| r.path == path)
            .collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let reply = (self.handler)(&request);
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        reply.await
    }
}

pub(crate) fn reply(status: u16, body: Value) -> Reply {
    Box::pin(future::ready(Ok(WireResponse::new(status, body))))
}

pub(crate) fn fail(error: TransportError) -> Reply {
    Box::pin(future::ready(Err(error)))
}

/// Reply that never resolves.
pub(crate) fn hang() -> Reply {
    Box::pin(future::pending())
}

pub(crate) fn demo_user_json() -> Value {
    json!({
        "id": "user_scout_master_001",
        "email": "dbgillilan@gmail.com",
        "name": "David Gillilan",
        "role": "scout_master"
    })
}

/// Counter-based login responder: each call mints `tok_1`, `tok_2`, ...
pub(crate) struct TokenMint {
    issued: AtomicUsize,
}

impl TokenMint {
    pub(crate) fn new() -> Arc<Self> {
        Arc::new(Self { issued: AtomicUsize::new(0) })
    }

    pub(crate) fn login_reply(&self) -> Reply {
        let n = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        reply(200, json!({ "success": true, "token": format!("tok_{n}"), "user": demo_user_json() }))
    }

    pub(crate) fn issued(&self) -> usize {
        self.issued.load(Ordering::SeqCst)
    }
}

pub(crate) fn store_with(transport: &Arc<MockTransport>, storage: &Arc<MemoryStorage>) -> SessionStore {
    SessionStore::new(transport.clone(), storage.clone())
}

pub(crate) fn gateway_with(transport: &Arc<MockTransport>, storage: &Arc<MemoryStorage>) -> Gateway {
    Gateway::new(store_with(transport, storage))
}

/// Give every spawned task on the current-thread runtime a chance to run
/// until its next suspension point.
pub(crate) async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}
