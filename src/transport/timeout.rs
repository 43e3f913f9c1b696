// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tower-based request timeout layer for Alloy RPC clients.
//!
//! Bounds every upstream request so a stalled node turns into a transport
//! error instead of a fetch that never completes.

use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use alloy_json_rpc::{RequestPacket, ResponsePacket};
use alloy_transport::{TransportError, TransportErrorKind};
use tower::Layer;
use tracing::warn;

/// A Tower layer that fails requests which take longer than a fixed timeout.
///
/// # Example
///
/// ```rust,ignore
/// use blockpulse::transport::TimeoutLayer;
/// use alloy_rpc_client::ClientBuilder;
/// use std::time::Duration;
///
/// let client = ClientBuilder::default()
///     .layer(TimeoutLayer::new(Duration::from_secs(10)))
///     .http(rpc_url);
/// ```
#[derive(Clone, Copy, Debug)]
pub struct TimeoutLayer {
    timeout: Duration,
}

impl TimeoutLayer {
    /// Creates a new timeout layer.
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl<S> Layer<S> for TimeoutLayer {
    type Service = TimeoutService<S>;

    fn layer(&self, service: S) -> Self::Service {
        TimeoutService {
            service,
            timeout: self.timeout,
        }
    }
}

/// A Tower service that enforces a timeout on each RPC request.
#[derive(Clone, Debug)]
pub struct TimeoutService<S> {
    service: S,
    timeout: Duration,
}

impl<S> tower::Service<RequestPacket> for TimeoutService<S>
where
    S: tower::Service<RequestPacket, Response = ResponsePacket, Error = TransportError>
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = ResponsePacket;
    type Error = TransportError;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: RequestPacket) -> Self::Future {
        let timeout = self.timeout;
        let method = extract_method(&request);
        let response = self.service.call(request);

        Box::pin(async move {
            match tokio::time::timeout(timeout, response).await {
                Ok(result) => result,
                Err(_) => {
                    warn!(
                        method = %method,
                        timeout_ms = timeout.as_millis() as u64,
                        "RPC request timed out"
                    );
                    Err(TransportErrorKind::custom_str(&format!(
                        "{method} timed out after {}ms",
                        timeout.as_millis()
                    )))
                }
            }
        })
    }
}

/// Extract the RPC method name from a request packet.
fn extract_method(request: &RequestPacket) -> String {
    match request {
        RequestPacket::Single(req) => req.method().to_string(),
        RequestPacket::Batch(reqs) => match reqs.as_slice() {
            [] => "batch(empty)".to_string(),
            [single] => single.method().to_string(),
            many => format!("batch({} calls)", many.len()),
        },
    }
}
