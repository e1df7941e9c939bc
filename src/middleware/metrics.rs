//! HTTP observability middleware
//!
//! A Tower Layer/Service pair that propagates `x-request-id` and records
//! request counters, latency and in-flight gauges.

use axum::{
    body::Body,
    http::{HeaderValue, Request},
    response::Response,
};
use metrics::{counter, gauge, histogram};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};
use tower::{Layer, Service};
use tracing::Instrument;
use uuid::Uuid;

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
pub struct ObservabilityLayer;

impl<S> Layer<S> for ObservabilityLayer {
    type Service = ObservabilityMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ObservabilityMiddleware { inner }
    }
}

#[derive(Clone)]
pub struct ObservabilityMiddleware<S> {
    inner: S,
}

/// Labels and timing captured when a request enters the stack
struct RequestRecord {
    method: String,
    route: String,
    request_id: String,
    started: Instant,
}

impl RequestRecord {
    fn begin(request: &Request<Body>) -> Self {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());

        gauge!("syra_http_requests_in_flight").increment(1.0);

        Self {
            method: request.method().to_string(),
            route: normalize_path(request.uri().path()),
            request_id,
            started: Instant::now(),
        }
    }

    /// Close the record. `status` is `None` when the inner service failed.
    fn finish(self, status: Option<u16>) {
        gauge!("syra_http_requests_in_flight").decrement(1.0);

        let status = status.map_or_else(|| "error".to_string(), |s| s.to_string());
        histogram!("syra_http_request_duration_seconds", "method" => self.method.clone(), "path" => self.route.clone())
            .record(self.started.elapsed().as_secs_f64());
        counter!("syra_http_requests_total", "method" => self.method, "path" => self.route, "status" => status)
            .increment(1);
    }
}

impl<S> Service<Request<Body>> for ObservabilityMiddleware<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let record = RequestRecord::begin(&request);
        let request_id = HeaderValue::from_str(&record.request_id).ok();
        let span = tracing::info_span!("request", request_id = %record.request_id);

        // Take the service that was driven to readiness
        let ready = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, ready);

        Box::pin(
            async move {
                match inner.call(request).await {
                    Ok(mut response) => {
                        record.finish(Some(response.status().as_u16()));
                        if let Some(id) = request_id {
                            response.headers_mut().insert(REQUEST_ID_HEADER, id);
                        }
                        Ok(response)
                    }
                    Err(e) => {
                        record.finish(None);
                        Err(e)
                    }
                }
            }
            .instrument(span),
        )
    }
}

/// Collapse numeric and UUID-like segments to `{id}` to bound label cardinality.
fn normalize_path(path: &str) -> String {
    path.split('/')
        .map(|seg| if looks_like_id(seg) { "{id}" } else { seg })
        .collect::<Vec<_>>()
        .join("/")
}

fn looks_like_id(s: &str) -> bool {
    let numeric = !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let uuid = s.len() == 36 && s.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    numeric || uuid
}
