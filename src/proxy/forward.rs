use std::error::Error as StdError;
use std::io;
use std::time::Instant;

use axum::{
    body::{Body, Bytes},
    extract::Request,
    http::{Method, Uri},
    response::Response,
};
use http_body_util::{BodyExt, LengthLimitError};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use squadgate_config::{UpstreamConfig, UpstreamService};
use tracing::{debug, error, warn};
use url::Url;

use crate::error::GatewayError;
use crate::metrics::track_upstream;
use crate::proxy::headers::{client_response_headers, upstream_request_headers};

/// Builds the upstream URI for a request whose route prefix has already been
/// stripped. Path and query are taken byte for byte; nothing is re-encoded or
/// normalized.
pub fn target_uri(
    base: &Url,
    forward_path: &str,
    query: Option<&str>,
) -> Result<Uri, GatewayError> {
    let mut target = base.as_str().trim_end_matches('/').to_string();
    target.push_str(forward_path);
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }
    target
        .parse()
        .map_err(|_| GatewayError::BadRequest("Invalid request target".to_string()))
}

/// Sends requests to upstream services over one pooled HTTP client.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    upstreams: UpstreamConfig,
}

impl Forwarder {
    pub fn new(upstreams: &UpstreamConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(upstreams.connect_timeout));
        connector.set_nodelay(true);

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            upstreams: upstreams.clone(),
        }
    }

    /// Relays `req` to `upstream` at `forward_path` and returns the upstream's
    /// answer as received, 5xx included.
    pub async fn forward(
        &self,
        upstream: UpstreamService,
        forward_path: &str,
        req: Request,
    ) -> Result<Response, GatewayError> {
        let (parts, body) = req.into_parts();
        let body = read_body(body, self.upstreams.max_body_bytes).await?;

        let mut outgoing = Request::new(Body::from(body));
        *outgoing.method_mut() = parts.method.clone();
        *outgoing.uri_mut() = target_uri(
            self.upstreams.url_for(upstream),
            forward_path,
            parts.uri.query(),
        )?;
        *outgoing.headers_mut() = upstream_request_headers(&parts.headers);

        debug!(upstream = %upstream, method = %parts.method, path = %forward_path, "forwarding request");

        let start = Instant::now();
        let result =
            match tokio::time::timeout(self.upstreams.timeout, self.exchange(upstream, outgoing))
                .await
            {
                Ok(result) => result,
                Err(_) => {
                    warn!(upstream = %upstream, "upstream timed out");
                    Err(GatewayError::UpstreamTimeout { upstream })
                }
            };

        let upstream_response = match result {
            Ok(response) => response,
            Err(err) => {
                track_upstream(upstream.as_str(), err.kind(), start.elapsed().as_secs_f64());
                return Err(err);
            }
        };

        let elapsed = start.elapsed();
        let status = upstream_response.status();
        track_upstream(upstream.as_str(), status.as_str(), elapsed.as_secs_f64());
        if status.is_server_error() {
            warn!(upstream = %upstream, status = %status.as_u16(), "upstream returned server error");
        }
        debug!(
            upstream = %upstream,
            status = %status.as_u16(),
            latency_ms = %elapsed.as_millis(),
            "upstream responded"
        );

        let (head, body) = upstream_response.into_parts();
        let mut response = Response::new(Body::from(body));
        *response.status_mut() = head.status;
        *response.headers_mut() =
            client_response_headers(&head.headers, parts.method == Method::HEAD);
        Ok(response)
    }

    async fn exchange(
        &self,
        upstream: UpstreamService,
        req: Request,
    ) -> Result<Response<Bytes>, GatewayError> {
        let response = self
            .client
            .request(req)
            .await
            .map_err(|e| classify(upstream, &e))?;

        let (head, body) = response.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| unavailable(upstream, &e))?
            .to_bytes();

        Ok(Response::from_parts(head, body))
    }
}

async fn read_body(body: Body, limit: usize) -> Result<Bytes, GatewayError> {
    axum::body::to_bytes(body, limit).await.map_err(|e| {
        if caused_by::<LengthLimitError>(&e, |_| true) {
            warn!(limit = limit, "request body too large");
            GatewayError::PayloadTooLarge { limit }
        } else {
            GatewayError::BadRequest("Failed to read request body".to_string())
        }
    })
}

/// Whether `err` or anything in its source chain is an `E` accepted by `pred`.
fn caused_by<E: StdError + 'static>(
    err: &(dyn StdError + 'static),
    pred: impl Fn(&E) -> bool,
) -> bool {
    let mut source = Some(err);
    while let Some(e) = source {
        if e.downcast_ref::<E>().is_some_and(&pred) {
            return true;
        }
        source = e.source();
    }
    false
}

fn classify(upstream: UpstreamService, e: &hyper_util::client::legacy::Error) -> GatewayError {
    // The connector reports an elapsed connect timeout as an io::Error
    let timed_out = caused_by::<io::Error>(e, |err| err.kind() == io::ErrorKind::TimedOut);
    if e.is_connect() && timed_out {
        warn!(upstream = %upstream, "upstream connect timed out");
        return GatewayError::UpstreamTimeout { upstream };
    }
    unavailable(upstream, e)
}

fn unavailable(upstream: UpstreamService, e: &(dyn StdError + 'static)) -> GatewayError {
    let reason = match e.source() {
        Some(source) => format!("{}: {}", e, source),
        None => e.to_string(),
    };
    error!(upstream = %upstream, error = %reason, "upstream unavailable");
    GatewayError::UpstreamUnavailable { upstream, reason }
}
