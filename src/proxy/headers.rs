//! Header filtering between the client and an upstream.

use axum::http::{HeaderMap, HeaderName, header};

/// Connection-scoped headers that describe a single hop and must not be
/// relayed in either direction.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

fn is_hop_by_hop(name: &HeaderName, headers: &HeaderMap) -> bool {
    if HOP_BY_HOP.contains(&name.as_str()) {
        return true;
    }
    // Headers listed in `Connection` are hop-by-hop too
    headers
        .get_all(header::CONNECTION)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(','))
        .any(|token| token.trim().eq_ignore_ascii_case(name.as_str()))
}

/// Headers to send upstream. `Host` and `Content-Length` are left for the
/// client to recompute; `Authorization` passes through unchanged.
pub fn upstream_request_headers(incoming: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(incoming.len());
    for (name, value) in incoming {
        if *name == header::HOST || *name == header::CONTENT_LENGTH {
            continue;
        }
        if is_hop_by_hop(name, incoming) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

/// Headers to relay back to the client. `Content-Length` is recomputed from
/// the relayed body, except for `HEAD` where there is no body to measure.
pub fn client_response_headers(upstream: &HeaderMap, head_request: bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(upstream.len());
    for (name, value) in upstream {
        if *name == header::CONTENT_LENGTH && !head_request {
            continue;
        }
        if is_hop_by_hop(name, upstream) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for (name, value) in pairs {
            headers.append(*name, value.parse().unwrap());
        }
        headers
    }

    #[test]
    fn test_request_headers_drop_hop_by_hop_host_and_length() {
        let incoming = map(&[
            ("host", "gateway.local"),
            ("content-length", "12"),
            ("connection", "keep-alive, x-hop"),
            ("keep-alive", "timeout=5"),
            ("transfer-encoding", "chunked"),
            ("x-hop", "1"),
            ("authorization", "Bearer abc"),
            ("content-type", "application/json"),
            ("x-custom", "yes"),
        ]);

        let out = upstream_request_headers(&incoming);
        assert!(out.get("host").is_none());
        assert!(out.get("content-length").is_none());
        assert!(out.get("connection").is_none());
        assert!(out.get("keep-alive").is_none());
        assert!(out.get("transfer-encoding").is_none());
        assert!(out.get("x-hop").is_none());
        assert_eq!(out.get("authorization").unwrap(), "Bearer abc");
        assert_eq!(out.get("content-type").unwrap(), "application/json");
        assert_eq!(out.get("x-custom").unwrap(), "yes");
    }

    #[test]
    fn test_repeated_headers_survive() {
        let incoming = map(&[("accept", "text/html"), ("accept", "application/json")]);
        let out = upstream_request_headers(&incoming);
        assert_eq!(out.get_all("accept").iter().count(), 2);
    }

    #[test]
    fn test_response_headers() {
        let upstream = map(&[
            ("content-length", "5"),
            ("transfer-encoding", "chunked"),
            ("set-cookie", "a=1"),
            ("set-cookie", "b=2"),
            ("content-type", "text/plain"),
        ]);

        let out = client_response_headers(&upstream, false);
        assert!(out.get("content-length").is_none());
        assert!(out.get("transfer-encoding").is_none());
        assert_eq!(out.get_all("set-cookie").iter().count(), 2);
        assert_eq!(out.get("content-type").unwrap(), "text/plain");
    }

    #[test]
    fn test_head_response_keeps_content_length() {
        let upstream = map(&[
            ("content-length", "1234"),
            ("connection", "close"),
            ("content-type", "application/json"),
        ]);

        let out = client_response_headers(&upstream, true);
        assert_eq!(out.get("content-length").unwrap(), "1234");
        assert!(out.get("connection").is_none());
        assert_eq!(out.get("content-type").unwrap(), "application/json");
    }
}
