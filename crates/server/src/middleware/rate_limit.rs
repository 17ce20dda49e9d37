//! Rate limiting for the OTP endpoints using governor and `tower_governor`.
//!
//! Only the OTP routes are limited: they create users and mint codes, so
//! they are the ones worth brute-forcing.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::ConnectInfo;
use axum::http::Request;
use axum::response::{IntoResponse, Response};
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

use crate::error::AppError;

/// Client IP key extractor.
///
/// Trusts proxy headers first (`cf-connecting-ip`, `x-forwarded-for`,
/// `x-real-ip`), then falls back to the TCP peer address when the server is
/// run with connect info.
#[derive(Clone, Copy)]
pub struct ClientIpKeyExtractor;

fn header_ip<T>(req: &Request<T>, name: &str) -> Option<IpAddr> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.split(',').next())
        .and_then(|s| s.trim().parse::<IpAddr>().ok())
}

impl tower_governor::key_extractor::KeyExtractor for ClientIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        ["cf-connecting-ip", "x-forwarded-for", "x-real-ip"]
            .into_iter()
            .find_map(|name| header_ip(req, name))
            .or_else(|| {
                req.extensions()
                    .get::<ConnectInfo<SocketAddr>>()
                    .map(|ConnectInfo(addr)| addr.ip())
            })
            .ok_or(GovernorError::UnableToExtractKey)
    }
}

/// Render limiter rejections with the usual JSON error body, keeping the
/// `retry-after` and `x-ratelimit-*` headers.
fn governor_error_response(err: GovernorError) -> Response {
    let (error, headers) = match err {
        GovernorError::TooManyRequests { wait_time, headers } => (
            AppError::TooManyRequests(format!("Too many requests, retry in {wait_time}s")),
            headers,
        ),
        GovernorError::UnableToExtractKey => (
            AppError::Internal("unable to determine client IP for rate limiting".to_string()),
            None,
        ),
        GovernorError::Other { msg, headers, .. } => (
            AppError::Internal(msg.unwrap_or_else(|| "rate limiter failure".to_string())),
            headers,
        ),
    };

    let mut response = error.into_response();
    if let Some(headers) = headers {
        response.headers_mut().extend(headers);
    }
    response
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ClientIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create the rate limiter for OTP endpoints: ~10 requests per minute per IP.
///
/// Configuration: 1 request every 6 seconds (replenish), burst of 5.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(6)` and `burst_size(5)`), which are always accepted
/// by `GovernorConfigBuilder`.
#[must_use]
pub fn otp_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ClientIpKeyExtractor)
        .per_second(6)
        .burst_size(5)
        .finish()
        .expect("rate limiter config with per_second(6) and burst_size(5) is valid");
    GovernorLayer::new(Arc::new(config)).error_handler(governor_error_response)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    use tower_governor::key_extractor::KeyExtractor;

    fn request(headers: &[(&str, &str)]) -> Request<()> {
        let mut builder = Request::builder().uri("/request-otp");
        for (name, value) in headers {
            builder = builder.header(*name, *value);
        }
        builder.body(()).unwrap()
    }

    #[test]
    fn test_prefers_cloudflare_header() {
        let req = request(&[
            ("x-forwarded-for", "10.0.0.1"),
            ("cf-connecting-ip", "203.0.113.7"),
        ]);
        assert_eq!(
            ClientIpKeyExtractor.extract(&req).unwrap(),
            "203.0.113.7".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_uses_first_forwarded_hop() {
        let req = request(&[("x-forwarded-for", "198.51.100.4, 10.0.0.1")]);
        assert_eq!(
            ClientIpKeyExtractor.extract(&req).unwrap(),
            "198.51.100.4".parse::<IpAddr>().unwrap()
        );
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let mut req = request(&[]);
        let peer: SocketAddr = "192.0.2.9:50000".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(peer));
        assert_eq!(ClientIpKeyExtractor.extract(&req).unwrap(), peer.ip());
    }

    #[test]
    fn test_no_address_is_an_error() {
        assert!(ClientIpKeyExtractor.extract(&request(&[])).is_err());
    }

    #[tokio::test]
    async fn test_rejection_after_burst_is_json() {
        use axum::{Router, body::Body, http::StatusCode, routing::post};
        use tower::ServiceExt;

        let app = Router::new()
            .route("/request-otp", post(|| async { "ok" }))
            .layer(otp_rate_limiter());
        let send = |ip: &'static str| {
            app.clone().oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/request-otp")
                    .header("x-forwarded-for", ip)
                    .body(Body::empty())
                    .unwrap(),
            )
        };

        for _ in 0..5 {
            assert_eq!(send("198.51.100.20").await.unwrap().status(), StatusCode::OK);
        }

        let limited = send("198.51.100.20").await.unwrap();
        assert_eq!(limited.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(limited.headers().contains_key("retry-after"));
        let bytes = axum::body::to_bytes(limited.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Too many requests"));

        // Other clients keep their own bucket
        assert_eq!(send("198.51.100.21").await.unwrap().status(), StatusCode::OK);
    }
}
