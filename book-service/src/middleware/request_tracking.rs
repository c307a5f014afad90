//! Request tracking middleware
//!
//! Every request gets an id (generated unless the client sent one) under the
//! configured header, the id is echoed on the response, and credential
//! headers are marked sensitive so `TraceLayer` never logs their values.

use http::{HeaderName, Request};
use tower_http::{
    request_id::{MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer},
    sensitive_headers::SetSensitiveRequestHeadersLayer,
};
use uuid::Uuid;

use crate::config::MiddlewareConfig;
use crate::error::{Error, Result};

/// Sensitive headers that should be masked in logs
pub const SENSITIVE_HEADERS: &[&str] = &[
    "authorization",
    "cookie",
    "set-cookie",
    "x-api-key",
    "x-auth-token",
];

/// Generates UUIDv7 request ids, so ids sort by arrival time
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuidV7;

impl MakeRequestId for MakeRequestUuidV7 {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let id = Uuid::now_v7().hyphenated().to_string();
        let header_value = http::HeaderValue::from_str(&id).ok()?;
        Some(RequestId::new(header_value))
    }
}

/// Header carrying the request id, from configuration
pub fn request_id_header(config: &MiddlewareConfig) -> Result<HeaderName> {
    HeaderName::try_from(config.request_id_header.as_str()).map_err(|_| {
        Error::Internal(format!(
            "Invalid request id header name: {}",
            config.request_id_header
        ))
    })
}

/// Layer that assigns a request id to requests that lack one
pub fn request_id_layer(header: HeaderName) -> SetRequestIdLayer<MakeRequestUuidV7> {
    SetRequestIdLayer::new(header, MakeRequestUuidV7)
}

/// Layer that copies the request id onto the response
pub fn request_id_propagation_layer(header: HeaderName) -> PropagateRequestIdLayer {
    PropagateRequestIdLayer::new(header)
}

/// Layer that marks [`SENSITIVE_HEADERS`] as sensitive
pub fn sensitive_headers_layer() -> SetSensitiveRequestHeadersLayer {
    SetSensitiveRequestHeadersLayer::new(
        SENSITIVE_HEADERS.iter().copied().map(HeaderName::from_static),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::header;

    #[test]
    fn test_make_request_id_is_uuid() {
        let mut maker = MakeRequestUuidV7;
        let request = Request::builder().body(()).unwrap();

        let id = maker.make_request_id(&request).unwrap();
        let value = id.into_header_value();
        let parsed = Uuid::parse_str(value.to_str().unwrap()).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }

    #[test]
    fn test_request_id_header_from_config() {
        let config = MiddlewareConfig::default();
        assert_eq!(request_id_header(&config).unwrap(), "x-request-id");

        let bad = MiddlewareConfig {
            request_id_header: "not a header".to_string(),
            ..MiddlewareConfig::default()
        };
        assert!(request_id_header(&bad).is_err());
    }

    #[test]
    fn test_sensitive_headers_cover_credentials() {
        assert!(SENSITIVE_HEADERS.contains(&header::AUTHORIZATION.as_str()));
        assert!(SENSITIVE_HEADERS.contains(&"x-api-key"));
    }
}
