//! Request id lookup on inbound requests.
//!
//! # Design Decisions
//! - The id itself is generated by tower-http's request-id layer
//! - A missing or non-UTF-8 header reads as an empty id

use axum::http::{request::Parts, HeaderMap, Request};

use crate::context::RequestIdSource;

/// Header carrying the request id.
pub const X_REQUEST_ID: &str = "x-request-id";

impl RequestIdSource for HeaderMap {
    fn request_id(&self) -> String {
        self.get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    }
}

impl RequestIdSource for Parts {
    fn request_id(&self) -> String {
        self.headers.request_id()
    }
}

impl<B> RequestIdSource for Request<B> {
    fn request_id(&self) -> String {
        self.headers().request_id()
    }
}
