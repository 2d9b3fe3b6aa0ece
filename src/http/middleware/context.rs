//! Attach the log carrier to every request.

use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::context::{attach, with_value, Context, USER_AGENT_KEY};

/// Seed a [`Context`] from the request headers and store it in the request
/// extensions.
///
/// Use with `axum::middleware::from_fn`, inside the request-id layers.
pub async fn context_middleware(mut req: Request, next: Next) -> Response {
    let ctx = request_context(req.headers());
    req.extensions_mut().insert(ctx);
    next.run(req).await
}

fn request_context(headers: &axum::http::HeaderMap) -> Context {
    let ctx = attach(&Context::background(), headers);

    match headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
    {
        Some(agent) if !agent.is_empty() => with_value(&ctx, USER_AGENT_KEY, agent),
        _ => ctx,
    }
}

/// Extracts the request's log context.
///
/// Falls back to a freshly attached context when the middleware is not
/// installed.
#[derive(Debug, Clone)]
pub struct LogContext(pub Context);

impl<S> FromRequestParts<S> for LogContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = match parts.extensions.get::<Context>() {
            Some(ctx) => ctx.clone(),
            None => request_context(&parts.headers),
        };
        Ok(LogContext(ctx))
    }
}
