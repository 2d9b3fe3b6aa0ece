//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the demo handlers
//! - Wire up middleware (tracing, request ID, log context)
//! - Bind server to listener

use axum::{
    extract::{Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::args;
use crate::event::Arg;
use crate::http::middleware::{context_middleware, LogContext};
use crate::logger::Logger;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub logger: Logger,
}

/// HTTP server logging every request through the request's log context.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    pub fn new(logger: Logger) -> Self {
        let router = Self::build_router(AppState { logger });
        Self { router }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Request ids are set before the context middleware runs.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .route("/orders/{id}", get(order_handler))
            .with_state(state)
            .layer(middleware::from_fn(context_middleware))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// The configured router, e.g. for driving it without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Order {
    pub id: u64,
    pub item: String,
}

#[derive(Debug, Error)]
pub enum OrderError {
    #[error("order {0} not found")]
    NotFound(u64),
}

fn find_order(id: u64) -> Result<Order, OrderError> {
    match id {
        1..=100 => Ok(Order {
            id,
            item: format!("item-{id}"),
        }),
        _ => Err(OrderError::NotFound(id)),
    }
}

async fn health_handler(State(state): State<AppState>, LogContext(ctx): LogContext) -> &'static str {
    state.logger.debug(args!["health check", &ctx]).send();
    "ok"
}

async fn order_handler(
    State(state): State<AppState>,
    LogContext(ctx): LogContext,
    Path(id): Path<u64>,
) -> Response {
    state.logger.info(args!["fetching order", &ctx, id]).send();

    match find_order(id) {
        Ok(order) => Json(order).into_response(),
        Err(err) => {
            state
                .logger
                .error(args!["order lookup failed", &ctx, Arg::error(err)])
                .send();
            (StatusCode::NOT_FOUND, "order not found").into_response()
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        return;
    }
    tracing::info!("Shutdown signal received");
}
