//! Turns a decoded request into a response.
//!
//! `dispatch` never fails: missing routes become 404, deliberate handler
//! errors keep their status, and anything unexpected (including a panic
//! inside the handler) becomes 500. Error details go to the log only.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;

use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::routing::{Handler, HandlerError, Reply, Router};

#[derive(Debug, Clone)]
pub struct Dispatcher {
    router: Arc<Router>,
}

impl Dispatcher {
    pub fn new(router: Router) -> Self {
        Self {
            router: Arc::new(router),
        }
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub async fn dispatch(&self, request: Request) -> Response {
        let method = request.method;
        let path = request.path.clone();

        let Some((route, params)) = self.router.lookup(method, &path) else {
            tracing::warn!(method = %method, path = %path, "No route matches request");
            return Response::not_found();
        };

        tracing::debug!(
            method = %method,
            path = %path,
            template = route.template().as_str(),
            params = ?params,
            "Matched route"
        );

        // Also covers a handler that panics before returning its future.
        let handler = route.handler();
        let outcome = AssertUnwindSafe(async move { handler.call(request, params).await })
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(reply)) => into_response(reply),

            Ok(Err(HandlerError::Http { status, message })) => {
                tracing::warn!(
                    method = %method,
                    path = %path,
                    status = status.as_u16(),
                    message = %message,
                    "Handler returned an HTTP error"
                );
                Response::new(status)
            }

            Ok(Err(e)) => {
                tracing::error!(
                    method = %method,
                    path = %path,
                    error = %e,
                    "Handler failed"
                );
                Response::internal_error()
            }

            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());

                tracing::error!(
                    method = %method,
                    path = %path,
                    panic = %reason,
                    "Handler panicked"
                );
                Response::internal_error()
            }
        }
    }
}

/// Normalizes a handler reply. Text becomes a 200 `text/plain` response
/// whose Content-Length is the text's byte length.
pub fn into_response(reply: Reply) -> Response {
    match reply {
        Reply::Response(response) => response,
        Reply::Text(text) => ResponseBuilder::new(StatusCode::Ok)
            .header("Content-Type", "text/plain")
            .header("Content-Length", text.len().to_string())
            .body(text)
            .build(),
    }
}
