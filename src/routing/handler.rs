//! Handler contract between the router and user code.

use std::future::Future;

use futures_util::future::BoxFuture;
use thiserror::Error;

use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::routing::template::PathParams;

/// What a handler hands back on success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Wrapped into a 200 `text/plain` response.
    Text(String),
    /// Sent unchanged.
    Response(Response),
}

impl From<String> for Reply {
    fn from(text: String) -> Self {
        Reply::Text(text)
    }
}

impl From<&str> for Reply {
    fn from(text: &str) -> Self {
        Reply::Text(text.to_string())
    }
}

impl From<Response> for Reply {
    fn from(response: Response) -> Self {
        Reply::Response(response)
    }
}

/// Failures a handler may report.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// A deliberate HTTP error; the client receives `status`.
    #[error("{status}: {message}")]
    Http { status: StatusCode, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl HandlerError {
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        HandlerError::Http {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::http(StatusCode::BadRequest, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::http(StatusCode::NotFound, message)
    }

    /// Status the client sees for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::Http { status, .. } => *status,
            HandlerError::Io(_) | HandlerError::Internal(_) => StatusCode::InternalServerError,
        }
    }
}

pub type HandlerResult = Result<Reply, HandlerError>;

/// A route callback. Implemented for every
/// `Fn(Request, PathParams) -> impl Future<Output = HandlerResult>`.
pub trait Handler: Send + Sync + 'static {
    fn call(&self, request: Request, params: PathParams) -> BoxFuture<'static, HandlerResult>;
}

impl<F, Fut> Handler for F
where
    F: Fn(Request, PathParams) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = HandlerResult> + Send + 'static,
{
    fn call(&self, request: Request, params: PathParams) -> BoxFuture<'static, HandlerResult> {
        Box::pin((self)(request, params))
    }
}
