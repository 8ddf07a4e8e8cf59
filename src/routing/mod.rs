//! Request routing.
//!
//! - **`template`**: compiles `{name}` path templates and captures variables
//! - **`router`**: the ordered, first-match-wins route table
//! - **`handler`**: the callback contract (`Handler`, `Reply`, `HandlerError`)

pub mod handler;
pub mod router;
pub mod template;

use thiserror::Error;

pub use handler::{Handler, HandlerError, HandlerResult, Reply};
pub use router::{Route, Router};
pub use template::{PathParams, PathTemplate};

/// Errors raised while building the route table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouteError {
    #[error("invalid path template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },
}
