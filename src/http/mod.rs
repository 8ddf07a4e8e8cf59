//! HTTP protocol implementation.
//!
//! This module implements the wire side of a one-request-per-connection
//! HTTP/1.1 server.
//!
//! # Architecture
//!
//! - **`connection`**: drives a single exchange on an accepted stream
//! - **`parser`**: decodes a request line by line from a buffered reader
//! - **`request`**: HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`writer`**: encodes responses and writes them to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Decode request line, headers, body
//!        └──────┬──────┘
//!               │ Request decoded          (malformed → 400)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Route and run the handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ▼
//!        ┌──────────────────┐
//!        │     Closed       │ ← Always; no keep-alive
//!        └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use minihttp::http::connection::{Connection, ConnectionLimits};
//! use minihttp::server::Dispatcher;
//! use tokio::net::TcpListener;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let dispatcher = Arc::new(Dispatcher::new(router));
//!     let listener = TcpListener::bind("127.0.0.1:4221").await?;
//!
//!     loop {
//!         let (socket, _addr) = listener.accept().await?;
//!         let dispatcher = dispatcher.clone();
//!         tokio::spawn(async move {
//!             let conn = Connection::new(socket, dispatcher, ConnectionLimits::default());
//!             if let Err(e) = conn.run().await {
//!                 eprintln!("Connection error: {}", e);
//!             }
//!         });
//!     }
//! }
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;

/// Version written on responses unless a handler overrides it.
pub const HTTP_VERSION: &str = "HTTP/1.1";
