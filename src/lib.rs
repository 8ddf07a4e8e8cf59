//! minihttp - a minimal HTTP/1.1 server
//!
//! Core library: wire codec, route table, dispatcher and connection driver.

pub mod config;
pub mod handlers;
pub mod http;
pub mod routing;
pub mod server;
