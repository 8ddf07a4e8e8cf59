//! Serving: the accept loop and the request dispatcher.

pub mod dispatcher;
pub mod listener;

pub use dispatcher::Dispatcher;
