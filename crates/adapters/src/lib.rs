//! HTTP adapter for the item store
//!
//! This crate exposes an [`ItemStore`](itemsvc_store::ItemStore) over HTTP:
//! the [`router`] module maps `/items` requests to store calls and the
//! [`http_server`] module binds and runs the listener.

pub mod http_server;
pub mod router;

pub use http_server::{HttpServer, ServerConfig, ServerError};
pub use router::{create_router, ApiError, SharedStore, ROUTES};
