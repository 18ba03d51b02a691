//! CLI command modules

pub mod routes;
pub mod serve;

pub use routes::print_routes;
pub use serve::{execute_serve_command, ServeArgs, DEFAULT_LOG_FILTER};
