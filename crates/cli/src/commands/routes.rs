//! Routes command implementation

use itemsvc_adapters::ROUTES;

/// Render the route table, one route per line
pub fn format_routes() -> String {
    ROUTES
        .iter()
        .map(|(method, path, description)| format!("{:<7} {:<22} {}", method, path, description))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print the route table to stdout
pub fn print_routes() {
    println!("{}", format_routes());
}
