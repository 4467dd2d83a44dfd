//! API utilities for frontend-backend communication

/// Get the base URL for API requests
///
/// Built from the current window location with the configured backend port,
/// e.g. "http://localhost:3000". Empty if the window is not available, which
/// makes request URLs relative to the page.
pub fn api_base(port: u16) -> String {
    let Some(window) = web_sys::window() else {
        return String::new();
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:{}", protocol, hostname, port)
}
