//! Leaving the app: external links open in the system browser

use tracing::{info, warn};

/// Open `url` in the default browser. The browser runs as its own process,
/// so nothing about this app is exposed to the page.
pub fn open_external(url: &str) {
    if !is_openable(url) {
        warn!(url, "Refusing to open non-web URL");
        return;
    }
    match open::that_detached(url) {
        Ok(()) => info!(url, "Opened external link"),
        Err(e) => warn!(url, error = %e, "Failed to open external link"),
    }
}

/// Only web and mail links are handed to the OS
fn is_openable(url: &str) -> bool {
    ["https://", "http://", "mailto:"]
        .iter()
        .any(|scheme| url.starts_with(scheme))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_web_urls_are_openable() {
        assert!(is_openable("https://github.com/atifhasan250"));
        assert!(is_openable("http://example.com"));
        assert!(is_openable("mailto:me@example.com"));
        assert!(!is_openable("file:///etc/passwd"));
        assert!(!is_openable("/projects"));
        assert!(!is_openable(""));
    }
}
