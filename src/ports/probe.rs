//! Network probe port for checking external URLs.

use super::PortFuture;

/// Probes external URLs for reachability.
pub trait LinkProbe: Send + Sync {
    /// Issues a HEAD request and returns the final HTTP status code.
    ///
    /// Redirects are followed, so the code belongs to the last response.
    ///
    /// # Errors
    ///
    /// Returns an error on transport failure: timeout, DNS, refused
    /// connection, TLS, or an unparseable URL.
    fn head<'a>(&'a self, url: &'a str) -> PortFuture<'a, u16>;
}
