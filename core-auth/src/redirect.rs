//! Callback URI construction.
//!
//! Providers redirect the browser back to a route on the host that started
//! the flow. Connectors only know the logical route name; the mapping to a
//! concrete URL belongs to the host application.

use url::Url;

use crate::error::{AuthError, Result};

/// Builds the absolute callback URL for a logical route under a host.
pub trait RedirectUriBuilder: Send + Sync {
    /// Produce the callback URL for `route` under `host`.
    ///
    /// # Errors
    ///
    /// [`AuthError::InvalidHost`] when `host` cannot form a valid URL.
    fn path_to(&self, host: &str, route: &str) -> Result<String>;
}

/// Maps `(host, route)` to `<scheme>://<host>/<route>`.
#[derive(Debug, Clone)]
pub struct HostRouteUriBuilder {
    scheme: &'static str,
}

impl HostRouteUriBuilder {
    /// HTTPS callbacks, the only scheme providers accept outside development.
    pub fn https() -> Self {
        Self { scheme: "https" }
    }

    /// Plain HTTP callbacks for local development hosts.
    pub fn http() -> Self {
        Self { scheme: "http" }
    }

    pub fn scheme(&self) -> &str {
        self.scheme
    }
}

impl Default for HostRouteUriBuilder {
    fn default() -> Self {
        Self::https()
    }
}

impl RedirectUriBuilder for HostRouteUriBuilder {
    fn path_to(&self, host: &str, route: &str) -> Result<String> {
        let invalid = |reason: String| AuthError::InvalidHost {
            host: host.to_string(),
            reason,
        };

        if host.is_empty() {
            return Err(invalid("host is empty".to_string()));
        }
        if host.contains(|c: char| matches!(c, '/' | '?' | '#' | '@') || c.is_whitespace()) {
            return Err(invalid("host must be a bare authority".to_string()));
        }

        let base = Url::parse(&format!("{}://{}/", self.scheme, host))
            .map_err(|e| invalid(e.to_string()))?;
        let url = base.join(route).map_err(|e| invalid(e.to_string()))?;

        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_builds_https_url() {
        let builder = HostRouteUriBuilder::default();
        let uri = builder
            .path_to("app.example.com", "dropbox-oauth-complete")
            .unwrap();

        assert_eq!(uri, "https://app.example.com/dropbox-oauth-complete");
    }

    #[test]
    fn test_path_to_keeps_port() {
        let builder = HostRouteUriBuilder::http();
        let uri = builder.path_to("localhost:3000", "callback").unwrap();

        assert_eq!(uri, "http://localhost:3000/callback");
    }

    #[test]
    fn test_path_to_rejects_malformed_host() {
        let builder = HostRouteUriBuilder::default();

        assert!(matches!(
            builder.path_to("", "callback"),
            Err(AuthError::InvalidHost { .. })
        ));
        assert!(builder.path_to("example.com/evil", "callback").is_err());
        assert!(builder.path_to("exa mple.com", "callback").is_err());
        assert!(builder.path_to("host:notaport", "callback").is_err());
    }
}
