//! Resolution of the task service base URL.

/// Backend used when the client runs on a loopback host.
pub const LOCAL_BACKEND_URL: &str = "http://localhost:5000";

/// Backend used when nothing else is configured.
pub const FALLBACK_BACKEND_URL: &str = "http://backend-postgres-service:5000";

const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

/// Environment signals captured once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointConfig {
    /// Explicit override; wins over everything else.
    pub override_url: Option<String>,
    /// Host name the client is served from.
    pub host: Option<String>,
    /// Service URL injected by the deployment.
    pub service_url: Option<String>,
}

impl EndpointConfig {
    /// Pick the base URL: override, then loopback default, then deployment
    /// URL, then the fallback constant. Blank values count as unset.
    pub fn resolve(&self) -> String {
        if let Some(url) = non_blank(&self.override_url) {
            return url.to_string();
        }
        if non_blank(&self.host).is_some_and(|host| LOOPBACK_HOSTS.contains(&host)) {
            return LOCAL_BACKEND_URL.to_string();
        }
        non_blank(&self.service_url)
            .unwrap_or(FALLBACK_BACKEND_URL)
            .to_string()
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}
