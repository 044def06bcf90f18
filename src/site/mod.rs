//! Site and protocol resolution.
//!
//! Derives the request scheme and the base URL (scheme + host + mount
//! sub-path) from deployment configuration and the incoming request's `Host`
//! header. The mount sub-path covers applications deployed under a path
//! prefix rather than at the host root.

use std::fmt;

use crate::http::Headers;

/// The scheme of the current request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Http,
    Https,
}

impl Protocol {
    /// Resolves the protocol from the deployment's HTTPS indicator and port.
    ///
    /// Returns [`Protocol::Https`] iff the indicator is present and either
    /// the port is 443 or the indicator value is `"on"`; otherwise
    /// [`Protocol::Http`].
    pub fn resolve(https_flag: Option<&str>, port: u16) -> Self {
        match https_flag {
            Some(flag) if port == 443 || flag == "on" => Protocol::Https,
            _ => Protocol::Http,
        }
    }

    /// Returns the scheme as a string slice (`"http"` or `"https"`).
    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Http => "http",
            Protocol::Https => "https",
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request-independent deployment facts, supplied once at startup.
///
/// The defaults describe a plain-HTTP deployment at the host root.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Filesystem root the application is served from.
    pub document_root: String,
    /// Absolute path of the running entry script, used to derive the mount
    /// sub-path by stripping `document_root` and a trailing `/index.php`.
    pub script_path: String,
    /// Host to use when the request carries no `Host` header.
    pub fallback_host: String,
    /// HTTPS indicator as the front-end reports it (e.g. `"on"`), if any.
    pub https_flag: Option<String>,
    /// Port the front-end accepted the connection on.
    pub port: u16,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            document_root: String::new(),
            script_path: "/index.php".to_owned(),
            fallback_host: "localhost".to_owned(),
            https_flag: None,
            port: 80,
        }
    }
}

/// Resolved site identity for one request: protocol, host, and mount sub-path.
///
/// # Examples
///
/// ```
/// use kerangka::http::Headers;
/// use kerangka::site::{Site, SiteConfig};
///
/// let config = SiteConfig {
///     document_root: "/var/www".into(),
///     script_path: "/var/www/app/index.php".into(),
///     ..SiteConfig::default()
/// };
/// let mut headers = Headers::new();
/// headers.insert("Host", "example.com");
///
/// let site = Site::resolve(&config, &headers);
/// assert_eq!(site.base_url(), "http://example.com/app");
/// assert_eq!(site.url("/about"), "http://example.com/app/about");
/// ```
#[derive(Debug, Clone)]
pub struct Site {
    protocol: Protocol,
    host: String,
    mount: String,
}

impl Site {
    /// Resolves the site identity from deployment config and request headers.
    ///
    /// The host comes from the `Host` header, falling back to
    /// [`SiteConfig::fallback_host`]. The mount sub-path is the script path
    /// with the document-root prefix and a trailing `/index.php` removed.
    pub fn resolve(config: &SiteConfig, headers: &Headers) -> Self {
        let protocol = Protocol::resolve(config.https_flag.as_deref(), config.port);
        let host = headers
            .get("host")
            .unwrap_or(&config.fallback_host)
            .to_owned();

        let script = config
            .script_path
            .strip_prefix(config.document_root.as_str())
            .unwrap_or(&config.script_path);
        let mount = script.strip_suffix("/index.php").unwrap_or(script);
        // A root deployment leaves just "/" (or the bare script name) behind.
        let mount = if mount == "/" || !mount.starts_with('/') {
            String::new()
        } else {
            mount.to_owned()
        };

        Self {
            protocol,
            host,
            mount,
        }
    }

    /// Returns the resolved protocol.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the resolved host.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the mount sub-path (empty for a root deployment).
    pub fn mount(&self) -> &str {
        &self.mount
    }

    /// Returns `protocol://host/mount`, without a trailing slash.
    pub fn base_url(&self) -> String {
        format!("{}://{}{}", self.protocol, self.host, self.mount)
    }

    /// Returns the base URL with `path` appended.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn https_requires_flag_and_port_or_on() {
        assert_eq!(Protocol::resolve(Some("on"), 443), Protocol::Https);
        assert_eq!(Protocol::resolve(Some("1"), 443), Protocol::Https);
        assert_eq!(Protocol::resolve(Some("on"), 8080), Protocol::Https);
        assert_eq!(Protocol::resolve(Some("off"), 8080), Protocol::Http);
        assert_eq!(Protocol::resolve(None, 443), Protocol::Http);
        assert_eq!(Protocol::resolve(None, 80), Protocol::Http);
    }

    #[test]
    fn protocol_display() {
        assert_eq!(Protocol::Http.to_string(), "http");
        assert_eq!(Protocol::Https.to_string(), "https");
    }

    fn headers_with_host(host: &str) -> Headers {
        let mut h = Headers::new();
        h.insert("Host", host);
        h
    }

    #[test]
    fn base_url_root_deployment() {
        let config = SiteConfig {
            document_root: "/var/www".into(),
            script_path: "/var/www/index.php".into(),
            ..SiteConfig::default()
        };
        let site = Site::resolve(&config, &headers_with_host("example.com"));
        assert_eq!(site.mount(), "");
        assert_eq!(site.base_url(), "http://example.com");
    }

    #[test]
    fn base_url_sub_path_deployment() {
        let config = SiteConfig {
            document_root: "/var/www".into(),
            script_path: "/var/www/app/index.php".into(),
            ..SiteConfig::default()
        };
        let site = Site::resolve(&config, &headers_with_host("example.com"));
        assert_eq!(site.mount(), "/app");
        assert_eq!(site.base_url(), "http://example.com/app");
    }

    #[test]
    fn base_url_https() {
        let config = SiteConfig {
            https_flag: Some("on".into()),
            port: 443,
            ..SiteConfig::default()
        };
        let site = Site::resolve(&config, &headers_with_host("secure.example"));
        assert_eq!(site.base_url(), "https://secure.example");
    }

    #[test]
    fn host_falls_back_to_config() {
        let config = SiteConfig {
            fallback_host: "fallback.local".into(),
            ..SiteConfig::default()
        };
        let site = Site::resolve(&config, &Headers::new());
        assert_eq!(site.host(), "fallback.local");
    }

    #[test]
    fn url_appends_path() {
        let site = Site::resolve(&SiteConfig::default(), &headers_with_host("h"));
        assert_eq!(site.url("/x/y"), "http://h/x/y");
    }
}
