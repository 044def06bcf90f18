//! Positional route model.
//!
//! There is no declarative route table in this framework: the "router" is the
//! ordered list of `/`-delimited path segments of the live request, plus its
//! decoded query parameters. [`RouteInfo`] captures that view exactly once
//! per request — it is immutable afterwards and travels inside the
//! per-request [`Context`](crate::context::Context).

use std::collections::HashMap;

use crate::http::Request;
use crate::site::{Protocol, Site};

/// Immutable, per-request view of the parsed request URI.
///
/// Segments are the path trimmed of leading and trailing `/` and split on
/// `/`. Consecutive slashes are not collapsed, and an empty path yields a
/// single empty segment. Out-of-range segment lookups return `""` rather
/// than failing, so positional routing can probe optional segments freely.
///
/// # Examples
///
/// ```
/// use kerangka::http::Request;
/// use kerangka::route::RouteInfo;
/// use kerangka::site::{Site, SiteConfig};
///
/// let raw = b"GET /hallo/apa/kabar/dunia?name=John&age=20 HTTP/1.1\r\nHost: x\r\n\r\n";
/// let (request, _) = Request::parse(raw).unwrap();
/// let site = Site::resolve(&SiteConfig::default(), request.headers());
/// let route = RouteInfo::new(&request, &site);
///
/// assert_eq!(route.segments(), ["hallo", "apa", "kabar", "dunia"]);
/// assert_eq!(route.segment(0), "hallo");
/// assert_eq!(route.segment(4), "");
/// assert_eq!(route.query_param("name"), "John");
/// assert_eq!(route.query_param("missing"), "");
/// ```
#[derive(Debug, Clone)]
pub struct RouteInfo {
    protocol: Protocol,
    base_url: String,
    request_uri: String,
    segments: Vec<String>,
    query_params: HashMap<String, String>,
}

impl RouteInfo {
    /// Builds the route view from a parsed request and the resolved site.
    pub fn new(request: &Request, site: &Site) -> Self {
        Self {
            protocol: site.protocol(),
            base_url: site.base_url(),
            request_uri: request.target().to_owned(),
            segments: split_segments(request.path()),
            query_params: request.query_params().clone(),
        }
    }

    /// Returns the request scheme.
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns the base URL the application is mounted at.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the raw request URI as received.
    pub fn request_uri(&self) -> &str {
        &self.request_uri
    }

    /// Returns all path segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Returns the segment at `index`, or `""` when out of range.
    pub fn segment(&self, index: usize) -> &str {
        self.segments.get(index).map_or("", String::as_str)
    }

    /// Returns all decoded query parameters.
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }

    /// Returns the query parameter named `key`, or `""` when absent.
    pub fn query_param(&self, key: &str) -> &str {
        self.query_params.get(key).map_or("", String::as_str)
    }
}

// Trim leading/trailing '/' and split. `"".split('/')` yields one empty
// segment, which is the documented behavior for the root path.
fn split_segments(path: &str) -> Vec<String> {
    path.trim_matches('/')
        .split('/')
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteConfig;

    fn route_for(target: &str) -> RouteInfo {
        let raw = format!("GET {target} HTTP/1.1\r\nHost: example.com\r\n\r\n");
        let (request, _) = Request::parse(raw.as_bytes()).unwrap();
        let site = Site::resolve(&SiteConfig::default(), request.headers());
        RouteInfo::new(&request, &site)
    }

    #[test]
    fn segments_trim_and_split() {
        let route = route_for("/hallo/apa/kabar/dunia");
        assert_eq!(route.segments(), ["hallo", "apa", "kabar", "dunia"]);
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let route = route_for("/crm/leads/add/");
        assert_eq!(route.segments(), ["crm", "leads", "add"]);
    }

    #[test]
    fn root_path_yields_single_empty_segment() {
        let route = route_for("/");
        assert_eq!(route.segments(), [""]);
        assert_eq!(route.segment(0), "");
    }

    #[test]
    fn consecutive_slashes_are_kept() {
        let route = route_for("/a//b");
        assert_eq!(route.segments(), ["a", "", "b"]);
    }

    #[test]
    fn out_of_range_segment_is_empty() {
        let route = route_for("/hallo/apa/kabar/dunia");
        assert_eq!(route.segment(4), "");
        assert_eq!(route.segment(100), "");
    }

    #[test]
    fn query_params_and_defaults() {
        let route = route_for("/hallo/apa/kabar/dunia?name=John&age=20");
        assert_eq!(route.query_param("name"), "John");
        assert_eq!(route.query_param("age"), "20");
        assert_eq!(route.query_param("missing"), "");
        assert_eq!(route.query_params().len(), 2);
    }

    #[test]
    fn request_uri_is_raw_target() {
        let route = route_for("/hallo/dunia?name=John");
        assert_eq!(route.request_uri(), "/hallo/dunia?name=John");
    }

    #[test]
    fn base_url_comes_from_site() {
        let route = route_for("/x");
        assert_eq!(route.base_url(), "http://example.com");
        assert_eq!(route.protocol(), Protocol::Http);
    }
}
