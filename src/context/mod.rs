//! Per-request context.
//!
//! One [`Context`] is constructed by the server for each parsed request and
//! handed to the handler. It bundles the request, the route view, and the
//! resolved site identity; all three are immutable for the lifetime of the
//! request, so every part of handler code sees the same parse.

use crate::http::Request;
use crate::route::RouteInfo;
use crate::site::Site;

/// Everything a handler needs to know about the current request.
pub struct Context {
    request: Request,
    route: RouteInfo,
    site: Site,
}

impl Context {
    /// Bundles a parsed request with its route view and site identity.
    pub fn new(request: Request, route: RouteInfo, site: Site) -> Self {
        Self {
            request,
            route,
            site,
        }
    }

    /// Builds the route view and site identity from the request and config,
    /// then bundles all three. This is what the server calls per request.
    pub fn from_request(request: Request, config: &crate::site::SiteConfig) -> Self {
        let site = Site::resolve(config, request.headers());
        let route = RouteInfo::new(&request, &site);
        Self::new(request, route, site)
    }

    /// Returns the parsed request.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the route view of the request URI.
    pub fn route(&self) -> &RouteInfo {
        &self.route
    }

    /// Returns the resolved site identity.
    pub fn site(&self) -> &Site {
        &self.site
    }

    /// Shorthand for [`RouteInfo::segment`].
    pub fn segment(&self, index: usize) -> &str {
        self.route.segment(index)
    }

    /// Shorthand for [`RouteInfo::query_param`].
    pub fn query_param(&self, key: &str) -> &str {
        self.route.query_param(key)
    }

    /// Deserializes the request body as JSON.
    pub fn json<T>(&self) -> Result<T, serde_json::Error>
    where
        T: serde::de::DeserializeOwned,
    {
        serde_json::from_slice(self.request.body())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::SiteConfig;

    fn context_for(raw: &[u8]) -> Context {
        let (request, _) = Request::parse(raw).unwrap();
        Context::from_request(request, &SiteConfig::default())
    }

    #[test]
    fn segment_and_query_shorthands() {
        let ctx = context_for(b"GET /crm/leads?page=3 HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(ctx.segment(0), "crm");
        assert_eq!(ctx.segment(1), "leads");
        assert_eq!(ctx.segment(2), "");
        assert_eq!(ctx.query_param("page"), "3");
    }

    #[test]
    fn json_body_decodes() {
        let raw = b"POST / HTTP/1.1\r\nHost: x\r\nContent-Length: 13\r\n\r\n{\"name\":\"Jo\"}";
        let ctx = context_for(raw);

        #[derive(serde::Deserialize)]
        struct Payload {
            name: String,
        }

        let payload: Payload = ctx.json().unwrap();
        assert_eq!(payload.name, "Jo");
    }

    #[test]
    fn json_body_invalid_is_error() {
        let raw = b"POST / HTTP/1.1\r\nHost: x\r\nContent-Length: 3\r\n\r\nnop";
        let ctx = context_for(raw);
        assert!(ctx.json::<serde_json::Value>().is_err());
    }

    #[test]
    fn site_is_resolved_from_request_host() {
        let ctx = context_for(b"GET / HTTP/1.1\r\nHost: a.example\r\n\r\n");
        assert_eq!(ctx.site().base_url(), "http://a.example");
        assert_eq!(ctx.route().base_url(), "http://a.example");
    }
}
