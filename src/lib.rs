//! # kerangka
//!
//! A minimal segment-routing micro-framework: positional URL-segment
//! routing, a file-backed key/value cache with lazy TTL expiry, canned
//! JSON/redirect/download responses, an allow-list template dispatcher, and
//! an async HTTP/1.1 server to tie them together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use kerangka::{Server, Templates, reply};
//! use kerangka::http::StatusCode;
//! use kerangka::site::SiteConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut templates = Templates::new();
//!     templates.register("greet", |ctx: kerangka::Context| async move {
//!         let name = ctx.query_param("name").to_owned();
//!         reply::success(&format!("hallo, {name}"), StatusCode::Ok)
//!     });
//!     let templates = Arc::new(templates);
//!
//!     let server = Server::bind("127.0.0.1:8080").await?;
//!     println!("Listening on http://127.0.0.1:8080");
//!     server
//!         .run(SiteConfig::default(), move |ctx| {
//!             let templates = Arc::clone(&templates);
//!             async move { templates.dispatch(ctx).await }
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod context;
pub mod http;
pub mod journal;
pub mod reply;
pub mod route;
pub mod server;
pub mod site;
pub mod templates;

// ── Convenience re-exports ────────────────────────────────────────────────────
pub use cache::{CacheError, FileCache};
pub use context::Context;
pub use http::{Headers, Method, Request, Response, StatusCode};
pub use journal::Journal;
pub use route::RouteInfo;
pub use server::{Server, ServerError};
pub use site::{Protocol, Site, SiteConfig};
pub use templates::Templates;
