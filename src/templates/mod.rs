//! Template dispatch keyed on the first path segment.
//!
//! The dispatcher maps a route name — the first URL segment — to a
//! registered handler or static template file. Registration is the only way
//! a name becomes servable: the request never contributes to a filesystem
//! path, so a crafted segment cannot reach outside the registered set.
//!
//! An empty first segment dispatches to the home handler; an unregistered
//! name yields a plain-text `404 Not Found`. A registered template whose
//! backing file has gone missing is also a 404 — missing files are never
//! echoed into a 200 body.

use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::context::Context;
use crate::http::{Response, StatusCode};

/// Extension assumed for template files registered without one.
const DEFAULT_TEMPLATE_EXT: &str = "html";

/// Type-erased, heap-allocated async handler that processes a [`Context`]
/// and returns a [`Response`].
///
/// Stored behind `Arc<dyn Fn(…)>` so handlers can be shared across tasks.
/// You rarely construct this directly — [`Templates::register`] accepts any
/// suitable closure via [`IntoHandler`].
pub type Handler =
    Arc<dyn Fn(Context) -> Pin<Box<dyn Future<Output = Response> + Send>> + Send + Sync + 'static>;

/// Conversion trait for async handler functions.
///
/// Any `Fn(Context) -> impl Future<Output = Response> + Send` that is also
/// `Send + Sync + 'static` implements this automatically.
pub trait IntoHandler: Send + Sync + 'static {
    /// Call the handler with the given context, boxing the returned future.
    fn call(&self, ctx: Context) -> Pin<Box<dyn Future<Output = Response> + Send>>;
}

impl<T, F> IntoHandler for T
where
    T: Fn(Context) -> F + Send + Sync + 'static,
    F: Future<Output = Response> + Send + 'static,
{
    fn call(&self, ctx: Context) -> Pin<Box<dyn Future<Output = Response> + Send>> {
        Box::pin((self)(ctx))
    }
}

/// Allow-list registry mapping first-segment route names to handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use kerangka::Templates;
/// use kerangka::http::{Response, StatusCode};
///
/// let mut templates = Templates::new();
///
/// templates.home(|_ctx| async { Response::new(StatusCode::Ok).body("Home Page") });
///
/// templates.register("leads", |ctx: kerangka::Context| async move {
///     let action = ctx.segment(1).to_owned();
///     Response::new(StatusCode::Ok).body(action)
/// });
///
/// templates.register_file("about", "templates/about.html");
/// ```
#[derive(Default)]
pub struct Templates {
    entries: HashMap<String, Handler>,
    home: Option<Handler>,
}

impl Templates {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps a route name to an async handler.
    ///
    /// Re-registering a name replaces the previous handler.
    pub fn register(&mut self, name: impl Into<String>, handler: impl IntoHandler) {
        let handler: Handler = Arc::new(move |ctx| handler.call(ctx));
        self.entries.insert(name.into(), handler);
    }

    /// Sets the handler for requests with an empty first segment (the site
    /// root). Without one, the root serves a plain `Home Page` body.
    pub fn home(&mut self, handler: impl IntoHandler) {
        self.home = Some(Arc::new(move |ctx| handler.call(ctx)));
    }

    /// Maps a route name to a static template file served as HTML.
    ///
    /// The path is fixed here, at registration time. A path without an
    /// extension gets `.html` appended. The file is read per request, so
    /// edits show up without re-registration; if it has gone missing by
    /// dispatch time the route answers 404.
    pub fn register_file(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) {
        let mut path = path.into();
        if path.extension().is_none() {
            path.set_extension(DEFAULT_TEMPLATE_EXT);
        }
        let path = Arc::new(path);

        self.register(name, move |_ctx: Context| {
            let path = Arc::clone(&path);
            async move { serve_template(&path).await }
        });
    }

    /// Registers every `*.<ext>` file in `dir` under its file stem.
    ///
    /// The allow-list is built from this one directory scan — never from
    /// request input. Returns the number of templates registered. Listing
    /// order is the platform's; it only matters when duplicate stems
    /// collide, in which case the last one scanned wins.
    pub fn register_dir(&mut self, dir: impl AsRef<Path>, ext: &str) -> std::io::Result<usize> {
        let mut registered = 0;
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let matches_ext = path.extension().and_then(|e| e.to_str()) == Some(ext);
            if !matches_ext {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                self.register_file(stem.to_owned(), path.clone());
                registered += 1;
            }
        }
        Ok(registered)
    }

    /// Returns the number of registered route names (home excluded).
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no route names are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dispatches a request to the handler registered for its first path
    /// segment.
    ///
    /// - empty first segment → the home handler (or the built-in home body);
    /// - registered name → its handler;
    /// - anything else → `404 Not Found` with the matching plain-text body.
    pub async fn dispatch(&self, ctx: Context) -> Response {
        let name = ctx.segment(0).to_owned();

        if name.is_empty() {
            return match &self.home {
                Some(handler) => handler(ctx).await,
                None => Response::new(StatusCode::Ok).body("Home Page"),
            };
        }

        match self.entries.get(&name) {
            Some(handler) => {
                let handler = Arc::clone(handler);
                handler(ctx).await
            }
            None => {
                debug!(segment = %name, "no template registered — 404");
                Response::new(StatusCode::NotFound).body("404 Not Found")
            }
        }
    }
}

async fn serve_template(path: &Path) -> Response {
    match tokio::fs::read_to_string(path).await {
        Ok(contents) => Response::new(StatusCode::Ok)
            .set_header("Content-Type", "text/html; charset=utf-8")
            .body(contents),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "template file unreadable");
            Response::new(StatusCode::NotFound).body("404 Not Found")
        }
    }
}
