//! Canned responses: JSON bodies, file downloads, and redirects.
//!
//! Each constructor returns the final [`Response`] for the request: the
//! handler returns the constructed value, the server writes it, and nothing
//! after the handler's return runs. "Send and stop" is expressed as
//! ordinary control flow rather than a process-terminating call.

use std::path::Path;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::Serialize;
use serde_json::json;
use tracing::warn;

use crate::http::{Response, StatusCode};

// Everything except RFC 3986 unreserved characters is escaped.
const QUERY_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A JSON response: `data` encoded as the body, `Content-Type:
/// application/json`.
///
/// An encode failure (unrepresentable value, e.g. a non-string map key)
/// degrades to a 500 JSON error body rather than panicking.
///
/// # Examples
///
/// ```
/// use kerangka::reply;
/// use kerangka::http::StatusCode;
/// use serde_json::json;
///
/// let res = reply::json(&json!({"ok": true}), StatusCode::Ok);
/// assert_eq!(res.status(), StatusCode::Ok);
/// assert_eq!(res.headers().get("content-type"), Some("application/json"));
/// ```
pub fn json<T: Serialize>(data: &T, status: StatusCode) -> Response {
    match serde_json::to_vec(data) {
        Ok(body) => Response::new(status)
            .set_header("Content-Type", "application/json")
            .body_bytes(body),
        Err(e) => {
            warn!(error = %e, "failed to encode JSON response body");
            Response::new(StatusCode::InternalServerError)
                .set_header("Content-Type", "application/json")
                .body(r#"{"error":"failed to encode response"}"#)
        }
    }
}

/// A JSON error body `{"error": message}`. Conventional status: 400.
pub fn error(message: &str, status: StatusCode) -> Response {
    json(&json!({ "error": message }), status)
}

/// A JSON success body `{"message": message}`. Conventional status: 200.
pub fn success(message: &str, status: StatusCode) -> Response {
    json(&json!({ "message": message }), status)
}

/// A file-download response: the file's bytes as the body, served as
/// `application/octet-stream` with `Content-Disposition: attachment`.
/// `Content-Length` is derived from the bytes read.
///
/// A missing or unreadable file yields a plain-text 404.
pub async fn download(path: impl AsRef<Path>, filename: &str) -> Response {
    let path = path.as_ref();
    match tokio::fs::read(path).await {
        Ok(bytes) => {
            // Double quotes would break out of the quoted-string parameter.
            let filename = filename.replace('"', "");
            Response::new(StatusCode::Ok)
                .set_header("Content-Type", "application/octet-stream")
                .set_header(
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                )
                .body_bytes(bytes)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "download source unreadable");
            Response::new(StatusCode::NotFound).body("404 Not Found")
        }
    }
}

/// A 302 redirect to `url`.
pub fn redirect(url: &str) -> Response {
    Response::new(StatusCode::Found).set_header("Location", url)
}

/// A 302 redirect back to the referring page, or to `/` when no referer is
/// known. Non-empty `params` are appended as an encoded query string, with
/// `?` or `&` chosen by whether the target already carries a query.
///
/// # Examples
///
/// ```
/// use kerangka::reply;
///
/// let res = reply::redirect_back(Some("/foo?y=2"), &[("x", "1")]);
/// assert_eq!(res.headers().get("location"), Some("/foo?y=2&x=1"));
/// ```
pub fn redirect_back(referer: Option<&str>, params: &[(&str, &str)]) -> Response {
    let mut target = referer.unwrap_or("/").to_owned();

    if !params.is_empty() {
        let query = params
            .iter()
            .map(|(k, v)| {
                format!(
                    "{}={}",
                    utf8_percent_encode(k, QUERY_SET),
                    utf8_percent_encode(v, QUERY_SET)
                )
            })
            .collect::<Vec<_>>()
            .join("&");
        let separator = if target.contains('?') { '&' } else { '?' };
        target.push(separator);
        target.push_str(&query);
    }

    redirect(&target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn json_sets_body_and_content_type() {
        let res = json(&json!({"a": 1}), StatusCode::Ok);
        assert_eq!(res.status(), StatusCode::Ok);
        assert_eq!(res.headers().get("content-type"), Some("application/json"));
        assert_eq!(res.body_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn error_wraps_message() {
        let res = error("nope", StatusCode::BadRequest);
        assert_eq!(res.status(), StatusCode::BadRequest);
        assert_eq!(res.body_ref(), br#"{"error":"nope"}"#);
    }

    #[test]
    fn success_wraps_message() {
        let res = success("saved", StatusCode::Created);
        assert_eq!(res.status(), StatusCode::Created);
        assert_eq!(res.body_ref(), br#"{"message":"saved"}"#);
    }

    #[test]
    fn redirect_sets_location() {
        let res = redirect("/somewhere");
        assert_eq!(res.status(), StatusCode::Found);
        assert_eq!(res.headers().get("location"), Some("/somewhere"));
    }

    #[test]
    fn redirect_back_without_referer_goes_home() {
        let res = redirect_back(None, &[]);
        assert_eq!(res.headers().get("location"), Some("/"));
    }

    #[test]
    fn redirect_back_appends_query() {
        let res = redirect_back(Some("/foo"), &[("x", "1")]);
        assert_eq!(res.headers().get("location"), Some("/foo?x=1"));
    }

    #[test]
    fn redirect_back_extends_existing_query() {
        let res = redirect_back(Some("/foo?y=2"), &[("x", "1")]);
        assert_eq!(res.headers().get("location"), Some("/foo?y=2&x=1"));
    }

    #[test]
    fn redirect_back_encodes_params() {
        let res = redirect_back(Some("/foo"), &[("q", "a b&c")]);
        assert_eq!(res.headers().get("location"), Some("/foo?q=a%20b%26c"));
    }

    #[tokio::test]
    async fn download_streams_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.bin");
        std::fs::write(&path, b"\x00\x01payload").unwrap();

        let res = download(&path, "report.bin").await;
        assert_eq!(res.status(), StatusCode::Ok);
        assert_eq!(
            res.headers().get("content-type"),
            Some("application/octet-stream")
        );
        assert_eq!(
            res.headers().get("content-disposition"),
            Some(r#"attachment; filename="report.bin""#)
        );
        assert_eq!(res.body_ref(), b"\x00\x01payload");
    }

    #[tokio::test]
    async fn download_missing_file_is_404() {
        let dir = tempdir().unwrap();
        let res = download(dir.path().join("absent.bin"), "absent.bin").await;
        assert_eq!(res.status(), StatusCode::NotFound);
        assert_eq!(res.body_ref(), b"404 Not Found");
    }

    #[tokio::test]
    async fn download_strips_quotes_from_filename() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("f");
        std::fs::write(&path, b"x").unwrap();

        let res = download(&path, "we\"ird.txt").await;
        assert_eq!(
            res.headers().get("content-disposition"),
            Some(r#"attachment; filename="weird.txt""#)
        );
    }
}
