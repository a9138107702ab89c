//! The static HTML homepage served at `GET /`.

use abacus_extract::response::HtmlResponse;
use bytes::Bytes;
use http::Response;

/// The homepage document, embedded at compile time.
pub const HOMEPAGE_HTML: &str = include_str!("../static/index.html");

/// Builds the `GET /` response.
#[must_use]
pub fn homepage() -> Response<Bytes> {
    HtmlResponse::new(Bytes::from_static(HOMEPAGE_HTML.as_bytes())).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::{header, StatusCode};

    #[test]
    fn test_homepage_response() {
        let response = homepage();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/html; charset=utf-8"
        );
        assert!(response.body().starts_with(b"<!DOCTYPE html>"));
    }

    #[test]
    fn test_homepage_posts_to_every_operation() {
        for op in abacus_core::Operation::ALL {
            assert!(
                HOMEPAGE_HTML.contains(&format!(r#"value="{}""#, op.name())),
                "missing {op}"
            );
        }
        assert!(HOMEPAGE_HTML.contains(r#"method: "POST""#));
    }
}
