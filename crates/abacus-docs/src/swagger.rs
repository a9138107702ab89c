//! Swagger UI page.
//!
//! The page loads Swagger UI from a CDN and renders the OpenAPI document
//! embedded in the page itself, so it works without a second request.

use bytes::Bytes;

use crate::error::DocsResult;
use crate::openapi::OpenApi;

/// Default Swagger UI version loaded from the CDN.
pub const DEFAULT_SWAGGER_VERSION: &str = "5.18.2";

/// Swagger UI configuration and HTML generation.
#[derive(Debug, Clone)]
pub struct SwaggerUi {
    spec: OpenApi,
    title: String,
    swagger_version: String,
}

impl SwaggerUi {
    /// Create a Swagger UI page for `spec`.
    #[must_use]
    pub fn new(spec: &OpenApi) -> Self {
        Self {
            title: format!("{} - Swagger UI", spec.info.title),
            spec: spec.clone(),
            swagger_version: DEFAULT_SWAGGER_VERSION.to_string(),
        }
    }

    /// Set the page title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the Swagger UI version to use.
    #[must_use]
    pub fn swagger_version(mut self, version: impl Into<String>) -> Self {
        self.swagger_version = version.into();
        self
    }

    /// Generate the HTML page.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::SerializationError`](crate::DocsError) if the
    /// document cannot be serialized.
    pub fn html(&self) -> DocsResult<String> {
        // `</` would end the script element early.
        let spec_json = self.spec.to_json()?.replace("</", "<\\/");

        Ok(format!(
            r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <link rel="stylesheet" href="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui.css" />
    <style>
        body {{
            margin: 0;
            background: #fafafa;
        }}
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@{version}/swagger-ui-bundle.js"></script>
    <script>
        window.onload = function() {{
            window.ui = SwaggerUIBundle({{
                spec: {spec_json},
                dom_id: '#swagger-ui',
                deepLinking: true,
                docExpansion: 'list',
                displayRequestDuration: true,
                presets: [SwaggerUIBundle.presets.apis]
            }});
        }};
    </script>
</body>
</html>"##,
            title = html_escape(&self.title),
            version = html_escape(&self.swagger_version),
            spec_json = spec_json,
        ))
    }

    /// Generate the HTML as bytes for use in HTTP responses.
    ///
    /// # Errors
    ///
    /// See [`SwaggerUi::html`].
    pub fn html_bytes(&self) -> DocsResult<Bytes> {
        self.html().map(Bytes::from)
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OpenApiGenerator;

    fn spec() -> OpenApi {
        OpenApiGenerator::new().title("Test API").generate()
    }

    #[test]
    fn test_html_generation() {
        let html = SwaggerUi::new(&spec()).html().unwrap();

        assert!(html.contains("<!DOCTYPE html>"));
        assert!(html.contains("<title>Test API - Swagger UI</title>"));
        assert!(html.contains("swagger-ui-dist@5.18.2"));
        assert!(html.contains("\"/divide\""));
    }

    #[test]
    fn test_customization() {
        let html = SwaggerUi::new(&spec())
            .title("<Calc>")
            .swagger_version("5.0.0")
            .html()
            .unwrap();

        assert!(html.contains("&lt;Calc&gt;"));
        assert!(html.contains("swagger-ui-dist@5.0.0"));
    }

    #[test]
    fn test_script_close_is_escaped() {
        let spec = OpenApiGenerator::new()
            .description("</script><script>alert(1)</script>")
            .generate();
        let html = SwaggerUi::new(&spec).html().unwrap();
        assert!(!html.contains("</script><script>alert"));
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<script>"), "&lt;script&gt;");
        assert_eq!(html_escape("a & b"), "a &amp; b");
    }

    #[test]
    fn test_html_bytes() {
        let bytes = SwaggerUi::new(&spec()).html_bytes().unwrap();
        assert!(bytes.len() > 100);
    }
}
