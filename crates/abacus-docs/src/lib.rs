//! # Abacus Docs
//!
//! API documentation for the Abacus service:
//!
//! - an **OpenAPI 3.1 document** built from the static operation table
//! - a **Swagger UI** page for trying the endpoints from a browser
//!
//! ## Example
//!
//! ```rust
//! use abacus_docs::{OpenApiGenerator, SwaggerUi};
//!
//! let spec = OpenApiGenerator::new().title("Abacus").generate();
//! let json = spec.to_json().unwrap();
//! let page = SwaggerUi::new(&spec).html().unwrap();
//!
//! assert!(json.contains("\"/multiply\""));
//! assert!(page.contains("swagger-ui"));
//! ```

#![doc(html_root_url = "https://docs.rs/abacus-docs/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod openapi;
mod swagger;

pub use error::{DocsError, DocsResult};
pub use openapi::{
    Components, Info, MediaType, OpenApi, OpenApiGenerator, Operation, PathItem, RequestBody,
    Response, Schema, SchemaType,
};
pub use swagger::{SwaggerUi, DEFAULT_SWAGGER_VERSION};
