//! OpenAPI 3.1 document types and generation.
//!
//! The document is built once from [`abacus_core::Operation::ALL`]; nothing
//! is reflected at runtime. Only the parts of OpenAPI the service uses are
//! modelled. See <https://spec.openapis.org/oas/v3.1.0>.

use abacus_core::Operation as ArithmeticOperation;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::DocsResult;

const JSON: &str = "application/json";
const HTML: &str = "text/html";

/// OpenAPI document root object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenApi {
    /// OpenAPI version ("3.1.0").
    pub openapi: String,
    /// API metadata.
    pub info: Info,
    /// API paths and operations.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub paths: IndexMap<String, PathItem>,
    /// Reusable schemas.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub components: Option<Components>,
}

impl OpenApi {
    /// Serializes the document as compact JSON.
    pub fn to_json(&self) -> DocsResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Serializes the document as indented JSON.
    pub fn to_json_pretty(&self) -> DocsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// API metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Info {
    /// API title.
    pub title: String,
    /// API version.
    pub version: String,
    /// API description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The operations available on one path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathItem {
    /// GET operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub get: Option<Operation>,
    /// POST operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post: Option<Operation>,
}

/// An API operation (endpoint).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Operation {
    /// Unique operation identifier.
    #[serde(rename = "operationId")]
    pub operation_id: String,
    /// Short summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Request body.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "requestBody")]
    pub request_body: Option<RequestBody>,
    /// Responses keyed by status code.
    pub responses: IndexMap<String, Response>,
}

/// Request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestBody {
    /// Whether required.
    #[serde(default)]
    pub required: bool,
    /// Content by media type.
    pub content: IndexMap<String, MediaType>,
}

/// Media type content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaType {
    /// Schema for this media type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Schema>,
    /// Example value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example: Option<serde_json::Value>,
}

/// Response definition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Description (required).
    pub description: String,
    /// Response content by media type.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaType>,
}

impl Response {
    fn with_schema(description: &str, media_type: &str, schema: Schema) -> Self {
        Self::with_example(description, media_type, schema, None)
    }

    fn with_example(
        description: &str,
        media_type: &str,
        schema: Schema,
        example: Option<serde_json::Value>,
    ) -> Self {
        let mut content = IndexMap::new();
        content.insert(
            media_type.to_string(),
            MediaType {
                schema: Some(schema),
                example,
            },
        );
        Self {
            description: description.to_string(),
            content,
        }
    }
}

/// Reusable components.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Components {
    /// Reusable schemas.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub schemas: IndexMap<String, Schema>,
}

/// JSON Schema type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// String type.
    String,
    /// Number type.
    Number,
    /// Integer type.
    Integer,
    /// Array type.
    Array,
    /// Object type.
    Object,
}

/// JSON Schema definition.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Schema {
    /// Schema type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "type")]
    pub schema_type: Option<SchemaType>,
    /// Title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Reference to another schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(rename = "$ref")]
    pub reference: Option<String>,
    /// Object properties.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, Schema>,
    /// Required properties.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    /// Array item schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    /// anyOf schemas.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    #[serde(rename = "anyOf")]
    pub any_of: Vec<Schema>,
}

impl Schema {
    /// Create a string schema.
    #[must_use]
    pub fn string() -> Self {
        Self::typed(SchemaType::String)
    }

    /// Create an integer schema.
    #[must_use]
    pub fn integer() -> Self {
        Self::typed(SchemaType::Integer)
    }

    /// Create a number schema.
    #[must_use]
    pub fn number() -> Self {
        Self::typed(SchemaType::Number)
    }

    /// Create an array schema with the given item schema.
    #[must_use]
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::typed(SchemaType::Array)
        }
    }

    /// Create an object schema.
    #[must_use]
    pub fn object() -> Self {
        Self::typed(SchemaType::Object)
    }

    /// Create a reference to a schema under `#/components/schemas`.
    #[must_use]
    pub fn component(name: &str) -> Self {
        Self {
            reference: Some(format!("#/components/schemas/{name}")),
            ..Default::default()
        }
    }

    /// Create a schema matching any of `schemas`.
    #[must_use]
    pub fn any_of(schemas: Vec<Schema>) -> Self {
        Self {
            any_of: schemas,
            ..Default::default()
        }
    }

    fn typed(schema_type: SchemaType) -> Self {
        Self {
            schema_type: Some(schema_type),
            ..Default::default()
        }
    }

    /// Set the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Add a description.
    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    /// Add a property to an object schema.
    #[must_use]
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Mark a property as required.
    #[must_use]
    pub fn required_property(mut self, name: impl Into<String>) -> Self {
        self.required.push(name.into());
        self
    }
}

/// Builds the OpenAPI document for the service.
///
/// # Example
///
/// ```
/// use abacus_docs::OpenApiGenerator;
///
/// let spec = OpenApiGenerator::new().title("Abacus").version("0.1.0").generate();
///
/// assert!(spec.paths.contains_key("/add"));
/// assert!(spec.paths["/divide"].post.as_ref().unwrap().responses.contains_key("400"));
/// ```
#[derive(Debug, Clone)]
pub struct OpenApiGenerator {
    title: String,
    version: String,
    description: Option<String>,
}

impl Default for OpenApiGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl OpenApiGenerator {
    /// Create a new generator.
    #[must_use]
    pub fn new() -> Self {
        Self {
            title: "Abacus".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: Some("Add, subtract, multiply and divide two numbers.".to_string()),
        }
    }

    /// Set the API title.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the API version.
    #[must_use]
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the API description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Generate the document.
    #[must_use]
    pub fn generate(&self) -> OpenApi {
        let mut paths = IndexMap::new();

        paths.insert(
            "/".to_string(),
            PathItem {
                get: Some(homepage_operation()),
                ..Default::default()
            },
        );

        for operation in ArithmeticOperation::ALL {
            paths.insert(
                operation.path().to_string(),
                PathItem {
                    post: Some(arithmetic_operation(operation)),
                    ..Default::default()
                },
            );
        }

        OpenApi {
            openapi: "3.1.0".to_string(),
            info: Info {
                title: self.title.clone(),
                version: self.version.clone(),
                description: self.description.clone(),
            },
            paths,
            components: Some(Components {
                schemas: component_schemas(),
            }),
        }
    }
}

fn homepage_operation() -> Operation {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response::with_schema("Calculator page", HTML, Schema::string()),
    );
    Operation {
        operation_id: "homepage".to_string(),
        summary: Some("Calculator homepage".to_string()),
        request_body: None,
        responses,
    }
}

fn arithmetic_operation(operation: ArithmeticOperation) -> Operation {
    let mut responses = IndexMap::new();
    responses.insert(
        "200".to_string(),
        Response::with_schema(
            "Successful Response",
            JSON,
            Schema::component("OperationResponse"),
        ),
    );
    if operation.is_fallible() {
        responses.insert(
            "400".to_string(),
            Response::with_example(
                "Division by zero",
                JSON,
                Schema::component("ErrorResponse"),
                Some(serde_json::json!({ "error": abacus_core::DIVISION_BY_ZERO_MESSAGE })),
            ),
        );
    }
    responses.insert(
        "422".to_string(),
        Response::with_schema(
            "Validation Error",
            JSON,
            Schema::component("HTTPValidationError"),
        ),
    );

    let mut content = IndexMap::new();
    content.insert(
        JSON.to_string(),
        MediaType {
            schema: Some(Schema::component("OperationRequest")),
            example: Some(serde_json::json!({ "a": 10, "b": 5 })),
        },
    );

    Operation {
        operation_id: operation.name().to_string(),
        summary: Some(operation.summary().to_string()),
        request_body: Some(RequestBody {
            required: true,
            content,
        }),
        responses,
    }
}

fn component_schemas() -> IndexMap<String, Schema> {
    let mut schemas = IndexMap::new();

    schemas.insert(
        "OperationRequest".to_string(),
        Schema::object()
            .with_title("OperationRequest")
            .property("a", Schema::number().with_title("A"))
            .property("b", Schema::number().with_title("B"))
            .required_property("a")
            .required_property("b"),
    );
    schemas.insert(
        "OperationResponse".to_string(),
        Schema::object()
            .with_title("OperationResponse")
            .property("result", Schema::number().with_title("Result"))
            .required_property("result"),
    );
    schemas.insert(
        "ErrorResponse".to_string(),
        Schema::object()
            .with_title("ErrorResponse")
            .property("error", Schema::string().with_title("Error"))
            .required_property("error"),
    );
    schemas.insert(
        "ValidationError".to_string(),
        Schema::object()
            .with_title("ValidationError")
            .property(
                "loc",
                Schema::array(Schema::any_of(vec![Schema::string(), Schema::integer()]))
                    .with_title("Location"),
            )
            .property("msg", Schema::string().with_title("Message"))
            .property("type", Schema::string().with_title("Error Type"))
            .property(
                "input",
                Schema::default()
                    .with_title("Input")
                    .with_description("The offending input"),
            )
            .property("ctx", Schema::object().with_title("Context"))
            .required_property("loc")
            .required_property("msg")
            .required_property("type"),
    );
    schemas.insert(
        "HTTPValidationError".to_string(),
        Schema::object()
            .with_title("HTTPValidationError")
            .property(
                "detail",
                Schema::array(Schema::component("ValidationError")).with_title("Detail"),
            ),
    );

    schemas
}
