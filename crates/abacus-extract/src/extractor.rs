//! Core extractor trait.

use abacus_core::ApiResult;

use crate::ExtractionContext;

/// Trait for types that can be extracted from an HTTP request.
///
/// Extraction is synchronous: by the time an extractor runs the body has
/// already been collected into the [`ExtractionContext`].
///
/// # Implementing `FromRequest`
///
/// ```rust
/// use abacus_core::{ApiError, ApiResult};
/// use abacus_extract::{ExtractionContext, FromRequest};
///
/// struct RequestId(String);
///
/// impl FromRequest for RequestId {
///     fn from_request(ctx: &ExtractionContext) -> ApiResult<Self> {
///         ctx.header("x-request-id")
///             .map(|id| RequestId(id.to_string()))
///             .ok_or_else(|| ApiError::internal("request id not assigned"))
///     }
/// }
/// ```
pub trait FromRequest: Sized {
    /// Extracts this type from the request context.
    ///
    /// # Errors
    ///
    /// Returns an [`abacus_core::ApiError`] if extraction fails.
    fn from_request(ctx: &ExtractionContext) -> ApiResult<Self>;
}
