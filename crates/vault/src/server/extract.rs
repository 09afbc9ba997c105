//! Request extractors whose rejections use the service's error body.
//!
//! Axum's stock `Json`, `Path` and `Query` reject malformed input with a
//! plain-text response. These wrappers run the same extraction and turn any
//! rejection into `400 {code: "bad_request", message}`.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Path, Query,
    },
    response::{IntoResponse, Response},
    Json,
};
use common::VaultError;

use super::handlers::error_response;

/// JSON request body.
#[derive(Debug, FromRequest)]
#[from_request(via(Json), rejection(ApiRejection))]
pub struct ApiJson<T>(pub T);

/// Typed path parameters.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Path), rejection(ApiRejection))]
pub struct ApiPath<T>(pub T);

/// Typed query string.
#[derive(Debug, FromRequestParts)]
#[from_request(via(Query), rejection(ApiRejection))]
pub struct ApiQuery<T>(pub T);

/// An extractor rejection carried as [`VaultError::BadRequest`].
#[derive(Debug)]
pub struct ApiRejection(VaultError);

impl From<JsonRejection> for ApiRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(VaultError::BadRequest(rejection.body_text()))
    }
}

impl From<PathRejection> for ApiRejection {
    fn from(rejection: PathRejection) -> Self {
        Self(VaultError::BadRequest(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiRejection {
    fn from(rejection: QueryRejection) -> Self {
        Self(VaultError::BadRequest(rejection.body_text()))
    }
}

impl IntoResponse for ApiRejection {
    fn into_response(self) -> Response {
        error_response(self.0)
    }
}
