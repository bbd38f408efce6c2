//! HTTP error responses.
//!
//! Every failure leaves the server as a JSON object with a single `msg` field.

use salvo::{
    Scribe,
    http::{ResBody, StatusCode},
    oapi::{self, Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error response body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub(crate) struct ErrorBody {
    /// Human readable failure reason
    pub msg: String,
}

/// An HTTP status paired with the message rendered to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{status}: {msg}")]
pub(crate) struct ApiError {
    pub(crate) status: StatusCode,
    pub(crate) msg: String,
}

impl ApiError {
    pub(crate) fn new(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            status,
            msg: msg.into(),
        }
    }

    pub(crate) fn bad_request(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, msg)
    }

    pub(crate) fn not_found(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, msg)
    }

    pub(crate) fn conflict(msg: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, msg)
    }

    pub(crate) fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
    }

    pub(crate) fn needs_all_data() -> Self {
        Self::bad_request("needs all data")
    }

    pub(crate) fn path_not_found() -> Self {
        Self::not_found("path not found")
    }
}

impl Scribe for ApiError {
    fn render(self, res: &mut Response) {
        res.body = ResBody::None;
        res.status_code(self.status);
        res.render(Json(ErrorBody { msg: self.msg }));
    }
}

impl EndpointOutRegister for ApiError {
    fn register(components: &mut Components, operation: &mut Operation) {
        for (status, description) in [
            (StatusCode::BAD_REQUEST, "Bad Request"),
            (StatusCode::NOT_FOUND, "Not Found"),
            (StatusCode::CONFLICT, "Conflict"),
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        ] {
            operation.responses.insert(
                status.as_str(),
                oapi::Response::new(description)
                    .add_content("application/json", ErrorBody::to_schema(components)),
            );
        }
    }
}

/// Rewrites bodiless error responses into the JSON error shape.
///
/// Unmatched routes and methods become `404 path not found`; panics and any
/// other server failure become `500 internal server error`.
#[handler]
pub(crate) async fn catch_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    let error = if matches!(
        status,
        StatusCode::NOT_FOUND | StatusCode::METHOD_NOT_ALLOWED
    ) {
        ApiError::path_not_found()
    } else if status.is_server_error() {
        ApiError::internal()
    } else {
        ApiError::new(
            status,
            status.canonical_reason().unwrap_or("request failed"),
        )
    };

    res.render(error);
    ctrl.skip_rest();
}
