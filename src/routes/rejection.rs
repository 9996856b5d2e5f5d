use serde::Serialize;
use serde_json::{json, Value};
use warp::reject;

use crate::errors::BackendError;

/// A backend error tagged with the request context it arose in.
#[derive(Debug)]
pub struct Rejection {
    pub(crate) context: Context,
    pub(crate) error: BackendError,
}

impl Rejection {
    pub fn new(context: Context, error: BackendError) -> Self {
        Rejection { context, error }
    }

    /// The wire form promised to clients: an error code plus detail.
    /// Validation failures carry the per-field errors; everything else
    /// carries its display message.
    pub fn flatten(&self) -> ErrorResponse {
        match &self.error {
            BackendError::InvalidJson { .. } => ErrorResponse {
                error: "invalid_json",
                detail: json!(format!("{}", self.error)),
            },
            BackendError::Validation { errors } => ErrorResponse {
                error: "validation_error",
                detail: json!(errors),
            },
            BackendError::Serialization { .. } | BackendError::AppendFailed { .. } => {
                ErrorResponse {
                    error: "server_error",
                    detail: json!(format!("{}", self.error)),
                }
            }
        }
    }
}

impl reject::Reject for Rejection {}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub(crate) error: &'static str,
    pub(crate) detail: Value,
}

#[derive(Clone, Debug)]
pub enum Context {
    Survey { id: Option<String> },
    Submit { id: Option<String> },
}

impl Context {
    pub fn survey(id: Option<String>) -> Context {
        Context::Survey { id }
    }

    pub fn submit(id: Option<String>) -> Context {
        Context::Submit { id }
    }
}
