//! Status tables for the user operations.
//!
//! Each operation documents one success status and a set of failure statuses.
//! A response is classified against its operation's table:
//!
//! | Operation | Method | Success | Documented failures |
//! |-----------|--------|---------|---------------------|
//! | create    | POST   | 201     | 400, 409, 500       |
//! | update    | PUT    | 200     | 400, 404, 409, 500  |
//! | get       | GET    | 200     | 404, 500            |
//! | delete    | DELETE | 204     | 404, 500            |
//! | list      | GET    | 200     | 400, 500            |
//!
//! Any other status, including proxy errors such as 502, is unexpected.

use crate::{model::ErrorResponse, Error, Result, ServiceError};
use http::{Method, StatusCode};
use serde::de::DeserializeOwned;

/// The response contract of a single user operation.
#[derive(Debug)]
pub(crate) struct Operation {
    pub name: &'static str,
    pub method: Method,
    pub success: StatusCode,
    pub failures: &'static [StatusCode],
}

pub(crate) const CREATE_USER: Operation = Operation {
    name: "create_user",
    method: Method::POST,
    success: StatusCode::CREATED,
    failures: &[
        StatusCode::BAD_REQUEST,
        StatusCode::CONFLICT,
        StatusCode::INTERNAL_SERVER_ERROR,
    ],
};

pub(crate) const UPDATE_USER: Operation = Operation {
    name: "update_user",
    method: Method::PUT,
    success: StatusCode::OK,
    failures: &[
        StatusCode::BAD_REQUEST,
        StatusCode::NOT_FOUND,
        StatusCode::CONFLICT,
        StatusCode::INTERNAL_SERVER_ERROR,
    ],
};

pub(crate) const GET_USER: Operation = Operation {
    name: "get_user",
    method: Method::GET,
    success: StatusCode::OK,
    failures: &[StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR],
};

pub(crate) const DELETE_USER: Operation = Operation {
    name: "delete_user",
    method: Method::DELETE,
    success: StatusCode::NO_CONTENT,
    failures: &[StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR],
};

pub(crate) const LIST_USERS: Operation = Operation {
    name: "list_users",
    method: Method::GET,
    success: StatusCode::OK,
    failures: &[StatusCode::BAD_REQUEST, StatusCode::INTERNAL_SERVER_ERROR],
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Success,
    Failure,
    Unexpected,
}

impl Operation {
    pub(crate) fn classify(&self, status: StatusCode) -> Outcome {
        if status == self.success {
            Outcome::Success
        } else if self.failures.contains(&status) {
            Outcome::Failure
        } else {
            Outcome::Unexpected
        }
    }

    /// Turns a non-success response into the matching error.
    pub(crate) fn check(&self, status: StatusCode, body: &[u8]) -> Result<()> {
        match self.classify(status) {
            Outcome::Success => Ok(()),
            Outcome::Failure => Err(Error::Service(ServiceError::new(
                status.as_u16(),
                decode_error_response(body),
            ))),
            Outcome::Unexpected => Err(Error::UnexpectedStatus(status.as_u16())),
        }
    }

    /// Decodes the body of a success response.
    pub(crate) fn decode<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        serde_json::from_slice(body).map_err(|e| {
            tracing::debug!(
                operation = self.name,
                error = %e,
                "Failed to deserialize response"
            );
            Error::DeserializationFailed {
                raw_response: String::from_utf8_lossy(body).into_owned(),
                serde_error: e.to_string(),
                status: self.success,
            }
        })
    }
}

/// Only a JSON object counts as an error payload. Empty bodies, other JSON
/// values and non-JSON bodies mean no payload is available.
fn decode_error_response(body: &[u8]) -> Option<ErrorResponse> {
    match serde_json::from_slice(body) {
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}
