//! Uniform response envelope: `{ status, data, error }`.

use axum::{http::StatusCode, Json};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub data: Option<T>,
    pub error: String,
}

impl<T> Envelope<T> {
    pub fn data(status: StatusCode, data: T) -> Self {
        Envelope {
            status: status.as_u16(),
            data: Some(data),
            error: String::new(),
        }
    }

    pub fn error(status: StatusCode, message: String) -> Self {
        Envelope {
            status: status.as_u16(),
            data: None,
            error: message,
        }
    }
}

pub fn success_created<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (
        StatusCode::CREATED,
        Json(Envelope::data(StatusCode::CREATED, data)),
    )
}

pub fn success_ok<T: Serialize>(data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope::data(StatusCode::OK, data)))
}

/// Delete responses carry no body.
pub fn no_content() -> StatusCode {
    StatusCode::NO_CONTENT
}
