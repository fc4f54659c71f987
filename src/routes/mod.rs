//! HTTP handlers. Every response is wrapped in the same envelope:
//! `{success, message, data?, error?}`, with the status code mirroring the
//! service outcome.

use actix_web::HttpResponse;
use serde::Serialize;

use crate::services::ServiceError;

pub mod categories;
pub mod search;
pub mod software;
pub mod subcategories;

#[derive(Debug, Serialize)]
struct Envelope<T: Serialize> {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub(crate) fn ok<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        success: true,
        message: message.into(),
        data: Some(data),
        error: None,
    })
}

pub(crate) fn created<T: Serialize>(message: impl Into<String>, data: T) -> HttpResponse {
    HttpResponse::Created().json(Envelope {
        success: true,
        message: message.into(),
        data: Some(data),
        error: None,
    })
}

pub(crate) fn ok_empty(message: impl Into<String>) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()> {
        success: true,
        message: message.into(),
        data: None,
        error: None,
    })
}

pub(crate) fn failure(message: impl Into<String>, err: ServiceError) -> HttpResponse {
    let envelope = Envelope::<()> {
        success: false,
        message: message.into(),
        data: None,
        error: Some(err.to_string()),
    };
    match err {
        ServiceError::Form(_) => HttpResponse::BadRequest().json(envelope),
        ServiceError::NotFound => HttpResponse::NotFound().json(envelope),
        ServiceError::Conflict(_) => HttpResponse::Conflict().json(envelope),
        ServiceError::Cascade { .. } | ServiceError::Internal => {
            HttpResponse::InternalServerError().json(envelope)
        }
    }
}
