//! JSON HTTP surface mounted under `/api/v1`.

use std::future::{Ready, ready};

use actix_identity::IdentityExt;
use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use serde::Serialize;

use crate::domain::viewer::Viewer;
use crate::services::ServiceError;

pub mod resources;
pub mod saved;

/// Body returned with every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// Maps a service failure onto its HTTP status.
pub fn service_error_response(err: ServiceError) -> HttpResponse {
    let body = ErrorBody::new(err.to_string());
    match err {
        ServiceError::ValidationFailure(_) => HttpResponse::BadRequest().json(body),
        ServiceError::Unauthorized => HttpResponse::Unauthorized().json(body),
        ServiceError::NotFound => HttpResponse::NotFound().json(body),
        ServiceError::QueryFailure(_) => {
            // Store details stay in the log.
            HttpResponse::InternalServerError().json(ErrorBody::new("internal error"))
        }
    }
}

/// Resolves the viewer from the identity cookie.
///
/// The identity id holds the viewer claims as JSON. A missing identity or
/// unreadable claims yield an anonymous viewer.
impl FromRequest for Viewer {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let viewer = match req.get_identity().and_then(|identity| identity.id()) {
            Ok(claims) => serde_json::from_str::<Viewer>(&claims).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed identity claims: {e}");
                Viewer::anonymous()
            }),
            Err(_) => Viewer::anonymous(),
        };
        ready(Ok(viewer))
    }
}

/// Registers every API route on `cfg`.
///
/// Body and query extraction failures are reported as `400` with an
/// [`ErrorBody`].
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::BadRequest().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        let response = HttpResponse::NotFound().json(ErrorBody::new(err.to_string()));
        InternalError::from_response(err, response).into()
    }))
    // `recent` must be registered ahead of `{resource_id}`.
    .service(resources::list_recently_updated)
    .service(resources::list_resources)
    .service(resources::create_resource)
    .service(resources::show_resource)
    .service(resources::update_resource)
    .service(resources::add_note)
    .service(resources::list_categories)
    .service(saved::list_saved)
    .service(saved::save_resource)
    .service(saved::unsave_resource);
}
