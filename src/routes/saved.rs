use actix_web::{HttpResponse, Responder, delete, get, put, web};

use crate::domain::viewer::Viewer;
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::saved::{
    list_saved as list_saved_service, save_resource as save_resource_service,
    unsave_resource as unsave_resource_service,
};

#[get("/saved")]
pub async fn list_saved(viewer: Viewer, repo: web::Data<DieselRepository>) -> impl Responder {
    match list_saved_service(&viewer, repo.get_ref()) {
        Ok(resources) => HttpResponse::Ok().json(resources),
        Err(e) => service_error_response(e),
    }
}

#[put("/saved/{resource_id}")]
pub async fn save_resource(
    resource_id: web::Path<i32>,
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match save_resource_service(resource_id.into_inner(), &viewer, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response(e),
    }
}

#[delete("/saved/{resource_id}")]
pub async fn unsave_resource(
    resource_id: web::Path<i32>,
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match unsave_resource_service(resource_id.into_inner(), &viewer, repo.get_ref()) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => service_error_response(e),
    }
}
