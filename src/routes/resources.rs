use actix_web::{HttpResponse, Responder, get, patch, post, web};
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;

use crate::domain::resource::ResourceFilter;
use crate::domain::types::ResourceCategory;
use crate::domain::viewer::Viewer;
use crate::forms::notes::AddNoteForm;
use crate::forms::resources::{CreateResourceForm, ResourceFilterForm, UpdateResourceForm};
use crate::repository::DieselRepository;
use crate::routes::service_error_response;
use crate::services::ServiceError;
use crate::services::notes::add_note as add_note_service;
use crate::services::resources::{
    create_resource as create_resource_service, get_resource_by_id,
    list_recently_updated as list_recently_updated_service,
    list_resources as list_resources_service, search_resources,
    update_resource_details,
};

/// Window used by `/resources/recent` when `since` is omitted.
const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;

#[derive(Deserialize, Debug)]
struct ResourcesQueryParams {
    category: Option<String>,
    zipcode: Option<String>,
    query: Option<String>,
    status: Option<String>,
    page: Option<usize>,
}

#[derive(Deserialize, Debug)]
struct RecentQueryParams {
    since: Option<DateTime<Utc>>,
    page: Option<usize>,
}

#[get("/resources")]
pub async fn list_resources(
    params: web::Query<ResourcesQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let params = params.into_inner();
    let page = params.page.unwrap_or(1);
    let search = params.query.clone();

    let filter = match ResourceFilter::try_from(ResourceFilterForm {
        category: params.category,
        zipcode: params.zipcode,
        query: params.query,
        status: params.status,
    }) {
        Ok(filter) => filter,
        Err(e) => return service_error_response(ServiceError::from(e)),
    };

    let result = match search {
        Some(query) if !query.trim().is_empty() => {
            search_resources(&query, &filter, page, repo.get_ref())
        }
        _ => list_resources_service(&filter, page, repo.get_ref()),
    };

    match result {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => service_error_response(e),
    }
}

#[get("/resources/recent")]
pub async fn list_recently_updated(
    params: web::Query<RecentQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let since = params
        .since
        .unwrap_or_else(|| Utc::now() - Duration::days(DEFAULT_RECENT_WINDOW_DAYS));
    let page = params.page.unwrap_or(1);

    match list_recently_updated_service(since.naive_utc(), page, repo.get_ref()) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(e) => service_error_response(e),
    }
}

#[get("/resources/{resource_id}")]
pub async fn show_resource(
    resource_id: web::Path<i32>,
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match get_resource_by_id(resource_id.into_inner(), &viewer, repo.get_ref()) {
        Ok(details) => HttpResponse::Ok().json(details),
        Err(e) => service_error_response(e),
    }
}

#[post("/resources")]
pub async fn create_resource(
    form: web::Json<CreateResourceForm>,
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match create_resource_service(form.into_inner(), &viewer, repo.get_ref()) {
        Ok(resource) => HttpResponse::Created().json(resource),
        Err(e) => service_error_response(e),
    }
}

#[patch("/resources/{resource_id}")]
pub async fn update_resource(
    resource_id: web::Path<i32>,
    form: web::Json<UpdateResourceForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match update_resource_details(resource_id.into_inner(), form.into_inner(), repo.get_ref()) {
        Ok(resource) => HttpResponse::Ok().json(resource),
        Err(e) => service_error_response(e),
    }
}

#[post("/resources/{resource_id}/notes")]
pub async fn add_note(
    resource_id: web::Path<i32>,
    form: web::Json<AddNoteForm>,
    viewer: Viewer,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match add_note_service(
        resource_id.into_inner(),
        form.into_inner(),
        &viewer,
        repo.get_ref(),
    ) {
        Ok(note) => HttpResponse::Created().json(note),
        Err(e) => service_error_response(e),
    }
}

#[get("/categories")]
pub async fn list_categories() -> impl Responder {
    HttpResponse::Ok().json(ResourceCategory::ALL)
}
