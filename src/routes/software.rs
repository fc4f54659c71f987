use std::sync::Arc;

use actix_multipart::form::MultipartForm;
use actix_web::{Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::blobstore::BlobStore;
use crate::forms::software::{AddSoftwareForm, UpdateSoftwareForm};
use crate::repository::DieselRepository;
use crate::routes::{created, failure, ok, ok_empty};
use crate::services::software as service;

#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
}

#[get("/subcategories/{subcategory_id}/software")]
pub async fn list_software_by_subcategory(
    path: web::Path<i32>,
    params: web::Query<PageParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_software_by_subcategory(
        path.into_inner(),
        params.page.unwrap_or(1),
        repo.get_ref(),
    ) {
        Ok(page) => ok("Software fetched successfully", page),
        Err(e) => failure("Failed to fetch software", e),
    }
}

#[get("/subcategories/{subcategory_id}/software/top")]
pub async fn top_software(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::top_software(path.into_inner(), repo.get_ref()) {
        Ok(softwares) => ok("Top software fetched successfully", softwares),
        Err(e) => failure("Failed to fetch top software", e),
    }
}

#[post("/software")]
pub async fn add_software(
    form: MultipartForm<AddSoftwareForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<Arc<dyn BlobStore>>,
) -> impl Responder {
    let (payload, image) = match form.into_inner().into_parts() {
        Ok(parts) => parts,
        Err(e) => return failure("Failed to create software", e.into()),
    };
    match service::add_software(payload, image, repo.get_ref(), store.get_ref().as_ref()) {
        Ok(software) => created("Software created successfully", software),
        Err(e) => failure("Failed to create software", e),
    }
}

#[put("/software/{software_id}")]
pub async fn update_software(
    path: web::Path<i32>,
    form: MultipartForm<UpdateSoftwareForm>,
    repo: web::Data<DieselRepository>,
    store: web::Data<Arc<dyn BlobStore>>,
) -> impl Responder {
    let (payload, image) = match form.into_inner().into_parts() {
        Ok(parts) => parts,
        Err(e) => return failure("Failed to update software", e.into()),
    };
    match service::update_software(
        path.into_inner(),
        payload,
        image,
        repo.get_ref(),
        store.get_ref().as_ref(),
    ) {
        Ok(software) => ok("Software updated successfully", software),
        Err(e) => failure("Failed to update software", e),
    }
}

#[delete("/software/{software_id}")]
pub async fn delete_software(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<Arc<dyn BlobStore>>,
) -> impl Responder {
    match service::delete_software(path.into_inner(), repo.get_ref(), store.get_ref().as_ref()) {
        Ok(()) => ok_empty("Software deleted successfully"),
        Err(e) => failure("Failed to delete software", e),
    }
}
