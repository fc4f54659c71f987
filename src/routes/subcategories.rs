use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};
use serde::Deserialize;

use crate::blobstore::BlobStore;
use crate::domain::subcategory::SubCategoryUpdate;
use crate::domain::types::SortDirection;
use crate::forms::subcategories::{
    AddSubCategoryForm, AddSubCategoryPayload, UpdateSubCategoryForm,
};
use crate::repository::DieselRepository;
use crate::routes::{created, failure, ok, ok_empty};
use crate::services::ServiceError;
use crate::services::subcategories as service;

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub page: Option<usize>,
    pub sort: Option<String>,
}

impl ListParams {
    fn sort(&self) -> Result<SortDirection, ServiceError> {
        match &self.sort {
            None => Ok(SortDirection::default()),
            Some(value) => SortDirection::try_from(value.as_str())
                .map_err(|e| ServiceError::Form(e.to_string())),
        }
    }
}

#[get("/subcategories")]
pub async fn list_subcategories(
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let sort = match params.sort() {
        Ok(sort) => sort,
        Err(e) => return failure("Failed to fetch subcategories", e),
    };
    match service::list_subcategories(params.page.unwrap_or(1), sort, repo.get_ref()) {
        Ok(page) => ok("Subcategories fetched successfully", page),
        Err(e) => failure("Failed to fetch subcategories", e),
    }
}

#[get("/subcategories/browse")]
pub async fn browse_subcategories(
    params: web::Query<ListParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let sort = match params.sort() {
        Ok(sort) => sort,
        Err(e) => return failure("Failed to fetch subcategories", e),
    };
    match service::browse_subcategories(params.page.unwrap_or(1), sort, repo.get_ref()) {
        Ok(page) => ok("Subcategories fetched successfully", page),
        Err(e) => failure("Failed to fetch subcategories", e),
    }
}

#[get("/subcategories/top")]
pub async fn top_subcategories(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::top_subcategories(repo.get_ref()) {
        Ok(ranks) => ok("Top subcategories fetched successfully", ranks),
        Err(e) => failure("Failed to fetch top subcategories", e),
    }
}

#[get("/categories/{category_id}/subcategories")]
pub async fn list_subcategories_by_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::list_subcategories_by_category(path.into_inner(), repo.get_ref()) {
        Ok(subcategories) => ok("Subcategories fetched successfully", subcategories),
        Err(e) => failure("Failed to fetch subcategories", e),
    }
}

#[post("/subcategories")]
pub async fn add_subcategory(
    form: web::Json<AddSubCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload = match AddSubCategoryPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return failure("Failed to create subcategory", e.into()),
    };
    match service::add_subcategory(payload, repo.get_ref()) {
        Ok(subcategory) => created("Subcategory created successfully", subcategory),
        Err(e) => failure("Failed to create subcategory", e),
    }
}

#[put("/subcategories/{subcategory_id}")]
pub async fn update_subcategory(
    path: web::Path<i32>,
    form: web::Json<UpdateSubCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let update = match SubCategoryUpdate::try_from(form.into_inner()) {
        Ok(update) => update,
        Err(e) => return failure("Failed to update subcategory", e.into()),
    };
    match service::update_subcategory(path.into_inner(), update, repo.get_ref()) {
        Ok(subcategory) => ok("Subcategory updated successfully", subcategory),
        Err(e) => failure("Failed to update subcategory", e),
    }
}

#[delete("/subcategories/{subcategory_id}")]
pub async fn delete_subcategory(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<Arc<dyn BlobStore>>,
) -> impl Responder {
    match service::delete_subcategory(path.into_inner(), repo.get_ref(), store.get_ref().as_ref())
    {
        Ok(()) => ok_empty("Subcategory and all related software deleted successfully"),
        Err(e) => failure("Failed to delete subcategory", e),
    }
}
