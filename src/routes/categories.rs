use std::sync::Arc;

use actix_web::{Responder, delete, get, post, put, web};

use crate::blobstore::BlobStore;
use crate::domain::category::CategoryUpdate;
use crate::forms::categories::{AddCategoryForm, AddCategoryPayload, UpdateCategoryForm};
use crate::repository::DieselRepository;
use crate::routes::{created, failure, ok, ok_empty};
use crate::services::categories as service;

#[get("/categories")]
pub async fn list_categories(repo: web::Data<DieselRepository>) -> impl Responder {
    match service::list_categories(repo.get_ref()) {
        Ok(categories) => ok("Categories fetched successfully", categories),
        Err(e) => failure("Failed to fetch categories", e),
    }
}

#[post("/categories")]
pub async fn add_category(
    form: web::Json<AddCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let payload = match AddCategoryPayload::try_from(form.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return failure("Failed to create category", e.into()),
    };
    match service::add_category(payload, repo.get_ref()) {
        Ok(category) => created("Category created successfully", category),
        Err(e) => failure("Failed to create category", e),
    }
}

#[put("/categories/{category_id}")]
pub async fn update_category(
    path: web::Path<i32>,
    form: web::Json<UpdateCategoryForm>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let update = match CategoryUpdate::try_from(form.into_inner()) {
        Ok(update) => update,
        Err(e) => return failure("Failed to update category", e.into()),
    };
    match service::update_category(path.into_inner(), update, repo.get_ref()) {
        Ok(category) => ok("Category updated successfully", category),
        Err(e) => failure("Failed to update category", e),
    }
}

#[delete("/categories/{category_id}")]
pub async fn delete_category(
    path: web::Path<i32>,
    repo: web::Data<DieselRepository>,
    store: web::Data<Arc<dyn BlobStore>>,
) -> impl Responder {
    match service::delete_category(path.into_inner(), repo.get_ref(), store.get_ref().as_ref()) {
        Ok(()) => ok_empty("Category and all related records deleted successfully"),
        Err(e) => failure("Failed to delete category", e),
    }
}
