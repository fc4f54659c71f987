use actix_web::{Responder, get, web};
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::routes::{failure, ok};
use crate::services::search as service;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CategorySearchParams {
    pub keyword: Option<String>,
    pub page: Option<usize>,
}

#[get("/search")]
pub async fn search_catalog(
    params: web::Query<SearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::search_catalog(params.query.as_deref().unwrap_or(""), repo.get_ref()) {
        Ok(results) => ok("Search results fetched successfully", results),
        Err(e) => failure("Failed to search the catalog", e),
    }
}

#[get("/search/banner")]
pub async fn banner_search(
    params: web::Query<SearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::banner_search(params.query.as_deref().unwrap_or(""), repo.get_ref()) {
        Ok(results) => ok("Search results fetched successfully", results),
        Err(e) => failure("Failed to search the catalog", e),
    }
}

#[get("/search/category")]
pub async fn search_subcategories(
    params: web::Query<CategorySearchParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    match service::search_subcategories(
        params.keyword.as_deref().unwrap_or(""),
        params.page.unwrap_or(1),
        repo.get_ref(),
    ) {
        Ok(page) => ok("Search results fetched successfully", page),
        Err(e) => failure("Failed to search subcategories", e),
    }
}
