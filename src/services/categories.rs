use chrono::Utc;

use crate::blobstore::BlobStore;
use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryId, CategoryName, Description};
use crate::dto::categories::CategoryDto;
use crate::forms::categories::AddCategoryPayload;
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CategoryReader, CategoryWriter, SoftwareReader, SoftwareWriter, SubCategoryReader,
    SubCategoryWriter,
};
use crate::services::{ServiceError, ServiceResult, cascade};

/// Categories every fresh deployment starts with.
const DEFAULT_CATEGORIES: [(&str, &str); 6] = [
    ("Development Tools", "Tools for software development"),
    ("Design Tools", "Tools for UI/UX and graphic design"),
    ("Cloud Services", "Platforms for cloud computing"),
    ("Project Management", "Tools for managing projects"),
    ("Testing Tools", "Software testing frameworks and tools"),
    ("AI/ML Tools", "Tools for artificial intelligence and machine learning"),
];

/// Insert the default categories that are missing. Find-or-create by name,
/// so running it on every startup is safe.
pub fn seed_default_categories<R>(repo: &R) -> ServiceResult<()>
where
    R: CategoryReader + CategoryWriter,
{
    for (name, description) in DEFAULT_CATEGORIES {
        let name = CategoryName::new(name)?;
        match repo.get_category_by_name(&name) {
            Ok(Some(_)) => continue,
            Ok(None) => {}
            Err(e) => {
                log::error!("Failed to look up category {name}: {e}");
                return Err(ServiceError::Internal);
            }
        }
        let now = Utc::now().naive_utc();
        let new_category = NewCategory {
            name,
            description: Description::new(description)?,
            created_at: now,
            updated_at: now,
        };
        if let Err(e) = repo.create_category(&new_category) {
            log::error!("Failed to seed category {}: {e}", new_category.name);
            return Err(ServiceError::Internal);
        }
    }
    Ok(())
}

pub fn list_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_category<R>(payload: AddCategoryPayload, repo: &R) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    match repo.create_category(&payload.into_new_category()) {
        Ok(category) => Ok(category.into()),
        Err(RepositoryError::Conflict(message)) => Err(ServiceError::Conflict(message)),
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(
    category_id: i32,
    update: CategoryUpdate,
    repo: &R,
) -> ServiceResult<CategoryDto>
where
    R: CategoryWriter,
{
    let Ok(category_id) = CategoryId::new(category_id) else {
        return Err(ServiceError::NotFound);
    };
    if update.is_empty() {
        return Err(ServiceError::Form(
            "at least one field must be supplied".to_string(),
        ));
    }
    match repo.update_category(category_id, &update) {
        Ok(Some(category)) => Ok(category.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(RepositoryError::Conflict(message)) => Err(ServiceError::Conflict(message)),
        Err(e) => {
            log::error!("Failed to update category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a category and its whole subtree of subcategories and software.
pub fn delete_category<R, S>(category_id: i32, repo: &R, store: &S) -> ServiceResult<()>
where
    R: CategoryReader
        + CategoryWriter
        + SubCategoryReader
        + SubCategoryWriter
        + SoftwareReader
        + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    let Ok(category_id) = CategoryId::new(category_id) else {
        return Err(ServiceError::NotFound);
    };
    cascade::delete_category_tree(category_id, repo, store)
}
