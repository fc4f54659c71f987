use crate::blobstore::BlobStore;
use crate::domain::subcategory::SubCategoryUpdate;
use crate::domain::types::{CategoryId, SortDirection, SubCategoryId};
use crate::dto::subcategories::{
    SubCategoryDto, SubCategoryRankDto, SubCategorySummaryDto, SubCategoryWithTopSoftwareDto,
};
use crate::forms::subcategories::AddSubCategoryPayload;
use crate::pagination::{
    ENRICHED_SOFTWARE_LIMIT, Paginated, SUBCATEGORIES_PER_PAGE, TOP_SUBCATEGORIES_LIMIT,
};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    CategoryReader, SoftwareReader, SoftwareWriter, SubCategoryListQuery, SubCategoryReader,
    SubCategoryWriter,
};
use crate::services::{ServiceError, ServiceResult, cascade};

/// All subcategories of one category, abbreviated, name-ascending.
pub fn list_subcategories_by_category<R>(
    category_id: i32,
    repo: &R,
) -> ServiceResult<Vec<SubCategorySummaryDto>>
where
    R: CategoryReader + SubCategoryReader,
{
    let Ok(category_id) = CategoryId::new(category_id) else {
        return Err(ServiceError::NotFound);
    };
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }
    match repo.list_subcategories(SubCategoryListQuery::default().category(category_id)) {
        Ok((_total, subcategories)) => {
            Ok(subcategories.into_iter().map(Into::into).collect())
        }
        Err(e) => {
            log::error!("Failed to list subcategories of category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// One page of the full subcategory listing.
pub fn list_subcategories<R>(
    page: usize,
    sort: SortDirection,
    repo: &R,
) -> ServiceResult<Paginated<SubCategoryDto>>
where
    R: SubCategoryReader,
{
    let query = SubCategoryListQuery::default()
        .sort(sort)
        .paginate(page, SUBCATEGORIES_PER_PAGE);
    match repo.list_subcategories(query) {
        Ok((total, subcategories)) => Ok(Paginated::new(
            subcategories.into_iter().map(Into::into).collect(),
            page,
            total,
            SUBCATEGORIES_PER_PAGE,
        )),
        Err(e) => {
            log::error!("Failed to list subcategories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// One page of subcategories, each enriched with its highest-scored
/// software. The per-subcategory lookups fan out concurrently.
pub fn browse_subcategories<R>(
    page: usize,
    sort: SortDirection,
    repo: &R,
) -> ServiceResult<Paginated<SubCategoryWithTopSoftwareDto>>
where
    R: SubCategoryReader + SoftwareReader,
{
    let query = SubCategoryListQuery::default()
        .sort(sort)
        .paginate(page, SUBCATEGORIES_PER_PAGE);
    let (total, subcategories) = match repo.list_subcategories(query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to list subcategories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let ids: Vec<SubCategoryId> = subcategories.iter().map(|s| s.id).collect();
    let mut top = match repo.top_software_for_subcategories(&ids, ENRICHED_SOFTWARE_LIMIT) {
        Ok(top) => top,
        Err(e) => {
            log::error!("Failed to fetch top software for subcategories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let items = subcategories
        .into_iter()
        .map(|subcategory| {
            let software = top.remove(&subcategory.id).unwrap_or_default();
            SubCategoryWithTopSoftwareDto::new(subcategory, software)
        })
        .collect();
    Ok(Paginated::new(items, page, total, SUBCATEGORIES_PER_PAGE))
}

/// Subcategories ranked by the mean score of their software.
pub fn top_subcategories<R>(repo: &R) -> ServiceResult<Vec<SubCategoryRankDto>>
where
    R: SubCategoryReader,
{
    match repo.top_subcategories(TOP_SUBCATEGORIES_LIMIT) {
        Ok(ranks) => Ok(ranks.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::error!("Failed to rank subcategories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn add_subcategory<R>(payload: AddSubCategoryPayload, repo: &R) -> ServiceResult<SubCategoryDto>
where
    R: CategoryReader + SubCategoryReader + SubCategoryWriter,
{
    match repo.get_category_by_id(payload.category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }
    // Friendly pre-check; the unique index still catches the race.
    match repo.get_subcategory_by_name(&payload.name, payload.category_id) {
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(
                "subcategory with the same name already exists in this category".to_string(),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to check subcategory name: {e}");
            return Err(ServiceError::Internal);
        }
    }
    match repo.create_subcategory(&payload.into_new_subcategory()) {
        Ok(subcategory) => Ok(subcategory.into()),
        Err(RepositoryError::Conflict(message)) => Err(ServiceError::Conflict(message)),
        Err(e) => {
            log::error!("Failed to create subcategory: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_subcategory<R>(
    subcategory_id: i32,
    update: SubCategoryUpdate,
    repo: &R,
) -> ServiceResult<SubCategoryDto>
where
    R: SubCategoryWriter,
{
    let Ok(subcategory_id) = SubCategoryId::new(subcategory_id) else {
        return Err(ServiceError::NotFound);
    };
    if update.is_empty() {
        return Err(ServiceError::Form(
            "at least one field must be supplied".to_string(),
        ));
    }
    match repo.update_subcategory(subcategory_id, &update) {
        Ok(Some(subcategory)) => Ok(subcategory.into()),
        Ok(None) => Err(ServiceError::NotFound),
        Err(RepositoryError::Conflict(message)) => Err(ServiceError::Conflict(message)),
        Err(e) => {
            log::error!("Failed to update subcategory: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete a subcategory and all of its software.
pub fn delete_subcategory<R, S>(subcategory_id: i32, repo: &R, store: &S) -> ServiceResult<()>
where
    R: SubCategoryReader + SubCategoryWriter + SoftwareReader + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    let Ok(subcategory_id) = SubCategoryId::new(subcategory_id) else {
        return Err(ServiceError::NotFound);
    };
    cascade::delete_subcategory_tree(subcategory_id, repo, store)
}
