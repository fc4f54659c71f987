//! Name search across the catalog. Matching is a case-insensitive substring
//! test on the name only; descriptions are not searched.

use crate::domain::types::SortDirection;
use crate::dto::search::SearchResultsDto;
use crate::dto::subcategories::SubCategoryWithTopSoftwareDto;
use crate::pagination::{
    BANNER_SEARCH_LIMIT, ENRICHED_SOFTWARE_LIMIT, Paginated, SUBCATEGORIES_PER_PAGE,
};
use crate::repository::{
    SoftwareListQuery, SoftwareReader, SubCategoryListQuery, SubCategoryReader,
};
use crate::services::{ServiceError, ServiceResult};

fn normalize_term(term: &str) -> ServiceResult<&str> {
    let trimmed = term.trim();
    if trimmed.is_empty() {
        return Err(ServiceError::Form(
            "search term must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

fn collect_results<R>(
    term: &str,
    limit: Option<usize>,
    repo: &R,
) -> ServiceResult<SearchResultsDto>
where
    R: SubCategoryReader + SoftwareReader,
{
    let mut subcategory_query = SubCategoryListQuery::default().search(term);
    let mut software_query = SoftwareListQuery::default().search(term);
    if let Some(limit) = limit {
        subcategory_query = subcategory_query.paginate(1, limit);
        software_query = software_query.paginate(1, limit);
    }

    let (_total, subcategories) = match repo.list_subcategories(subcategory_query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to search subcategories: {e}");
            return Err(ServiceError::Internal);
        }
    };
    let (_total, softwares) = match repo.list_software(software_query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to search software: {e}");
            return Err(ServiceError::Internal);
        }
    };
    Ok(SearchResultsDto {
        sub_categories: subcategories.into_iter().map(Into::into).collect(),
        software: softwares.into_iter().map(Into::into).collect(),
    })
}

/// Full catalog search, unbounded.
pub fn search_catalog<R>(term: &str, repo: &R) -> ServiceResult<SearchResultsDto>
where
    R: SubCategoryReader + SoftwareReader,
{
    let term = normalize_term(term)?;
    collect_results(term, None, repo)
}

/// Quick search backing the banner widget, capped per entity.
pub fn banner_search<R>(term: &str, repo: &R) -> ServiceResult<SearchResultsDto>
where
    R: SubCategoryReader + SoftwareReader,
{
    let term = normalize_term(term)?;
    collect_results(term, Some(BANNER_SEARCH_LIMIT), repo)
}

/// Paginated subcategory search, each match enriched with its top software.
pub fn search_subcategories<R>(
    term: &str,
    page: usize,
    repo: &R,
) -> ServiceResult<Paginated<SubCategoryWithTopSoftwareDto>>
where
    R: SubCategoryReader + SoftwareReader,
{
    let term = normalize_term(term)?;
    let query = SubCategoryListQuery::default()
        .search(term)
        .sort(SortDirection::Asc)
        .paginate(page, SUBCATEGORIES_PER_PAGE);
    let (total, subcategories) = match repo.list_subcategories(query) {
        Ok(listing) => listing,
        Err(e) => {
            log::error!("Failed to search subcategories: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let ids: Vec<_> = subcategories.iter().map(|s| s.id).collect();
    let mut top = match repo.top_software_for_subcategories(&ids, ENRICHED_SOFTWARE_LIMIT) {
        Ok(top) => top,
        Err(e) => {
            log::error!("Failed to fetch top software for search results: {e}");
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
