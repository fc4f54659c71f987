use std::collections::HashMap;

use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, CategoryUpdate, NewCategory};
use crate::domain::software::{NewSoftware, Software, SoftwareUpdate};
use crate::domain::subcategory::{
    NewSubCategory, SubCategory, SubCategoryRank, SubCategoryUpdate,
};
use crate::domain::types::{
    CategoryId, CategoryName, SoftwareId, SoftwareName, SortDirection, SubCategoryId,
    SubCategoryName,
};
use crate::pagination::Pagination;
use crate::repository::errors::RepositoryResult;

pub mod category;
pub mod errors;
pub mod software;
pub mod subcategory;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers and fan-out workers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Build a `LIKE` pattern matching the term as a literal substring. `%` and
/// `_` in the term are escaped so they do not act as wildcards; queries using
/// the pattern must declare `\` as the escape character.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

/// Query parameters used when listing or searching subcategories.
#[derive(Debug, Clone, Default)]
pub struct SubCategoryListQuery {
    /// Restrict to subcategories of one category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Name ordering; ascending unless requested otherwise.
    pub sort: SortDirection,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl SubCategoryListQuery {
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn sort(mut self, sort: SortDirection) -> Self {
        self.sort = sort;
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Query parameters used when listing or searching software.
#[derive(Debug, Clone, Default)]
pub struct SoftwareListQuery {
    /// Restrict to software of one subcategory.
    pub subcategory_id: Option<SubCategoryId>,
    /// Restrict to software of one category.
    pub category_id: Option<CategoryId>,
    /// Case-insensitive substring match on the name.
    pub search: Option<String>,
    /// Pagination parameters.
    pub pagination: Option<Pagination>,
}

impl SoftwareListQuery {
    pub fn subcategory(mut self, subcategory_id: SubCategoryId) -> Self {
        self.subcategory_id = Some(subcategory_id);
        self
    }
    pub fn category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination::new(page, per_page));
        self
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories, name-ascending.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Retrieve a category by its exact name.
    fn get_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities. Deletion removes the single
/// record only; cascade orchestration lives in the service layer.
pub trait CategoryWriter {
    /// Persist a new category, returning the stored record.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category>;
    /// Apply a partial update; `None` if the category does not exist.
    fn update_category(
        &self,
        id: CategoryId,
        update: &CategoryUpdate,
    ) -> RepositoryResult<Option<Category>>;
    /// Delete the category record, returning the number of rows removed.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for subcategory entities.
pub trait SubCategoryReader {
    /// List subcategories matching the supplied query parameters, together
    /// with the unpaginated total count.
    fn list_subcategories(
        &self,
        query: SubCategoryListQuery,
    ) -> RepositoryResult<(usize, Vec<SubCategory>)>;
    /// Retrieve a subcategory by its identifier.
    fn get_subcategory_by_id(&self, id: SubCategoryId) -> RepositoryResult<Option<SubCategory>>;
    /// Retrieve a subcategory by its unique (name, category) pair.
    fn get_subcategory_by_name(
        &self,
        name: &SubCategoryName,
        category_id: CategoryId,
    ) -> RepositoryResult<Option<SubCategory>>;
    /// Rank subcategories by the mean score of their software, highest mean
    /// first. Subcategories without software carry no mean and sort last.
    fn top_subcategories(&self, limit: usize) -> RepositoryResult<Vec<SubCategoryRank>>;
}

/// Write operations for subcategory entities. Deletion removes the single
/// record only; cascade orchestration lives in the service layer.
pub trait SubCategoryWriter {
    /// Persist a new subcategory, returning the stored record.
    fn create_subcategory(&self, subcategory: &NewSubCategory) -> RepositoryResult<SubCategory>;
    /// Apply a partial update; `None` if the subcategory does not exist.
    fn update_subcategory(
        &self,
        id: SubCategoryId,
        update: &SubCategoryUpdate,
    ) -> RepositoryResult<Option<SubCategory>>;
    /// Delete the subcategory record, returning the number of rows removed.
    fn delete_subcategory(&self, id: SubCategoryId) -> RepositoryResult<usize>;
}

/// Read-only operations for software entities.
pub trait SoftwareReader {
    /// List software matching the supplied query parameters, together with
    /// the unpaginated total count.
    fn list_software(&self, query: SoftwareListQuery)
    -> RepositoryResult<(usize, Vec<Software>)>;
    /// Retrieve a software record by its identifier.
    fn get_software_by_id(&self, id: SoftwareId) -> RepositoryResult<Option<Software>>;
    /// Retrieve a software record by its unique (name, subcategory) pair.
    fn get_software_by_name(
        &self,
        name: &SoftwareName,
        subcategory_id: SubCategoryId,
    ) -> RepositoryResult<Option<Software>>;
    /// Highest-scored software of one subcategory, score-descending.
    fn top_software(
        &self,
        subcategory_id: SubCategoryId,
        limit: usize,
    ) -> RepositoryResult<Vec<Software>>;
    /// Highest-scored software for each of the given subcategories. The
    /// per-subcategory lookups are independent and run concurrently.
    fn top_software_for_subcategories(
        &self,
        subcategory_ids: &[SubCategoryId],
        limit: usize,
    ) -> RepositoryResult<HashMap<SubCategoryId, Vec<Software>>>;
}

/// Write operations for software entities.
pub trait SoftwareWriter {
    /// Persist a new software record, returning the stored record.
    fn create_software(&self, software: &NewSoftware) -> RepositoryResult<Software>;
    /// Apply a partial update; `None` if the software does not exist.
    fn update_software(
        &self,
        id: SoftwareId,
        update: &SoftwareUpdate,
    ) -> RepositoryResult<Option<Software>>;
    /// Delete one software record, returning the number of rows removed.
    fn delete_software(&self, id: SoftwareId) -> RepositoryResult<usize>;
    /// Delete every software record referencing the subcategory.
    fn delete_software_by_subcategory(
        &self,
        subcategory_id: SubCategoryId,
    ) -> RepositoryResult<usize>;
    /// Delete every software record still referencing the category directly.
    fn delete_software_by_category(&self, category_id: CategoryId) -> RepositoryResult<usize>;
}
