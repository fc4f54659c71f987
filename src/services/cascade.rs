//! Cascade delete orchestration.
//!
//! Removing a category or subcategory removes its whole subtree. The steps
//! run as separate statements, children strictly before parents, so an
//! interruption can strand orphaned children but never a parent pointing at
//! deleted children. A failed step surfaces as [`ServiceError::Cascade`]
//! with the stage it reached; image blob deletes are best-effort and only
//! logged.

use crate::blobstore::BlobStore;
use crate::domain::software::Software;
use crate::domain::types::{CategoryId, SubCategoryId};
use crate::repository::{
    CategoryReader, CategoryWriter, SoftwareListQuery, SoftwareReader, SoftwareWriter,
    SubCategoryListQuery, SubCategoryReader, SubCategoryWriter,
};
use crate::services::{CascadeStage, ServiceError, ServiceResult};

fn discard_images<S>(store: &S, softwares: &[Software])
where
    S: BlobStore + ?Sized,
{
    for software in softwares {
        if let Err(e) = store.delete(&software.image.id) {
            log::warn!(
                "Failed to delete image {} of software {}: {e}",
                software.image.id,
                software.id
            );
        }
    }
}

/// Delete a subcategory together with all of its software.
pub fn delete_subcategory_tree<R, S>(
    subcategory_id: SubCategoryId,
    repo: &R,
    store: &S,
) -> ServiceResult<()>
where
    R: SubCategoryReader + SubCategoryWriter + SoftwareReader + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    match repo.get_subcategory_by_id(subcategory_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let softwares = match repo.list_software(SoftwareListQuery::default().subcategory(subcategory_id))
    {
        Ok((_total, softwares)) => softwares,
        Err(e) => {
            log::error!("Failed to list software of subcategory {subcategory_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };
    discard_images(store, &softwares);

    if let Err(e) = repo.delete_software_by_subcategory(subcategory_id) {
        return Err(ServiceError::Cascade {
            entity: "subcategory",
            id: subcategory_id.get(),
            stage: CascadeStage::Software,
            message: e.to_string(),
        });
    }
    if let Err(e) = repo.delete_subcategory(subcategory_id) {
        return Err(ServiceError::Cascade {
            entity: "subcategory",
            id: subcategory_id.get(),
            stage: CascadeStage::SubCategoryRecord,
            message: e.to_string(),
        });
    }
    Ok(())
}

/// Delete a category together with all of its subcategories and their
/// software.
pub fn delete_category_tree<R, S>(category_id: CategoryId, repo: &R, store: &S) -> ServiceResult<()>
where
    R: CategoryReader
        + CategoryWriter
        + SubCategoryReader
        + SubCategoryWriter
        + SoftwareReader
        + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    match repo.get_category_by_id(category_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let subcategories =
        match repo.list_subcategories(SubCategoryListQuery::default().category(category_id)) {
            Ok((_total, subcategories)) => subcategories,
            Err(e) => {
                log::error!("Failed to list subcategories of category {category_id}: {e}");
                return Err(ServiceError::Internal);
            }
        };
    for subcategory in subcategories {
        match delete_subcategory_tree(subcategory.id, repo, store) {
            Ok(()) => {}
            // A concurrent delete already removed it; the subtree is gone
            // either way.
            Err(ServiceError::NotFound) => {}
            Err(e) => return Err(e),
        }
    }

    // Software may still reference the category directly if an earlier
    // cascade was interrupted between its stages; sweep those up too.
    let leftovers = match repo.list_software(SoftwareListQuery::default().category(category_id)) {
        Ok((_total, leftovers)) => leftovers,
        Err(e) => {
            log::error!("Failed to list software of category {category_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };
    discard_images(store, &leftovers);
    if let Err(e) = repo.delete_software_by_category(category_id) {
        return Err(ServiceError::Cascade {
            entity: "category",
            id: category_id.get(),
            stage: CascadeStage::Software,
            message: e.to_string(),
        });
    }

    if let Err(e) = repo.delete_category(category_id) {
        return Err(ServiceError::Cascade {
            entity: "category",
            id: category_id.get(),
            stage: CascadeStage::CategoryRecord,
            message: e.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::domain::category::{Category, CategoryUpdate, NewCategory};
    use crate::domain::software::{NewSoftware, SoftwareUpdate};
    use crate::domain::subcategory::{
        NewSubCategory, SubCategory, SubCategoryRank, SubCategoryUpdate,
    };
    use crate::domain::types::{CategoryName, SoftwareId, SoftwareName, SubCategoryName};
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::repository::test::TestRepository;
    use crate::services::test_support::{
        RecordingBlobStore, seed_category, seed_software, seed_subcategory,
    };

    /// Repository whose bulk software delete or subcategory delete can be
    /// made to fail, for exercising mid-cascade error reporting.
    struct FailingDeletes {
        inner: TestRepository,
        fail_software_deletes: bool,
        fail_subcategory_deletes: bool,
    }

    impl FailingDeletes {
        fn software(inner: TestRepository) -> Self {
            Self {
                inner,
                fail_software_deletes: true,
                fail_subcategory_deletes: false,
            }
        }

        fn subcategory(inner: TestRepository) -> Self {
            Self {
                inner,
                fail_software_deletes: false,
                fail_subcategory_deletes: true,
            }
        }

        fn broken() -> RepositoryError {
            RepositoryError::Database(diesel::result::Error::BrokenTransactionManager)
        }
    }

    impl CategoryReader for FailingDeletes {
        fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
            self.inner.list_categories()
        }
        fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
            self.inner.get_category_by_id(id)
        }
        fn get_category_by_name(
            &self,
            name: &CategoryName,
        ) -> RepositoryResult<Option<Category>> {
            self.inner.get_category_by_name(name)
        }
    }

    impl CategoryWriter for FailingDeletes {
        fn create_category(&self, category: &NewCategory) -> RepositoryResult<Category> {
            self.inner.create_category(category)
        }
        fn update_category(
            &self,
            id: CategoryId,
            update: &CategoryUpdate,
        ) -> RepositoryResult<Option<Category>> {
            self.inner.update_category(id, update)
        }
        fn delete_category(&self, id: CategoryId) -> RepositoryResult<usize> {
            self.inner.delete_category(id)
        }
    }

    impl SubCategoryReader for FailingDeletes {
        fn list_subcategories(
            &self,
            query: SubCategoryListQuery,
        ) -> RepositoryResult<(usize, Vec<SubCategory>)> {
            self.inner.list_subcategories(query)
        }
        fn get_subcategory_by_id(
            &self,
            id: SubCategoryId,
        ) -> RepositoryResult<Option<SubCategory>> {
            self.inner.get_subcategory_by_id(id)
        }
        fn get_subcategory_by_name(
            &self,
            name: &SubCategoryName,
            category_id: CategoryId,
        ) -> RepositoryResult<Option<SubCategory>> {
            self.inner.get_subcategory_by_name(name, category_id)
        }
        fn top_subcategories(&self, limit: usize) -> RepositoryResult<Vec<SubCategoryRank>> {
            self.inner.top_subcategories(limit)
        }
    }

    impl SubCategoryWriter for FailingDeletes {
        fn create_subcategory(
            &self,
            subcategory: &NewSubCategory,
        ) -> RepositoryResult<SubCategory> {
            self.inner.create_subcategory(subcategory)
        }
        fn update_subcategory(
            &self,
            id: SubCategoryId,
            update: &SubCategoryUpdate,
        ) -> RepositoryResult<Option<SubCategory>> {
            self.inner.update_subcategory(id, update)
        }
        fn delete_subcategory(&self, id: SubCategoryId) -> RepositoryResult<usize> {
            if self.fail_subcategory_deletes {
                return Err(Self::broken());
            }
            self.inner.delete_subcategory(id)
        }
    }

    impl SoftwareReader for FailingDeletes {
        fn list_software(
            &self,
            query: SoftwareListQuery,
        ) -> RepositoryResult<(usize, Vec<Software>)> {
            self.inner.list_software(query)
        }
        fn get_software_by_id(&self, id: SoftwareId) -> RepositoryResult<Option<Software>> {
            self.inner.get_software_by_id(id)
        }
        fn get_software_by_name(
            &self,
            name: &SoftwareName,
            subcategory_id: SubCategoryId,
        ) -> RepositoryResult<Option<Software>> {
            self.inner.get_software_by_name(name, subcategory_id)
        }
        fn top_software(
            &self,
            subcategory_id: SubCategoryId,
            limit: usize,
        ) -> RepositoryResult<Vec<Software>> {
            self.inner.top_software(subcategory_id, limit)
        }
        fn top_software_for_subcategories(
            &self,
            subcategory_ids: &[SubCategoryId],
            limit: usize,
        ) -> RepositoryResult<HashMap<SubCategoryId, Vec<Software>>> {
            self.inner.top_software_for_subcategories(subcategory_ids, limit)
        }
    }

    impl SoftwareWriter for FailingDeletes {
        fn create_software(&self, software: &NewSoftware) -> RepositoryResult<Software> {
            self.inner.create_software(software)
        }
        fn update_software(
            &self,
            id: SoftwareId,
            update: &SoftwareUpdate,
        ) -> RepositoryResult<Option<Software>> {
            self.inner.update_software(id, update)
        }
        fn delete_software(&self, id: SoftwareId) -> RepositoryResult<usize> {
            self.inner.delete_software(id)
        }
        fn delete_software_by_subcategory(
            &self,
            subcategory_id: SubCategoryId,
        ) -> RepositoryResult<usize> {
            if self.fail_software_deletes {
                return Err(Self::broken());
            }
            self.inner.delete_software_by_subcategory(subcategory_id)
        }
        fn delete_software_by_category(
            &self,
            category_id: CategoryId,
        ) -> RepositoryResult<usize> {
            self.inner.delete_software_by_category(category_id)
        }
    }

    #[test]
    fn deletes_subcategory_with_software_and_images() {
        let repo = TestRepository::new();
        let store = RecordingBlobStore::default();
        let category = seed_category(&repo, "Development");
        let subcategory = seed_subcategory(&repo, category.id, "Editors");
        let software = seed_software(&repo, &subcategory, "Helix", 9.0);

        delete_subcategory_tree(subcategory.id, &repo, &store).unwrap();

        assert!(
            repo.get_subcategory_by_id(subcategory.id)
                .unwrap()
                .is_none()
        );
        assert!(repo.get_software_by_id(software.id).unwrap().is_none());
        assert_eq!(store.deleted(), vec![software.image.id.to_string()]);
    }

    #[test]
    fn missing_subcategory_is_not_found() {
        let repo = TestRepository::new();
        let store = RecordingBlobStore::default();
        let err = delete_subcategory_tree(SubCategoryId::new(42).unwrap(), &repo, &store)
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound);
    }

    #[test]
    fn deletes_category_subtree() {
        let repo = TestRepository::new();
        let store = RecordingBlobStore::default();
        let category = seed_category(&repo, "Development");
        let editors = seed_subcategory(&repo, category.id, "Editors");
        let shells = seed_subcategory(&repo, category.id, "Shells");
        seed_software(&repo, &editors, "Helix", 9.0);
        seed_software(&repo, &shells, "Fish", 8.0);

        delete_category_tree(category.id, &repo, &store).unwrap();

        assert!(repo.get_category_by_id(category.id).unwrap().is_none());
        assert!(repo.get_subcategory_by_id(editors.id).unwrap().is_none());
        assert!(repo.get_subcategory_by_id(shells.id).unwrap().is_none());
        let (total, _) = repo.list_software(SoftwareListQuery::default()).unwrap();
        assert_eq!(total, 0);
        assert_eq!(store.deleted().len(), 2);
    }

    #[test]
    fn failed_software_delete_reports_entity_and_stage() {
        let inner = TestRepository::new();
        let store = RecordingBlobStore::default();
        let category = seed_category(&inner, "Development");
        let subcategory = seed_subcategory(&inner, category.id, "Editors");
        seed_software(&inner, &subcategory, "Helix", 9.0);
        let repo = FailingDeletes::software(inner);

        let err = delete_subcategory_tree(subcategory.id, &repo, &store).unwrap_err();
        match err {
            ServiceError::Cascade {
                entity,
                id,
                stage,
                message,
            } => {
                assert_eq!(entity, "subcategory");
                assert_eq!(id, subcategory.id.get());
                assert_eq!(stage, CascadeStage::Software);
                assert!(!message.is_empty());
            }
            other => panic!("expected a cascade error, got {other:?}"),
        }
        // Children before parent: the record survives the failed stage.
        assert!(repo.get_subcategory_by_id(subcategory.id).unwrap().is_some());
    }

    #[test]
    fn category_cascade_surfaces_the_failing_subcategory() {
        let inner = TestRepository::new();
        let store = RecordingBlobStore::default();
        let category = seed_category(&inner, "Development");
        let subcategory = seed_subcategory(&inner, category.id, "Editors");
        seed_software(&inner, &subcategory, "Helix", 9.0);
        let repo = FailingDeletes::subcategory(inner);

        let err = delete_category_tree(category.id, &repo, &store).unwrap_err();
        match err {
            ServiceError::Cascade {
                entity, id, stage, ..
            } => {
                assert_eq!(entity, "subcategory");
                assert_eq!(id, subcategory.id.get());
                assert_eq!(stage, CascadeStage::SubCategoryRecord);
            }
            other => panic!("expected a cascade error, got {other:?}"),
        }
        // The category record is untouched until every subtree is gone.
        assert!(repo.get_category_by_id(category.id).unwrap().is_some());
    }

    #[test]
    fn blob_store_failure_does_not_abort_the_cascade() {
        let repo = TestRepository::new();
        let store = RecordingBlobStore::failing();
        let category = seed_category(&repo, "Development");
        let subcategory = seed_subcategory(&repo, category.id, "Editors");
        seed_software(&repo, &subcategory, "Helix", 9.0);

        delete_category_tree(category.id, &repo, &store).unwrap();
        assert!(repo.get_category_by_id(category.id).unwrap().is_none());
    }
}
