use crate::blobstore::{BlobStore, ImageUpload, StoredImage};
use crate::domain::software::SoftwareUpdate;
use crate::domain::types::{SoftwareId, SubCategoryId};
use crate::dto::software::SoftwareDto;
use crate::forms::software::{AddSoftwarePayload, UpdateSoftwarePayload};
use crate::pagination::{Paginated, SOFTWARE_PER_PAGE, TOP_SOFTWARE_LIMIT};
use crate::repository::errors::RepositoryError;
use crate::repository::{
    SoftwareListQuery, SoftwareReader, SoftwareWriter, SubCategoryReader,
};
use crate::services::{ServiceError, ServiceResult};

fn discard_stored<S>(store: &S, stored: &StoredImage)
where
    S: BlobStore + ?Sized,
{
    if let Err(e) = store.delete(&stored.id) {
        log::warn!("Failed to delete orphaned image {}: {e}", stored.id);
    }
}

/// One page of a subcategory's software, name-ascending.
pub fn list_software_by_subcategory<R>(
    subcategory_id: i32,
    page: usize,
    repo: &R,
) -> ServiceResult<Paginated<SoftwareDto>>
where
    R: SubCategoryReader + SoftwareReader,
{
    let Ok(subcategory_id) = SubCategoryId::new(subcategory_id) else {
        return Err(ServiceError::NotFound);
    };
    match repo.get_subcategory_by_id(subcategory_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    }
    let query = SoftwareListQuery::default()
        .subcategory(subcategory_id)
        .paginate(page, SOFTWARE_PER_PAGE);
    match repo.list_software(query) {
        Ok((total, softwares)) => Ok(Paginated::new(
            softwares.into_iter().map(Into::into).collect(),
            page,
            total,
            SOFTWARE_PER_PAGE,
        )),
        Err(e) => {
            log::error!("Failed to list software of subcategory {subcategory_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Highest-scored software of one subcategory.
pub fn top_software<R>(subcategory_id: i32, repo: &R) -> ServiceResult<Vec<SoftwareDto>>
where
    R: SubCategoryReader + SoftwareReader,
{
    let Ok(subcategory_id) = SubCategoryId::new(subcategory_id) else {
        return Err(ServiceError::NotFound);
    };
    match repo.get_subcategory_by_id(subcategory_id) {
        Ok(Some(_)) => {}
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    }
    match repo.top_software(subcategory_id, TOP_SOFTWARE_LIMIT) {
        Ok(softwares) => Ok(softwares.into_iter().map(Into::into).collect()),
        Err(e) => {
            log::error!("Failed to rank software of subcategory {subcategory_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Store the image, then persist the record. The category is inherited from
/// the parent subcategory. A rejected insert cleans the fresh blob up again.
pub fn add_software<R, S>(
    payload: AddSoftwarePayload,
    image: ImageUpload,
    repo: &R,
    store: &S,
) -> ServiceResult<SoftwareDto>
where
    R: SubCategoryReader + SoftwareReader + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    let subcategory = match repo.get_subcategory_by_id(payload.subcategory_id) {
        Ok(Some(subcategory)) => subcategory,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get subcategory: {e}");
            return Err(ServiceError::Internal);
        }
    };
    // Friendly pre-check; the unique index still catches the race.
    match repo.get_software_by_name(&payload.name, payload.subcategory_id) {
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(
                "software with the same name already exists in this subcategory".to_string(),
            ));
        }
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to check software name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let stored = match store.upload(&image) {
        Ok(stored) => stored,
        Err(e) => {
            log::error!("Failed to store software image: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let new_software =
        payload.into_new_software(subcategory.category_id, stored.clone().into());
    match repo.create_software(&new_software) {
        Ok(software) => Ok(software.into()),
        Err(RepositoryError::Conflict(message)) => {
            discard_stored(store, &stored);
            Err(ServiceError::Conflict(message))
        }
        Err(e) => {
            discard_stored(store, &stored);
            log::error!("Failed to create software: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Apply a partial update. A replacement image is stored first and the old
/// blob discarded only after the record switched over.
pub fn update_software<R, S>(
    software_id: i32,
    payload: UpdateSoftwarePayload,
    image: Option<ImageUpload>,
    repo: &R,
    store: &S,
) -> ServiceResult<SoftwareDto>
where
    R: SoftwareReader + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    let Ok(software_id) = SoftwareId::new(software_id) else {
        return Err(ServiceError::NotFound);
    };
    if payload.is_empty() && image.is_none() {
        return Err(ServiceError::Form(
            "at least one field must be supplied".to_string(),
        ));
    }
    let existing = match repo.get_software_by_id(software_id) {
        Ok(Some(software)) => software,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get software: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let stored = match image {
        Some(image) => match store.upload(&image) {
            Ok(stored) => Some(stored),
            Err(e) => {
                log::error!("Failed to store replacement image: {e}");
                return Err(ServiceError::Internal);
            }
        },
        None => None,
    };

    let update = SoftwareUpdate {
        name: payload.name,
        description: payload.description,
        score: payload.score,
        image: stored.clone().map(Into::into),
    };
    match repo.update_software(software_id, &update) {
        Ok(Some(software)) => {
            if stored.is_some() {
                if let Err(e) = store.delete(&existing.image.id) {
                    log::warn!(
                        "Failed to delete replaced image {}: {e}",
                        existing.image.id
                    );
                }
            }
            Ok(software.into())
        }
        Ok(None) => {
            if let Some(stored) = &stored {
                discard_stored(store, stored);
            }
            Err(ServiceError::NotFound)
        }
        Err(RepositoryError::Conflict(message)) => {
            if let Some(stored) = &stored {
                discard_stored(store, stored);
            }
            Err(ServiceError::Conflict(message))
        }
        Err(e) => {
            if let Some(stored) = &stored {
                discard_stored(store, stored);
            }
            log::error!("Failed to update software: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Delete one software record; its image blob is cleaned up best-effort.
pub fn delete_software<R, S>(software_id: i32, repo: &R, store: &S) -> ServiceResult<()>
where
    R: SoftwareReader + SoftwareWriter,
    S: BlobStore + ?Sized,
{
    let Ok(software_id) = SoftwareId::new(software_id) else {
        return Err(ServiceError::NotFound);
    };
    let existing = match repo.get_software_by_id(software_id) {
        Ok(Some(software)) => software,
        Ok(None) => return Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get software: {e}");
            return Err(ServiceError::Internal);
        }
    };
    match repo.delete_software(software_id) {
        Ok(_) => {
            if let Err(e) = store.delete(&existing.image.id) {
                log::warn!(
                    "Failed to delete image {} of software {software_id}: {e}",
                    existing.image.id
                );
            }
            Ok(())
        }
        Err(e) => {
            log::error!("Failed to delete software: {e}");
            Err(ServiceError::Internal)
        }
    }
}
