use actix_multipart::form::MultipartForm;
use actix_multipart::form::tempfile::TempFile;
use actix_multipart::form::text::Text;
use chrono::Utc;
use thiserror::Error;

use crate::blobstore::ImageUpload;
use crate::domain::software::{ImageRef, NewSoftware};
use crate::domain::types::{
    Description, Score, SoftwareName, SubCategoryId, TypeConstraintError,
};

#[derive(Debug, Error)]
pub enum SoftwareFormError {
    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),
    #[error("image file is required")]
    MissingImage,
    #[error("failed to read uploaded image: {0}")]
    Io(#[from] std::io::Error),
}

/// Multipart body accepted when creating a software record. The image
/// arrives as a file part alongside the text fields.
#[derive(Debug, MultipartForm)]
pub struct AddSoftwareForm {
    #[multipart(rename = "subCategoryId")]
    pub subcategory_id: Text<i32>,
    pub name: Text<String>,
    pub description: Text<String>,
    pub score: Text<f64>,
    #[multipart(limit = "10MiB")]
    pub image: TempFile,
}

/// Validated payload built from [`AddSoftwareForm`], minus the image which
/// first has to travel through the blob store.
#[derive(Debug, Clone)]
pub struct AddSoftwarePayload {
    pub subcategory_id: SubCategoryId,
    pub name: SoftwareName,
    pub description: Description,
    pub score: Score,
}

impl AddSoftwarePayload {
    /// The category is taken from the parent subcategory rather than the
    /// request, so the leaf can never point outside its own branch.
    pub fn into_new_software(
        self,
        category_id: crate::domain::types::CategoryId,
        image: ImageRef,
    ) -> NewSoftware {
        NewSoftware {
            subcategory_id: self.subcategory_id,
            category_id,
            name: self.name,
            description: self.description,
            score: self.score,
            image,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl AddSoftwareForm {
    pub fn into_parts(self) -> Result<(AddSoftwarePayload, ImageUpload), SoftwareFormError> {
        let payload = AddSoftwarePayload {
            subcategory_id: SubCategoryId::new(self.subcategory_id.into_inner())?,
            name: SoftwareName::new(self.name.into_inner())?,
            description: Description::new(self.description.into_inner())?,
            score: Score::new(self.score.into_inner())?,
        };
        Ok((payload, read_upload(self.image)?))
    }
}

/// Multipart body accepted when updating a software record. Absent parts
/// stay untouched; a present image part replaces the stored one.
#[derive(Debug, MultipartForm)]
pub struct UpdateSoftwareForm {
    pub name: Option<Text<String>>,
    pub description: Option<Text<String>>,
    pub score: Option<Text<f64>>,
    #[multipart(limit = "10MiB")]
    pub image: Option<TempFile>,
}

/// Validated partial update built from [`UpdateSoftwareForm`], minus the
/// optional replacement image.
#[derive(Debug, Clone, Default)]
pub struct UpdateSoftwarePayload {
    pub name: Option<SoftwareName>,
    pub description: Option<Description>,
    pub score: Option<Score>,
}

impl UpdateSoftwarePayload {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.score.is_none()
    }
}

impl UpdateSoftwareForm {
    pub fn into_parts(
        self,
    ) -> Result<(UpdateSoftwarePayload, Option<ImageUpload>), SoftwareFormError> {
        let payload = UpdateSoftwarePayload {
            name: self
                .name
                .map(|v| SoftwareName::new(v.into_inner()))
                .transpose()?,
            description: self
                .description
                .map(|v| Description::new(v.into_inner()))
                .transpose()?,
            score: self.score.map(|v| Score::new(v.into_inner())).transpose()?,
        };
        let image = self.image.map(read_upload).transpose()?;
        Ok((payload, image))
    }
}

fn read_upload(file: TempFile) -> Result<ImageUpload, SoftwareFormError> {
    let filename = file
        .file_name
        .clone()
        .unwrap_or_else(|| "upload.bin".to_string());
    let bytes = std::fs::read(file.file.path())?;
    if bytes.is_empty() {
        return Err(SoftwareFormError::MissingImage);
    }
    Ok(ImageUpload { bytes, filename })
}
