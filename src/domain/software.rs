use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CategoryId, Description, ImageId, ImageUrl, Score, SoftwareId, SoftwareName, SubCategoryId,
};

/// Canonical reference to an externally stored image. Earlier revisions of
/// the catalog stored a bare URL string; those records must be migrated to
/// this shape before import.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageRef {
    pub id: ImageId,
    pub url: ImageUrl,
}

/// Leaf of the catalog hierarchy. Lifecycle is bound to the owning
/// [`crate::domain::subcategory::SubCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Software {
    pub id: SoftwareId,
    pub subcategory_id: SubCategoryId,
    pub category_id: CategoryId,
    pub name: SoftwareName,
    pub description: Description,
    pub score: Score,
    pub image: ImageRef,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`Software`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSoftware {
    pub subcategory_id: SubCategoryId,
    pub category_id: CategoryId,
    pub name: SoftwareName,
    pub description: Description,
    pub score: Score,
    pub image: ImageRef,
    pub created_at: NaiveDateTime,
}

/// Partial update for a [`Software`]; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoftwareUpdate {
    pub name: Option<SoftwareName>,
    pub description: Option<Description>,
    pub score: Option<Score>,
    pub image: Option<ImageRef>,
}

impl SoftwareUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.score.is_none()
            && self.image.is_none()
    }
}
