use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::subcategory::{NewSubCategory, SubCategoryUpdate};
use crate::domain::types::{CategoryId, Description, SubCategoryName, TypeConstraintError};

#[derive(Debug, Error)]
pub enum SubCategoryFormError {
    #[error("subcategory form contains invalid data: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

/// JSON body accepted when creating a subcategory.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddSubCategoryForm {
    #[validate(range(min = 1))]
    pub category_id: i32,
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Validated payload built from [`AddSubCategoryForm`].
#[derive(Debug, Clone)]
pub struct AddSubCategoryPayload {
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub description: Description,
}

impl AddSubCategoryPayload {
    pub fn into_new_subcategory(self) -> NewSubCategory {
        NewSubCategory {
            category_id: self.category_id,
            name: self.name,
            description: self.description,
            created_at: Utc::now().naive_utc(),
        }
    }
}

impl TryFrom<AddSubCategoryForm> for AddSubCategoryPayload {
    type Error = SubCategoryFormError;

    fn try_from(form: AddSubCategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            category_id: CategoryId::new(form.category_id)?,
            name: SubCategoryName::new(form.name)?,
            description: Description::new(form.description)?,
        })
    }
}

/// JSON body accepted when updating a subcategory. Absent fields stay
/// untouched; the parent category is immutable.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubCategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<UpdateSubCategoryForm> for SubCategoryUpdate {
    type Error = SubCategoryFormError;

    fn try_from(form: UpdateSubCategoryForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.map(SubCategoryName::new).transpose()?,
            description: form.description.map(Description::new).transpose()?,
        })
    }
}
