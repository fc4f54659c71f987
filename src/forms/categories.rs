use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;
use validator::Validate;

use crate::domain::category::{CategoryUpdate, NewCategory};
use crate::domain::types::{CategoryName, Description, TypeConstraintError};

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("category form contains invalid data: {0}")]
    Validation(#[from] validator::ValidationErrors),
    #[error("{0}")]
    TypeConstraint(#[from] TypeConstraintError),
}

/// JSON body accepted when creating a category.
#[derive(Debug, Deserialize, Validate)]
pub struct AddCategoryForm {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(length(min = 1))]
    pub description: String,
}

/// Validated payload built from [`AddCategoryForm`].
#[derive(Debug, Clone)]
pub struct AddCategoryPayload {
    pub name: CategoryName,
    pub description: Description,
}

impl AddCategoryPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

impl TryFrom<AddCategoryForm> for AddCategoryPayload {
    type Error = CategoryFormError;

    fn try_from(form: AddCategoryForm) -> Result<Self, Self::Error> {
        form.validate()?;
        Ok(Self {
            name: CategoryName::new(form.name)?,
            description: Description::new(form.description)?,
        })
    }
}

/// JSON body accepted when updating a category. Absent fields stay
/// untouched.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateCategoryForm {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<UpdateCategoryForm> for CategoryUpdate {
    type Error = CategoryFormError;

    fn try_from(form: UpdateCategoryForm) -> Result<Self, Self::Error> {
        Ok(Self {
            name: form.name.map(CategoryName::new).transpose()?,
            description: form.description.map(Description::new).transpose()?,
        })
    }
}
