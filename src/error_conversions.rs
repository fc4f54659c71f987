//! Error conversion glue between the form/domain layers and the service
//! layer, so that handler code can lean on `?` and `TryFrom`.

use crate::domain::types::TypeConstraintError;
use crate::forms::categories::CategoryFormError;
use crate::forms::software::SoftwareFormError;
use crate::forms::subcategories::SubCategoryFormError;
use crate::services::ServiceError;

impl From<TypeConstraintError> for ServiceError {
    fn from(val: TypeConstraintError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<CategoryFormError> for ServiceError {
    fn from(val: CategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<SubCategoryFormError> for ServiceError {
    fn from(val: SubCategoryFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}

impl From<SoftwareFormError> for ServiceError {
    fn from(val: SoftwareFormError) -> Self {
        ServiceError::Form(val.to_string())
    }
}
