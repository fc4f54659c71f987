use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::subcategory::{
    NewSubCategory as DomainNewSubCategory, SubCategory as DomainSubCategory,
    SubCategoryUpdate as DomainSubCategoryUpdate,
};
use crate::domain::types::{Description, SubCategoryName, TypeConstraintError};

/// Diesel model representing the `subcategories` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct SubCategory {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`SubCategory`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct NewSubCategory {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
}

/// Changeset applying only the supplied fields.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::subcategories)]
pub struct SubCategoryUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl TryFrom<SubCategory> for DomainSubCategory {
    type Error = TypeConstraintError;

    fn try_from(subcategory: SubCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: subcategory.id.try_into()?,
            category_id: subcategory.category_id.try_into()?,
            name: SubCategoryName::new(subcategory.name)?,
            description: Description::new(subcategory.description)?,
            created_at: subcategory.created_at,
        })
    }
}

impl From<DomainNewSubCategory> for NewSubCategory {
    fn from(subcategory: DomainNewSubCategory) -> Self {
        Self {
            category_id: subcategory.category_id.get(),
            name: subcategory.name.into_inner(),
            description: subcategory.description.into_inner(),
            created_at: subcategory.created_at,
        }
    }
}

impl From<DomainSubCategoryUpdate> for SubCategoryUpdate {
    fn from(update: DomainSubCategoryUpdate) -> Self {
        Self {
            name: update.name.map(SubCategoryName::into_inner),
            description: update.description.map(Description::into_inner),
        }
    }
}
