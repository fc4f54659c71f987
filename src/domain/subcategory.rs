use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, Description, SubCategoryId, SubCategoryName};

/// Second level of the catalog hierarchy. Lifecycle is bound to the owning
/// [`crate::domain::category::Category`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SubCategory {
    pub id: SubCategoryId,
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub description: Description,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`SubCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSubCategory {
    pub category_id: CategoryId,
    pub name: SubCategoryName,
    pub description: Description,
    pub created_at: NaiveDateTime,
}

/// Partial update for a [`SubCategory`]; only supplied fields change.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubCategoryUpdate {
    pub name: Option<SubCategoryName>,
    pub description: Option<Description>,
}

impl SubCategoryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }
}

/// A subcategory ranked by the mean score of its software. Subcategories
/// without any software carry no mean and rank below every scored one.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SubCategoryRank {
    pub id: SubCategoryId,
    pub name: SubCategoryName,
    pub average_score: Option<f64>,
}
