use serde::Serialize;

use crate::domain::software::Software;
use crate::domain::subcategory::{SubCategory, SubCategoryRank};
use crate::dto::software::SoftwareDto;

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryDto {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
}

impl From<SubCategory> for SubCategoryDto {
    fn from(subcategory: SubCategory) -> Self {
        Self {
            id: subcategory.id.get(),
            category_id: subcategory.category_id.get(),
            name: subcategory.name.into_inner(),
            description: subcategory.description.into_inner(),
        }
    }
}

/// Abbreviated shape used by per-category pickers and search results.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategorySummaryDto {
    pub id: i32,
    pub name: String,
}

impl From<SubCategory> for SubCategorySummaryDto {
    fn from(subcategory: SubCategory) -> Self {
        Self {
            id: subcategory.id.get(),
            name: subcategory.name.into_inner(),
        }
    }
}

/// Ranking entry; `averageScore` is `null` for subcategories without any
/// software.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryRankDto {
    pub id: i32,
    pub name: String,
    pub average_score: Option<f64>,
}

impl From<SubCategoryRank> for SubCategoryRankDto {
    fn from(rank: SubCategoryRank) -> Self {
        Self {
            id: rank.id.get(),
            name: rank.name.into_inner(),
            average_score: rank.average_score,
        }
    }
}

/// Subcategory enriched with its highest-scored software.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubCategoryWithTopSoftwareDto {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub top_software: Vec<SoftwareDto>,
}

impl SubCategoryWithTopSoftwareDto {
    pub fn new(subcategory: SubCategory, top_software: Vec<Software>) -> Self {
        Self {
            id: subcategory.id.get(),
            category_id: subcategory.category_id.get(),
            name: subcategory.name.into_inner(),
            description: subcategory.description.into_inner(),
            top_software: top_software.into_iter().map(Into::into).collect(),
        }
    }
}
