use serde::Serialize;

use crate::domain::software::{ImageRef, Software};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ImageRefDto {
    pub id: String,
    pub url: String,
}

impl From<ImageRef> for ImageRefDto {
    fn from(image: ImageRef) -> Self {
        Self {
            id: image.id.into_inner(),
            url: image.url.into_inner(),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareDto {
    pub id: i32,
    pub sub_category_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub score: f64,
    pub image: ImageRefDto,
}

impl From<Software> for SoftwareDto {
    fn from(software: Software) -> Self {
        Self {
            id: software.id.get(),
            sub_category_id: software.subcategory_id.get(),
            category_id: software.category_id.get(),
            name: software.name.into_inner(),
            description: software.description.into_inner(),
            score: software.score.get(),
            image: software.image.into(),
        }
    }
}

/// Abbreviated shape used by search results.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SoftwareSummaryDto {
    pub id: i32,
    pub name: String,
}

impl From<Software> for SoftwareSummaryDto {
    fn from(software: Software) -> Self {
        Self {
            id: software.id.get(),
            name: software.name.into_inner(),
        }
    }
}
