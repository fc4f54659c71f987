use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::software::{
    ImageRef, NewSoftware as DomainNewSoftware, Software as DomainSoftware,
    SoftwareUpdate as DomainSoftwareUpdate,
};
use crate::domain::types::{
    Description, ImageId, ImageUrl, Score, SoftwareName, TypeConstraintError,
};

/// Diesel model representing the `softwares` table.
#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::softwares)]
pub struct Software {
    pub id: i32,
    pub subcategory_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub score: f64,
    pub image_id: String,
    pub image_url: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Software`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::softwares)]
pub struct NewSoftware {
    pub subcategory_id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub score: f64,
    pub image_id: String,
    pub image_url: String,
    pub created_at: NaiveDateTime,
}

/// Changeset applying only the supplied fields.
#[derive(Debug, Default, AsChangeset)]
#[diesel(table_name = crate::schema::softwares)]
pub struct SoftwareUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub score: Option<f64>,
    pub image_id: Option<String>,
    pub image_url: Option<String>,
}

impl TryFrom<Software> for DomainSoftware {
    type Error = TypeConstraintError;

    fn try_from(software: Software) -> Result<Self, Self::Error> {
        Ok(Self {
            id: software.id.try_into()?,
            subcategory_id: software.subcategory_id.try_into()?,
            category_id: software.category_id.try_into()?,
            name: SoftwareName::new(software.name)?,
            description: Description::new(software.description)?,
            score: Score::new(software.score)?,
            image: ImageRef {
                id: ImageId::new(software.image_id)?,
                url: ImageUrl::new(software.image_url)?,
            },
            created_at: software.created_at,
        })
    }
}

impl From<DomainNewSoftware> for NewSoftware {
    fn from(software: DomainNewSoftware) -> Self {
        Self {
            subcategory_id: software.subcategory_id.get(),
            category_id: software.category_id.get(),
            name: software.name.into_inner(),
            description: software.description.into_inner(),
            score: software.score.get(),
            image_id: software.image.id.into_inner(),
            image_url: software.image.url.into_inner(),
            created_at: software.created_at,
        }
    }
}

impl From<DomainSoftwareUpdate> for SoftwareUpdate {
    fn from(update: DomainSoftwareUpdate) -> Self {
        let (image_id, image_url) = match update.image {
            Some(image) => (Some(image.id.into_inner()), Some(image.url.into_inner())),
            None => (None, None),
        };
        Self {
            name: update.name.map(SoftwareName::into_inner),
            description: update.description.map(Description::into_inner),
            score: update.score.map(Score::get),
            image_id,
            image_url,
        }
    }
}
