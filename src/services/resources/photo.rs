use sea_orm::Set;

use crate::{
    db::{dao::PhotoDao, entities::photo},
    forms::{FormFields, ValidationError},
    services::resource_service::Resource,
};

pub const NAME_AND_URL_REQUIRED: &str = "Name and URL are required.";
pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const SELECT_PHOTO: &str = "Select a photo.";

/// Name and image URL as submitted by the photo forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoFields {
    pub name: String,
    pub image_url: String,
}

impl PhotoFields {
    pub(crate) fn parse(fields: &FormFields, missing: &'static str) -> Result<Self, ValidationError> {
        Ok(Self {
            name: fields.required("name", missing)?,
            image_url: fields.required("url", missing)?,
        })
    }
}

/// Drive: plain photo bookmarks.
pub struct PhotoResource;

impl Resource for PhotoResource {
    type Dao = PhotoDao;
    type Draft = PhotoFields;
    type Patch = PhotoFields;

    const PAGE: &'static str = "/drive";
    const MISSING_UPDATE: &'static str = ALL_FIELDS_REQUIRED;
    const MISSING_ID: &'static str = SELECT_PHOTO;

    fn parse_create(fields: &FormFields) -> Result<PhotoFields, ValidationError> {
        PhotoFields::parse(fields, NAME_AND_URL_REQUIRED)
    }

    fn parse_update(fields: &FormFields) -> Result<PhotoFields, ValidationError> {
        PhotoFields::parse(fields, ALL_FIELDS_REQUIRED)
    }

    fn create_model(draft: PhotoFields) -> photo::ActiveModel {
        Self::update_model(draft)
    }

    fn update_model(patch: PhotoFields) -> photo::ActiveModel {
        photo::ActiveModel {
            name: Set(patch.name),
            image_url: Set(patch.image_url),
            ..Default::default()
        }
    }

    fn name_column() -> photo::Column {
        photo::Column::Name
    }

    fn search_column() -> Option<photo::Column> {
        Some(photo::Column::Name)
    }
}
