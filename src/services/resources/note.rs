use sea_orm::Set;

use crate::{
    db::{dao::NoteDao, entities::note},
    forms::{FormFields, ValidationError},
    services::resource_service::Resource,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFields {
    pub title: String,
    pub content: String,
}

impl NoteFields {
    fn parse(fields: &FormFields, missing: &'static str) -> Result<Self, ValidationError> {
        Ok(Self {
            title: fields.required("title", missing)?,
            content: fields.optional("content"),
        })
    }
}

/// Markdown notes. Only the title is mandatory.
pub struct NoteResource;

impl Resource for NoteResource {
    type Dao = NoteDao;
    type Draft = NoteFields;
    type Patch = NoteFields;

    const PAGE: &'static str = "/notes";
    const MISSING_UPDATE: &'static str = "Missing note info.";
    const MISSING_ID: &'static str = "Select a note to delete.";

    fn parse_create(fields: &FormFields) -> Result<NoteFields, ValidationError> {
        NoteFields::parse(fields, "Title is required.")
    }

    fn parse_update(fields: &FormFields) -> Result<NoteFields, ValidationError> {
        NoteFields::parse(fields, Self::MISSING_UPDATE)
    }

    fn create_model(draft: NoteFields) -> note::ActiveModel {
        Self::update_model(draft)
    }

    fn update_model(patch: NoteFields) -> note::ActiveModel {
        note::ActiveModel {
            title: Set(patch.title),
            content: Set(patch.content),
            ..Default::default()
        }
    }

    fn name_column() -> note::Column {
        note::Column::Title
    }
}
