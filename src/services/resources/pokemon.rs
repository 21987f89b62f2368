use sea_orm::Set;

use crate::{
    db::{dao::PokemonReviewDao, entities::pokemon_review},
    forms::{FormFields, ValidationError},
    services::resource_service::Resource,
};

pub const ALL_FIELDS_REQUIRED: &str = "All fields are required.";
pub const REVIEW_DATA_MISSING: &str = "Missing review data.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonReviewDraft {
    pub pokemon_name: String,
    pub review: PokemonReviewPatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PokemonReviewPatch {
    pub title: String,
    pub content: String,
    pub rating: i32,
}

impl PokemonReviewPatch {
    fn parse(fields: &FormFields, missing: &'static str) -> Result<Self, ValidationError> {
        let title = fields.required("title", missing)?;
        let content = fields.required("content", missing)?;
        let rating = fields.rating("rating", missing)?;
        Ok(Self {
            title,
            content,
            rating,
        })
    }
}

pub struct PokemonReviewResource;

impl Resource for PokemonReviewResource {
    type Dao = PokemonReviewDao;
    type Draft = PokemonReviewDraft;
    type Patch = PokemonReviewPatch;

    const PAGE: &'static str = "/pokemon";
    const MISSING_UPDATE: &'static str = REVIEW_DATA_MISSING;
    const MISSING_ID: &'static str = "Review id missing.";

    fn parse_create(fields: &FormFields) -> Result<PokemonReviewDraft, ValidationError> {
        let pokemon_name = fields
            .required("pokemon", ALL_FIELDS_REQUIRED)?
            .to_lowercase();
        let review = PokemonReviewPatch::parse(fields, ALL_FIELDS_REQUIRED)?;
        Ok(PokemonReviewDraft {
            pokemon_name,
            review,
        })
    }

    fn parse_update(fields: &FormFields) -> Result<PokemonReviewPatch, ValidationError> {
        PokemonReviewPatch::parse(fields, REVIEW_DATA_MISSING)
    }

    fn create_model(draft: PokemonReviewDraft) -> pokemon_review::ActiveModel {
        let mut active = Self::update_model(draft.review);
        active.pokemon_name = Set(draft.pokemon_name);
        active
    }

    fn update_model(patch: PokemonReviewPatch) -> pokemon_review::ActiveModel {
        pokemon_review::ActiveModel {
            title: Set(patch.title),
            content: Set(patch.content),
            rating: Set(patch.rating),
            ..Default::default()
        }
    }

    fn name_column() -> pokemon_review::Column {
        pokemon_review::Column::PokemonName
    }
}
