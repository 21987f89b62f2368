use sea_orm::Set;

use crate::{
    context::RequestContext,
    db::{dao::TodoDao, entities::todo},
    error::AppError,
    forms::{FormFields, ValidationError},
    services::resource_service::{ActionOutcome, Resource, ResourceService},
};

pub const TITLE_REQUIRED: &str = "Title is required.";

pub struct TodoResource;

impl Resource for TodoResource {
    type Dao = TodoDao;
    type Draft = String;
    type Patch = String;

    const PAGE: &'static str = "/todos";
    const MISSING_UPDATE: &'static str = "Missing todo info.";
    const MISSING_ID: &'static str = "Missing todo id.";

    fn parse_create(fields: &FormFields) -> Result<String, ValidationError> {
        fields.required("title", TITLE_REQUIRED)
    }

    fn parse_update(fields: &FormFields) -> Result<String, ValidationError> {
        fields.required("title", Self::MISSING_UPDATE)
    }

    fn create_model(title: String) -> todo::ActiveModel {
        todo::ActiveModel {
            title: Set(title),
            completed: Set(false),
            ..Default::default()
        }
    }

    fn update_model(title: String) -> todo::ActiveModel {
        todo::ActiveModel {
            title: Set(title),
            ..Default::default()
        }
    }

    fn name_column() -> todo::Column {
        todo::Column::Title
    }
}

impl ResourceService<TodoResource> {
    /// Flips `completed` relative to the state the form was rendered with.
    pub async fn toggle(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        let id = match fields.id("id", TodoResource::MISSING_ID) {
            Ok(id) => id,
            Err(rejection) => return Ok(rejection.into()),
        };
        let completed = fields.flag("completed");
        let owner = ctx.require_identity()?.user_id;

        let active = todo::ActiveModel {
            completed: Set(!completed),
            ..Default::default()
        };
        self.apply(id, owner, active).await
    }
}
