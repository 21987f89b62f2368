use std::collections::HashMap;

use sea_orm::Set;
use uuid::Uuid;

use super::photo::{ALL_FIELDS_REQUIRED, NAME_AND_URL_REQUIRED, PhotoFields, SELECT_PHOTO};
use crate::{
    context::RequestContext,
    db::{
        dao::{FoodPhotoDao, FoodReviewDao},
        entities::{food_photo, food_review},
    },
    error::AppError,
    forms::{FormFields, ValidationError},
    services::{
        listing::ListQuery,
        resource_service::{ActionOutcome, Resource, ResourceService},
    },
};

pub const REVIEW_DETAILS_MISSING: &str = "Missing review details.";
pub const REVIEW_INFO_MISSING: &str = "Missing review info.";
pub const REVIEW_ID_MISSING: &str = "Review id missing.";
pub const DISH_NOT_FOUND: &str = "Dish not found.";

const FOOD_PAGE: &str = "/food";

pub struct FoodPhotoResource;

impl Resource for FoodPhotoResource {
    type Dao = FoodPhotoDao;
    type Draft = PhotoFields;
    type Patch = PhotoFields;

    const PAGE: &'static str = FOOD_PAGE;
    const MISSING_UPDATE: &'static str = ALL_FIELDS_REQUIRED;
    const MISSING_ID: &'static str = SELECT_PHOTO;

    fn parse_create(fields: &FormFields) -> Result<PhotoFields, ValidationError> {
        PhotoFields::parse(fields, NAME_AND_URL_REQUIRED)
    }

    fn parse_update(fields: &FormFields) -> Result<PhotoFields, ValidationError> {
        PhotoFields::parse(fields, ALL_FIELDS_REQUIRED)
    }

    fn create_model(draft: PhotoFields) -> food_photo::ActiveModel {
        Self::update_model(draft)
    }

    fn update_model(patch: PhotoFields) -> food_photo::ActiveModel {
        food_photo::ActiveModel {
            name: Set(patch.name),
            image_url: Set(patch.image_url),
            ..Default::default()
        }
    }

    fn name_column() -> food_photo::Column {
        food_photo::Column::Name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewDraft {
    pub food_id: Uuid,
    pub rating: i32,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewPatch {
    pub rating: i32,
    pub content: String,
}

pub struct FoodReviewResource;

impl Resource for FoodReviewResource {
    type Dao = FoodReviewDao;
    type Draft = ReviewDraft;
    type Patch = ReviewPatch;

    const PAGE: &'static str = FOOD_PAGE;
    const MISSING_UPDATE: &'static str = REVIEW_INFO_MISSING;
    const MISSING_ID: &'static str = REVIEW_ID_MISSING;

    fn parse_create(fields: &FormFields) -> Result<ReviewDraft, ValidationError> {
        let food_id = fields.id("food_id", REVIEW_DETAILS_MISSING)?;
        let content = fields.required("content", REVIEW_DETAILS_MISSING)?;
        let rating = fields.rating("rating", REVIEW_DETAILS_MISSING)?;
        Ok(ReviewDraft {
            food_id,
            rating,
            content,
        })
    }

    fn parse_update(fields: &FormFields) -> Result<ReviewPatch, ValidationError> {
        let content = fields.required("content", REVIEW_INFO_MISSING)?;
        let rating = fields.rating("rating", REVIEW_INFO_MISSING)?;
        Ok(ReviewPatch { rating, content })
    }

    fn create_model(draft: ReviewDraft) -> food_review::ActiveModel {
        food_review::ActiveModel {
            food_id: Set(draft.food_id),
            rating: Set(draft.rating),
            content: Set(draft.content),
            ..Default::default()
        }
    }

    fn update_model(patch: ReviewPatch) -> food_review::ActiveModel {
        food_review::ActiveModel {
            rating: Set(patch.rating),
            content: Set(patch.content),
            ..Default::default()
        }
    }

    fn name_column() -> food_review::Column {
        food_review::Column::Content
    }
}

/// One dish on the food page with its reviews, newest first.
#[derive(Debug, Clone)]
pub struct FoodEntry {
    pub photo: food_photo::Model,
    pub reviews: Vec<food_review::Model>,
}

/// Food photos and their reviews. Reviews hang off a photo without a
/// database constraint, so this keeps the two tables consistent.
#[derive(Clone)]
pub struct FoodService {
    photos: ResourceService<FoodPhotoResource>,
    reviews: ResourceService<FoodReviewResource>,
}

impl FoodService {
    pub fn new(
        photos: ResourceService<FoodPhotoResource>,
        reviews: ResourceService<FoodReviewResource>,
    ) -> Self {
        Self { photos, reviews }
    }

    pub async fn create_photo(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        self.photos.create(ctx, fields).await
    }

    pub async fn update_photo(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        self.photos.update(ctx, fields).await
    }

    /// Removes the photo and its reviews together.
    pub async fn delete_photo(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        let id = match fields.id("id", FoodPhotoResource::MISSING_ID) {
            Ok(id) => id,
            Err(rejection) => return Ok(rejection.into()),
        };
        let owner = ctx.require_identity()?.user_id;

        let affected = self.photos.dao().delete_with_reviews(owner, id).await?;
        self.photos.invalidate().await;
        Ok(ActionOutcome::done(affected))
    }

    pub async fn create_review(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        let draft = match FoodReviewResource::parse_create(fields) {
            Ok(draft) => draft,
            Err(rejection) => return Ok(rejection.into()),
        };
        let owner = ctx.require_identity()?.user_id;

        if self
            .photos
            .dao()
            .find_owned(owner, draft.food_id)
            .await?
            .is_none()
        {
            return Ok(ActionOutcome::rejected(DISH_NOT_FOUND));
        }

        self.reviews
            .insert(owner, FoodReviewResource::create_model(draft))
            .await
    }

    pub async fn update_review(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        self.reviews.update(ctx, fields).await
    }

    pub async fn delete_review(
        &self,
        ctx: &RequestContext,
        fields: &FormFields,
    ) -> Result<ActionOutcome, AppError> {
        self.reviews.delete(ctx, fields).await
    }

    /// The caller's dishes in page order, each with its reviews attached.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        query: &ListQuery,
    ) -> Result<Vec<FoodEntry>, AppError> {
        let owner = ctx.require_identity()?.user_id;
        let photos = self.photos.list(ctx, query).await?;
        let ids = photos.iter().map(|photo| photo.id).collect();

        let mut by_food: HashMap<Uuid, Vec<food_review::Model>> = HashMap::new();
        for review in self.reviews.dao().find_for_foods(owner, ids).await? {
            by_food.entry(review.food_id).or_default().push(review);
        }

        Ok(photos
            .into_iter()
            .map(|photo| FoodEntry {
                reviews: by_food.remove(&photo.id).unwrap_or_default(),
                photo,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
    use uuid::Uuid;

    use super::{
        DISH_NOT_FOUND, FoodReviewResource, FoodService, REVIEW_DETAILS_MISSING,
    };
    use crate::{
        context::{Identity, RequestContext},
        db::{
            dao::DaoBase,
            entities::{food_photo, food_review},
        },
        forms::{FormFields, RATING_MESSAGE},
        page_cache::PageCache,
        services::{
            listing::ListQuery,
            resource_service::{ActionOutcome, Resource, ResourceService},
        },
    };

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn signed_in(user_id: Uuid) -> RequestContext {
        RequestContext::authenticated(Identity {
            user_id,
            session_id: Uuid::new_v4(),
            email: "gourmet@example.com".to_string(),
        })
    }

    fn photo_model(id: Uuid, user_id: Uuid) -> food_photo::Model {
        food_photo::Model {
            id,
            created_at: ts(),
            updated_at: ts(),
            name: "Ramen".to_string(),
            image_url: "https://img.example.com/ramen.jpg".to_string(),
            user_id,
        }
    }

    fn review_model(food_id: Uuid, user_id: Uuid, rating: i32) -> food_review::Model {
        food_review::Model {
            id: Uuid::new_v4(),
            created_at: ts(),
            updated_at: ts(),
            food_id,
            rating,
            content: "Rich broth".to_string(),
            user_id,
        }
    }

    fn food_service(mock: MockDatabase) -> (FoodService, sea_orm::DatabaseConnection) {
        let db = mock.into_connection();
        let pages = PageCache::new();
        let service = FoodService::new(
            ResourceService::new(DaoBase::new(&db), pages.clone()),
            ResourceService::new(DaoBase::new(&db), pages),
        );
        (service, db)
    }

    #[test]
    fn review_rating_must_be_in_range() {
        let fields = FormFields::new()
            .with("food_id", Uuid::new_v4().to_string())
            .with("content", "Tasty")
            .with("rating", "6");
        let err = FoodReviewResource::parse_create(&fields).expect_err("rating 6 is out of range");
        assert_eq!(err.message(), RATING_MESSAGE);

        let err = FoodReviewResource::parse_create(&fields.clone().with("rating", "four"))
            .expect_err("non-numeric rating");
        assert_eq!(err.message(), RATING_MESSAGE);

        let err = FoodReviewResource::parse_create(&fields.with("content", " "))
            .expect_err("blank content");
        assert_eq!(err.message(), REVIEW_DETAILS_MISSING);
    }

    #[tokio::test]
    async fn review_on_foreign_dish_is_refused() {
        let (service, db) = food_service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<food_photo::Model>::new()]),
        );

        let outcome = service
            .create_review(
                &signed_in(Uuid::new_v4()),
                &FormFields::new()
                    .with("food_id", Uuid::new_v4().to_string())
                    .with("content", "Sneaky")
                    .with("rating", "5"),
            )
            .await
            .expect("refusal is not an error");
        assert_eq!(outcome, ActionOutcome::rejected(DISH_NOT_FOUND));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        assert!(log[0].statements()[0].sql.starts_with("SELECT"));
    }

    #[tokio::test]
    async fn review_on_own_dish_is_inserted() {
        let (user_id, food_id) = (Uuid::new_v4(), Uuid::new_v4());
        let (service, db) = food_service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[photo_model(food_id, user_id)]])
                .append_query_results([[review_model(food_id, user_id, 4)]]),
        );

        let outcome = service
            .create_review(
                &signed_in(user_id),
                &FormFields::new()
                    .with("food_id", food_id.to_string())
                    .with("content", "Rich broth")
                    .with("rating", "4"),
            )
            .await
            .expect("create should succeed");
        assert_eq!(outcome, ActionOutcome::done(1));

        let log = db.into_transaction_log();
        assert!(log[1].statements()[0].sql.starts_with(r#"INSERT INTO "food_reviews""#));
    }

    #[tokio::test]
    async fn deleting_a_dish_runs_in_one_transaction() {
        let (user_id, food_id) = (Uuid::new_v4(), Uuid::new_v4());
        let exec = |rows_affected| MockExecResult {
            last_insert_id: 0,
            rows_affected,
        };
        let (service, db) = food_service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[photo_model(food_id, user_id)]])
                .append_exec_results([exec(3), exec(1)]),
        );

        let outcome = service
            .delete_photo(
                &signed_in(user_id),
                &FormFields::new().with("id", food_id.to_string()),
            )
            .await
            .expect("delete should succeed");
        assert_eq!(outcome, ActionOutcome::done(1));

        let log = db.into_transaction_log();
        assert_eq!(log.len(), 1);
        let statements = log[0].statements();
        assert!(statements.iter().any(|s| s.sql.starts_with(r#"DELETE FROM "food_reviews""#)));
        assert!(statements.iter().any(|s| s.sql.starts_with(r#"DELETE FROM "food_photos""#)));
    }

    #[tokio::test]
    async fn list_attaches_reviews_to_their_dish() {
        let user_id = Uuid::new_v4();
        let (ramen, curry) = (Uuid::new_v4(), Uuid::new_v4());
        let (service, _db) = food_service(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[photo_model(ramen, user_id), photo_model(curry, user_id)]])
                .append_query_results([[
                    review_model(curry, user_id, 5),
                    review_model(curry, user_id, 3),
                ]]),
        );

        let entries = service
            .list(&signed_in(user_id), &ListQuery::default())
            .await
            .expect("list should succeed");
        assert_eq!(entries.len(), 2);
        assert!(entries[0].reviews.is_empty());
        let ratings: Vec<i32> = entries[1].reviews.iter().map(|r| r.rating).collect();
        assert_eq!(ratings, vec![5, 3]);
    }
}
