use std::{collections::HashMap, sync::Arc};

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::Uri,
    response::Redirect,
    routing::{get, post},
};

use super::page::{
    Chrome, SortOption, cached_page, finish_action, format_date, preserved_query, sort_options,
};
use crate::{
    context::RequestContext,
    db::entities::food_review,
    error::AppError,
    forms::FormFields,
    routes::{
        middleware::SessionGuard,
        response::{HtmlResult, render},
    },
    services::{
        Resource, ServiceContext,
        listing::{ListParams, ListQuery},
        resources::{FoodEntry, FoodPhotoResource},
    },
    state::AppState,
};

const PAGE: &str = FoodPhotoResource::PAGE;

struct ReviewRow {
    id: String,
    rating: i32,
    stars: String,
    content: String,
    created: String,
}

impl From<food_review::Model> for ReviewRow {
    fn from(model: food_review::Model) -> Self {
        Self {
            id: model.id.to_string(),
            stars: stars(model.rating),
            created: format_date(&model.created_at),
            rating: model.rating,
            content: model.content,
        }
    }
}

struct DishRow {
    id: String,
    name: String,
    image_url: String,
    created: String,
    average: Option<String>,
    reviews: Vec<ReviewRow>,
}

impl From<FoodEntry> for DishRow {
    fn from(entry: FoodEntry) -> Self {
        let average = (!entry.reviews.is_empty()).then(|| {
            let total: i32 = entry.reviews.iter().map(|review| review.rating).sum();
            format!("{:.1}", f64::from(total) / entry.reviews.len() as f64)
        });
        Self {
            id: entry.photo.id.to_string(),
            created: format_date(&entry.photo.created_at),
            name: entry.photo.name,
            image_url: entry.photo.image_url,
            average,
            reviews: entry.reviews.into_iter().map(ReviewRow::from).collect(),
        }
    }
}

pub(super) fn stars(rating: i32) -> String {
    let filled = rating.clamp(0, 5) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[derive(Template)]
#[template(path = "food.html")]
struct FoodTemplate {
    chrome: Chrome,
    sort_options: Vec<SortOption>,
    return_query: String,
    dishes: Vec<DishRow>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(PAGE, get(food_page))
        .route("/food/create", post(create_dish))
        .route("/food/update", post(update_dish))
        .route("/food/delete", post(delete_dish))
        .route("/food/reviews/create", post(create_review))
        .route("/food/reviews/update", post(update_review))
        .route("/food/reviews/delete", post(delete_review))
}

async fn food_page(
    State(state): State<Arc<AppState>>,
    guard: SessionGuard,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> HtmlResult {
    cached_page(&state, PAGE, &guard.identity, uri.query(), async {
        let query = ListQuery::from_params(&params);
        let dishes = ServiceContext::from_state(&state)
            .food()
            .list(&guard.ctx, &query)
            .await?;

        render(&FoodTemplate {
            chrome: Chrome::new("Food", Some(&guard.identity), &params),
            sort_options: sort_options(query.sort),
            return_query: preserved_query(uri.query()),
            dishes: dishes.into_iter().map(DishRow::from).collect(),
        })
    })
    .await
}

async fn create_dish(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .food()
        .create_photo(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn update_dish(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .food()
        .update_photo(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn delete_dish(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .food()
        .delete_photo(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .food()
        .create_review(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn update_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .food()
        .update_review(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn delete_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .food()
        .delete_review(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}
