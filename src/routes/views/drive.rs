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
    db::entities::photo,
    error::AppError,
    forms::FormFields,
    routes::{
        middleware::SessionGuard,
        response::{HtmlResult, render},
    },
    services::{
        Resource, ServiceContext,
        listing::{ListParams, ListQuery},
        resources::PhotoResource,
    },
    state::AppState,
};

const PAGE: &str = PhotoResource::PAGE;

struct PhotoRow {
    id: String,
    name: String,
    image_url: String,
    created: String,
}

impl From<photo::Model> for PhotoRow {
    fn from(model: photo::Model) -> Self {
        Self {
            id: model.id.to_string(),
            created: format_date(&model.created_at),
            name: model.name,
            image_url: model.image_url,
        }
    }
}

#[derive(Template)]
#[template(path = "drive.html")]
struct DriveTemplate {
    chrome: Chrome,
    sort_options: Vec<SortOption>,
    search: String,
    return_query: String,
    photos: Vec<PhotoRow>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(PAGE, get(drive_page))
        .route("/drive/create", post(create_photo))
        .route("/drive/update", post(update_photo))
        .route("/drive/delete", post(delete_photo))
}

async fn drive_page(
    State(state): State<Arc<AppState>>,
    guard: SessionGuard,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> HtmlResult {
    cached_page(&state, PAGE, &guard.identity, uri.query(), async {
        let query = ListQuery::from_params(&params);
        let photos = ServiceContext::from_state(&state)
            .photos()
            .list(&guard.ctx, &query)
            .await?;

        render(&DriveTemplate {
            chrome: Chrome::new("Drive", Some(&guard.identity), &params),
            sort_options: sort_options(query.sort),
            search: query.search().unwrap_or_default().to_string(),
            return_query: preserved_query(uri.query()),
            photos: photos.into_iter().map(PhotoRow::from).collect(),
        })
    })
    .await
}

async fn create_photo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .photos()
        .create(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn update_photo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .photos()
        .update(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn delete_photo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .photos()
        .delete(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}
