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
    db::entities::note,
    error::AppError,
    forms::FormFields,
    routes::{
        middleware::SessionGuard,
        response::{HtmlResult, render},
    },
    services::{
        Resource, ServiceContext,
        listing::{ListParams, ListQuery},
        resources::NoteResource,
    },
    state::AppState,
};

const PAGE: &str = NoteResource::PAGE;

struct NoteRow {
    id: String,
    title: String,
    content: String,
    updated: String,
}

impl From<note::Model> for NoteRow {
    fn from(model: note::Model) -> Self {
        Self {
            id: model.id.to_string(),
            updated: format_date(&model.updated_at),
            title: model.title,
            content: model.content,
        }
    }
}

#[derive(Template)]
#[template(path = "notes.html")]
struct NotesTemplate {
    chrome: Chrome,
    sort_options: Vec<SortOption>,
    return_query: String,
    notes: Vec<NoteRow>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(PAGE, get(notes_page))
        .route("/notes/create", post(create_note))
        .route("/notes/update", post(update_note))
        .route("/notes/delete", post(delete_note))
}

async fn notes_page(
    State(state): State<Arc<AppState>>,
    guard: SessionGuard,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> HtmlResult {
    cached_page(&state, PAGE, &guard.identity, uri.query(), async {
        let query = ListQuery::from_params(&params);
        let notes = ServiceContext::from_state(&state)
            .notes()
            .list(&guard.ctx, &query)
            .await?;

        render(&NotesTemplate {
            chrome: Chrome::new("Notes", Some(&guard.identity), &params),
            sort_options: sort_options(query.sort),
            return_query: preserved_query(uri.query()),
            notes: notes.into_iter().map(NoteRow::from).collect(),
        })
    })
    .await
}

async fn create_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .notes()
        .create(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn update_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .notes()
        .update(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn delete_note(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .notes()
        .delete(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}
