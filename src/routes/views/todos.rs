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
    db::entities::todo,
    error::AppError,
    forms::FormFields,
    routes::{
        middleware::SessionGuard,
        response::{HtmlResult, render},
    },
    services::{
        Resource, ServiceContext,
        listing::{ListParams, ListQuery},
        resources::TodoResource,
    },
    state::AppState,
};

const PAGE: &str = TodoResource::PAGE;

struct TodoRow {
    id: String,
    title: String,
    completed: bool,
    created: String,
}

impl From<todo::Model> for TodoRow {
    fn from(model: todo::Model) -> Self {
        Self {
            id: model.id.to_string(),
            created: format_date(&model.created_at),
            title: model.title,
            completed: model.completed,
        }
    }
}

#[derive(Template)]
#[template(path = "todos.html")]
struct TodosTemplate {
    chrome: Chrome,
    sort_options: Vec<SortOption>,
    return_query: String,
    todos: Vec<TodoRow>,
    remaining: usize,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(PAGE, get(todos_page))
        .route("/todos/create", post(create_todo))
        .route("/todos/update", post(update_todo))
        .route("/todos/toggle", post(toggle_todo))
        .route("/todos/delete", post(delete_todo))
}

async fn todos_page(
    State(state): State<Arc<AppState>>,
    guard: SessionGuard,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> HtmlResult {
    cached_page(&state, PAGE, &guard.identity, uri.query(), async {
        let query = ListQuery::from_params(&params);
        let todos = ServiceContext::from_state(&state)
            .todos()
            .list(&guard.ctx, &query)
            .await?;
        let remaining = todos.iter().filter(|todo| !todo.completed).count();

        render(&TodosTemplate {
            chrome: Chrome::new("Todos", Some(&guard.identity), &params),
            sort_options: sort_options(query.sort),
            return_query: preserved_query(uri.query()),
            todos: todos.into_iter().map(TodoRow::from).collect(),
            remaining,
        })
    })
    .await
}

async fn create_todo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .todos()
        .create(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn update_todo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .todos()
        .update(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn toggle_todo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .todos()
        .toggle(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}

async fn delete_todo(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .todos()
        .delete(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}
