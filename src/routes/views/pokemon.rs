use std::{collections::HashMap, sync::Arc};

use askama::Template;
use axum::{
    Form, Router,
    extract::{Query, State},
    http::Uri,
    response::{Html, Redirect},
    routing::{get, post},
};

use super::{
    food::stars,
    page::{
        Chrome, SortOption, cached_page, finish_action, format_date, preserved_query,
        sort_options,
    },
};
use crate::{
    context::RequestContext,
    db::entities::pokemon_review,
    error::AppError,
    forms::FormFields,
    routes::{
        middleware::SessionGuard,
        response::{HtmlResult, render},
    },
    services::{
        Resource, ServiceContext,
        listing::{ListParams, ListQuery},
        pokedex_service::{Pokemon, PokemonLookup},
        resources::PokemonReviewResource,
    },
    state::AppState,
};

const PAGE: &str = PokemonReviewResource::PAGE;

struct ReviewRow {
    id: String,
    pokemon_name: String,
    title: String,
    content: String,
    rating: i32,
    stars: String,
    created: String,
}

impl From<pokemon_review::Model> for ReviewRow {
    fn from(model: pokemon_review::Model) -> Self {
        Self {
            id: model.id.to_string(),
            stars: stars(model.rating),
            created: format_date(&model.created_at),
            pokemon_name: model.pokemon_name,
            title: model.title,
            content: model.content,
            rating: model.rating,
        }
    }
}

/// Which lookup panel, if any, to show above the review form.
enum LookupPanel {
    Hidden,
    Found(Pokemon),
    NotFound(String),
    Unavailable(String),
}

impl From<PokemonLookup> for LookupPanel {
    fn from(lookup: PokemonLookup) -> Self {
        match lookup {
            PokemonLookup::NotRequested => LookupPanel::Hidden,
            PokemonLookup::Found(pokemon) => LookupPanel::Found(pokemon),
            PokemonLookup::NotFound { name } => LookupPanel::NotFound(name),
            PokemonLookup::Unavailable { name } => LookupPanel::Unavailable(name),
        }
    }
}

#[derive(Template)]
#[template(path = "pokemon.html")]
struct PokemonTemplate {
    chrome: Chrome,
    sort_options: Vec<SortOption>,
    return_query: String,
    search: String,
    lookup: LookupPanel,
    pokemon_default: String,
    reviews: Vec<ReviewRow>,
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(PAGE, get(pokemon_page))
        .route("/pokemon/reviews/create", post(create_review))
        .route("/pokemon/reviews/update", post(update_review))
        .route("/pokemon/reviews/delete", post(delete_review))
}

async fn pokemon_page(
    State(state): State<Arc<AppState>>,
    guard: SessionGuard,
    uri: Uri,
    Query(params): Query<ListParams>,
) -> HtmlResult {
    let search = params
        .q
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let page = async {
        let query = ListQuery::new(None, params.sort.as_deref());
        let reviews = ServiceContext::from_state(&state).pokemon_reviews();
        let (reviews, lookup) = tokio::join!(
            reviews.list(&guard.ctx, &query),
            state.pokedex.lookup(Some(&search)),
        );
        let reviews = reviews?;
        let pokemon_default = match &lookup {
            PokemonLookup::Found(pokemon) => pokemon.name.clone(),
            _ => search.clone(),
        };

        render(&PokemonTemplate {
            chrome: Chrome::new("Pokémon", Some(&guard.identity), &params),
            sort_options: sort_options(query.sort),
            return_query: preserved_query(uri.query()),
            search: search.clone(),
            lookup: lookup.into(),
            pokemon_default,
            reviews: reviews.into_iter().map(ReviewRow::from).collect(),
        })
    };

    // lookups always go to the Pokédex, so only the plain list is cached
    if search.is_empty() {
        cached_page(&state, PAGE, &guard.identity, uri.query(), page).await
    } else {
        Ok(Html(page.await?))
    }
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    ctx: RequestContext,
    Form(fields): Form<HashMap<String, String>>,
) -> Result<Redirect, AppError> {
    let fields = FormFields::from(fields);
    let result = ServiceContext::from_state(&state)
        .pokemon_reviews()
        .create(&ctx, &fields)
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
        .pokemon_reviews()
        .update(&ctx, &fields)
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
        .pokemon_reviews()
        .delete(&ctx, &fields)
        .await;
    finish_action(PAGE, &fields, result)
}
