use std::sync::Arc;

use askama::Template;
use axum::{Router, extract::Query, response::Html, routing::get};

use super::page::Chrome;
use crate::{
    context::RequestContext,
    routes::response::{HtmlResult, render},
    services::listing::ListParams,
    state::AppState,
};

/// One tile on the dashboard.
struct Activity {
    path: &'static str,
    name: &'static str,
    blurb: &'static str,
}

const ACTIVITIES: [Activity; 5] = [
    Activity {
        path: "/todos",
        name: "Todos",
        blurb: "Keep track of what needs doing.",
    },
    Activity {
        path: "/drive",
        name: "Drive",
        blurb: "Save and search your photos.",
    },
    Activity {
        path: "/food",
        name: "Food",
        blurb: "Photograph dishes and review them.",
    },
    Activity {
        path: "/pokemon",
        name: "Pokémon",
        blurb: "Look up Pokémon and write reviews.",
    },
    Activity {
        path: "/notes",
        name: "Notes",
        blurb: "Jot down Markdown notes.",
    },
];

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    chrome: Chrome,
    activities: &'a [Activity],
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(index))
}

async fn index(ctx: RequestContext, Query(params): Query<ListParams>) -> HtmlResult {
    let rendered = render(&IndexTemplate {
        chrome: Chrome::new("Activity Hub", ctx.identity(), &params),
        activities: &ACTIVITIES,
    })?;
    Ok(Html(rendered))
}
