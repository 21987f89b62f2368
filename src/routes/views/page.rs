use std::future::Future;

use axum::response::{Html, Redirect};

use crate::{
    context::Identity,
    error::AppError,
    forms::FormFields,
    page_cache::PageKey,
    routes::response::SOMETHING_WENT_WRONG,
    services::{ActionOutcome, listing::{ListParams, SortKey}},
    state::AppState,
};

const FLASH_KEYS: [&str; 2] = ["error", "notice"];
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Layout data shared by every page: title, signed-in user and flash banners.
pub struct Chrome {
    pub title: &'static str,
    pub email: Option<String>,
    pub error: Option<String>,
    pub notice: Option<String>,
}

impl Chrome {
    pub fn new(title: &'static str, identity: Option<&Identity>, params: &ListParams) -> Self {
        Self {
            title,
            email: identity.map(|identity| identity.email.clone()),
            error: non_blank(params.error.as_deref()),
            notice: non_blank(params.notice.as_deref()),
        }
    }
}

fn non_blank(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

pub fn sort_options(current: SortKey) -> Vec<SortOption> {
    SortKey::ALL
        .into_iter()
        .map(|key| SortOption {
            value: key.as_str(),
            label: key.label(),
            selected: key == current,
        })
        .collect()
}

pub fn format_date(at: &chrono::DateTime<chrono::FixedOffset>) -> String {
    at.format(DATE_FORMAT).to_string()
}

/// The page query minus flash values, echoed back through `return_query`.
pub fn preserved_query(raw: Option<&str>) -> String {
    raw.unwrap_or_default()
        .trim_start_matches('?')
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter(|pair| pair.chars().all(|ch| ch.is_ascii_graphic() && ch != '#'))
        .filter(|pair| {
            let key = pair.split('=').next().unwrap_or_default();
            !FLASH_KEYS.contains(&key)
        })
        .collect::<Vec<_>>()
        .join("&")
}

/// `path?return_query[&key=message]`, with the message percent-encoded.
pub fn flash_location(path: &str, return_query: &str, flash: Option<(&str, &str)>) -> String {
    let mut query = preserved_query(Some(return_query));
    if let Some((key, message)) = flash {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(key);
        query.push('=');
        query.push_str(&urlencoding::encode(message));
    }

    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Turns an action result into the 303 back to `page`. Rejections and storage
/// failures become an `error` flash; missing identity stays a hard 401.
pub fn finish_action(
    page: &str,
    fields: &FormFields,
    result: Result<ActionOutcome, AppError>,
) -> Result<Redirect, AppError> {
    let return_query = fields.raw("return_query").unwrap_or_default();
    let location = match result {
        Ok(outcome) if outcome.success => match outcome.message.as_deref() {
            Some(notice) => flash_location(page, return_query, Some(("notice", notice))),
            None => flash_location(page, return_query, None),
        },
        Ok(outcome) => {
            let message = outcome.message.as_deref().unwrap_or(SOMETHING_WENT_WRONG);
            flash_location(page, return_query, Some(("error", message)))
        }
        Err(err) if err.is_internal() => {
            tracing::error!(page, error = %err, source = ?std::error::Error::source(&err), "action failed");
            flash_location(page, return_query, Some(("error", SOMETHING_WENT_WRONG)))
        }
        Err(err) => return Err(err),
    };
    Ok(Redirect::to(&location))
}

/// Serves `path` for this user and query from the page cache. `render` is
/// only polled on a miss, and its output is stored for the next request.
pub async fn cached_page<Fut>(
    state: &AppState,
    path: &str,
    identity: &Identity,
    query: Option<&str>,
    render: Fut,
) -> Result<Html<String>, AppError>
where
    Fut: Future<Output = Result<String, AppError>>,
{
    let key = PageKey::new(path, identity.user_id, query);
    if let Some(html) = state.pages.get(&key).await {
        tracing::debug!(path, "page cache hit");
        return Ok(Html(html));
    }

    let seen = state.pages.generation(path).await;
    let html = render.await?;
    state.pages.put(key, html.clone(), seen).await;
    Ok(Html(html))
}
