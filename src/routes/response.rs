use askama::Template;
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::error::AppError;

pub const SIGN_IN_TO_CONTINUE: &str = "Please sign in to continue.";
pub const SOMETHING_WENT_WRONG: &str = "Something went wrong. Please try again.";

pub type HtmlResult = Result<Html<String>, AppError>;

#[derive(Template)]
#[template(path = "error.html")]
struct ErrorTemplate<'a> {
    status: u16,
    reason: &'a str,
    message: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        log_app_error(&self, status);

        let message = match &self {
            AppError::Unauthorized(_) => SIGN_IN_TO_CONTINUE,
            AppError::Internal { .. } => SOMETHING_WENT_WRONG,
            other => other.message(),
        };
        error_page(status, message)
    }
}

pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Conflict(_) => StatusCode::CONFLICT,
        AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

pub(crate) fn log_app_error(err: &AppError, status: StatusCode) {
    if status.is_server_error() {
        match std::error::Error::source(err) {
            Some(source) => {
                tracing::error!(status = status.as_u16(), error = %err, source = %source, "request failed")
            }
            None => tracing::error!(status = status.as_u16(), error = %err, "request failed"),
        }
    } else {
        tracing::debug!(status = status.as_u16(), error = %err, "request rejected");
    }
}

/// Standalone HTML error page with the given status.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let template = ErrorTemplate {
        status: status.as_u16(),
        reason: status.canonical_reason().unwrap_or("Error"),
        message,
    };
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            tracing::error!(error = %err, "failed to render error page");
            (status, Html(format!("<h1>{}</h1>", status.as_u16()))).into_response()
        }
    }
}

/// Renders a page template, turning template failures into a 500.
pub fn render<T: Template>(template: &T) -> Result<String, AppError> {
    template
        .render()
        .map_err(|err| AppError::internal_with_source("failed to render page", err))
}
