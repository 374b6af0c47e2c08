use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use crate::domain::error::DomainError;
use crate::presentation::views::escape_html;

/// Errors that escape handler-level recovery. User-correctable domain
/// errors are turned into banners inside the handlers and never reach this
/// type; what lands here is rendered as a bare error page.
#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

pub(crate) type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Domain(DomainError::StoreUnavailable(reason)) => {
                error!(%reason, "store unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
            AppError::Domain(err) => (StatusCode::BAD_REQUEST, err.to_string()),
            AppError::Internal(err) => {
                error!(error = %err, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
        };

        let body = format!(
            "<!DOCTYPE html>\n<html><head><title>Error</title></head>\
             <body><h1>Error</h1><p>{}</p><p><a href=\"/\">Back to posts</a></p></body></html>\n",
            escape_html(&message)
        );
        (status, Html(body)).into_response()
    }
}
