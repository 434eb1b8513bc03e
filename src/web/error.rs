use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Failure of a request. Validation problems are the client's to fix and
/// carry a message safe to show; anything else is logged and hidden.
#[derive(Debug)]
pub(crate) enum AppError {
    Validation(String),
    Internal(anyhow::Error),
}

impl AppError {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(msg) => write!(f, "invalid input: {msg}"),
            Self::Internal(err) => write!(f, "{err:#}"),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation(msg) => {
                tracing::warn!(%msg, "rejected expense form");
                (StatusCode::BAD_REQUEST, Html(error_page("Invalid expense", &msg))).into_response()
            }
            Self::Internal(err) => {
                tracing::error!(error = %format!("{err:#}"), "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Html(error_page(
                        "Something went wrong",
                        "The ledger could not be processed. Check the server log for details.",
                    )),
                )
                    .into_response()
            }
        }
    }
}

fn error_page(heading: &str, detail: &str) -> String {
    format!(
        "<!doctype html><html lang=\"en\"><head><meta charset=\"utf-8\"><title>{heading}</title></head>\
         <body><h1>{heading}</h1><p>{}</p><p><a href=\"/\">Back to the dashboard</a></p></body></html>",
        tera::escape_html(detail)
    )
}
