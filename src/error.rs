use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Failure to load the corpus at startup; always fatal
#[derive(thiserror::Error, Debug)]
pub enum CorpusLoadError {
    #[error("Failed to open corpus {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed corpus: {0}")]
    Csv(#[from] csv::Error),

    #[error("Corpus is missing required column '{column}' (found: {available:?})")]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    #[error("Corpus contains no items")]
    Empty,
}

/// Metadata enrichment lookup failed; callers degrade to "no media"
#[derive(thiserror::Error, Debug)]
pub enum EnrichmentError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Metadata API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Metadata lookup task failed: {0}")]
    Task(String),
}

/// Query translation failed; callers fall back to the untranslated query
#[derive(thiserror::Error, Debug)]
pub enum TranslationError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Translation API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Unexpected translation response: {0}")]
    MalformedResponse(String),
}

/// Application-level errors surfaced over HTTP
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("Corpus error: {0}")]
    Corpus(#[from] CorpusLoadError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Corpus(_) | AppError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
