use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Public part of a failed request, attached to the response extensions so an
/// outer layer can render it as a full page.
///
/// Without such a layer the response carries `message` as plain text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorDetail {
    pub status: StatusCode,
    pub message: String,
}

impl ErrorDetail {
    /// Reason phrase for the status, e.g. `"Not Found"`.
    pub fn title(&self) -> &'static str {
        self.status.canonical_reason().unwrap_or("Error")
    }
}

/// Terminal HTTP failures.
///
/// Field-level validation problems are not errors at this level: handlers
/// recover them by re-rendering the form.
pub enum HttpError {
    NotFound(String),
    BadRequest(String),
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// What the client is allowed to see. Internal details stay in the log.
    pub fn detail(&self) -> ErrorDetail {
        let message = match self {
            HttpError::NotFound(msg) | HttpError::BadRequest(msg) => msg.clone(),
            HttpError::Internal(_) => "Something went wrong on our side.".to_string(),
        };
        ErrorDetail {
            status: self.status(),
            message,
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        if let HttpError::Internal(msg) = &self {
            tracing::error!(error = %msg, "request failed");
        }
        let detail = self.detail();
        let mut response = (detail.status, detail.message.clone()).into_response();
        response.extensions_mut().insert(detail);
        response
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::NotFound(msg) => write!(f, "Not Found: {msg}"),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {msg}"),
            HttpError::Internal(msg) => write!(f, "Internal Error: {msg}"),
        }
    }
}

impl std::fmt::Debug for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        <Self as std::fmt::Display>::fmt(self, f)
    }
}

impl std::error::Error for HttpError {}
