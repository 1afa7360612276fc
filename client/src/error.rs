use std::borrow::Cow;
use std::collections::BTreeMap;

use reqwest::StatusCode;

use crate::storage::StorageError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

pub type FieldErrors = BTreeMap<Cow<'static, str>, Vec<Cow<'static, str>>>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("bad request: {message}")]
    BadRequest { message: String },
    #[error("authentication_required")]
    Unauthorized,
    #[error("resource_not_found")]
    NotFound,
    #[error("conflict: {message}")]
    Conflict { message: String },
    #[error("unexpected response, status={status}, body={body}")]
    UnexpectedStatus { status: StatusCode, body: String },
    #[error("invalid response: {0}")]
    InvalidResponse(String),
    #[error("not_logged_in")]
    NotLoggedIn,
    #[error("invalid input: {}", format_field_errors(.errors))]
    Validation { errors: FieldErrors },
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    pub fn validation<K, V>(errors: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Cow<'static, str>>,
        V: Into<Cow<'static, str>>,
    {
        let mut error_map = FieldErrors::new();

        for (key, val) in errors {
            error_map
                .entry(key.into())
                .or_insert_with(Vec::new)
                .push(val.into());
        }

        Self::Validation { errors: error_map }
    }

    pub(crate) fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::BAD_REQUEST => Error::BadRequest { message: body },
            StatusCode::UNAUTHORIZED => Error::Unauthorized,
            StatusCode::NOT_FOUND => Error::NotFound,
            StatusCode::CONFLICT => Error::Conflict { message: body },
            _ => Error::UnexpectedStatus { status, body },
        }
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict { .. })
    }
}

/// Collects `(field, message)` pairs and turns them into a validation error
/// when at least one was pushed.
pub(crate) fn check(errors: Vec<(&'static str, &'static str)>) -> Result<()> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(Error::validation(errors))
    }
}

fn format_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, messages)| format!("{field}: {}", messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}
