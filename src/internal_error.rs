use log::{error, warn};
use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use thiserror::Error;

use std::sync::PoisonError;

use crate::data::ErrorBody;
use crate::input::ValidationError;
use crate::suggestions::SuggestionError;

#[derive(Debug, Error)]
pub enum InternalError {
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    #[error("Rejected suggestions: {0}")]
    Suggestion(#[from] SuggestionError),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Generic internal error: {0}")]
    Other(String),
}

impl InternalError {
    pub fn status(&self) -> Status {
        match self {
            InternalError::Validation(_) | InternalError::Suggestion(_) => Status::BadRequest,
            InternalError::NotFound(_) => Status::NotFound,
            InternalError::Unauthorized => Status::Unauthorized,
            InternalError::Database(_)
            | InternalError::Serialization(_)
            | InternalError::Other(_) => Status::InternalServerError,
        }
    }
}

impl<T> From<PoisonError<T>> for InternalError {
    fn from(e: PoisonError<T>) -> InternalError {
        InternalError::Other(e.to_string())
    }
}

impl<'r> Responder<'r, 'static> for InternalError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();

        let message = if status == Status::InternalServerError {
            error!("{} {} failed: {}", request.method(), request.uri(), self);
            "Something went wrong, please try again".to_string()
        } else {
            warn!("{} {} rejected: {}", request.method(), request.uri(), self);
            self.to_string()
        };

        (status, Json(ErrorBody::new(message))).respond_to(request)
    }
}

pub type InternalResult<T> = Result<T, InternalError>;
