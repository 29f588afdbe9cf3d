use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::{error, warn};

use crate::db::DbError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerLevel {
    Success,
    Warning,
    Error,
}

/// Acknowledgement shown after a form submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Banner {
    pub level: BannerLevel,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub food_id: Option<i64>,
}

impl Banner {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: BannerLevel::Success,
            message: message.into(),
            food_id: None,
        }
    }

    pub fn with_food_id(mut self, food_id: i64) -> Self {
        self.food_id = Some(food_id);
        self
    }
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("unknown analytics query '{0}'")]
    UnknownQuery(String),

    #[error("no food listing with id {0}")]
    ListingNotFound(i64),

    #[error("no food listing with id {0}; nothing changed")]
    NotFoundNoOp(i64),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::UnknownQuery(_)
            | AppError::ListingNotFound(_)
            | AppError::NotFoundNoOp(_) => StatusCode::NOT_FOUND,
            AppError::Db(DbError::Connect(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Db(e) if e.is_constraint_violation() => StatusCode::CONFLICT,
            AppError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn banner(&self) -> Banner {
        let level = match self {
            AppError::NotFoundNoOp(_) => BannerLevel::Warning,
            _ => BannerLevel::Error,
        };
        let food_id = match self {
            AppError::NotFoundNoOp(id) => Some(*id),
            _ => None,
        };
        Banner {
            level,
            message: self.to_string(),
            food_id,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, %status, "request failed");
        } else {
            warn!(error = %self, %status, "request rejected");
        }
        (status, Json(self.banner())).into_response()
    }
}
