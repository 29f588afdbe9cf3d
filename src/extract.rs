use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};

use crate::error::AppError;

/// JSON request body whose rejections (bad enum spelling, bad date, missing
/// field, wrong content type) come back as a validation banner.
#[derive(Debug)]
pub struct FormBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for FormBody<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(FormBody(value)),
            Err(rejection) => Err(AppError::Validation(rejection.body_text())),
        }
    }
}
