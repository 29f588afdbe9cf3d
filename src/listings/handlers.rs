use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use super::dto::{AddListingForm, DeleteListingForm, Pagination, UpdateListingForm};
use super::repo;
use super::repo_types::FoodListing;
use super::services;
use crate::{
    error::{AppError, Banner},
    extract::FormBody,
    state::AppState,
};

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", get(list_listings))
        .route("/listings/:id", get(get_listing))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/listings", post(add_listing))
        .route("/listings/update", post(update_listing))
        .route("/listings/delete", post(delete_listing))
}

#[instrument(skip(state))]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(p): Query<Pagination>,
) -> Result<Json<Vec<FoodListing>>, AppError> {
    let limit = p.limit.unwrap_or(state.config.listings_page_limit);
    if limit < 1 || p.offset < 0 {
        return Err(AppError::Validation("limit must be positive and offset non-negative".into()));
    }
    let items = repo::list_listings(&state.db, limit, p.offset).await?;
    Ok(Json(items))
}

#[instrument(skip(state))]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<FoodListing>, AppError> {
    repo::get_listing(&state.db, id)
        .await?
        .map(Json)
        .ok_or(AppError::ListingNotFound(id))
}

/// POST /listings
#[instrument(skip(state, form))]
pub async fn add_listing(
    State(state): State<AppState>,
    FormBody(form): FormBody<AddListingForm>,
) -> Result<(StatusCode, Json<Banner>), AppError> {
    let food_id = services::add_listing(&state, form).await?;
    Ok((
        StatusCode::CREATED,
        Json(Banner::success("Food listing added successfully!").with_food_id(food_id)),
    ))
}

/// POST /listings/update { food_id, quantity }
#[instrument(skip(state))]
pub async fn update_listing(
    State(state): State<AppState>,
    FormBody(form): FormBody<UpdateListingForm>,
) -> Result<Json<Banner>, AppError> {
    services::update_quantity(&state, form.food_id, form.quantity).await?;
    Ok(Json(
        Banner::success("Food listing quantity updated successfully!").with_food_id(form.food_id),
    ))
}

/// POST /listings/delete { food_id }
#[instrument(skip(state))]
pub async fn delete_listing(
    State(state): State<AppState>,
    FormBody(form): FormBody<DeleteListingForm>,
) -> Result<Json<Banner>, AppError> {
    services::delete_listing(&state, form.food_id).await?;
    Ok(Json(
        Banner::success("Food listing deleted successfully!").with_food_id(form.food_id),
    ))
}
