use time::OffsetDateTime;
use tracing::{info, warn};

use super::dto::AddListingForm;
use super::repo;
use super::repo_types::NewFoodListing;
use crate::{error::AppError, state::AppState};

/// Same lower bound the form inputs enforce.
fn at_least_one(field: &str, value: i64) -> Result<i64, AppError> {
    if value < 1 {
        return Err(AppError::Validation(format!("{field} must be at least 1, got {value}")));
    }
    Ok(value)
}

impl AddListingForm {
    pub fn into_new_listing(self, today: time::Date) -> Result<NewFoodListing, AppError> {
        Ok(NewFoodListing {
            quantity: at_least_one("quantity", self.quantity)?,
            provider_id: at_least_one("provider_id", self.provider_id)?,
            expiry_date: self.expiry_date.unwrap_or(today),
            food_name: self.food_name,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        })
    }
}

/// Returns the new `food_id`.
pub async fn add_listing(st: &AppState, form: AddListingForm) -> Result<i64, AppError> {
    let listing = form.into_new_listing(OffsetDateTime::now_utc().date())?;
    let out = repo::insert_listing(&st.db, &listing).await?;
    info!(food_id = out.last_insert_rowid, food_name = %listing.food_name, "listing added");
    Ok(out.last_insert_rowid)
}

pub async fn update_quantity(st: &AppState, food_id: i64, quantity: i64) -> Result<(), AppError> {
    let food_id = at_least_one("food_id", food_id)?;
    let quantity = at_least_one("quantity", quantity)?;
    let out = repo::update_quantity(&st.db, food_id, quantity).await?;
    if !out.matched() {
        warn!(food_id, "update matched no listing");
        return Err(AppError::NotFoundNoOp(food_id));
    }
    info!(food_id, quantity, "listing quantity updated");
    Ok(())
}

pub async fn delete_listing(st: &AppState, food_id: i64) -> Result<(), AppError> {
    let food_id = at_least_one("food_id", food_id)?;
    let out = repo::delete_listing(&st.db, food_id).await?;
    if !out.matched() {
        warn!(food_id, "delete matched no listing");
        return Err(AppError::NotFoundNoOp(food_id));
    }
    info!(food_id, "listing deleted");
    Ok(())
}
