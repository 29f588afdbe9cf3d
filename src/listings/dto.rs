use serde::Deserialize;
use time::Date;

use super::repo_types::{FoodType, MealType};

/// Body of the "Add Food Listing" form. `expiry_date` defaults to today.
#[derive(Debug, Deserialize)]
pub struct AddListingForm {
    pub food_name: String,
    pub quantity: i64,
    #[serde(default)]
    pub expiry_date: Option<Date>,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

#[derive(Debug, Deserialize)]
pub struct UpdateListingForm {
    pub food_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct DeleteListingForm {
    pub food_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: i64,
}
