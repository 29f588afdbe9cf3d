use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::{macros::format_description, Date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [FoodType::Vegetarian, FoodType::NonVegetarian, FoodType::Vegan];

    pub fn as_str(self) -> &'static str {
        match self {
            FoodType::Vegetarian => "Vegetarian",
            FoodType::NonVegetarian => "Non-Vegetarian",
            FoodType::Vegan => "Vegan",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [
        MealType::Breakfast,
        MealType::Lunch,
        MealType::Dinner,
        MealType::Snacks,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MealType::Breakfast => "Breakfast",
            MealType::Lunch => "Lunch",
            MealType::Dinner => "Dinner",
            MealType::Snacks => "Snacks",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} '{value}'")]
pub struct UnknownVariant {
    pub kind: &'static str,
    pub value: String,
}

impl FromStr for FoodType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FoodType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "food type", value: s.to_string() })
    }
}

impl FromStr for MealType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MealType::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "meal type", value: s.to_string() })
    }
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The eight user-supplied columns of a `food_listings` row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodListing {
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Date,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

/// `food_listings` row as stored. Category and date columns stay text here
/// since rows written outside the app may hold any spelling or date format.
#[derive(Debug, Clone, FromRow)]
pub struct FoodListingRow {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<String>,
    pub provider_id: Option<i64>,
    pub provider_type: Option<String>,
    pub location: Option<String>,
    pub food_type: Option<String>,
    pub meal_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodListing {
    pub food_id: i64,
    pub food_name: String,
    pub quantity: i64,
    pub expiry_date: Option<Date>,
    /// Stored expiry text that is not an ISO date, e.g. `3/17/2025`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_date_raw: Option<String>,
    pub provider_id: Option<i64>,
    pub provider_type: Option<String>,
    pub location: Option<String>,
    pub food_type: Option<FoodType>,
    pub meal_type: Option<MealType>,
}

fn parse_iso_date(s: &str) -> Option<Date> {
    Date::parse(s.trim(), format_description!("[year]-[month]-[day]")).ok()
}

impl From<FoodListingRow> for FoodListing {
    fn from(r: FoodListingRow) -> Self {
        let expiry_date = r.expiry_date.as_deref().and_then(parse_iso_date);
        let expiry_date_raw = match expiry_date {
            Some(_) => None,
            None => r.expiry_date,
        };
        Self {
            food_id: r.food_id,
            food_name: r.food_name,
            quantity: r.quantity,
            expiry_date,
            expiry_date_raw,
            provider_id: r.provider_id,
            provider_type: r.provider_type,
            location: r.location,
            food_type: r.food_type.as_deref().and_then(|v| v.parse().ok()),
            meal_type: r.meal_type.as_deref().and_then(|v| v.parse().ok()),
        }
    }
}
