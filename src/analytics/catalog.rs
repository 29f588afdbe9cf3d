//! The fixed set of analytical queries offered on the analytics page.
//!
//! Every entry is parameterless and declares the columns it produces, so a
//! drift between this file and the database schema surfaces as a typed error
//! instead of a half-rendered table. Ordered entries break ties on their
//! grouping key so single-row answers are the same on every run.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsQuery {
    ProvidersReceiversPerCity,
    TopProviderType,
    ProviderContactsInCity,
    ReceiversByClaims,
    TotalAvailableQuantity,
    TopListingCity,
    FoodTypesByAvailability,
    ClaimsPerFoodItem,
    TopProviderByCompletedClaims,
    ClaimStatusShare,
    AverageClaimedQuantityPerReceiver,
    TopClaimedMealType,
    QuantityDonatedPerProvider,
}

impl AnalyticsQuery {
    /// Menu order.
    pub const ALL: [AnalyticsQuery; 13] = [
        AnalyticsQuery::ProvidersReceiversPerCity,
        AnalyticsQuery::TopProviderType,
        AnalyticsQuery::ProviderContactsInCity,
        AnalyticsQuery::ReceiversByClaims,
        AnalyticsQuery::TotalAvailableQuantity,
        AnalyticsQuery::TopListingCity,
        AnalyticsQuery::FoodTypesByAvailability,
        AnalyticsQuery::ClaimsPerFoodItem,
        AnalyticsQuery::TopProviderByCompletedClaims,
        AnalyticsQuery::ClaimStatusShare,
        AnalyticsQuery::AverageClaimedQuantityPerReceiver,
        AnalyticsQuery::TopClaimedMealType,
        AnalyticsQuery::QuantityDonatedPerProvider,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::ProvidersReceiversPerCity => "Providers & Receivers per City",
            Self::TopProviderType => "Provider type contributing most food",
            Self::ProviderContactsInCity => "Contact info of providers in a specific city",
            Self::ReceiversByClaims => "Receivers with most food claims",
            Self::TotalAvailableQuantity => "Total quantity of food available",
            Self::TopListingCity => "City with highest number of food listings",
            Self::FoodTypesByAvailability => "Most commonly available food types",
            Self::ClaimsPerFoodItem => "Number of claims made for each food item",
            Self::TopProviderByCompletedClaims => {
                "Provider with highest number of successful food claims"
            }
            Self::ClaimStatusShare => "Percentage of food claims completed vs pending vs canceled",
            Self::AverageClaimedQuantityPerReceiver => {
                "Average quantity of food claimed per receiver"
            }
            Self::TopClaimedMealType => "Most claimed meal type",
            Self::QuantityDonatedPerProvider => "Total quantity of food donated by each provider",
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            Self::ProvidersReceiversPerCity => "providers-receivers-per-city",
            Self::TopProviderType => "top-provider-type",
            Self::ProviderContactsInCity => "provider-contacts-in-city",
            Self::ReceiversByClaims => "receivers-by-claims",
            Self::TotalAvailableQuantity => "total-available-quantity",
            Self::TopListingCity => "top-listing-city",
            Self::FoodTypesByAvailability => "food-types-by-availability",
            Self::ClaimsPerFoodItem => "claims-per-food-item",
            Self::TopProviderByCompletedClaims => "top-provider-by-completed-claims",
            Self::ClaimStatusShare => "claim-status-share",
            Self::AverageClaimedQuantityPerReceiver => "average-claimed-quantity-per-receiver",
            Self::TopClaimedMealType => "top-claimed-meal-type",
            Self::QuantityDonatedPerProvider => "quantity-donated-per-provider",
        }
    }

    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Self::ProvidersReceiversPerCity => &["city", "total_providers", "total_receivers"],
            Self::TopProviderType => &["provider_type", "total_quantity"],
            Self::ProviderContactsInCity => &["name", "contact"],
            Self::ReceiversByClaims => &["name", "total_claims"],
            Self::TotalAvailableQuantity => &["total_available_food"],
            Self::TopListingCity => &["location", "total_listings"],
            Self::FoodTypesByAvailability => &["food_type", "count"],
            Self::ClaimsPerFoodItem => &["food_id", "total_claims"],
            Self::TopProviderByCompletedClaims => &["name", "completed_claims"],
            Self::ClaimStatusShare => &["status", "percentage"],
            Self::AverageClaimedQuantityPerReceiver => &["name", "avg_claim_quantity"],
            Self::TopClaimedMealType => &["meal_type", "total_claims"],
            Self::QuantityDonatedPerProvider => &["name", "total_donated"],
        }
    }

    /// Entries that answer a "most/highest" question with a single row.
    pub fn limit_one(self) -> bool {
        matches!(
            self,
            Self::TopProviderType
                | Self::TopListingCity
                | Self::TopProviderByCompletedClaims
                | Self::TopClaimedMealType
        )
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::ProvidersReceiversPerCity => {
                r#"
                SELECT city,
                       COUNT(DISTINCT provider_id) AS total_providers,
                       COUNT(DISTINCT receiver_id) AS total_receivers
                FROM (
                    SELECT city, provider_id, NULL AS receiver_id FROM providers
                    UNION ALL
                    SELECT city, NULL, receiver_id FROM receivers
                ) AS combined
                GROUP BY city
                ORDER BY city ASC
                "#
            }
            Self::TopProviderType => {
                r#"
                SELECT provider_type, SUM(quantity) AS total_quantity
                FROM food_listings
                GROUP BY provider_type
                ORDER BY total_quantity DESC, provider_type ASC
                LIMIT 1
                "#
            }
            Self::ProviderContactsInCity => {
                r#"
                SELECT name, contact
                FROM providers
                WHERE city = 'Mooreview'
                ORDER BY name ASC
                "#
            }
            Self::ReceiversByClaims => {
                r#"
                SELECT r.name, COUNT(c.claim_id) AS total_claims
                FROM claims c
                JOIN receivers r ON c.receiver_id = r.receiver_id
                GROUP BY r.name
                ORDER BY total_claims DESC, r.name ASC
                "#
            }
            Self::TotalAvailableQuantity => {
                r#"
                SELECT SUM(quantity) AS total_available_food
                FROM food_listings
                "#
            }
            Self::TopListingCity => {
                r#"
                SELECT location, COUNT(food_id) AS total_listings
                FROM food_listings
                GROUP BY location
                ORDER BY total_listings DESC, location ASC
                LIMIT 1
                "#
            }
            Self::FoodTypesByAvailability => {
                r#"
                SELECT food_type, COUNT(food_id) AS count
                FROM food_listings
                GROUP BY food_type
                ORDER BY count DESC, food_type ASC
                "#
            }
            Self::ClaimsPerFoodItem => {
                r#"
                SELECT food_id, COUNT(claim_id) AS total_claims
                FROM claims
                GROUP BY food_id
                ORDER BY food_id ASC
                "#
            }
            Self::TopProviderByCompletedClaims => {
                r#"
                SELECT p.name, COUNT(c.claim_id) AS completed_claims
                FROM claims c
                JOIN food_listings f ON c.food_id = f.food_id
                JOIN providers p ON f.provider_id = p.provider_id
                WHERE c.status = 'Completed'
                GROUP BY p.name
                ORDER BY completed_claims DESC, p.name ASC
                LIMIT 1
                "#
            }
            Self::ClaimStatusShare => {
                r#"
                SELECT status,
                       ROUND(COUNT(*) * 100.0 / (SELECT COUNT(*) FROM claims), 2) AS percentage
                FROM claims
                GROUP BY status
                ORDER BY status ASC
                "#
            }
            Self::AverageClaimedQuantityPerReceiver => {
                r#"
                SELECT r.name, AVG(f.quantity) AS avg_claim_quantity
                FROM claims c
                JOIN receivers r ON c.receiver_id = r.receiver_id
                JOIN food_listings f ON c.food_id = f.food_id
                GROUP BY r.name
                ORDER BY r.name ASC
                "#
            }
            Self::TopClaimedMealType => {
                r#"
                SELECT meal_type, COUNT(c.claim_id) AS total_claims
                FROM claims c
                JOIN food_listings f ON c.food_id = f.food_id
                GROUP BY meal_type
                ORDER BY total_claims DESC, meal_type ASC
                LIMIT 1
                "#
            }
            Self::QuantityDonatedPerProvider => {
                r#"
                SELECT p.name, SUM(f.quantity) AS total_donated
                FROM food_listings f
                JOIN providers p ON f.provider_id = p.provider_id
                GROUP BY p.name
                ORDER BY total_donated DESC, p.name ASC
                "#
            }
        }
    }

    /// Case-insensitive, whitespace-tolerant label lookup.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim();
        Self::ALL
            .into_iter()
            .find(|q| q.label().eq_ignore_ascii_case(wanted))
    }

    pub fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|q| q.slug() == slug.trim())
    }

    /// Accepts either a label or a slug.
    pub fn resolve(key: &str) -> Option<Self> {
        Self::from_label(key).or_else(|| Self::from_slug(key))
    }
}
