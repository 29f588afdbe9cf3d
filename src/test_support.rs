//! SQLite fixture for tests: a temp file holding the four dashboard tables.
//!
//! Seed summary (used by assertions across modules):
//! - listings 1..=5, total quantity 58, locations Mooreview 2 / Downtown 2 / Riverside 1
//! - claims 1..=7: Completed 4, Pending 2, Cancelled 1; listing 1 is claimed twice

use std::sync::Arc;

use sqlx::{sqlite::SqliteConnectOptions, Connection, Executor, SqliteConnection};
use tempfile::TempDir;

use crate::{config::AppConfig, db::Database, state::AppState};

const SCHEMA: &[&str] = &[
    "CREATE TABLE providers (
        provider_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        provider_type TEXT,
        city TEXT,
        contact TEXT
    )",
    "CREATE TABLE receivers (
        receiver_id INTEGER PRIMARY KEY,
        name TEXT NOT NULL,
        city TEXT
    )",
    "CREATE TABLE food_listings (
        food_id INTEGER PRIMARY KEY,
        food_name TEXT NOT NULL,
        quantity INTEGER NOT NULL,
        expiry_date TEXT,
        provider_id INTEGER REFERENCES providers(provider_id),
        provider_type TEXT,
        location TEXT,
        food_type TEXT,
        meal_type TEXT
    )",
    "CREATE TABLE claims (
        claim_id INTEGER PRIMARY KEY,
        food_id INTEGER REFERENCES food_listings(food_id),
        receiver_id INTEGER REFERENCES receivers(receiver_id),
        status TEXT
    )",
];

const SEED: &[&str] = &[
    "INSERT INTO providers VALUES
        (1, 'Green Bistro', 'Restaurant', 'Mooreview', '555-0101'),
        (2, 'Fresh Mart', 'Grocery Store', 'Mooreview', '555-0102'),
        (3, 'Hope Kitchen', 'Catering Service', 'Downtown', '555-0103')",
    "INSERT INTO receivers VALUES
        (1, 'City Shelter', 'Downtown'),
        (2, 'Food Bank North', 'Riverside'),
        (3, 'Youth Center', 'Downtown')",
    "INSERT INTO food_listings VALUES
        (1, 'Bread', 20, '2025-03-01', 1, 'Restaurant', 'Mooreview', 'Vegetarian', 'Breakfast'),
        (2, 'Chicken Curry', 15, '2025-03-02', 3, 'Catering Service', 'Downtown', 'Non-Vegetarian', 'Dinner'),
        (3, 'Salad', 10, '2025-03-03', 2, 'Grocery Store', 'Riverside', 'Vegan', 'Lunch'),
        (4, 'Soup', 5, '2025-03-04', 1, 'Restaurant', 'Mooreview', 'Vegetarian', 'Lunch'),
        (5, 'Fruit Bowl', 8, '2025-03-05', 2, 'Grocery Store', 'Downtown', 'Vegan', 'Snacks')",
    "INSERT INTO claims VALUES
        (1, 1, 1, 'Completed'),
        (2, 1, 2, 'Pending'),
        (3, 2, 1, 'Completed'),
        (4, 3, 3, 'Cancelled'),
        (5, 4, 2, 'Completed'),
        (6, 5, 1, 'Pending'),
        (7, 2, 3, 'Completed')",
];

pub struct TestDb {
    pub db: Database,
    pub url: String,
    _dir: TempDir,
}

impl TestDb {
    pub async fn empty() -> Self {
        Self::build(&[]).await
    }

    pub async fn seeded() -> Self {
        Self::build(SEED).await
    }

    async fn build(seed: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("food_wastage.db");
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .expect("create fixture db");
        for stmt in SCHEMA.iter().chain(seed) {
            conn.execute(*stmt).await.expect("fixture statement");
        }
        conn.close().await.expect("close fixture db");

        let url = path.to_string_lossy().into_owned();
        let db = Database::new(&url).expect("fixture options");
        Self { db, url, _dir: dir }
    }

    pub fn state(&self) -> AppState {
        let config = AppConfig {
            database_url: self.url.clone(),
            host: "127.0.0.1".into(),
            port: 0,
            listings_page_limit: 20,
        };
        AppState::from_parts(self.db.clone(), Arc::new(config))
    }
}
