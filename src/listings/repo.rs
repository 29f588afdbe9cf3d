use crate::db::{Database, DbError, SqlParam, WriteOutcome};

use super::repo_types::{FoodListing, FoodListingRow, NewFoodListing};

const INSERT_LISTING: &str = r#"
    INSERT INTO food_listings
        (food_name, quantity, expiry_date, provider_id, provider_type, location, food_type, meal_type)
    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
"#;

const UPDATE_QUANTITY: &str = "UPDATE food_listings SET quantity = ? WHERE food_id = ?";

const DELETE_LISTING: &str = "DELETE FROM food_listings WHERE food_id = ?";

const SELECT_COLUMNS: &str = "food_id, food_name, quantity, expiry_date, provider_id, \
                              provider_type, location, food_type, meal_type";

/// Insert one listing. Provider existence, expiry and quantity are not checked.
pub async fn insert_listing(db: &Database, listing: &NewFoodListing) -> Result<WriteOutcome, DbError> {
    let params = [
        SqlParam::from(listing.food_name.as_str()),
        SqlParam::Int(listing.quantity),
        SqlParam::Date(listing.expiry_date),
        SqlParam::Int(listing.provider_id),
        SqlParam::from(listing.provider_type.as_str()),
        SqlParam::from(listing.location.as_str()),
        SqlParam::from(listing.food_type.as_str()),
        SqlParam::from(listing.meal_type.as_str()),
    ];
    db.execute_statement(INSERT_LISTING, &params).await
}

pub async fn update_quantity(db: &Database, food_id: i64, quantity: i64) -> Result<WriteOutcome, DbError> {
    db.execute_statement(UPDATE_QUANTITY, &[SqlParam::Int(quantity), SqlParam::Int(food_id)])
        .await
}

pub async fn delete_listing(db: &Database, food_id: i64) -> Result<WriteOutcome, DbError> {
    db.execute_statement(DELETE_LISTING, &[SqlParam::Int(food_id)]).await
}

pub async fn get_listing(db: &Database, food_id: i64) -> Result<Option<FoodListing>, DbError> {
    let sql = format!("SELECT {SELECT_COLUMNS} FROM food_listings WHERE food_id = ?");
    let mut conn = db.acquire().await?;
    let row = sqlx::query_as::<_, FoodListingRow>(&sql)
        .bind(food_id)
        .fetch_optional(&mut conn)
        .await;
    db.release(conn).await;

    Ok(row.map_err(DbError::Query)?.map(FoodListing::from))
}

/// Newest first.
pub async fn list_listings(db: &Database, limit: i64, offset: i64) -> Result<Vec<FoodListing>, DbError> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM food_listings ORDER BY food_id DESC LIMIT ? OFFSET ?"
    );
    let mut conn = db.acquire().await?;
    let rows = sqlx::query_as::<_, FoodListingRow>(&sql)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut conn)
        .await;
    db.release(conn).await;

    Ok(rows
        .map_err(DbError::Query)?
        .into_iter()
        .map(FoodListing::from)
        .collect())
}

#[cfg(test)]
mod repo_tests {
    use time::macros::date;

    use super::*;
    use crate::listings::repo_types::{FoodType, MealType};
    use crate::test_support::TestDb;

    fn rice() -> NewFoodListing {
        NewFoodListing {
            food_name: "Rice".into(),
            quantity: 10,
            expiry_date: date!(2025 - 01 - 01),
            provider_id: 1,
            provider_type: "Restaurant".into(),
            location: "Downtown".into(),
            food_type: FoodType::Vegetarian,
            meal_type: MealType::Lunch,
        }
    }

    #[tokio::test]
    async fn insert_returns_fresh_id_and_row_reads_back() {
        let t = TestDb::seeded().await;
        let out = insert_listing(&t.db, &rice()).await.unwrap();
        assert_eq!(out.rows_affected, 1);
        assert!(out.last_insert_rowid > 5);

        let listing = get_listing(&t.db, out.last_insert_rowid).await.unwrap().unwrap();
        assert_eq!(listing.food_name, "Rice");
        assert_eq!(listing.quantity, 10);
        assert_eq!(listing.expiry_date, Some(date!(2025 - 01 - 01)));
        assert_eq!(listing.food_type, Some(FoodType::Vegetarian));
        assert_eq!(listing.meal_type, Some(MealType::Lunch));
    }

    #[tokio::test]
    async fn insert_accepts_unknown_provider() {
        let t = TestDb::seeded().await;
        let mut listing = rice();
        listing.provider_id = 4242;
        let out = insert_listing(&t.db, &listing).await.unwrap();
        assert_eq!(out.rows_affected, 1);
    }

    #[tokio::test]
    async fn update_and_delete_report_zero_rows_for_absent_id() {
        let t = TestDb::seeded().await;
        assert_eq!(update_quantity(&t.db, 9999, 3).await.unwrap().rows_affected, 0);
        assert_eq!(delete_listing(&t.db, 9999).await.unwrap().rows_affected, 0);
    }

    #[tokio::test]
    async fn delete_then_update_does_not_recreate() {
        let t = TestDb::seeded().await;
        assert_eq!(delete_listing(&t.db, 2).await.unwrap().rows_affected, 1);
        assert_eq!(update_quantity(&t.db, 2, 8).await.unwrap().rows_affected, 0);
        assert!(get_listing(&t.db, 2).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_of_claimed_listing_leaves_claims_dangling() {
        let t = TestDb::seeded().await;
        // listing 1 is referenced by claims in the seed
        assert_eq!(delete_listing(&t.db, 1).await.unwrap().rows_affected, 1);
        let table = t
            .db
            .run_query("SELECT COUNT(*) AS n FROM claims WHERE food_id = 1")
            .await
            .unwrap();
        assert_ne!(table.rows[0][0], serde_json::Value::from(0));
    }

    #[tokio::test]
    async fn list_is_newest_first_and_paged() {
        let t = TestDb::seeded().await;
        let page = list_listings(&t.db, 2, 0).await.unwrap();
        assert_eq!(page.iter().map(|l| l.food_id).collect::<Vec<_>>(), vec![5, 4]);
        let next = list_listings(&t.db, 2, 2).await.unwrap();
        assert_eq!(next.iter().map(|l| l.food_id).collect::<Vec<_>>(), vec![3, 2]);
    }

    #[tokio::test]
    async fn non_iso_expiry_does_not_break_reads() {
        let t = TestDb::seeded().await;
        t.db
            .execute_statement(
                "UPDATE food_listings SET expiry_date = ? WHERE food_id = 1",
                &[SqlParam::from("3/17/2025")],
            )
            .await
            .unwrap();

        let listing = get_listing(&t.db, 1).await.unwrap().unwrap();
        assert_eq!(listing.expiry_date, None);
        assert_eq!(listing.expiry_date_raw.as_deref(), Some("3/17/2025"));

        let all = list_listings(&t.db, 10, 0).await.unwrap();
        assert_eq!(all.len(), 5);
        assert!(all.iter().filter(|l| l.food_id != 1).all(|l| l.expiry_date_raw.is_none()));
    }
}
