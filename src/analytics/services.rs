use tracing::{info, warn};

use super::catalog::AnalyticsQuery;
use crate::{claims::ClaimStatus, db::Table, error::AppError, state::AppState};

pub async fn run_entry(st: &AppState, query: AnalyticsQuery) -> Result<Table, AppError> {
    let table = st.db.run_catalog(query).await?;
    if query == AnalyticsQuery::ClaimStatusShare {
        let stray = unknown_statuses(&table);
        if !stray.is_empty() {
            warn!(statuses = ?stray, "claims table holds statuses outside the known set");
        }
    }
    info!(label = query.label(), rows = table.rows.len(), "analytics query ran");
    Ok(table)
}

/// Values in the `status` column that are not a known [`ClaimStatus`].
fn unknown_statuses(table: &Table) -> Vec<String> {
    table
        .column("status")
        .into_iter()
        .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
        .filter(|s| s.parse::<ClaimStatus>().is_err())
        .collect()
}
