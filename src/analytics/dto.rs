use serde::{Deserialize, Serialize};

use super::catalog::AnalyticsQuery;
use crate::db::Table;

#[derive(Debug, Deserialize)]
pub struct RunQueryRequest {
    /// Catalog label or slug.
    pub label: String,
}

#[derive(Debug, Serialize)]
pub struct CatalogEntry {
    pub label: &'static str,
    pub slug: &'static str,
    pub columns: &'static [&'static str],
    pub single_row: bool,
}

impl From<AnalyticsQuery> for CatalogEntry {
    fn from(q: AnalyticsQuery) -> Self {
        Self {
            label: q.label(),
            slug: q.slug(),
            columns: q.columns(),
            single_row: q.limit_one(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AnalyticsResult {
    pub label: &'static str,
    pub slug: &'static str,
    #[serde(flatten)]
    pub table: Table,
}
