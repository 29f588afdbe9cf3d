use crate::config::AppConfig;
use crate::db::Database;
use anyhow::Context;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);
        let db = Database::new(&config.database_url)
            .with_context(|| format!("parse DATABASE_URL {}", config.database_url))?;
        Ok(Self { db, config })
    }

    pub fn from_parts(db: Database, config: Arc<AppConfig>) -> Self {
        Self { db, config }
    }
}
