mod analytics;
mod app;
mod claims;
mod config;
mod db;
mod error;
mod extract;
mod listings;
mod menu;
mod state;
#[cfg(test)]
mod test_support;

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "foodwaste=debug,axum=info,tower_http=info";

/// `RUST_LOG` picks the filter; `LOG_FORMAT=json` switches to one JSON object per line.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match std::env::var("LOG_FORMAT").as_deref() {
        Ok("json") => builder.json().with_current_span(false).init(),
        _ => builder.compact().init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_tracing();

    let state = state::AppState::init()?;
    tracing::info!(database = %state.config.database_url, "using database");

    // Fail early if the file is missing; it is never created here.
    let probe = state.db.acquire().await?;
    state.db.release(probe).await;

    let addr = state.config.bind_addr();
    app::serve(app::build_app(state), &addr).await
}
