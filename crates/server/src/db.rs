use axum::extract::FromRef;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::sync::OnceLock;

/// Shared application state passed to Axum handlers via `State`.
/// Derives `FromRef` so handlers can extract `State<PgPool>` directly.
#[derive(Clone, FromRef)]
pub struct AppState {
    pub pool: Pool<Postgres>,
}

/// The school database is owned elsewhere; this process only reads it, so
/// there are no migrations to run here.
static POOL: OnceLock<Pool<Postgres>> = OnceLock::new();

/// Create a lazily connected pool from `DATABASE_URL`.
/// No connection opens until the first query.
pub fn create_pool() -> Pool<Postgres> {
    let _ = dotenvy::dotenv();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    pool_for(&database_url)
}

/// Build a lazy pool for an explicit URL. Tests point this at an address
/// nothing listens on.
pub fn pool_for(database_url: &str) -> Pool<Postgres> {
    let max_connections: u32 = std::env::var("DATABASE_MAX_CONNECTIONS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(10);

    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(std::time::Duration::from_secs(5))
        .connect_lazy(database_url)
        .expect("DATABASE_URL is not a valid Postgres connection string")
}

/// Process-wide pool used by Dioxus server functions.
/// REST handlers take `State<PgPool>` from `AppState` instead.
pub fn get_db() -> &'static Pool<Postgres> {
    POOL.get_or_init(create_pool)
}
