use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ENV, api::error};

async fn connect(url: &str) -> Result<PgPool, error::SystemError> {
    let pool = PgPoolOptions::new()
        .max_connections(ENV.db_max_connections)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(url)
        .await?;
    Ok(pool)
}

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    connect(&ENV.database_url).await
}

/// Pool for read-only aggregation. Reuses `primary` when no replica is configured.
pub async fn connect_read_database(primary: &PgPool) -> Result<PgPool, error::SystemError> {
    match ENV.database_read_url.as_deref() {
        Some(url) => {
            log::info!("Using dedicated read database");
            connect(url).await
        }
        None => Ok(primary.clone()),
    }
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), error::SystemError> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| error::SystemError::InternalError(Box::new(e)))?;
    log::info!("Database migrations applied");
    Ok(())
}
