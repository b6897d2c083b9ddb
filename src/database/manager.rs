use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use thiserror::Error;
use tracing::info;

use crate::config::DatabaseConfig;

/// Which integrity rule the store refused to break
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    Unique,
    ForeignKey,
    NotNull,
    Check,
}

impl ConstraintKind {
    pub fn describe(&self) -> &'static str {
        match self {
            ConstraintKind::Unique => "a record with the same key already exists",
            ConstraintKind::ForeignKey => "the operation would break a reference between records",
            ConstraintKind::NotNull => "a required column was left empty",
            ConstraintKind::Check => "a column value was rejected by the database",
        }
    }
}

/// Errors from the persistence layer
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Missing configuration: {0}")]
    ConfigMissing(&'static str),

    #[error("Invalid database URL")]
    InvalidDatabaseUrl,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Constraint violation ({}): {}", .constraint.as_deref().unwrap_or("unnamed"), .kind.describe())]
    Constraint {
        kind: ConstraintKind,
        constraint: Option<String>,
    },

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Database unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DatabaseError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db) => {
                let kind = if db.is_unique_violation() {
                    Some(ConstraintKind::Unique)
                } else if db.is_foreign_key_violation() {
                    Some(ConstraintKind::ForeignKey)
                } else if db.is_check_violation() {
                    Some(ConstraintKind::Check)
                } else if db.code().as_deref() == Some("23502") {
                    Some(ConstraintKind::NotNull)
                } else {
                    None
                };

                match kind {
                    Some(kind) => DatabaseError::Constraint {
                        kind,
                        constraint: db.constraint().map(str::to_string),
                    },
                    None => DatabaseError::Sqlx(err),
                }
            }
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => DatabaseError::Unavailable(err.to_string()),
            _ => DatabaseError::Sqlx(err),
        }
    }
}

/// Builds the single connection pool shared by every request.
pub struct DatabaseManager;

impl DatabaseManager {
    /// Connect eagerly so a bad URL or unreachable server fails at startup.
    pub async fn connect(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;
        let target = Self::redact_url(url)?;

        let pool = Self::pool_options(config).connect(url).await?;

        info!("Connected database pool to {}", target);
        Ok(pool)
    }

    /// Build a pool that opens connections on first use.
    pub fn connect_lazy(config: &DatabaseConfig) -> Result<PgPool, DatabaseError> {
        let url = config
            .url
            .as_deref()
            .ok_or(DatabaseError::ConfigMissing("DATABASE_URL"))?;

        Self::pool_options(config)
            .connect_lazy(url)
            .map_err(|_| DatabaseError::InvalidDatabaseUrl)
    }

    fn pool_options(config: &DatabaseConfig) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout))
    }

    /// Pings the pool to ensure connectivity
    pub async fn health_check(pool: &PgPool) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(pool).await?;
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to be returned
    pub async fn close(pool: &PgPool) {
        pool.close().await;
        info!("Closed database pool");
    }

    /// Strip the password from a connection URL so it can be logged.
    pub fn redact_url(raw: &str) -> Result<String, DatabaseError> {
        let mut url = url::Url::parse(raw).map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        if url.password().is_some() {
            url.set_password(Some("***"))
                .map_err(|_| DatabaseError::InvalidDatabaseUrl)?;
        }
        Ok(url.into())
    }
}
