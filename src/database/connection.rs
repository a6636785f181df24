use super::driver::{DriverName, DriverProbe};
use crate::error::Result;
use async_trait::async_trait;
use sqlx::{MySqlPool, PgPool, SqlitePool};

/// `sqlx` pool paired with the identifier its driver is cached under
#[derive(Debug, Clone)]
pub enum PoolProbe {
    Postgres { connection_id: String, pool: PgPool },
    MySql { connection_id: String, pool: MySqlPool },
    Sqlite { connection_id: String, pool: SqlitePool },
}

impl PoolProbe {
    pub fn postgres(connection_id: &str, pool: PgPool) -> Self {
        PoolProbe::Postgres {
            connection_id: connection_id.to_string(),
            pool,
        }
    }

    pub fn mysql(connection_id: &str, pool: MySqlPool) -> Self {
        PoolProbe::MySql {
            connection_id: connection_id.to_string(),
            pool,
        }
    }

    pub fn sqlite(connection_id: &str, pool: SqlitePool) -> Self {
        PoolProbe::Sqlite {
            connection_id: connection_id.to_string(),
            pool,
        }
    }
}

#[async_trait]
impl DriverProbe for PoolProbe {
    fn connection_id(&self) -> &str {
        match self {
            PoolProbe::Postgres { connection_id, .. }
            | PoolProbe::MySql { connection_id, .. }
            | PoolProbe::Sqlite { connection_id, .. } => connection_id,
        }
    }

    fn reported_driver(&self) -> DriverName {
        match self {
            PoolProbe::Postgres { .. } => DriverName::PgSql,
            PoolProbe::MySql { .. } => DriverName::MySql,
            PoolProbe::Sqlite { .. } => DriverName::Sqlite,
        }
    }

    async fn server_version(&self) -> Result<String> {
        let version = match self {
            PoolProbe::Postgres { pool, .. } => {
                sqlx::query_scalar::<_, String>("SELECT version()")
                    .fetch_one(pool)
                    .await?
            }
            PoolProbe::MySql { pool, .. } => {
                sqlx::query_scalar::<_, String>("SELECT VERSION() AS version")
                    .fetch_one(pool)
                    .await?
            }
            PoolProbe::Sqlite { pool, .. } => {
                sqlx::query_scalar::<_, String>("SELECT sqlite_version()")
                    .fetch_one(pool)
                    .await?
            }
        };
        Ok(version)
    }
}
