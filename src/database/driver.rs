//! Database driver detection with a short-lived per-connection cache.

use crate::config::ScopeConfig;
use crate::error::{Result, ScopeError};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// SQL drivers whose syntax differences matter to scope rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DriverName {
    MySql,
    MariaDb,
    PgSql,
    Sqlite,
    SqlSrv,
}

impl DriverName {
    pub fn as_str(&self) -> &'static str {
        match self {
            DriverName::MySql => "mysql",
            DriverName::MariaDb => "mariadb",
            DriverName::PgSql => "pgsql",
            DriverName::Sqlite => "sqlite",
            DriverName::SqlSrv => "sqlsrv",
        }
    }
}

impl fmt::Display for DriverName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DriverName {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "mysql" => Ok(DriverName::MySql),
            "mariadb" => Ok(DriverName::MariaDb),
            "pgsql" | "postgres" | "postgresql" => Ok(DriverName::PgSql),
            "sqlite" => Ok(DriverName::Sqlite),
            "sqlsrv" | "mssql" => Ok(DriverName::SqlSrv),
            other => Err(ScopeError::Configuration(format!(
                "Unsupported database driver: {other}"
            ))),
        }
    }
}

/// A connection that can report its driver and server version
#[async_trait]
pub trait DriverProbe: Send + Sync {
    /// Stable identifier used as the cache key
    fn connection_id(&self) -> &str;

    /// Driver as reported by the client library; MariaDB reports as MySQL
    fn reported_driver(&self) -> DriverName;

    /// Server version string, e.g. `10.11.6-MariaDB-0+deb12u1`
    async fn server_version(&self) -> Result<String>;
}

/// Resolve the effective driver, telling MariaDB apart from MySQL by its version string
pub async fn detect_driver(probe: &dyn DriverProbe) -> Result<DriverName> {
    let reported = probe.reported_driver();
    if reported != DriverName::MySql {
        return Ok(reported);
    }

    let version = probe.server_version().await?;
    if version.to_lowercase().contains("mariadb") {
        Ok(DriverName::MariaDb)
    } else {
        Ok(DriverName::MySql)
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedDriver {
    driver: DriverName,
    cached_at: Instant,
}

/// TTL cache of detected drivers keyed by connection id
#[derive(Debug)]
pub struct DriverNameCache {
    ttl: Duration,
    entries: DashMap<String, CachedDriver>,
}

impl DriverNameCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: DashMap::new(),
        }
    }

    pub fn from_config(config: &ScopeConfig) -> Self {
        Self::new(config.driver_cache_ttl())
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Driver for the probed connection, served from cache while fresh
    pub async fn driver_name(&self, probe: &dyn DriverProbe) -> Result<DriverName> {
        let key = probe.connection_id();

        // Copy out of the map so no shard lock is held across the probe
        let cached = self.entries.get(key).map(|entry| *entry);
        if let Some(cached) = cached {
            if cached.cached_at.elapsed() < self.ttl {
                debug!(connection = %key, driver = %cached.driver, "Driver name cache hit");
                return Ok(cached.driver);
            }
        }

        let driver = detect_driver(probe).await?;
        info!(connection = %key, driver = %driver, "Detected database driver");

        self.entries.insert(
            key.to_string(),
            CachedDriver {
                driver,
                cached_at: Instant::now(),
            },
        );
        Ok(driver)
    }

    pub fn invalidate(&self, connection_id: &str) {
        self.entries.remove(connection_id);
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for DriverNameCache {
    fn default() -> Self {
        Self::from_config(&ScopeConfig::default())
    }
}
