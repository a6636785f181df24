//! # Database Integration
//!
//! Driver detection for the connections scoped queries run against.
//!
//! ## Key Components
//!
//! - [`driver`] - [`DriverName`], the [`DriverProbe`] seam and the TTL-bound [`DriverNameCache`]
//! - [`connection`] - [`PoolProbe`], probing `sqlx` PostgreSQL, MySQL and SQLite pools
//!
//! MariaDB connections report themselves as MySQL, so MySQL results are
//! confirmed against the server version string before being cached.

pub mod connection;
pub mod driver;

pub use connection::PoolProbe;
pub use driver::{detect_driver, DriverName, DriverNameCache, DriverProbe};
