//! Document persistence layer for the company site.
//!
//! Records are JSON documents grouped into named collections, stored in SQLite
//! through SQLx. Each resource module (`company`, `service`, `project`,
//! `review`, `contact`, `statistics`) owns one collection and validates its
//! payloads before writing.
//!
//! # Example
//!
//! ```no_run
//! use database::{listing::PageRequest, service, Database};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let db = Database::connect("sqlite:site.db?mode=rwc").await?;
//!     db.migrate().await?;
//!     database::bootstrap::run(&db).await?;
//!
//!     let page = service::list_services(
//!         &db,
//!         &service::ServiceQuery::default(),
//!         PageRequest::new(None, None, service::PAGE_BOUNDS)?,
//!     )
//!     .await?;
//!     println!("{} active services", page.total);
//!
//!     Ok(())
//! }
//! ```

pub mod bootstrap;
pub mod collection;
pub mod company;
pub mod contact;
pub mod document;
pub mod error;
pub mod filter;
pub mod listing;
pub mod models;
pub mod project;
pub mod review;
pub mod service;
pub mod statistics;
pub mod validation;

pub use collection::{Collection, FindOptions};
pub use document::Document;
pub use error::{DatabaseError, Result};
pub use filter::{Filter, Sort};
pub use listing::{Page, PageBounds, PageRequest};
pub use models::{
    CompanyInfo, CompanyInfoUpdate, ContactForm, ContactFormCreate, ContactStats, ContactStatus,
    MonthlyCount, Project, ProjectCreate, Review, ReviewCreate, ReviewStats, Service,
    ServiceCreate, Statistics, StatisticsCounters, StatisticsUpdate,
};
pub use validation::{Validate, ValidationError};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

/// Collection names. Each resource owns exactly one.
pub mod collections {
    pub const COMPANY_INFO: &str = "company_info";
    pub const SERVICES: &str = "services";
    pub const PROJECTS: &str = "projects";
    pub const REVIEWS: &str = "reviews";
    pub const CONTACT_FORMS: &str = "contact_forms";
    pub const STATISTICS: &str = "statistics";
}

/// Database connection wrapper.
#[derive(Debug, Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Default pool size for database connections.
    const DEFAULT_POOL_SIZE: u32 = 20;

    /// Connect to a SQLite database.
    ///
    /// The URL should be in the format `sqlite:path/to/db.sqlite?mode=rwc`.
    /// Use `sqlite::memory:` for tests.
    pub async fn connect(url: &str) -> Result<Self> {
        Self::connect_with_pool_size(url, Self::DEFAULT_POOL_SIZE).await
    }

    /// Connect to a SQLite database with a custom pool size.
    pub async fn connect_with_pool_size(url: &str, pool_size: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(30))
            .connect_with(options)
            .await?;

        tracing::info!(
            "Connected to database: {} (pool size: {})",
            url,
            pool_size
        );

        Ok(Self { pool })
    }

    /// Run database migrations.
    ///
    /// This should be called once after connecting to ensure the schema is up to date.
    pub async fn migrate(&self) -> Result<()> {
        tracing::info!("Running database migrations...");

        sqlx::migrate!("./migrations").run(&self.pool).await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Handle to a named collection.
    pub fn collection(&self, name: &'static str) -> Collection<'_> {
        Collection::new(&self.pool, name)
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Close the database connection pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
