//! One-shot loader for sample projects and reviews.
//!
//! Each collection is filled only while empty; the statistics singleton is
//! refreshed from the live counts on every run.

mod fixtures;

use clap::Parser;
use database::collections::{PROJECTS, REVIEWS};
use database::document::timestamp;
use database::{statistics, Database, Filter, Statistics, StatisticsUpdate};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seeder")]
#[command(about = "Load sample projects and reviews, then refresh the site statistics")]
struct Args {
    /// SQLite database URL. Defaults to `sqlite:<DB_NAME>.db?mode=rwc`.
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// Database name used to derive the default URL
    #[arg(long, env = "DB_NAME", default_value = "alsawda_warehouses")]
    db_name: String,
}

impl Args {
    fn database_url(&self) -> String {
        self.database_url
            .clone()
            .unwrap_or_else(|| format!("sqlite:{}.db?mode=rwc", self.db_name))
    }
}

/// Counts of what one run inserted.
#[derive(Debug, Default, PartialEq, Eq)]
struct SeedReport {
    projects: u64,
    reviews: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let args = Args::parse();

    let url = args.database_url();
    info!(url = %url, "Starting database seeding");

    let db = Database::connect(&url).await?;
    db.migrate().await?;

    let report = seed(&db).await?;
    let stats = update_statistics(&db).await?;
    info!(
        projects = report.projects,
        reviews = report.reviews,
        projects_completed = stats.counters.projects_completed,
        happy_clients = stats.counters.happy_clients,
        "Database seeding completed"
    );

    db.close().await;
    Ok(())
}

async fn seed(db: &Database) -> database::Result<SeedReport> {
    let now = timestamp::now();
    let mut report = SeedReport::default();

    let projects = db.collection(PROJECTS);
    let existing = projects.count(&Filter::new()).await?;
    if existing > 0 {
        info!(existing, "Projects already exist, skipping");
    } else {
        report.projects = projects.insert_many(&fixtures::projects(now)).await?;
        info!(count = report.projects, "Seeded projects");
    }

    let reviews = db.collection(REVIEWS);
    let existing = reviews.count(&Filter::new()).await?;
    if existing > 0 {
        info!(existing, "Reviews already exist, skipping");
    } else {
        report.reviews = reviews.insert_many(&fixtures::reviews(now)).await?;
        info!(count = report.reviews, "Seeded reviews");
    }

    Ok(report)
}

/// Derive the headline counters from the live catalogue, with floors.
async fn update_statistics(db: &Database) -> database::Result<Statistics> {
    let active = Filter::new().eq("is_active", true);
    let projects = db.collection(PROJECTS).count(&active).await? as i64;
    let reviews = db.collection(REVIEWS).count(&active).await? as i64;

    let update = StatisticsUpdate {
        projects_completed: Some(projects.max(100)),
        happy_clients: Some((reviews * 10).max(150)),
        years_experience: Some(5),
        team_members: Some(25),
    };
    let stats = statistics::upsert_statistics(db, update).await?;
    info!("Updated company statistics");
    Ok(stats)
}
