//! Seed a database with demo blog content.
//!
//! Runs pending migrations first. Does nothing if authors already exist.

use anyhow::Context;
use migration::{Migrator, MigratorTrait, seeder};
use quire_infra::DatabaseConfig;
use quire_infra::database::connect;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt().with_env_filter("info").init();

    let url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let db = connect(&DatabaseConfig {
        url,
        max_connections: 5,
        min_connections: 1,
    })
    .await
    .context("failed to connect to the database")?;

    Migrator::up(&db, None).await.context("migrations failed")?;

    match seeder::seed(&db).await? {
        Some(summary) => tracing::info!(
            authors = summary.authors,
            categories = summary.categories,
            tags = summary.tags,
            published_posts = summary.published_posts,
            draft_posts = summary.draft_posts,
            "Seeding finished"
        ),
        None => tracing::info!("Nothing to seed"),
    }

    Ok(())
}
