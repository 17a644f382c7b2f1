//! Database command handlers for the CLI.
//!
//! Called from `main` once the pool is connected.

use std::path::Path;

/// # Errors
///
/// Returns an error if the database does not answer.
pub(crate) async fn run_ping(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    dealerdb_db::health_check(pool).await?;
    println!("database ok");
    Ok(())
}

/// # Errors
///
/// Returns an error if any migration fails.
pub(crate) async fn run_migrate(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let applied = dealerdb_db::run_migrations(pool).await?;
    tracing::info!(applied, "migrations applied");
    println!("applied {applied} migration(s)");
    Ok(())
}

/// Load the inventory file and upsert it.
///
/// Migrations run first so a fresh database can be seeded in one step.
/// Sample reviews are labelled locally with the built-in classifier.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation, or if any
/// database write fails (the whole seed is rolled back).
pub(crate) async fn run_seed(pool: &sqlx::PgPool, path: &Path) -> anyhow::Result<()> {
    let inventory = dealerdb_core::load_inventory(path)?;
    tracing::info!(
        path = %path.display(),
        makes = inventory.makes.len(),
        dealers = inventory.dealers.len(),
        reviews = inventory.reviews.len(),
        "loaded inventory file"
    );

    dealerdb_db::run_migrations(pool).await?;
    let summary = dealerdb_db::seed_inventory(pool, &inventory, dealerdb_sentiment::classify).await?;

    println!(
        "seeded {} make(s), {} model(s), {} dealer(s); {} new review(s)",
        summary.makes, summary.models, summary.dealers, summary.reviews_inserted
    );
    Ok(())
}
