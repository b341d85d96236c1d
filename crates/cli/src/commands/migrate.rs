//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! loja-cli migrate
//! ```
//!
//! # Environment Variables
//!
//! - `LOJA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! Migration files live in `crates/api/migrations/`:
//! ```text
//! migrations/
//! ├── 20260805000001_create_users.sql
//! ├── 20260805000002_create_categories.sql
//! ├── 20260805000003_create_products.sql
//! ├── 20260805000004_create_addresses.sql
//! └── 20260805000005_create_orders.sql
//! ```

use super::CommandError;
use loja_api::db;

/// Run the API database migrations.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or a migration
/// fails to apply.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../api/migrations").run(&pool).await?;

    tracing::info!("Migrations complete!");
    Ok(())
}
