//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! loja-cli admin create -e admin@exemplo.com -n "Admin" -p "senha-segura"
//! ```
//!
//! # Environment Variables
//!
//! - `LOJA_DATABASE_URL` - `PostgreSQL` connection string

use loja_core::{Role, UserId};

use loja_api::db;
use loja_api::services::auth::AuthService;

use super::CommandError;

/// Create a new ADMIN user.
///
/// # Arguments
///
/// * `email` - Admin's email address
/// * `name` - Admin's display name
/// * `password` - Admin's password (hashed with argon2 before storage)
///
/// # Returns
///
/// The ID of the created admin user.
///
/// # Errors
///
/// Returns `CommandError::Auth` if validation fails or the email is taken.
pub async fn create_user(email: &str, name: &str, password: &str) -> Result<UserId, CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Creating admin user: {}", email);

    let user = AuthService::new(&pool)
        .register(name, email, password, Role::Admin)
        .await?;

    tracing::info!(
        "Admin user created successfully! ID: {}, Email: {}, Role: {}",
        user.id,
        user.email,
        user.role
    );

    Ok(user.id)
}
