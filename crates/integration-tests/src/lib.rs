//! Integration tests for the Loja backend.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the database and run migrations
//! cargo run -p loja-cli -- migrate
//!
//! # Create the admin account the admin tests sign in with
//! cargo run -p loja-cli -- admin create \
//!     -e admin@exemplo.com -n "Admin" -p "senha-admin-123"
//!
//! # Start the API
//! cargo run -p loja-api
//!
//! # Run the ignored tests
//! cargo test -p loja-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `LOJA_API_BASE_URL` - API base URL (default: `http://localhost:3333`)
//! - `LOJA_TEST_ADMIN_EMAIL` / `LOJA_TEST_ADMIN_PASSWORD` - Admin
//!   credentials (defaults match the `admin create` line above)

use reqwest::Client;
use serde_json::{Value, json};

/// Base URL for the API (configurable via environment).
#[must_use]
pub fn base_url() -> String {
    std::env::var("LOJA_API_BASE_URL").unwrap_or_else(|_| "http://localhost:3333".to_string())
}

/// Plain HTTP client.
///
/// # Panics
///
/// Panics if the client cannot be constructed.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .build()
        .expect("Failed to create HTTP client")
}

/// A unique email per test run so reruns never collide.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@teste.exemplo.com", uuid::Uuid::new_v4())
}

/// Register a user through the public sign-up route.
///
/// # Panics
///
/// Panics if the request fails or registration is rejected.
pub async fn register_user(client: &Client, email: &str, password: &str) {
    let resp = client
        .post(format!("{}/users/create", base_url()))
        .json(&json!({ "name": "Cliente Teste", "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to register user");

    assert_eq!(resp.status(), 201, "registration should succeed");
}

/// Sign in and return the bearer token, or `None` on rejection.
///
/// # Panics
///
/// Panics if the request itself fails.
pub async fn sign_in(client: &Client, email: &str, password: &str) -> Option<String> {
    let resp = client
        .post(format!("{}/auth/sign-in", base_url()))
        .json(&json!({ "email": email, "password": password }))
        .send()
        .await
        .expect("Failed to sign in");

    if !resp.status().is_success() {
        return None;
    }

    let body: Value = resp.json().await.expect("Failed to read sign-in body");
    body.get("token")
        .and_then(Value::as_str)
        .map(ToOwned::to_owned)
}

/// Register a fresh user and return their bearer token.
///
/// # Panics
///
/// Panics if registration or sign-in fails.
pub async fn fresh_user_token(client: &Client) -> String {
    let email = unique_email("cliente");
    register_user(client, &email, "senha-123456").await;
    sign_in(client, &email, "senha-123456")
        .await
        .expect("Fresh user should be able to sign in")
}

/// Sign in with the seeded admin account and return its bearer token.
///
/// # Panics
///
/// Panics if the admin account doesn't exist (run `loja-cli admin create`).
pub async fn admin_token(client: &Client) -> String {
    let email = std::env::var("LOJA_TEST_ADMIN_EMAIL")
        .unwrap_or_else(|_| "admin@exemplo.com".to_string());
    let password = std::env::var("LOJA_TEST_ADMIN_PASSWORD")
        .unwrap_or_else(|_| "senha-admin-123".to_string());

    sign_in(client, &email, &password)
        .await
        .expect("Admin account should exist - run `loja-cli admin create` first")
}

/// Create a category, tolerating it already existing, and return its id.
///
/// # Panics
///
/// Panics if the request fails unexpectedly.
pub async fn ensure_category(client: &Client, name: &str) -> String {
    let resp = client
        .post(format!("{}/category/create", base_url()))
        .json(&json!({ "name": name }))
        .send()
        .await
        .expect("Failed to create category");

    if resp.status() == 201 {
        let body: Value = resp.json().await.expect("Failed to read category body");
        return body["category"]["id"]
            .as_str()
            .expect("category id missing")
            .to_owned();
    }

    // Already exists: look it up through the admin listing
    let admin = admin_token(client).await;
    let body: Value = client
        .get(format!("{}/category/list", base_url()))
        .bearer_auth(admin)
        .send()
        .await
        .expect("Failed to list categories")
        .json()
        .await
        .expect("Failed to read category list");

    body["categories"]
        .as_array()
        .expect("categories should be an array")
        .iter()
        .find(|c| c["name"] == name)
        .and_then(|c| c["id"].as_str())
        .expect("existing category should be listed")
        .to_owned()
}

/// Create a product under a category and return its id.
///
/// # Panics
///
/// Panics if creation fails.
pub async fn create_product(
    client: &Client,
    token: &str,
    name: &str,
    price: f64,
    category_id: &str,
) -> String {
    let resp = client
        .post(format!("{}/products/create", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "name": name,
            "description": "Produto de teste",
            "price": price,
            "category_id": category_id,
        }))
        .send()
        .await
        .expect("Failed to create product");

    assert_eq!(resp.status(), 201, "product creation should succeed");
    let body: Value = resp.json().await.expect("Failed to read product body");
    body["product"]["id"]
        .as_str()
        .expect("product id missing")
        .to_owned()
}

/// Create an address for the token's user and return its id.
///
/// # Panics
///
/// Panics if creation fails.
pub async fn create_address(client: &Client, token: &str) -> String {
    let resp = client
        .post(format!("{}/address", base_url()))
        .bearer_auth(token)
        .json(&json!({
            "street": "Rua das Flores",
            "number": "123",
            "city": "São Paulo",
            "state": "SP",
            "zipCode": "01310-100",
        }))
        .send()
        .await
        .expect("Failed to create address");

    assert_eq!(resp.status(), 201, "address creation should succeed");
    let body: Value = resp.json().await.expect("Failed to read address body");
    body["address"]["id"]
        .as_str()
        .expect("address id missing")
        .to_owned()
}
