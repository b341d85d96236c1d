//! HTTP route handlers for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /ping                        - Liveness check
//! GET  /health/ready                - Readiness check (database)
//!
//! # Auth
//! POST /auth/sign-in                - Sign in, returns a bearer token
//!
//! # Users (public registration/profile)
//! POST   /users/create              - Register
//! GET    /users/list                - List users
//! GET    /users/get/{id}            - Get user
//! PUT    /users/update/{id}         - Overwrite user (password optional)
//! DELETE /users/delete/{id}         - Delete user
//!
//! # Categories
//! POST   /category/create           - Create category
//! GET    /category/list             - List categories (admin)
//! GET    /category/get/{id}         - Get category (bearer)
//! PUT    /category/update/{id}      - Overwrite category (bearer)
//! DELETE /category/delete/{id}      - Delete category (bearer)
//!
//! # Products
//! POST   /products/create           - Create product (bearer)
//! GET    /products/list             - List products (bearer)
//! GET    /products/get/{id}         - Get product
//! PUT    /products/update/{id}      - Overwrite product (bearer)
//! DELETE /products/delete/{id}      - Delete product (bearer)
//!
//! # Addresses (bearer)
//! POST   /address                   - Create address for the caller
//! GET    /address                   - List the caller's addresses
//! GET    /address/admin/list        - List every address (admin)
//! GET    /address/{id}              - Get address
//! PUT    /address/{id}              - Overwrite address
//! DELETE /address/{id}              - Delete address
//!
//! # Orders (bearer)
//! POST /order/create                - Place order (priced snapshot)
//! GET  /order/list                  - List the caller's orders
//! GET  /order/admin/list-all        - List every order (admin)
//! PUT  /order/admin/update/{id}     - Set order status (admin)
//! ```

pub mod addresses;
pub mod auth;
pub mod categories;
pub mod orders;
pub mod products;
pub mod users;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new().route("/sign-in", post(auth::sign_in))
}

/// Create the user routes router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(users::create))
        .route("/list", get(users::list))
        .route("/get/{id}", get(users::get))
        .route("/update/{id}", put(users::update))
        .route("/delete/{id}", delete(users::delete))
}

/// Create the category routes router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(categories::create))
        .route("/list", get(categories::list))
        .route("/get/{id}", get(categories::get))
        .route("/update/{id}", put(categories::update))
        .route("/delete/{id}", delete(categories::delete))
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(products::create))
        .route("/list", get(products::list))
        .route("/get/{id}", get(products::get))
        .route("/update/{id}", put(products::update))
        .route("/delete/{id}", delete(products::delete))
}

/// Create the address routes router.
pub fn address_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(addresses::create).get(addresses::list))
        .route("/admin/list", get(addresses::list_all))
        .route(
            "/{id}",
            get(addresses::get)
                .put(addresses::update)
                .delete(addresses::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/create", post(orders::create))
        .route("/list", get(orders::list))
        .route("/admin/list-all", get(orders::list_all))
        .route("/admin/update/{id}", put(orders::update_status))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/users", user_routes())
        .nest("/category", category_routes())
        .nest("/products", product_routes())
        .nest("/address", address_routes())
        .nest("/order", order_routes())
}
