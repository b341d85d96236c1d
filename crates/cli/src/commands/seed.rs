//! Seed database with demo catalog data.
//!
//! Inserts a small set of categories and products so a fresh environment has
//! something to list and order against. Existing rows with the same names
//! are left untouched.
//!
//! # Usage
//!
//! ```bash
//! loja-cli seed
//! ```

use rust_decimal::Decimal;

use loja_api::db;
use loja_api::db::RepositoryError;
use loja_api::db::categories::CategoryRepository;
use loja_api::db::products::ProductRepository;
use loja_api::models::NewProduct;

use super::CommandError;

/// Demo catalog: (category, [(product, description, price in cents)]).
const CATALOG: &[(&str, &[(&str, &str, i64)])] = &[
    (
        "Bebidas",
        &[
            ("Café torrado 500g", "Café torrado e moído", 2490),
            ("Suco de laranja 1L", "Suco integral sem açúcar", 1250),
        ],
    ),
    (
        "Padaria",
        &[
            ("Pão francês", "Unidade", 120),
            ("Bolo de cenoura", "Com cobertura de chocolate", 1890),
        ],
    ),
];

/// Seed the catalog with demo categories and products.
///
/// # Errors
///
/// Returns `CommandError` if the database is unreachable or an insert fails
/// for a reason other than the row already existing.
pub async fn run() -> Result<(), CommandError> {
    let database_url = super::database_url()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&database_url).await?;

    let categories = CategoryRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    let mut inserted = 0_usize;
    let mut skipped = 0_usize;

    for (category_name, items) in CATALOG {
        let category = match categories.create(category_name).await {
            Ok(category) => category,
            Err(RepositoryError::Conflict(_)) => {
                tracing::info!("Category already exists: {category_name}");
                match find_category(&categories, category_name).await? {
                    Some(category) => category,
                    None => continue,
                }
            }
            Err(e) => return Err(e.into()),
        };

        for &(name, description, cents) in *items {
            let new_product = NewProduct {
                name: name.to_owned(),
                description: description.to_owned(),
                price: Decimal::new(cents, 2),
                image_url: None,
                category_id: category.id,
            };

            match products.create(&new_product).await {
                Ok(_) => inserted += 1,
                Err(RepositoryError::Conflict(_)) => skipped += 1,
                Err(e) => return Err(e.into()),
            }
        }
    }

    tracing::info!("Seeding complete!");
    tracing::info!("  Products inserted: {inserted}");
    tracing::info!("  Products skipped (already exist): {skipped}");

    Ok(())
}

/// Look a category up by name after a conflict.
async fn find_category(
    categories: &CategoryRepository<'_>,
    name: &str,
) -> Result<Option<loja_api::models::Category>, CommandError> {
    let all = categories.list().await?;
    Ok(all.into_iter().find(|c| c.name == name))
}
