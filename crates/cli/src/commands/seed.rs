//! Seed the catalog from a YAML file.
//!
//! The file is a list of products using the same field names as the admin
//! API (`name`, `description`, `category`, `price`, `stockQuantity`,
//! `features`, ...). Every entry is validated before anything is written.

use std::path::Path;

use tracing::{error, info};

use shinewell_core::{NewProduct, ProductSubmission};
use shinewell_server::db::{ProductRepository, RepositoryError};

use super::{ConnectError, connect};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("{0} invalid products")]
    Invalid(usize),

    #[error(transparent)]
    Connect(#[from] ConnectError),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Parse and validate every product in a YAML document.
///
/// All entries are checked so every problem is reported at once.
pub fn parse_products(content: &str) -> Result<Vec<NewProduct>, SeedError> {
    let submissions: Vec<ProductSubmission> = serde_yaml::from_str(content)?;

    let mut products = Vec::with_capacity(submissions.len());
    let mut invalid = 0;
    for (index, submission) in submissions.into_iter().enumerate() {
        let label = submission.name.clone().unwrap_or_default();
        match submission.validate() {
            Ok(product) => products.push(product),
            Err(e) => {
                error!("  - entry {} ({label}): {e}", index + 1);
                invalid += 1;
            }
        }
    }

    if invalid > 0 {
        return Err(SeedError::Invalid(invalid));
    }
    Ok(products)
}

/// Insert catalog products from a YAML file.
///
/// # Arguments
///
/// * `file_path` - Path to the YAML file
/// * `clear_existing` - If true, delete every product first
pub async fn products(file_path: &str, clear_existing: bool) -> Result<(), SeedError> {
    let path = Path::new(file_path);
    if !path.exists() {
        return Err(SeedError::FileNotFound(file_path.to_owned()));
    }

    info!(path = %file_path, "Loading products from file");
    let content = tokio::fs::read_to_string(path).await?;
    let products = parse_products(&content)?;
    info!(products = products.len(), "Products validated");

    let pool = connect().await?;
    let repo = ProductRepository::new(&pool);

    if clear_existing {
        let removed = repo.delete_all().await?;
        info!(removed, "Existing products deleted");
    }

    for product in &products {
        let id = repo.create(product).await?;
        info!(product_id = %id, name = %product.name, "Product inserted");
    }

    info!("Seeding complete! Inserted {} products", products.len());
    pool.close().await;
    Ok(())
}
