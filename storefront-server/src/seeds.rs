//! Demo catalog
//!
//! Loads a small fixed catalog through [`Catalog`], so it works against
//! either backend. Ids are taken from what the store returns rather than
//! assumed, and products reference categories and tags by position.

use rust_decimal::Decimal;

use crate::db::{Catalog, DbError};
use crate::models::{CategoryName, NewProduct, TagName, ValidationError};

const CATEGORIES: [&str; 5] = ["Shirts", "Shorts", "Music", "Hats", "Shoes"];

const TAGS: [&str; 8] = [
    "rock music",
    "pop music",
    "blue",
    "red",
    "green",
    "white",
    "gold",
    "pop culture",
];

/// Seed product: name, price, stock, category index, tag indexes
struct SeedProduct {
    name: &'static str,
    price: &'static str,
    stock: i32,
    category: usize,
    tags: &'static [usize],
}

const PRODUCTS: [SeedProduct; 5] = [
    SeedProduct {
        name: "Plain T-Shirt",
        price: "14.99",
        stock: 14,
        category: 0,
        tags: &[5, 6, 7],
    },
    SeedProduct {
        name: "Running Sneakers",
        price: "90.00",
        stock: 25,
        category: 4,
        tags: &[5],
    },
    SeedProduct {
        name: "Branded Baseball Hat",
        price: "22.99",
        stock: 12,
        category: 3,
        tags: &[0, 2, 3, 4],
    },
    SeedProduct {
        name: "Top 40 Music Compilation Vinyl Record",
        price: "12.99",
        stock: 50,
        category: 2,
        tags: &[0, 1, 7],
    },
    SeedProduct {
        name: "Cargo Shorts",
        price: "29.99",
        stock: 22,
        category: 1,
        tags: &[2],
    },
];

/// Rows written by [`seed`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
    pub tags: usize,
    pub product_tags: usize,
}

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error(transparent)]
    Store(#[from] DbError),

    #[error("invalid seed row: {0}")]
    Invalid(#[from] ValidationError),
}

/// Insert the demo catalog, optionally emptying the store first.
pub async fn seed(catalog: &dyn Catalog, reset: bool) -> Result<SeedSummary, SeedError> {
    if reset {
        tracing::warn!("Truncating catalog before seeding");
        catalog.truncate().await?;
    }

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = catalog.create_category(CategoryName::new(name)?).await?;
        category_ids.push(category.id);
    }
    tracing::info!(count = category_ids.len(), "categories seeded");

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        let tag = catalog.create_tag(TagName::new(name)?).await?;
        tag_ids.push(tag.id);
    }
    tracing::info!(count = tag_ids.len(), "tags seeded");

    let mut product_tags = 0;
    for row in &PRODUCTS {
        let price: Decimal = row
            .price
            .parse()
            .map_err(|_| ValidationError::InvalidFormat {
                field: "price",
                reason: "not a decimal",
            })?;
        let new = NewProduct::new(
            Some(row.name),
            Some(price),
            Some(row.stock),
            Some(category_ids[row.category]),
            Some(row.tags.iter().map(|&i| tag_ids[i]).collect()),
        )?;
        let product = catalog.create_product(new).await?;
        product_tags += product.tags.len();
    }
    tracing::info!(count = PRODUCTS.len(), product_tags, "products seeded");

    Ok(SeedSummary {
        categories: category_ids.len(),
        products: PRODUCTS.len(),
        tags: tag_ids.len(),
        product_tags,
    })
}

/// Seed only when the store has no categories yet. `None` when skipped.
pub async fn seed_if_empty(catalog: &dyn Catalog) -> Result<Option<SeedSummary>, SeedError> {
    if !catalog.list_categories().await?.is_empty() {
        tracing::info!("Catalog already populated, skipping seed");
        return Ok(None);
    }

    seed(catalog, false).await.map(Some)
}
