//! Product field validation
//!
//! A [`NewProduct`] or [`ProductChanges`] can only be built from input that
//! satisfies the `products` column rules, so the store never sees a row it
//! would have to reject on shape alone.

use rust_decimal::Decimal;

use super::validation::{validated_name, ValidationError};
use crate::schema::DEFAULT_STOCK;

/// Validated product name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(s: &str) -> Result<Self, ValidationError> {
        validated_name("product_name", s).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Non-negative unit price
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    /// # Example
    /// ```
    /// use rust_decimal::Decimal;
    /// use storefront_server::models::Price;
    ///
    /// assert!(Price::new(Decimal::new(1499, 2)).is_ok());
    /// assert!(Price::new(Decimal::new(-1, 0)).is_err());
    /// ```
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ValidationError::Negative { field: "price" });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

/// Non-negative stock count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stock(i32);

impl Stock {
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value < 0 {
            return Err(ValidationError::Negative { field: "stock" });
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

impl Default for Stock {
    fn default() -> Self {
        Self(DEFAULT_STOCK)
    }
}

/// Set of tag ids, sorted with duplicates removed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIds(Vec<i32>);

impl TagIds {
    pub fn new(mut ids: Vec<i32>) -> Self {
        ids.sort_unstable();
        ids.dedup();
        Self(ids)
    }

    pub fn as_slice(&self) -> &[i32] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A product ready to insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub product_name: ProductName,
    pub price: Price,
    pub stock: Stock,
    pub category_id: Option<i32>,
    pub tag_ids: TagIds,
}

impl NewProduct {
    /// Validate raw create input.
    ///
    /// `product_name` and `price` are required; `stock` falls back to
    /// [`DEFAULT_STOCK`].
    pub fn new(
        product_name: Option<&str>,
        price: Option<Decimal>,
        stock: Option<i32>,
        category_id: Option<i32>,
        tag_ids: Option<Vec<i32>>,
    ) -> Result<Self, ValidationError> {
        let product_name = product_name.ok_or(ValidationError::Missing {
            field: "product_name",
        })?;
        let price = price.ok_or(ValidationError::Missing { field: "price" })?;

        Ok(Self {
            product_name: ProductName::new(product_name)?,
            price: Price::new(price)?,
            stock: stock.map(Stock::new).transpose()?.unwrap_or_default(),
            category_id,
            tag_ids: TagIds::new(tag_ids.unwrap_or_default()),
        })
    }
}

/// Partial update of a product; `None` leaves the column unchanged
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub product_name: Option<ProductName>,
    pub price: Option<Price>,
    pub stock: Option<Stock>,
    pub category_id: Option<i32>,
    /// Replaces the product's whole tag set when present
    pub tag_ids: Option<TagIds>,
}

impl ProductChanges {
    pub fn new(
        product_name: Option<&str>,
        price: Option<Decimal>,
        stock: Option<i32>,
        category_id: Option<i32>,
        tag_ids: Option<Vec<i32>>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            product_name: product_name.map(ProductName::new).transpose()?,
            price: price.map(Price::new).transpose()?,
            stock: stock.map(Stock::new).transpose()?,
            category_id,
            tag_ids: tag_ids.map(TagIds::new),
        })
    }
}
