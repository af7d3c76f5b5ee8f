//! In-process catalog
//!
//! Mirrors the PostgreSQL schema rules so the HTTP layer behaves the same
//! against either backend: serial ids starting at 1, foreign keys checked
//! on write, `ON DELETE SET NULL` for a product's category and
//! `ON DELETE CASCADE` for tag links.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::catalog::Catalog;
use super::records::{
    attach_category_and_tags, attach_products, attach_tag_products, referenced_categories,
    Category, CategoryWithProducts, Product, ProductDetail, Tag, TagWithProducts,
};
use super::DbError;
use crate::models::{CategoryName, NewProduct, ProductChanges, TagIds, TagName};

#[derive(Default)]
struct Tables {
    categories: BTreeMap<i32, Category>,
    products: BTreeMap<i32, Product>,
    tags: BTreeMap<i32, Tag>,
    /// (product_id, tag_id)
    product_tags: BTreeSet<(i32, i32)>,
    category_seq: i32,
    product_seq: i32,
    tag_seq: i32,
}

fn next_id(seq: &mut i32) -> i32 {
    *seq += 1;
    *seq
}

impl Tables {
    fn check_category(&self, category_id: Option<i32>) -> Result<(), DbError> {
        match category_id {
            Some(id) if !self.categories.contains_key(&id) => Err(DbError::Constraint {
                message: format!("products.category_id references missing category {id}"),
            }),
            _ => Ok(()),
        }
    }

    fn check_tags(&self, tag_ids: &TagIds) -> Result<(), DbError> {
        match tag_ids.as_slice().iter().find(|id| !self.tags.contains_key(*id)) {
            Some(id) => Err(DbError::Constraint {
                message: format!("product_tags.tag_id references missing tag {id}"),
            }),
            None => Ok(()),
        }
    }

    fn categories_with_products(&self, categories: Vec<Category>) -> Vec<CategoryWithProducts> {
        let products = self.products.values().cloned().collect();
        attach_products(categories, products)
    }

    fn product_details(&self, products: Vec<Product>) -> Vec<ProductDetail> {
        let categories = referenced_categories(&products)
            .into_iter()
            .filter_map(|id| self.categories.get(&id).cloned())
            .collect();

        let links = products
            .iter()
            .flat_map(|p| {
                self.product_tags
                    .range((p.id, i32::MIN)..=(p.id, i32::MAX))
                    .filter_map(|&(product_id, tag_id)| {
                        self.tags.get(&tag_id).map(|t| (product_id, t.clone()))
                    })
            })
            .collect();

        attach_category_and_tags(products, categories, links)
    }

    fn tags_with_products(&self, tags: Vec<Tag>) -> Vec<TagWithProducts> {
        let mut links: Vec<(i32, Product)> = self
            .product_tags
            .iter()
            .filter(|(_, tag_id)| tags.iter().any(|t| t.id == *tag_id))
            .filter_map(|&(product_id, tag_id)| {
                self.products.get(&product_id).map(|p| (tag_id, p.clone()))
            })
            .collect();
        links.sort_by_key(|(_, p)| p.id);

        attach_tag_products(tags, links)
    }

    fn replace_tags(&mut self, product_id: i32, tag_ids: &TagIds) {
        self.product_tags.retain(|&(p, _)| p != product_id);
        self.product_tags
            .extend(tag_ids.as_slice().iter().map(|&t| (product_id, t)));
    }
}

/// Catalog held in memory behind an async `RwLock`
#[derive(Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn list_categories(&self) -> Result<Vec<CategoryWithProducts>, DbError> {
        let tables = self.tables.read().await;
        let categories = tables.categories.values().cloned().collect();
        Ok(tables.categories_with_products(categories))
    }

    async fn get_category(&self, id: i32) -> Result<Option<CategoryWithProducts>, DbError> {
        let tables = self.tables.read().await;
        let Some(category) = tables.categories.get(&id).cloned() else {
            return Ok(None);
        };
        Ok(tables.categories_with_products(vec![category]).pop())
    }

    async fn create_category(&self, name: CategoryName) -> Result<Category, DbError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.category_seq);
        let category = Category {
            id,
            category_name: name.into_string(),
        };
        tables.categories.insert(id, category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: i32,
        name: CategoryName,
    ) -> Result<Option<Category>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.categories.get_mut(&id).map(|c| {
            c.category_name = name.into_string();
            c.clone()
        }))
    }

    async fn delete_category(&self, id: i32) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(0);
        }
        for product in tables.products.values_mut() {
            if product.category_id == Some(id) {
                product.category_id = None;
            }
        }
        Ok(1)
    }

    async fn list_products(&self) -> Result<Vec<ProductDetail>, DbError> {
        let tables = self.tables.read().await;
        let products = tables.products.values().cloned().collect();
        Ok(tables.product_details(products))
    }

    async fn get_product(&self, id: i32) -> Result<Option<ProductDetail>, DbError> {
        let tables = self.tables.read().await;
        let Some(product) = tables.products.get(&id).cloned() else {
            return Ok(None);
        };
        Ok(tables.product_details(vec![product]).pop())
    }

    async fn create_product(&self, new: NewProduct) -> Result<ProductDetail, DbError> {
        let mut tables = self.tables.write().await;
        tables.check_category(new.category_id)?;
        tables.check_tags(&new.tag_ids)?;

        let id = next_id(&mut tables.product_seq);
        let product = Product {
            id,
            product_name: new.product_name.as_str().to_owned(),
            price: new.price.value(),
            stock: new.stock.value(),
            category_id: new.category_id,
        };
        tables.products.insert(id, product.clone());
        tables.replace_tags(id, &new.tag_ids);

        tables
            .product_details(vec![product])
            .pop()
            .ok_or_else(|| DbError::Sqlx(sqlx::Error::RowNotFound))
    }

    async fn update_product(
        &self,
        id: i32,
        changes: ProductChanges,
    ) -> Result<Option<ProductDetail>, DbError> {
        let mut tables = self.tables.write().await;
        if !tables.products.contains_key(&id) {
            return Ok(None);
        }
        tables.check_category(changes.category_id)?;
        if let Some(tag_ids) = &changes.tag_ids {
            tables.check_tags(tag_ids)?;
        }

        let Some(product) = tables.products.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = &changes.product_name {
            product.product_name = name.as_str().to_owned();
        }
        if let Some(price) = changes.price {
            product.price = price.value();
        }
        if let Some(stock) = changes.stock {
            product.stock = stock.value();
        }
        if let Some(category_id) = changes.category_id {
            product.category_id = Some(category_id);
        }
        let product = product.clone();

        if let Some(tag_ids) = &changes.tag_ids {
            tables.replace_tags(id, tag_ids);
        }

        Ok(tables.product_details(vec![product]).pop())
    }

    async fn delete_product(&self, id: i32) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        if tables.products.remove(&id).is_none() {
            return Ok(0);
        }
        tables.product_tags.retain(|&(p, _)| p != id);
        Ok(1)
    }

    async fn list_tags(&self) -> Result<Vec<TagWithProducts>, DbError> {
        let tables = self.tables.read().await;
        let tags = tables.tags.values().cloned().collect();
        Ok(tables.tags_with_products(tags))
    }

    async fn get_tag(&self, id: i32) -> Result<Option<TagWithProducts>, DbError> {
        let tables = self.tables.read().await;
        let Some(tag) = tables.tags.get(&id).cloned() else {
            return Ok(None);
        };
        Ok(tables.tags_with_products(vec![tag]).pop())
    }

    async fn create_tag(&self, name: TagName) -> Result<Tag, DbError> {
        let mut tables = self.tables.write().await;
        let id = next_id(&mut tables.tag_seq);
        let tag = Tag {
            id,
            tag_name: name.as_str().to_owned(),
        };
        tables.tags.insert(id, tag.clone());
        Ok(tag)
    }

    async fn update_tag(&self, id: i32, name: TagName) -> Result<Option<Tag>, DbError> {
        let mut tables = self.tables.write().await;
        Ok(tables.tags.get_mut(&id).map(|t| {
            t.tag_name = name.as_str().to_owned();
            t.clone()
        }))
    }

    async fn delete_tag(&self, id: i32) -> Result<u64, DbError> {
        let mut tables = self.tables.write().await;
        if tables.tags.remove(&id).is_none() {
            return Ok(0);
        }
        tables.product_tags.retain(|&(_, t)| t != id);
        Ok(1)
    }

    async fn truncate(&self) -> Result<(), DbError> {
        *self.tables.write().await = Tables::default();
        Ok(())
    }

    async fn ping(&self) -> Result<(), DbError> {
        Ok(())
    }
}
