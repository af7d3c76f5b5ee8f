//! Row types and association assembly
//!
//! Eager loading is explicit: a store fetches parent rows, fetches the
//! related rows by key, and hands both to one of the `attach_*` functions
//! here, which build the nested response shapes. Both catalog backends go
//! through the same assembly so their JSON is identical.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

/// `categories` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Category {
    pub id: i32,
    pub category_name: String,
}

/// `products` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Product {
    pub id: i32,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<i32>,
}

/// `tags` row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Tag {
    pub id: i32,
    pub tag_name: String,
}

/// Category with its products eagerly loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWithProducts {
    pub id: i32,
    pub category_name: String,
    pub products: Vec<Product>,
}

/// Product with its category and tags eagerly loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub id: i32,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i32,
    pub category_id: Option<i32>,
    pub category: Option<Category>,
    pub tags: Vec<Tag>,
}

/// Tag with its products eagerly loaded
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWithProducts {
    pub id: i32,
    pub tag_name: String,
    pub products: Vec<Product>,
}

/// Attach products to their categories by `category_id`.
///
/// Category order is preserved; products keep the order they arrive in.
pub fn attach_products(
    categories: Vec<Category>,
    products: Vec<Product>,
) -> Vec<CategoryWithProducts> {
    let mut by_category: HashMap<i32, Vec<Product>> = HashMap::new();
    for product in products {
        if let Some(category_id) = product.category_id {
            by_category.entry(category_id).or_default().push(product);
        }
    }

    categories
        .into_iter()
        .map(|c| CategoryWithProducts {
            products: by_category.remove(&c.id).unwrap_or_default(),
            id: c.id,
            category_name: c.category_name,
        })
        .collect()
}

/// Attach each product's category and tags.
///
/// `links` pairs a product id with one of its tags. A `category_id` with no
/// matching category yields `category: None`.
pub fn attach_category_and_tags(
    products: Vec<Product>,
    categories: Vec<Category>,
    links: Vec<(i32, Tag)>,
) -> Vec<ProductDetail> {
    let categories: HashMap<i32, Category> =
        categories.into_iter().map(|c| (c.id, c)).collect();

    let mut tags_by_product: HashMap<i32, Vec<Tag>> = HashMap::new();
    for (product_id, tag) in links {
        tags_by_product.entry(product_id).or_default().push(tag);
    }

    products
        .into_iter()
        .map(|p| ProductDetail {
            category: p.category_id.and_then(|id| categories.get(&id).cloned()),
            tags: tags_by_product.remove(&p.id).unwrap_or_default(),
            id: p.id,
            product_name: p.product_name,
            price: p.price,
            stock: p.stock,
            category_id: p.category_id,
        })
        .collect()
}

/// Attach products to tags. `links` pairs a tag id with one of its products.
pub fn attach_tag_products(tags: Vec<Tag>, links: Vec<(i32, Product)>) -> Vec<TagWithProducts> {
    let mut by_tag: HashMap<i32, Vec<Product>> = HashMap::new();
    for (tag_id, product) in links {
        by_tag.entry(tag_id).or_default().push(product);
    }

    tags.into_iter()
        .map(|t| TagWithProducts {
            products: by_tag.remove(&t.id).unwrap_or_default(),
            id: t.id,
            tag_name: t.tag_name,
        })
        .collect()
}

/// Distinct non-null category ids referenced by `products`.
pub(crate) fn referenced_categories(products: &[Product]) -> Vec<i32> {
    let mut ids: Vec<i32> = products.iter().filter_map(|p| p.category_id).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i32, category_id: Option<i32>) -> Product {
        Product {
            id,
            product_name: format!("product {id}"),
            price: Decimal::new(1000, 2),
            stock: 10,
            category_id,
        }
    }

    fn category(id: i32, name: &str) -> Category {
        Category {
            id,
            category_name: name.to_owned(),
        }
    }

    fn tag(id: i32, name: &str) -> Tag {
        Tag {
            id,
            tag_name: name.to_owned(),
        }
    }

    #[test]
    fn category_without_products_gets_empty_list() {
        let nested = attach_products(
            vec![category(1, "Shirts"), category(2, "Shorts")],
            vec![product(1, Some(1)), product(2, None)],
        );

        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].products.len(), 1);
        assert!(nested[1].products.is_empty());
    }

    #[test]
    fn product_detail_with_dangling_category() {
        let details = attach_category_and_tags(
            vec![product(1, Some(9)), product(2, Some(1))],
            vec![category(1, "Shirts")],
            vec![(2, tag(1, "blue")), (2, tag(2, "red"))],
        );

        assert_eq!(details[0].category, None);
        assert!(details[0].tags.is_empty());
        assert_eq!(details[1].category.as_ref().unwrap().category_name, "Shirts");
        assert_eq!(details[1].tags.len(), 2);
    }

    #[test]
    fn tag_products_grouped() {
        let nested = attach_tag_products(
            vec![tag(1, "blue"), tag(2, "red")],
            vec![(2, product(1, None)), (2, product(3, None))],
        );

        assert!(nested[0].products.is_empty());
        let ids: Vec<i32> = nested[1].products.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn category_json_shape() {
        let nested = attach_products(vec![category(4, "Hats")], vec![product(3, Some(4))]);
        let json = serde_json::to_value(&nested[0]).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "category_name": "Hats",
                "products": [{
                    "id": 3,
                    "product_name": "product 3",
                    "price": "10.00",
                    "stock": 10,
                    "category_id": 4
                }]
            })
        );
    }

    #[test]
    fn referenced_categories_distinct() {
        let ids = referenced_categories(&[
            product(1, Some(2)),
            product(2, None),
            product(3, Some(2)),
            product(4, Some(1)),
        ]);
        assert_eq!(ids, vec![1, 2]);
    }
}
