pub mod cart;

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::catalog::{CatalogEntity, FilterCriteria, SortField};
pub use cart::{Cart, CartLine};

pub type ProductCriteria = FilterCriteria<ProductCategory, String>;

/// An exact dollar amount, kept in cents.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
pub struct Money {
    cents: u64,
}

impl Money {
    pub const ZERO: Money = Money { cents: 0 };

    pub const fn from_cents(cents: u64) -> Self {
        Self { cents }
    }

    pub fn cents(&self) -> u64 {
        self.cents
    }

    pub fn times(&self, quantity: u32) -> Self {
        Self::from_cents(self.cents * u64::from(quantity))
    }

    pub fn as_dollars(&self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Money {
        Money::from_cents(self.cents + rhs.cents)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${}.{:02}", self.cents / 100, self.cents % 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ProductCategory {
    Clothing,
    Accessories,
    Books,
    Jewelry,
    Stationery,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 5] = [
        ProductCategory::Clothing,
        ProductCategory::Accessories,
        ProductCategory::Books,
        ProductCategory::Jewelry,
        ProductCategory::Stationery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ProductCategory::Clothing => "Clothing",
            ProductCategory::Accessories => "Accessories",
            ProductCategory::Books => "Books",
            ProductCategory::Jewelry => "Jewelry",
            ProductCategory::Stationery => "Stationery",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: Money,
    /// Pre-discount price, when the product is on sale.
    pub original_price: Option<Money>,
    pub emoji: String,
    pub category: ProductCategory,
    pub conservation_impact: String,
    pub rating: f64,
    pub reviews: u32,
    pub in_stock: bool,
    pub tags: Vec<String>,
}

impl CatalogEntity for Product {
    type Category = ProductCategory;
    /// Products are narrowed by tag.
    type Status = String;

    fn searchable_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.description.as_str()]
    }

    fn category(&self) -> &ProductCategory {
        &self.category
    }

    fn matches_status(&self, tag: &String) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    fn sort_value(&self, field: SortField) -> Option<f64> {
        match field {
            SortField::Price => Some(self.price.as_dollars()),
            SortField::Rating => Some(self.rating),
            SortField::Reviews => Some(f64::from(self.reviews)),
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: u32,
    name: &str,
    description: &str,
    (price, original_price): (u64, Option<u64>),
    emoji: &str,
    category: ProductCategory,
    conservation_impact: &str,
    (rating, reviews): (f64, u32),
    tags: [&str; 3],
) -> Product {
    Product {
        id,
        name: name.to_string(),
        description: description.to_string(),
        price: Money::from_cents(price),
        original_price: original_price.map(Money::from_cents),
        emoji: emoji.to_string(),
        category,
        conservation_impact: conservation_impact.to_string(),
        rating,
        reviews,
        in_stock: true,
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

/// The conservation merchandise sold in the shop.
pub fn conservation_products() -> Vec<Product> {
    use ProductCategory::*;

    vec![
        product(
            1,
            "Wildlife Conservation T-Shirt",
            "100% organic cotton t-shirt featuring endangered animal designs. Each purchase helps protect wildlife habitats.",
            (2999, Some(3999)),
            "👕",
            Clothing,
            "Protects 100 sq ft of wildlife habitat",
            (4.8, 127),
            ["Organic", "Eco-friendly", "Conservation"],
        ),
        product(
            2,
            "Reusable Water Bottle",
            "Stainless steel water bottle with endangered animal engravings. Reduces plastic waste and supports conservation.",
            (2499, None),
            "💧",
            Accessories,
            "Prevents 167 plastic bottles from entering oceans",
            (4.9, 89),
            ["Reusable", "Ocean-friendly", "Durable"],
        ),
        product(
            3,
            "Conservation Journal",
            "Beautiful leather-bound journal with wildlife photography. Perfect for documenting your conservation journey.",
            (1999, None),
            "📔",
            Books,
            "Funds 1 day of anti-poaching patrol",
            (4.7, 56),
            ["Handcrafted", "Educational", "Inspirational"],
        ),
        product(
            4,
            "Eco-Friendly Tote Bag",
            "Canvas tote bag with endangered species artwork. Made from recycled materials and supports habitat restoration.",
            (1599, None),
            "👜",
            Accessories,
            "Restores 50 sq ft of forest habitat",
            (4.6, 203),
            ["Recycled", "Forest-friendly", "Versatile"],
        ),
        product(
            5,
            "Wildlife Photography Book",
            "Stunning collection of endangered animal photographs with conservation stories. Hardcover with premium quality.",
            (3499, None),
            "📸",
            Books,
            "Supports 1 week of research funding",
            (4.9, 78),
            ["Photography", "Educational", "Collector"],
        ),
        product(
            6,
            "Conservation Bracelet",
            "Handmade bracelet with natural stones and endangered animal charms. Each piece supports specific species.",
            (1299, None),
            "💍",
            Jewelry,
            "Protects 1 endangered animal for 1 month",
            (4.5, 142),
            ["Handmade", "Natural", "Charitable"],
        ),
        product(
            7,
            "Eco-Friendly Notebook Set",
            "Set of 3 notebooks made from recycled paper with endangered animal covers. Perfect for students and professionals.",
            (1899, None),
            "📚",
            Stationery,
            "Saves 3 trees from being cut down",
            (4.7, 95),
            ["Recycled", "Educational", "Professional"],
        ),
        product(
            8,
            "Wildlife Conservation Hoodie",
            "Warm, comfortable hoodie with embroidered endangered animal designs. Made from sustainable materials.",
            (4999, None),
            "🧥",
            Clothing,
            "Funds 1 week of habitat monitoring",
            (4.8, 67),
            ["Sustainable", "Warm", "Comfortable"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{filter, Selector, SortKey};

    fn ids(products: &[&Product]) -> Vec<u32> {
        products.iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_money_display() {
        assert_eq!(Money::from_cents(8497).to_string(), "$84.97");
        assert_eq!(Money::from_cents(5).to_string(), "$0.05");
        assert_eq!(Money::ZERO.to_string(), "$0.00");
        assert_eq!(Money::from_cents(2999).times(3), Money::from_cents(8997));
    }

    #[test]
    fn test_search_covers_description() {
        let products = conservation_products();
        let criteria = ProductCriteria {
            query: "recycled".to_string(),
            ..ProductCriteria::default()
        };

        assert_eq!(ids(&filter(&products, &criteria)), vec![4, 7]);
    }

    #[test]
    fn test_category_and_tag_filters() {
        let products = conservation_products();
        let criteria = ProductCriteria {
            category: Selector::Only(ProductCategory::Books),
            status: Selector::Only("Educational".to_string()),
            ..ProductCriteria::default()
        };

        assert_eq!(ids(&filter(&products, &criteria)), vec![3, 5]);
    }

    #[test]
    fn test_storefront_sort_orders() {
        let products = conservation_products();
        let sorted = |label: &str| {
            let criteria = ProductCriteria {
                sort: SortKey::from_label(label).unwrap(),
                ..ProductCriteria::default()
            };
            ids(&filter(&products, &criteria))
        };

        assert_eq!(sorted("featured"), vec![1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(sorted("price-low"), vec![6, 4, 7, 3, 2, 1, 5, 8]);
        assert_eq!(sorted("price-high"), vec![8, 5, 1, 2, 3, 7, 4, 6]);
        // 4.9 ties keep catalog order: bottle before book
        assert_eq!(sorted("rating"), vec![2, 5, 1, 8, 3, 7, 4, 6]);
        assert_eq!(sorted("reviews"), vec![4, 6, 1, 7, 2, 5, 8, 3]);
    }

    #[test]
    fn test_category_labels() {
        assert_eq!(ProductCategory::from_label("Jewelry"), Some(ProductCategory::Jewelry));
        assert_eq!(ProductCategory::from_label("All"), None);
    }
}
