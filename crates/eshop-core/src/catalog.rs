//! # Static Catalog
//!
//! Product and category lookup tables.
//!
//! The catalog is static data compiled into the binary: there is no catalog
//! database and no catalog API. Lookups are synchronous and pure, which is
//! what the cart and checkout layers expect from a catalog collaborator.
//!
//! The tables are built once on first access and cached for the life of
//! the process.

use std::sync::OnceLock;

use crate::types::{Category, Product};

// =============================================================================
// Data
// =============================================================================

fn categories() -> &'static [Category] {
    static CATEGORIES: OnceLock<Vec<Category>> = OnceLock::new();
    CATEGORIES.get_or_init(|| {
        vec![
            category("electronics", "Electronics", "Latest tech gadgets and devices", "📱"),
            category("audio", "Audio", "Premium headphones and speakers", "🎧"),
            category("wearables", "Wearables", "Smartwatches and fitness trackers", "⌚"),
            category("accessories", "Accessories", "Essential tech accessories", "🔌"),
        ]
    })
}

fn products() -> &'static [Product] {
    static PRODUCTS: OnceLock<Vec<Product>> = OnceLock::new();
    PRODUCTS.get_or_init(|| {
        vec![
            product(
                "1",
                "Premium Wireless Headphones",
                29999,
                "product-headphones.jpg",
                "audio",
                "High-quality wireless headphones with active noise cancellation and premium sound quality.",
                4.8,
                324,
            ),
            product(
                "2",
                "Smart Fitness Watch",
                24999,
                "product-smartwatch.jpg",
                "wearables",
                "Advanced fitness tracking with heart rate monitoring, GPS, and long-lasting battery life.",
                4.6,
                189,
            ),
            product(
                "3",
                "Wireless Charging Station",
                8999,
                "product-charger.jpg",
                "accessories",
                "Fast wireless charging for multiple devices with sleek, modern design.",
                4.5,
                95,
            ),
            product(
                "4",
                "Ultra-Slim Laptop",
                129999,
                "product-laptop.jpg",
                "electronics",
                "Powerful performance in an ultra-thin design. Perfect for professionals and creators.",
                4.9,
                156,
            ),
            product(
                "5",
                "Professional Camera Lens",
                59999,
                "product-laptop.jpg",
                "electronics",
                "Professional-grade lens with superior optics for stunning photography.",
                4.7,
                78,
            ),
            product(
                "6",
                "Gaming Mechanical Keyboard",
                15999,
                "product-charger.jpg",
                "accessories",
                "RGB backlit mechanical keyboard designed for gaming and productivity.",
                4.4,
                203,
            ),
            product(
                "7",
                "Wireless Earbuds Pro",
                19999,
                "product-headphones.jpg",
                "audio",
                "True wireless earbuds with spatial audio and long battery life.",
                4.6,
                412,
            ),
            product(
                "8",
                "Smart Home Speaker",
                14999,
                "product-smartwatch.jpg",
                "audio",
                "Voice-controlled smart speaker with premium sound quality.",
                4.3,
                267,
            ),
            product(
                "9",
                "Fitness Tracker Band",
                7999,
                "product-smartwatch.jpg",
                "wearables",
                "Lightweight fitness tracker with sleep monitoring and water resistance.",
                4.2,
                158,
            ),
            product(
                "10",
                "USB-C Hub Pro",
                6999,
                "product-charger.jpg",
                "accessories",
                "Multi-port USB-C hub with HDMI, USB 3.0, and power delivery.",
                4.5,
                89,
            ),
            product(
                "11",
                "4K Gaming Monitor",
                44999,
                "product-laptop.jpg",
                "electronics",
                "27-inch 4K monitor with 144Hz refresh rate for gaming and productivity.",
                4.8,
                134,
            ),
            product(
                "12",
                "Wireless Mouse Pro",
                8999,
                "product-charger.jpg",
                "accessories",
                "Precision wireless mouse with customizable buttons and RGB lighting.",
                4.4,
                276,
            ),
        ]
    })
}

fn category(id: &str, name: &str, description: &str, icon: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
    }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: &str,
    name: &str,
    price_cents: i64,
    image: &str,
    category: &str,
    description: &str,
    rating: f64,
    reviews: u32,
) -> Product {
    Product {
        id: id.to_string(),
        name: name.to_string(),
        price_cents,
        image: image.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        rating: Some(rating),
        reviews: Some(reviews),
    }
}

// =============================================================================
// Lookup API
// =============================================================================

/// Returns every product in the catalog.
pub fn all_products() -> &'static [Product] {
    products()
}

/// Returns every category.
pub fn all_categories() -> &'static [Category] {
    categories()
}

/// Point lookup by product id.
pub fn get_product_by_id(product_id: &str) -> Option<&'static Product> {
    products().iter().find(|p| p.id == product_id)
}

/// Returns all products in a category.
pub fn get_products_by_category(category_id: &str) -> Vec<&'static Product> {
    products().iter().filter(|p| p.category == category_id).collect()
}

/// Point lookup by category id.
pub fn get_category_by_id(category_id: &str) -> Option<&'static Category> {
    categories().iter().find(|c| c.id == category_id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_product_by_id() {
        let product = get_product_by_id("1").unwrap();
        assert_eq!(product.name, "Premium Wireless Headphones");
        assert_eq!(product.price_cents, 29999);
    }

    #[test]
    fn test_get_product_by_id_missing() {
        assert!(get_product_by_id("does-not-exist").is_none());
    }

    #[test]
    fn test_products_by_category() {
        let audio = get_products_by_category("audio");
        assert!(!audio.is_empty());
        assert!(audio.iter().all(|p| p.category == "audio"));
    }

    #[test]
    fn test_every_product_has_a_known_category() {
        for product in all_products() {
            assert!(
                get_category_by_id(&product.category).is_some(),
                "product {} references unknown category {}",
                product.id,
                product.category
            );
        }
    }
}
