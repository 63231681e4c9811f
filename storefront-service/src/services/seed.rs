//! Demo catalogue used by `POST /api/seed`.

use super::gateway::{DocumentGateway, Filter, GatewayError};
use crate::models::{Product, PRODUCT_COLLECTION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    Inserted(usize),
    AlreadySeeded,
}

pub fn demo_products() -> Vec<Product> {
    vec![
        Product {
            title: "Handcrafted Silk Scarf".to_string(),
            description: Some("Premium silk scarf with elegant patterns".to_string()),
            price: 1499.0,
            category: "Accessories".to_string(),
            in_stock: true,
            stock_qty: 25,
            image: Some(
                "https://images.unsplash.com/photo-1520975693411-b40e8f1de1e5?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            ),
        },
        Product {
            title: "Artisanal Pottery Vase".to_string(),
            description: Some("Handmade ceramic vase with glaze finish".to_string()),
            price: 2299.0,
            category: "Home Decor".to_string(),
            in_stock: true,
            stock_qty: 12,
            image: Some(
                "https://images.unsplash.com/photo-1519710164239-da123dc03ef4?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            ),
        },
        Product {
            title: "Embroidered Tote Bag".to_string(),
            description: Some("Canvas tote with traditional embroidery".to_string()),
            price: 999.0,
            category: "Bags".to_string(),
            in_stock: true,
            stock_qty: 40,
            image: Some(
                "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?q=80&w=1200&auto=format&fit=crop"
                    .to_string(),
            ),
        },
    ]
}

/// Insert the demo catalogue unless the product collection already has
/// anything in it.
pub async fn seed_products(gateway: &DocumentGateway) -> Result<SeedOutcome, GatewayError> {
    if gateway.count(PRODUCT_COLLECTION, Filter::new()).await? > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let inserted = gateway.insert_many(&demo_products()).await?;
    Ok(SeedOutcome::Inserted(inserted))
}
