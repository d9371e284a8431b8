//! Default catalog used when the remote `products` collection is empty,
//! so a fresh deployment is browsable immediately.

use crate::error::AppResult;
use crate::gateway::{collections, DataGateway};
use serde_json::{json, Value};

fn default_catalog() -> Vec<Value> {
    vec![
        json!({
            "id": "prod_1",
            "name": "Premium Wireless Headphones",
            "price": 299.99,
            "description": "Immersive sound with active noise cancellation.",
            "detailedDescription": "Industry-leading noise cancellation, 30-hour battery life and plush ear cushions for all-day comfort.",
            "image": "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?q=80&w=1000&auto=format&fit=crop",
            "category": "Electronics",
            "stock": "in-stock",
            "specifications": { "Battery": "30h", "Connectivity": "Bluetooth 5.2" }
        }),
        json!({
            "id": "prod_2",
            "name": "Minimalist Smart Watch",
            "price": 199.50,
            "description": "Stay connected with style. Health tracking included.",
            "detailedDescription": "A sleek smartwatch that tracks heart rate, sleep and steps, with notifications on your wrist.",
            "image": "https://images.unsplash.com/photo-1523275335684-37898b6baf30?q=80&w=1000&auto=format&fit=crop",
            "category": "Electronics",
            "stock": "in-stock",
            "specifications": { "Water Resistance": "5ATM", "Sensors": "HR, SpO2" }
        }),
        json!({
            "id": "prod_3",
            "name": "Designer Denim Jacket",
            "price": 89.00,
            "description": "Classic vintage wash using sustainable cotton.",
            "detailedDescription": "Handcrafted details and premium denim. The sustainable wash process uses 50% less water.",
            "image": "https://images.unsplash.com/photo-1576871337632-b9aef4c17ab9?q=80&w=1000&auto=format&fit=crop",
            "category": "Fashion",
            "stock": "in-stock",
            "specifications": { "Material": "100% Cotton", "Fit": "Regular" }
        }),
        json!({
            "id": "prod_4",
            "name": "Ergonomic Office Chair",
            "price": 349.00,
            "description": "Work in comfort with full lumbar support.",
            "detailedDescription": "Fully adjustable armrests, height and lumbar support for long days at a desk.",
            "image": "https://images.unsplash.com/photo-1505843490538-5133c6c7d0e1?q=80&w=1000&auto=format&fit=crop",
            "category": "Home",
            "stock": "low-stock",
            "specifications": { "Material": "Mesh & Alloy", "Max Load": "150kg" }
        }),
        json!({
            "id": "prod_5",
            "name": "Professional DSLR Camera",
            "price": 1499.00,
            "description": "Capture life in stunning 4K detail.",
            "detailedDescription": "Professional-grade sensor and image processor, with an 18-55mm kit lens included.",
            "image": "https://images.unsplash.com/photo-1516035069371-29a1b244cc32?q=80&w=1000&auto=format&fit=crop",
            "category": "Electronics",
            "stock": "in-stock",
            "specifications": { "Iso": "100-25600", "Video": "4K 60fps" }
        }),
        json!({
            "id": "prod_6",
            "name": "Italian Leather Handbag",
            "price": 250.00,
            "description": "Timeless elegance for the modern woman.",
            "detailedDescription": "Genuine Italian leather with gold-tone hardware and multiple compartments.",
            "image": "https://images.unsplash.com/photo-1584917865442-de89df76afd3?q=80&w=1000&auto=format&fit=crop",
            "category": "Fashion",
            "stock": "in-stock",
            "specifications": { "Material": "Leather", "Dimensions": "30x25x10cm" }
        }),
    ]
}

pub async fn seed_products_if_empty<G: DataGateway>(gateway: &G) -> AppResult<()> {
    let existing = gateway.select(collections::PRODUCTS, &[]).await?;
    if !existing.is_empty() {
        return Ok(());
    }
    log::info!("Seeding default product catalog");
    for row in default_catalog() {
        gateway.insert(collections::PRODUCTS, row).await?;
    }
    Ok(())
}
