//! Canonical starter dataset for first runs and demos.

use crate::error::Result;
use crate::models::{Broker, Holding, Portfolio, Product, ProductType};
use crate::store::{Slot, Store};

pub fn sample_brokers() -> Vec<Broker> {
    vec![
        Broker::new("IBK", "Interactive Brokers"),
        Broker::new("ETR", "eToro"),
        Broker::new("HPI", "Hapi"),
    ]
}

pub fn sample_product_types() -> Vec<ProductType> {
    vec![
        ProductType::new("ACC", "ACCION"),
        ProductType::new("BON", "BONO"),
        ProductType::new("CED", "CEDEAR"),
        ProductType::new("ETF", "ETF"),
        ProductType::new("LTR", "LETRA"),
        ProductType::new("MON", "MONEDA"),
        ProductType::new("ON", "OBLIGACION_NEGOCIABLE"),
        ProductType::new("OTR", "OTRO"),
    ]
}

pub fn sample_products() -> Vec<Product> {
    vec![
        Product::new("USD", "Dólar", Some("MON".to_string())),
        Product::new("APPL", "Apple Inc.", Some("ACC".to_string())),
        Product::new("TSL", "Tesla", Some("ACC".to_string())),
        Product::new("MSFT", "Microsoft Corporation", Some("ACC".to_string())),
        Product::new("GOOGL", "Alphabet Inc.", Some("ACC".to_string())),
        Product::new("AMZN", "Amazon.com Inc.", Some("ACC".to_string())),
    ]
}

pub fn sample_portfolios() -> Vec<Portfolio> {
    vec![
        Portfolio {
            id: "1".to_string(),
            name: "Interactive Brokers Portfolio".to_string(),
            broker_code: "IBK".to_string(),
            holdings: vec![
                holding("USD", 1200.0),
                holding("APPL", 5000.0),
                holding("AMZN", 3500.0),
            ],
        },
        Portfolio {
            id: "2".to_string(),
            name: "eToro Portfolio".to_string(),
            broker_code: "ETR".to_string(),
            holdings: vec![
                holding("USD", 10000.0),
                holding("TSL", 2000.0),
                holding("MSFT", 3000.0),
            ],
        },
    ]
}

fn holding(product_code: &str, amount: f64) -> Holding {
    Holding {
        product_code: product_code.to_string(),
        amount,
    }
}

/// Seed each collection that is currently empty. Collections that already
/// hold data are left alone.
pub fn seed_if_empty(store: &Store) -> Result<()> {
    if store.load::<Broker>(Slot::Brokers).is_empty() {
        store.save(Slot::Brokers, &sample_brokers())?;
        log::info!("Seeded sample brokers");
    }
    if store.load::<ProductType>(Slot::ProductTypes).is_empty() {
        store.save(Slot::ProductTypes, &sample_product_types())?;
        log::info!("Seeded sample product types");
    }
    if store.load::<Product>(Slot::Products).is_empty() {
        store.save(Slot::Products, &sample_products())?;
        log::info!("Seeded sample products");
    }
    if store.load::<Portfolio>(Slot::Portfolios).is_empty() {
        store.save(Slot::Portfolios, &sample_portfolios())?;
        log::info!("Seeded sample portfolios");
    }
    Ok(())
}
