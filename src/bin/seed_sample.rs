//! Seed the default data store with the starter dataset.
//!
//! Run with: cargo run --bin seed_sample

use anyhow::{anyhow, Result};
use portfolio_keeper::models::{Broker, Portfolio, Product, ProductType};
use portfolio_keeper::sample;
use portfolio_keeper::store::{FileStore, Slot, Store};

fn main() -> Result<()> {
    env_logger::init();

    let dir = FileStore::default_dir().ok_or_else(|| anyhow!("No platform data directory"))?;
    println!("Data directory: {}", dir.display());

    let store = Store::new(FileStore::new(&dir)?);
    sample::seed_if_empty(&store)?;

    println!("Brokers: {}", store.load::<Broker>(Slot::Brokers).len());
    println!(
        "Product types: {}",
        store.load::<ProductType>(Slot::ProductTypes).len()
    );
    println!("Products: {}", store.load::<Product>(Slot::Products).len());
    println!(
        "Portfolios: {}",
        store.load::<Portfolio>(Slot::Portfolios).len()
    );

    Ok(())
}
