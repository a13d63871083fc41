//! Write a dated JSON backup of all four collections.
//!
//! Run with: cargo run --bin export_backup [target-dir]

use std::env;
use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use chrono::Utc;
use portfolio_keeper::store::{FileStore, Store};
use portfolio_keeper::transfer;

fn main() -> Result<()> {
    env_logger::init();

    let target = match env::args().nth(1) {
        Some(dir) => PathBuf::from(dir),
        None => env::current_dir()?,
    };

    let dir = FileStore::default_dir().ok_or_else(|| anyhow!("No platform data directory"))?;
    let store = Store::new(FileStore::new(&dir)?);

    let export = transfer::export_all(&store);
    println!("Brokers: {}", export.brokers.len());
    println!("Product types: {}", export.product_types.len());
    println!("Products: {}", export.products.len());
    println!("Portfolios: {}", export.portfolios.len());

    let json = transfer::export_json(&store)?;
    let path = target.join(transfer::backup_file_name(Utc::now().date_naive()));
    fs::write(&path, json)?;
    println!("Backup written to {}", path.display());

    Ok(())
}
