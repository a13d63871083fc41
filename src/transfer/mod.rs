//! Whole-store export and import as a single JSON document.
//!
//! The document carries all four collections plus an export timestamp and
//! a format version. Import validates and decodes everything before
//! writing anything, so a rejected document leaves every slot untouched.

use chrono::{NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::io;

use crate::error::{Error, Result};
use crate::models::{Broker, Portfolio, Product, ProductType};
use crate::store::{Slot, Store};

/// Carried through on export; import accepts any value here.
pub const FORMAT_VERSION: &str = "1.0";

const REQUIRED_SECTIONS: [&str; 4] = ["brokers", "products", "productTypes", "portfolios"];

/// The complete backup document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataExport {
    pub brokers: Vec<Broker>,
    pub products: Vec<Product>,
    pub product_types: Vec<ProductType>,
    pub portfolios: Vec<Portfolio>,
    #[serde(default)]
    pub export_date: String,
    #[serde(default)]
    pub version: String,
}

/// Per-collection record counts reported after a successful import.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportCounts {
    pub brokers: usize,
    pub products: usize,
    pub product_types: usize,
    pub portfolios: usize,
}

/// Snapshot the four collections into one document.
pub fn export_all(store: &Store) -> DataExport {
    DataExport {
        brokers: store.load(Slot::Brokers),
        products: store.load(Slot::Products),
        product_types: store.load(Slot::ProductTypes),
        portfolios: store.load(Slot::Portfolios),
        export_date: Utc::now().to_rfc3339(),
        version: FORMAT_VERSION.to_string(),
    }
}

/// Snapshot rendered as pretty-printed JSON, ready to write to a file.
pub fn export_json(store: &Store) -> Result<String> {
    serde_json::to_string_pretty(&export_all(store)).map_err(|err| Error::Storage(io::Error::from(err)))
}

/// Validate a backup document and replace all four collections with its
/// contents. Everything is decoded up front; the first problem aborts the
/// import with a [`Error::Format`] and no slot is written.
pub fn import_json(store: &Store, json: &str) -> Result<ImportCounts> {
    let document: Value =
        serde_json::from_str(json).map_err(|err| Error::Format(err.to_string()))?;
    let object = document
        .as_object()
        .ok_or_else(|| Error::Format("document must be a JSON object".to_string()))?;

    for key in REQUIRED_SECTIONS {
        match object.get(key) {
            None => return Err(Error::Format("missing required sections".to_string())),
            Some(value) if !value.is_array() => {
                return Err(Error::Format("sections must be arrays".to_string()))
            }
            Some(_) => {}
        }
    }

    let brokers: Vec<Broker> = decode_section(object, "brokers")?;
    let products: Vec<Product> = decode_section(object, "products")?;
    let product_types: Vec<ProductType> = decode_section(object, "productTypes")?;
    let portfolios: Vec<Portfolio> = decode_section(object, "portfolios")?;

    store.save(Slot::Brokers, &brokers)?;
    store.save(Slot::Products, &products)?;
    store.save(Slot::ProductTypes, &product_types)?;
    store.save(Slot::Portfolios, &portfolios)?;

    let counts = ImportCounts {
        brokers: brokers.len(),
        products: products.len(),
        product_types: product_types.len(),
        portfolios: portfolios.len(),
    };
    log::info!(
        "Imported {} brokers, {} products, {} product types, {} portfolios",
        counts.brokers,
        counts.products,
        counts.product_types,
        counts.portfolios
    );
    Ok(counts)
}

fn decode_section<T: DeserializeOwned>(object: &Map<String, Value>, key: &str) -> Result<Vec<T>> {
    serde_json::from_value(object[key].clone())
        .map_err(|err| Error::Format(format!("invalid {} records: {}", key, err)))
}

/// Conventional backup file name, e.g. `20260807-portfolio-data-backup.json`.
pub fn backup_file_name(date: NaiveDate) -> String {
    format!("{}-portfolio-data-backup.json", date.format("%Y%m%d"))
}
