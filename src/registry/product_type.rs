use std::rc::Rc;

use crate::error::{Error, Result};
use crate::models::{Product, ProductType};
use crate::store::{Slot, Store};

/// Sentinel for products that carry no type at all.
pub const NO_TYPE: &str = "No Type";
/// Sentinel for type codes that no longer resolve.
pub const UNKNOWN_TYPE: &str = "Unknown Type";

/// Resolve an optional type code against a plain slice. Never fails:
/// absent codes yield "No Type", dangling ones "Unknown Type".
pub fn resolve_type_name<'a>(types: &'a [ProductType], code: Option<&str>) -> &'a str {
    let code = match code {
        Some(code) if !code.trim().is_empty() => code,
        _ => return NO_TYPE,
    };
    types
        .iter()
        .find(|t| t.code == code)
        .map(|t| t.name.as_str())
        .unwrap_or(UNKNOWN_TYPE)
}

/// The product type reference list. Unlike brokers, removal is guarded:
/// a type still referenced by products cannot be deleted.
pub struct ProductTypeRegistry {
    store: Rc<Store>,
    types: Vec<ProductType>,
}

impl ProductTypeRegistry {
    pub fn load(store: Rc<Store>) -> Self {
        let types = store.load(Slot::ProductTypes);
        Self { store, types }
    }

    pub fn list(&self) -> &[ProductType] {
        &self.types
    }

    pub fn get(&self, code: &str) -> Option<&ProductType> {
        self.types.iter().find(|t| t.code == code)
    }

    pub fn type_name(&self, code: Option<&str>) -> &str {
        resolve_type_name(&self.types, code)
    }

    pub fn add(&mut self, code: &str, name: &str) -> Result<ProductType> {
        let code = code.trim();
        let name = name.trim();
        if code.is_empty() {
            return Err(Error::blank("Product type code"));
        }
        if name.is_empty() {
            return Err(Error::blank("Product type name"));
        }
        if self.get(code).is_some() {
            return Err(Error::DuplicateKey {
                entity: "Product type",
                code: code.to_string(),
            });
        }

        let product_type = ProductType::new(code, name);
        self.types.push(product_type.clone());
        self.persist()?;
        log::info!("Added product type {}", code);
        Ok(product_type)
    }

    pub fn update(&mut self, code: &str, name: &str) -> Result<ProductType> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::blank("Product type name"));
        }

        let product_type = self
            .types
            .iter_mut()
            .find(|t| t.code == code)
            .ok_or_else(|| Error::NotFound {
                entity: "Product type",
                key: code.to_string(),
            })?;
        product_type.name = name.to_string();
        let updated = product_type.clone();

        self.persist()?;
        log::info!("Updated product type {}", code);
        Ok(updated)
    }

    /// Remove a type. Fails while any of the given products still
    /// references it, reporting how many do.
    pub fn remove(&mut self, code: &str, products: &[Product]) -> Result<ProductType> {
        let index = self
            .types
            .iter()
            .position(|t| t.code == code)
            .ok_or_else(|| Error::NotFound {
                entity: "Product type",
                key: code.to_string(),
            })?;

        let dependents = products
            .iter()
            .filter(|p| p.type_code.as_deref() == Some(code))
            .count();
        if dependents > 0 {
            return Err(Error::InUse {
                entity: "product type",
                code: code.to_string(),
                count: dependents,
            });
        }

        let removed = self.types.remove(index);
        self.persist()?;
        log::info!("Removed product type {}", code);
        Ok(removed)
    }

    /// Re-read the collection from the gateway, e.g. after a bulk import.
    pub fn reload(&mut self) {
        self.types = self.store.load(Slot::ProductTypes);
    }

    fn persist(&self) -> Result<()> {
        self.store.save(Slot::ProductTypes, &self.types)
    }
}
