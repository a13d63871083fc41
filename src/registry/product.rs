use std::rc::Rc;

use crate::error::{Error, Result};
use crate::models::Product;
use crate::store::{Slot, Store};

/// The product reference list. The type reference is optional and not
/// validated against the type registry; removal is never blocked, even
/// when portfolios still hold the product (those holdings simply stop
/// contributing to the unified view).
pub struct ProductRegistry {
    store: Rc<Store>,
    products: Vec<Product>,
}

impl ProductRegistry {
    pub fn load(store: Rc<Store>) -> Self {
        let products = store.load(Slot::Products);
        Self { store, products }
    }

    pub fn list(&self) -> &[Product] {
        &self.products
    }

    pub fn get(&self, code: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.code == code)
    }

    pub fn add(
        &mut self,
        code: &str,
        description: &str,
        type_code: Option<&str>,
    ) -> Result<Product> {
        let code = code.trim();
        let description = description.trim();
        if code.is_empty() {
            return Err(Error::blank("Product code"));
        }
        if description.is_empty() {
            return Err(Error::blank("Product description"));
        }
        if self.get(code).is_some() {
            return Err(Error::DuplicateKey {
                entity: "Product",
                code: code.to_string(),
            });
        }

        let product = Product::new(code, description, normalize_type(type_code));
        self.products.push(product.clone());
        self.persist()?;
        log::info!("Added product {}", code);
        Ok(product)
    }

    /// Replace description and type reference. The code stays fixed.
    pub fn update(
        &mut self,
        code: &str,
        description: &str,
        type_code: Option<&str>,
    ) -> Result<Product> {
        let description = description.trim();
        if description.is_empty() {
            return Err(Error::blank("Product description"));
        }

        let product = self
            .products
            .iter_mut()
            .find(|p| p.code == code)
            .ok_or_else(|| Error::NotFound {
                entity: "Product",
                key: code.to_string(),
            })?;
        product.description = description.to_string();
        product.type_code = normalize_type(type_code);
        let updated = product.clone();

        self.persist()?;
        log::info!("Updated product {}", code);
        Ok(updated)
    }

    pub fn remove(&mut self, code: &str) -> Result<Product> {
        let index = self
            .products
            .iter()
            .position(|p| p.code == code)
            .ok_or_else(|| Error::NotFound {
                entity: "Product",
                key: code.to_string(),
            })?;

        let removed = self.products.remove(index);
        self.persist()?;
        log::info!("Removed product {}", code);
        Ok(removed)
    }

    /// Re-read the collection from the gateway, e.g. after a bulk import.
    pub fn reload(&mut self) {
        self.products = self.store.load(Slot::Products);
    }

    fn persist(&self) -> Result<()> {
        self.store.save(Slot::Products, &self.products)
    }
}

// An empty selection means "no type", not a type whose code is "".
fn normalize_type(type_code: Option<&str>) -> Option<String> {
    match type_code {
        Some(code) if !code.trim().is_empty() => Some(code.trim().to_string()),
        _ => None,
    }
}
