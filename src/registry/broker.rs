use std::rc::Rc;

use crate::error::{Error, Result};
use crate::models::Broker;
use crate::store::{Slot, Store};

/// Sentinel for broker codes that are blank or no longer resolve.
pub const UNKNOWN_BROKER: &str = "Unknown Broker";

/// Resolve a broker code against a plain slice. Dangling and blank codes
/// yield the sentinel; this never fails.
pub fn resolve_broker_name<'a>(brokers: &'a [Broker], code: &str) -> &'a str {
    if code.trim().is_empty() {
        return UNKNOWN_BROKER;
    }
    brokers
        .iter()
        .find(|b| b.code == code)
        .map(|b| b.name.as_str())
        .unwrap_or(UNKNOWN_BROKER)
}

/// The broker reference list. Removal never blocks: portfolios keep their
/// `broker_code` and render as "Unknown Broker" from then on.
pub struct BrokerRegistry {
    store: Rc<Store>,
    brokers: Vec<Broker>,
}

impl BrokerRegistry {
    pub fn load(store: Rc<Store>) -> Self {
        let brokers = store.load(Slot::Brokers);
        Self { store, brokers }
    }

    pub fn list(&self) -> &[Broker] {
        &self.brokers
    }

    pub fn get(&self, code: &str) -> Option<&Broker> {
        self.brokers.iter().find(|b| b.code == code)
    }

    pub fn resolve_name(&self, code: &str) -> &str {
        resolve_broker_name(&self.brokers, code)
    }

    pub fn add(&mut self, code: &str, name: &str) -> Result<Broker> {
        let code = code.trim();
        let name = name.trim();
        if code.is_empty() {
            return Err(Error::blank("Broker code"));
        }
        if name.is_empty() {
            return Err(Error::blank("Broker name"));
        }
        if self.get(code).is_some() {
            return Err(Error::DuplicateKey {
                entity: "Broker",
                code: code.to_string(),
            });
        }

        let broker = Broker::new(code, name);
        self.brokers.push(broker.clone());
        self.persist()?;
        log::info!("Added broker {}", code);
        Ok(broker)
    }

    /// Replace the display name. The code is the identity and stays fixed.
    pub fn update(&mut self, code: &str, name: &str) -> Result<Broker> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::blank("Broker name"));
        }

        let broker = self
            .brokers
            .iter_mut()
            .find(|b| b.code == code)
            .ok_or_else(|| Error::NotFound {
                entity: "Broker",
                key: code.to_string(),
            })?;
        broker.name = name.to_string();
        let updated = broker.clone();

        self.persist()?;
        log::info!("Updated broker {}", code);
        Ok(updated)
    }

    pub fn remove(&mut self, code: &str) -> Result<Broker> {
        let index = self
            .brokers
            .iter()
            .position(|b| b.code == code)
            .ok_or_else(|| Error::NotFound {
                entity: "Broker",
                key: code.to_string(),
            })?;

        let removed = self.brokers.remove(index);
        self.persist()?;
        log::info!("Removed broker {}", code);
        Ok(removed)
    }

    /// Re-read the collection from the gateway, e.g. after a bulk import.
    pub fn reload(&mut self) {
        self.brokers = self.store.load(Slot::Brokers);
    }

    fn persist(&self) -> Result<()> {
        self.store.save(Slot::Brokers, &self.brokers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> BrokerRegistry {
        BrokerRegistry::load(Rc::new(Store::in_memory()))
    }

    #[test]
    fn test_add_and_list() {
        let mut brokers = registry();
        brokers.add("IBK", "Interactive Brokers").unwrap();
        brokers.add("ETR", "eToro").unwrap();

        let listed = brokers.list();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].code, "IBK");
    }

    #[test]
    fn test_add_duplicate_code_fails_and_leaves_collection_unchanged() {
        let mut brokers = registry();
        brokers.add("IBK", "Interactive Brokers").unwrap();

        let err = brokers.add("IBK", "Something Else").unwrap_err();
        assert!(matches!(err, Error::DuplicateKey { code, .. } if code == "IBK"));
        assert_eq!(brokers.list().len(), 1);
        assert_eq!(brokers.list()[0].name, "Interactive Brokers");
    }

    #[test]
    fn test_add_blank_fields_rejected() {
        let mut brokers = registry();
        assert!(matches!(brokers.add("  ", "x"), Err(Error::Validation(_))));
        assert!(matches!(brokers.add("IBK", ""), Err(Error::Validation(_))));
        assert!(brokers.list().is_empty());
    }

    #[test]
    fn test_update_replaces_name_only() {
        let mut brokers = registry();
        brokers.add("IBK", "Interactive Brokers").unwrap();

        let updated = brokers.update("IBK", "IB LLC").unwrap();
        assert_eq!(updated.code, "IBK");
        assert_eq!(brokers.get("IBK").unwrap().name, "IB LLC");
    }

    #[test]
    fn test_update_unknown_code_fails() {
        let mut brokers = registry();
        assert!(matches!(
            brokers.update("NOPE", "x"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_then_resolve_yields_sentinel() {
        let mut brokers = registry();
        brokers.add("IBK", "Interactive Brokers").unwrap();
        brokers.remove("IBK").unwrap();

        assert_eq!(brokers.resolve_name("IBK"), UNKNOWN_BROKER);
        assert!(matches!(brokers.remove("IBK"), Err(Error::NotFound { .. })));
    }

    #[test]
    fn test_resolve_blank_code_yields_sentinel() {
        let brokers = registry();
        assert_eq!(brokers.resolve_name(""), UNKNOWN_BROKER);
        assert_eq!(brokers.resolve_name("   "), UNKNOWN_BROKER);
    }

    #[test]
    fn test_mutations_write_through() {
        let store = Rc::new(Store::in_memory());
        let mut brokers = BrokerRegistry::load(store.clone());
        brokers.add("IBK", "Interactive Brokers").unwrap();

        // A second registry over the same store sees the persisted state.
        let fresh = BrokerRegistry::load(store);
        assert_eq!(fresh.list().len(), 1);
    }
}
