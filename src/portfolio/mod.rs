//! Portfolio store: sole owner of the portfolio collection and the
//! holdings embedded in each portfolio.
//!
//! A portfolio's name is derived from its broker at write time and is not
//! independently editable. Broker references are not validated beyond
//! being non-blank: a portfolio may outlive its broker and renders as
//! "Unknown Broker" from then on.

use std::rc::Rc;

use chrono::Utc;

use crate::error::{Error, Result};
use crate::models::{Holding, Portfolio};
use crate::registry::BrokerRegistry;
use crate::store::{Slot, Store};

pub struct PortfolioStore {
    store: Rc<Store>,
    portfolios: Vec<Portfolio>,
}

impl PortfolioStore {
    pub fn load(store: Rc<Store>) -> Self {
        let portfolios = store.load(Slot::Portfolios);
        Self { store, portfolios }
    }

    pub fn list(&self) -> &[Portfolio] {
        &self.portfolios
    }

    pub fn get(&self, id: &str) -> Option<&Portfolio> {
        self.portfolios.iter().find(|p| p.id == id)
    }

    /// Create an empty portfolio for a broker. The id is a millisecond
    /// timestamp token, bumped when two creations land in the same
    /// millisecond.
    pub fn create(&mut self, broker_code: &str, brokers: &BrokerRegistry) -> Result<Portfolio> {
        let broker_code = broker_code.trim();
        if broker_code.is_empty() {
            return Err(Error::blank("Broker code"));
        }

        let portfolio = Portfolio {
            id: self.next_id(),
            name: derive_name(brokers, broker_code),
            broker_code: broker_code.to_string(),
            holdings: Vec::new(),
        };
        self.portfolios.push(portfolio.clone());
        self.persist()?;
        log::info!("Created portfolio {} for broker {}", portfolio.id, broker_code);
        Ok(portfolio)
    }

    /// Point a portfolio at a different broker, recomputing the derived
    /// name.
    pub fn update(
        &mut self,
        id: &str,
        broker_code: &str,
        brokers: &BrokerRegistry,
    ) -> Result<Portfolio> {
        let broker_code = broker_code.trim();
        if broker_code.is_empty() {
            return Err(Error::blank("Broker code"));
        }

        let name = derive_name(brokers, broker_code);
        let portfolio = self.portfolio_mut(id)?;
        portfolio.broker_code = broker_code.to_string();
        portfolio.name = name;
        let updated = portfolio.clone();

        self.persist()?;
        log::info!("Updated portfolio {}", id);
        Ok(updated)
    }

    /// Remove a portfolio and all holdings embedded in it.
    pub fn remove(&mut self, id: &str) -> Result<Portfolio> {
        let index = self
            .portfolios
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| Error::NotFound {
                entity: "Portfolio",
                key: id.to_string(),
            })?;

        let removed = self.portfolios.remove(index);
        self.persist()?;
        log::info!("Removed portfolio {}", id);
        Ok(removed)
    }

    /// Add a product position. A product can appear only once per
    /// portfolio; changing an existing position goes through
    /// [`update_holding`](Self::update_holding).
    pub fn add_holding(&mut self, id: &str, product_code: &str, amount: f64) -> Result<Holding> {
        let product_code = product_code.trim();
        let portfolio = self.portfolio_mut(id)?;
        if product_code.is_empty() {
            return Err(Error::blank("Product code"));
        }
        validate_amount(amount)?;
        if portfolio.holding(product_code).is_some() {
            return Err(Error::DuplicateHolding {
                code: product_code.to_string(),
            });
        }

        let holding = Holding {
            product_code: product_code.to_string(),
            amount,
        };
        portfolio.holdings.push(holding.clone());
        self.persist()?;
        log::info!("Added {} to portfolio {}", product_code, id);
        Ok(holding)
    }

    /// Replace the amount of an existing position.
    pub fn update_holding(&mut self, id: &str, product_code: &str, amount: f64) -> Result<Holding> {
        let portfolio = self.portfolio_mut(id)?;
        validate_amount(amount)?;
        let holding = portfolio
            .holdings
            .iter_mut()
            .find(|h| h.product_code == product_code)
            .ok_or_else(|| Error::NotFound {
                entity: "Holding",
                key: product_code.to_string(),
            })?;
        holding.amount = amount;
        let updated = holding.clone();

        self.persist()?;
        log::info!("Updated {} in portfolio {}", product_code, id);
        Ok(updated)
    }

    pub fn remove_holding(&mut self, id: &str, product_code: &str) -> Result<Holding> {
        let portfolio = self.portfolio_mut(id)?;
        let index = portfolio
            .holdings
            .iter()
            .position(|h| h.product_code == product_code)
            .ok_or_else(|| Error::NotFound {
                entity: "Holding",
                key: product_code.to_string(),
            })?;

        let removed = portfolio.holdings.remove(index);
        self.persist()?;
        log::info!("Removed {} from portfolio {}", product_code, id);
        Ok(removed)
    }

    /// Re-read the collection from the gateway, e.g. after a bulk import.
    pub fn reload(&mut self) {
        self.portfolios = self.store.load(Slot::Portfolios);
    }

    fn portfolio_mut(&mut self, id: &str) -> Result<&mut Portfolio> {
        self.portfolios
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| Error::NotFound {
                entity: "Portfolio",
                key: id.to_string(),
            })
    }

    fn next_id(&self) -> String {
        let mut candidate = Utc::now().timestamp_millis();
        while self.portfolios.iter().any(|p| p.id == candidate.to_string()) {
            candidate += 1;
        }
        candidate.to_string()
    }

    fn persist(&self) -> Result<()> {
        self.store.save(Slot::Portfolios, &self.portfolios)
    }
}

fn derive_name(brokers: &BrokerRegistry, broker_code: &str) -> String {
    match brokers.get(broker_code) {
        Some(broker) => format!("{} Portfolio", broker.name),
        None => format!("Portfolio {}", broker_code),
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::Validation(format!(
            "Amount must be a positive number, got {}",
            amount
        )));
    }
    Ok(())
}
