//! Unified portfolio aggregation.
//!
//! Folds every holding of every portfolio into one entry per product:
//! total amount across all portfolios plus the contributing broker names.
//! Holdings whose product has been deleted are skipped, a dangling broker
//! reference resolves to "Unknown Broker", and broker names are collected
//! with duplicates; de-duplication is a presentation concern
//! ([`UnifiedHolding::unique_broker_names`]).
//!
//! Entries come back in first-seen order. Callers sort for display with
//! the sort engine; the aggregation itself promises no other order.

use std::collections::HashMap;

use crate::models::{Broker, Portfolio, Product, ProductType, UnifiedHolding};
use crate::registry::{resolve_broker_name, resolve_type_name};

/// Pure fold over the given collections; touches no storage. Amounts
/// accumulate as plain `f64` additions, no rounding.
pub fn compute_unified(
    portfolios: &[Portfolio],
    products: &[Product],
    product_types: &[ProductType],
    brokers: &[Broker],
) -> Vec<UnifiedHolding> {
    let mut entries: Vec<UnifiedHolding> = Vec::new();
    let mut by_code: HashMap<&str, usize> = HashMap::new();

    for portfolio in portfolios {
        let broker_name = resolve_broker_name(brokers, &portfolio.broker_code);

        for holding in &portfolio.holdings {
            let Some(product) = products.iter().find(|p| p.code == holding.product_code) else {
                // The product was deleted; this position contributes nothing.
                continue;
            };

            match by_code.get(product.code.as_str()) {
                Some(&index) => {
                    entries[index].total_amount += holding.amount;
                    entries[index].broker_names.push(broker_name.to_string());
                }
                None => {
                    by_code.insert(product.code.as_str(), entries.len());
                    entries.push(UnifiedHolding {
                        code: product.code.clone(),
                        description: product.description.clone(),
                        type_name: resolve_type_name(product_types, product.type_code.as_deref())
                            .to_string(),
                        type_code: product.type_code.clone(),
                        total_amount: holding.amount,
                        broker_names: vec![broker_name.to_string()],
                    });
                }
            }
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Holding;
    use crate::registry::{NO_TYPE, UNKNOWN_BROKER};

    fn portfolio(id: &str, broker_code: &str, holdings: &[(&str, f64)]) -> Portfolio {
        Portfolio {
            id: id.to_string(),
            name: String::new(),
            broker_code: broker_code.to_string(),
            holdings: holdings
                .iter()
                .map(|(code, amount)| Holding {
                    product_code: code.to_string(),
                    amount: *amount,
                })
                .collect(),
        }
    }

    #[test]
    fn test_same_product_across_two_portfolios_of_one_broker() {
        let brokers = vec![Broker::new("RIG", "Rig Valores")];
        let types = vec![ProductType::new("MON", "MONEDA")];
        let products = vec![Product::new("USD", "Dólar", Some("MON".to_string()))];
        let portfolios = vec![
            portfolio("1", "RIG", &[("USD", 500.0)]),
            portfolio("2", "RIG", &[("USD", 1500.0)]),
        ];

        let unified = compute_unified(&portfolios, &products, &types, &brokers);
        assert_eq!(unified.len(), 1);

        let entry = &unified[0];
        assert_eq!(entry.code, "USD");
        assert_eq!(entry.description, "Dólar");
        assert_eq!(entry.type_name, "MONEDA");
        assert_eq!(entry.total_amount, 2000.0);
        // Both portfolios contribute, but the display view collapses them.
        assert_eq!(entry.broker_names.len(), 2);
        assert_eq!(entry.unique_broker_names(), vec!["Rig Valores"]);
    }

    #[test]
    fn test_totals_sum_every_resolving_holding() {
        let brokers = vec![Broker::new("IBK", "Interactive Brokers"), Broker::new("ETR", "eToro")];
        let products = vec![
            Product::new("USD", "Dólar", None),
            Product::new("APPL", "Apple Inc.", None),
        ];
        let portfolios = vec![
            portfolio("1", "IBK", &[("USD", 1200.0), ("APPL", 5000.0)]),
            portfolio("2", "ETR", &[("USD", 10000.0)]),
        ];

        let unified = compute_unified(&portfolios, &products, &[], &brokers);
        let usd = unified.iter().find(|u| u.code == "USD").unwrap();
        assert_eq!(usd.total_amount, 11200.0);
        assert_eq!(usd.broker_names, vec!["Interactive Brokers", "eToro"]);

        let appl = unified.iter().find(|u| u.code == "APPL").unwrap();
        assert_eq!(appl.total_amount, 5000.0);
    }

    #[test]
    fn test_holdings_of_deleted_products_are_skipped() {
        let brokers = vec![Broker::new("IBK", "Interactive Brokers")];
        let products = vec![Product::new("USD", "Dólar", None)];
        let portfolios = vec![portfolio("1", "IBK", &[("USD", 100.0), ("GONE", 999.0)])];

        let unified = compute_unified(&portfolios, &products, &[], &brokers);
        assert_eq!(unified.len(), 1);
        assert_eq!(unified[0].code, "USD");
    }

    #[test]
    fn test_dangling_broker_resolves_to_sentinel() {
        let products = vec![Product::new("USD", "Dólar", None)];
        let portfolios = vec![portfolio("1", "GONE", &[("USD", 100.0)])];

        let unified = compute_unified(&portfolios, &products, &[], &[]);
        assert_eq!(unified[0].broker_names, vec![UNKNOWN_BROKER]);
        assert_eq!(unified[0].type_name, NO_TYPE);
    }

    #[test]
    fn test_output_is_in_first_seen_order() {
        let brokers = vec![Broker::new("IBK", "Interactive Brokers")];
        let products = vec![
            Product::new("USD", "Dólar", None),
            Product::new("APPL", "Apple Inc.", None),
            Product::new("TSL", "Tesla", None),
        ];
        let portfolios = vec![
            portfolio("1", "IBK", &[("TSL", 1.0), ("USD", 2.0)]),
            portfolio("2", "IBK", &[("APPL", 3.0), ("USD", 4.0)]),
        ];

        let unified = compute_unified(&portfolios, &products, &[], &brokers);
        let codes: Vec<&str> = unified.iter().map(|u| u.code.as_str()).collect();
        assert_eq!(codes, vec!["TSL", "USD", "APPL"]);
    }

    #[test]
    fn test_recomputation_is_idempotent() {
        let brokers = vec![Broker::new("IBK", "Interactive Brokers")];
        let products = vec![Product::new("USD", "Dólar", None)];
        let portfolios = vec![
            portfolio("1", "IBK", &[("USD", 500.0)]),
            portfolio("2", "IBK", &[("USD", 1500.0)]),
        ];

        let first = compute_unified(&portfolios, &products, &[], &brokers);
        let second = compute_unified(&portfolios, &products, &[], &brokers);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        assert!(compute_unified(&[], &[], &[], &[]).is_empty());
    }
}
