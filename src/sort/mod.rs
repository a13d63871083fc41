//! Column-based sorting for table views.
//!
//! Text keys compare case-insensitively on their lowercased form, numeric
//! keys by numeric order. The underlying sort is `slice::sort_by`, which
//! is stable, so rows with equal keys keep their relative order across
//! re-sorts — table views depend on that.

use std::cmp::Ordering;

use crate::models::{Broker, Product, ProductType, UnifiedHolding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// The column/direction pair a table view is currently sorted by.
#[derive(Debug, Clone, PartialEq)]
pub struct SortConfig {
    pub column: String,
    pub direction: SortDirection,
}

impl SortConfig {
    pub fn new(column: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            column: column.into(),
            direction,
        }
    }
}

/// Clicking the active column flips its direction; any other column takes
/// over and starts ascending. Pure, the current config is not touched.
pub fn toggle_sort_direction(config: &SortConfig, column: &str) -> SortConfig {
    if config.column == column {
        SortConfig::new(config.column.clone(), config.direction.toggled())
    } else {
        SortConfig::new(column, SortDirection::Asc)
    }
}

/// Comparison key for one cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (SortKey::Number(a), SortKey::Number(b)) => {
                a.partial_cmp(b).unwrap_or(Ordering::Equal)
            }
            // Mixed kinds do not order against each other.
            _ => Ordering::Equal,
        }
    }
}

/// Types that can hand out a comparison key per column name. Unknown
/// columns yield an empty text key, which leaves the order unchanged.
pub trait Sortable {
    fn sort_key(&self, column: &str) -> SortKey;
}

pub fn sort_by_column<T: Sortable>(items: &mut [T], column: &str, direction: SortDirection) {
    sort_by_column_with(items, column, direction, |item, column| {
        item.sort_key(column)
    });
}

/// Variant taking an explicit selector, for columns that need context the
/// row itself does not carry (e.g. a product's resolved type name).
pub fn sort_by_column_with<T, F>(items: &mut [T], column: &str, direction: SortDirection, value: F)
where
    F: Fn(&T, &str) -> SortKey,
{
    items.sort_by(|a, b| {
        let ordering = value(a, column).compare(&value(b, column));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

impl Sortable for Broker {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "code" => SortKey::Text(self.code.clone()),
            "name" => SortKey::Text(self.name.clone()),
            _ => SortKey::Text(String::new()),
        }
    }
}

impl Sortable for ProductType {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "code" => SortKey::Text(self.code.clone()),
            "name" => SortKey::Text(self.name.clone()),
            _ => SortKey::Text(String::new()),
        }
    }
}

// The "type" column needs the type registry and goes through
// `sort_by_column_with` at the call site.
impl Sortable for Product {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "code" => SortKey::Text(self.code.clone()),
            "description" => SortKey::Text(self.description.clone()),
            _ => SortKey::Text(String::new()),
        }
    }
}

impl Sortable for UnifiedHolding {
    fn sort_key(&self, column: &str) -> SortKey {
        match column {
            "type" => SortKey::Text(self.type_name.clone()),
            "code" => SortKey::Text(self.code.clone()),
            "description" => SortKey::Text(self.description.clone()),
            "totalAmount" => SortKey::Number(self.total_amount),
            _ => SortKey::Text(String::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::resolve_type_name;

    fn brokers() -> Vec<Broker> {
        vec![
            Broker::new("HPI", "Hapi"),
            Broker::new("IBK", "Interactive Brokers"),
            Broker::new("ETR", "eToro"),
        ]
    }

    #[test]
    fn test_desc_is_exactly_reversed_asc() {
        let mut asc = brokers();
        sort_by_column(&mut asc, "code", SortDirection::Asc);

        let mut desc = brokers();
        sort_by_column(&mut desc, "code", SortDirection::Desc);

        let mut reversed = asc.clone();
        reversed.reverse();
        assert_eq!(desc, reversed);
    }

    #[test]
    fn test_sorting_sorted_input_is_a_no_op() {
        let mut items = brokers();
        sort_by_column(&mut items, "name", SortDirection::Asc);
        let once = items.clone();

        sort_by_column(&mut items, "name", SortDirection::Asc);
        assert_eq!(items, once);
    }

    #[test]
    fn test_text_comparison_is_case_insensitive() {
        let mut items = brokers();
        sort_by_column(&mut items, "name", SortDirection::Asc);

        let names: Vec<&str> = items.iter().map(|b| b.name.as_str()).collect();
        // "eToro" sorts before "Hapi" despite the lowercase leading letter.
        assert_eq!(names, vec!["eToro", "Hapi", "Interactive Brokers"]);
    }

    #[test]
    fn test_numeric_column_sorts_numerically() {
        let mut items = vec![
            UnifiedHolding {
                code: "A".to_string(),
                description: String::new(),
                type_name: String::new(),
                type_code: None,
                total_amount: 900.0,
                broker_names: vec![],
            },
            UnifiedHolding {
                code: "B".to_string(),
                description: String::new(),
                type_name: String::new(),
                type_code: None,
                total_amount: 10000.0,
                broker_names: vec![],
            },
        ];

        sort_by_column(&mut items, "totalAmount", SortDirection::Desc);
        assert_eq!(items[0].code, "B");
    }

    #[test]
    fn test_selector_resolves_external_columns() {
        let types = vec![
            ProductType::new("ACC", "ACCION"),
            ProductType::new("MON", "MONEDA"),
        ];
        let mut products = vec![
            Product::new("USD", "Dólar", Some("MON".to_string())),
            Product::new("APPL", "Apple Inc.", Some("ACC".to_string())),
        ];

        sort_by_column_with(&mut products, "type", SortDirection::Asc, |product, column| {
            match column {
                "type" => SortKey::Text(
                    resolve_type_name(&types, product.type_code.as_deref()).to_string(),
                ),
                _ => product.sort_key(column),
            }
        });
        assert_eq!(products[0].code, "APPL");
    }

    #[test]
    fn test_ties_keep_original_relative_order() {
        let mut items = vec![
            Broker::new("B1", "Same"),
            Broker::new("A1", "Same"),
            Broker::new("C1", "Same"),
        ];
        sort_by_column(&mut items, "name", SortDirection::Asc);

        let codes: Vec<&str> = items.iter().map(|b| b.code.as_str()).collect();
        assert_eq!(codes, vec!["B1", "A1", "C1"]);
    }

    #[test]
    fn test_unknown_column_leaves_order_unchanged() {
        let mut items = brokers();
        let before = items.clone();
        sort_by_column(&mut items, "nope", SortDirection::Desc);
        assert_eq!(items, before);
    }

    #[test]
    fn test_toggle_flips_same_column_and_resets_new_column() {
        let config = SortConfig::new("code", SortDirection::Asc);

        let flipped = toggle_sort_direction(&config, "code");
        assert_eq!(flipped.direction, SortDirection::Desc);

        let flipped_back = toggle_sort_direction(&flipped, "code");
        assert_eq!(flipped_back.direction, SortDirection::Asc);

        let switched = toggle_sort_direction(&flipped, "name");
        assert_eq!(switched.column, "name");
        assert_eq!(switched.direction, SortDirection::Asc);
    }
}
