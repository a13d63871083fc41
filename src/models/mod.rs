use serde::{Deserialize, Serialize};

/// A brokerage firm. `code` is the identity and never changes after
/// creation; edits replace the display name only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Broker {
    pub code: String,
    pub name: String,
}

impl Broker {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A product classification (currency, stock, bond, ...). Referenced by
/// products via `type_code`; deletion is blocked while references exist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductType {
    pub code: String,
    pub name: String,
}

impl ProductType {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A tradable product. `type_code` is optional and not write-enforced:
/// readers resolve a missing type to "No Type" and a dangling one to
/// "Unknown Type".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub code: String,
    pub description: String,
    #[serde(default)]
    pub type_code: Option<String>,
}

impl Product {
    pub fn new(
        code: impl Into<String>,
        description: impl Into<String>,
        type_code: Option<String>,
    ) -> Self {
        Self {
            code: code.into(),
            description: description.into(),
            type_code,
        }
    }
}

/// A (product, amount) position embedded in a portfolio. Holds only the
/// product's code, never a copy of the product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub product_code: String,
    pub amount: f64,
}

/// A per-broker portfolio. `name` is derived from the broker at write time
/// and not independently editable. The holdings list serializes as
/// `products`, the field name used by historical export documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub broker_code: String,
    #[serde(rename = "products", default)]
    pub holdings: Vec<Holding>,
}

impl Portfolio {
    /// Look up a holding by product code.
    pub fn holding(&self, product_code: &str) -> Option<&Holding> {
        self.holdings.iter().find(|h| h.product_code == product_code)
    }
}

/// Per-product aggregate across every portfolio. Derived data, never
/// persisted. `broker_names` keeps one entry per contributing portfolio,
/// duplicates included; `unique_broker_names` is the display view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedHolding {
    pub code: String,
    pub description: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub type_code: Option<String>,
    pub total_amount: f64,
    #[serde(rename = "portfolios")]
    pub broker_names: Vec<String>,
}

impl UnifiedHolding {
    /// Contributing broker names with duplicates collapsed, first-seen
    /// order preserved.
    pub fn unique_broker_names(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for name in &self.broker_names {
            if !seen.contains(&name.as_str()) {
                seen.push(name.as_str());
            }
        }
        seen
    }
}
