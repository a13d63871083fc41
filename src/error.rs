//! Error taxonomy shared by the registries, the portfolio store and the
//! bulk transfer layer.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A required field is blank, or an amount is not a positive finite
    /// number. Raised before any state is touched.
    #[error("{0}")]
    Validation(String),

    /// An add would reuse an existing code.
    #[error("{entity} with code {code} already exists")]
    DuplicateKey { entity: &'static str, code: String },

    /// The product is already held in this portfolio; the update path must
    /// be used to change its amount.
    #[error("Product {code} is already in the portfolio")]
    DuplicateHolding { code: String },

    /// The referenced code or id does not exist.
    #[error("{entity} {key} not found")]
    NotFound { entity: &'static str, key: String },

    /// Deletion blocked by dependents. `count` is the number of records
    /// still referencing `code`.
    #[error("Cannot delete {entity} {code}: {count} product(s) reference it")]
    InUse {
        entity: &'static str,
        code: String,
        count: usize,
    },

    /// A bulk-import document that is not the expected shape.
    #[error("Invalid data format: {0}")]
    Format(String),

    /// The persistence gateway failed. The in-memory state may already hold
    /// the mutation; callers decide whether to reload.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn blank(field: &str) -> Self {
        Error::Validation(format!("{field} must not be empty"))
    }
}
