//! Error types for ledger operations.
//!
//! Domain failures (`NotFound`, `InsufficientStock`, `InvalidStatus`) are
//! ordinary outcomes that the tool layer turns into `{success: false}`
//! payloads. Persistence failures are logged by the store and never reach
//! callers through these variants, except from `RecordStore::try_save`.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quantity::Quantity;

/// Itemized deficit for one inventory key during a `take`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shortage {
    pub needed: Quantity,
    pub available: Quantity,
    pub shortage: Quantity,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LedgerError {
    #[error("{kind} #{id} not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Insufficient ingredients: {}", missing.keys().cloned().collect::<Vec<_>>().join(", "))]
    InsufficientStock { missing: IndexMap<String, Shortage> },

    #[error("Invalid status '{status}'. Must be one of {allowed:?}.")]
    InvalidStatus {
        status: String,
        allowed: &'static [&'static str],
    },

    #[error("invalid quantity for '{key}': {quantity}")]
    InvalidQuantity { key: String, quantity: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl LedgerError {
    pub fn not_found(kind: &'static str, id: impl ToString) -> Self {
        LedgerError::NotFound {
            kind,
            id: id.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
