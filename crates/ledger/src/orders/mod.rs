//! Order ledgers.
//!
//! Customer orders and kitchen orders live in separate files with separate
//! id counters, so the same numeric id can name two unrelated orders.

mod customer;
mod kitchen;

pub use customer::{CustomerOrder, CustomerOrders, OrderStatus};
pub use kitchen::{DELIVERED, KitchenOrder, KitchenOrders, READY};

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::path::PathBuf;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::{LedgerError, Result};
use crate::store::{LockMode, RecordStore};

fn first_id() -> u64 {
    1
}

/// On-disk order collection plus its id counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDocument<R> {
    #[serde(default = "first_id")]
    pub next_order_id: u64,
    #[serde(default = "IndexMap::new")]
    pub orders: IndexMap<String, R>,
}

impl<R> Default for OrderDocument<R> {
    fn default() -> Self {
        Self {
            next_order_id: first_id(),
            orders: IndexMap::new(),
        }
    }
}

impl<R> OrderDocument<R> {
    /// Allocate the next id.
    ///
    /// Never hands out an id already present in `orders`, even when the
    /// counter has been rewound by hand.
    pub fn mint(&mut self) -> u64 {
        let highest = self
            .orders
            .keys()
            .filter_map(|k| k.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        let id = self.next_order_id.max(highest.saturating_add(1));
        self.next_order_id = id.saturating_add(1);
        id
    }
}

/// Generic id-minting, status-tracking ledger over one order file.
pub(crate) struct OrderBook<R> {
    store: RecordStore<OrderDocument<R>>,
    kind: &'static str,
}

impl<R> OrderBook<R>
where
    R: Serialize + DeserializeOwned + Clone,
{
    pub(crate) fn open(path: impl Into<PathBuf>, lock_mode: LockMode, kind: &'static str) -> Self {
        Self {
            store: RecordStore::new(path).lock_mode(lock_mode),
            kind,
        }
    }

    pub(crate) fn store(&self) -> &RecordStore<OrderDocument<R>> {
        &self.store
    }

    /// Mint an id, build the record, and persist both in one write.
    pub(crate) fn create(&self, build: impl FnOnce(u64) -> R) -> R {
        let created = self.store.modify(|doc| {
            let id = doc.mint();
            let record = build(id);
            doc.orders.insert(id.to_string(), record.clone());
            Ok::<_, Infallible>(record)
        });
        match created {
            Ok(record) => record,
            Err(never) => match never {},
        }
    }

    pub(crate) fn get(&self, id: u64) -> Result<R> {
        self.store.read(|doc| {
            doc.orders
                .get(&id.to_string())
                .cloned()
                .ok_or_else(|| LedgerError::not_found(self.kind, id))
        })
    }

    /// Apply `f` to one record and persist; unknown ids write nothing.
    pub(crate) fn update<T>(&self, id: u64, f: impl FnOnce(&mut R) -> Result<T>) -> Result<T> {
        self.store.modify(|doc| {
            let record = doc
                .orders
                .get_mut(&id.to_string())
                .ok_or_else(|| LedgerError::not_found(self.kind, id))?;
            f(record)
        })
    }

    /// Every record, in creation order.
    pub(crate) fn all(&self) -> Vec<R> {
        self.store.read(|doc| doc.orders.values().cloned().collect())
    }
}

pub(crate) fn now() -> String {
    OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default()
}
