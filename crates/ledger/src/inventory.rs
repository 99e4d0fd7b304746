//! Ingredient stock ledger.
//!
//! The on-disk document is a flat `{ "<key>": <quantity> }` map. Keys are
//! either ingredient names or food ids rendered as strings. Quantities never
//! go negative: a `take` that cannot be satisfied in full debits nothing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use crate::catalog::FoodCatalog;
use crate::error::{LedgerError, Result, Shortage};
use crate::matching;
use crate::quantity::Quantity;
use crate::store::{LockMode, RecordStore};

pub type Stock = IndexMap<String, Quantity>;

/// Result of a stock check.
#[derive(Debug, Clone, PartialEq)]
pub enum StockCheck {
    Item {
        key: String,
        quantity: Quantity,
        available: bool,
    },
    All(Stock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub item: String,
    pub quantity: Quantity,
}

/// One row of the pantry joined against the food catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PantryRow {
    pub id: String,
    pub name: String,
    pub quantity: Quantity,
}

pub struct InventoryLedger {
    store: RecordStore<Stock>,
}

impl InventoryLedger {
    pub fn open(path: impl Into<PathBuf>, lock_mode: LockMode) -> Self {
        Self {
            store: RecordStore::new(path).lock_mode(lock_mode),
        }
    }

    pub fn store(&self) -> &RecordStore<Stock> {
        &self.store
    }

    /// Current quantity for one key, or the whole table.
    pub fn check(&self, key: Option<&str>) -> StockCheck {
        self.read(|stock| match key {
            Some(key) => {
                let quantity = stock.get(key).copied().unwrap_or(Quantity::ZERO);
                StockCheck::Item {
                    key: key.to_string(),
                    quantity,
                    available: quantity.is_positive(),
                }
            }
            None => StockCheck::All(stock.clone()),
        })
    }

    pub fn snapshot(&self) -> Stock {
        self.read(Stock::clone)
    }

    /// Load with out-of-range quantities zeroed, so one bad line never
    /// takes the rest of the pantry with it.
    fn read<R>(&self, f: impl FnOnce(&Stock) -> R) -> R {
        self.store.read(|stock| {
            let mut stock = stock.clone();
            repair(&mut stock, self.store.path());
            f(&stock)
        })
    }

    /// Debit every requested key, or nothing at all.
    ///
    /// Returns the post-debit quantities of the requested keys. When any key
    /// is short, fails with every shortage itemized and leaves the ledger
    /// untouched.
    pub fn take(&self, requested: &Stock) -> Result<Stock> {
        validate(requested)?;
        self.store.modify(|stock| {
            repair(stock, self.store.path());
            let missing: IndexMap<String, Shortage> = requested
                .iter()
                .filter_map(|(key, &needed)| {
                    let available = stock.get(key).copied().unwrap_or(Quantity::ZERO);
                    (needed > available).then(|| {
                        (
                            key.clone(),
                            Shortage {
                                needed,
                                available,
                                shortage: needed - available,
                            },
                        )
                    })
                })
                .collect();

            if !missing.is_empty() {
                tracing::info!(missing = ?missing.keys().collect::<Vec<_>>(), "cannot fulfil ingredient request");
                return Err(LedgerError::InsufficientStock { missing });
            }

            let mut updated = Stock::with_capacity(requested.len());
            for (key, &needed) in requested {
                let remaining = match stock.get_mut(key) {
                    Some(current) => {
                        *current = *current - needed;
                        *current
                    }
                    // Only reachable with a zero request for an unknown key.
                    None => Quantity::ZERO,
                };
                tracing::info!(item = %key, took = %needed, remaining = %remaining, "took ingredient");
                updated.insert(key.clone(), remaining);
            }
            Ok(updated)
        })
    }

    /// Credit every key in `delta`, creating unknown keys at zero first.
    pub fn add(&self, delta: &Stock) -> Result<Stock> {
        validate(delta)?;
        self.store.modify(|stock| {
            repair(stock, self.store.path());
            let mut updated = Stock::with_capacity(delta.len());
            for (key, &amount) in delta {
                let current = stock.get(key).copied().unwrap_or(Quantity::ZERO);
                let now = current.checked_add(amount).ok_or_else(|| {
                    LedgerError::InvalidQuantity {
                        key: key.clone(),
                        quantity: current.value() + amount.value(),
                    }
                })?;
                stock.insert(key.clone(), now);
                tracing::info!(item = %key, added = %amount, now = %now, "restocked ingredient");
                updated.insert(key.clone(), now);
            }
            Ok(updated)
        })
    }

    /// Entries at or below `threshold`, sorted by key.
    pub fn low_stock(&self, threshold: Quantity) -> Vec<StockLevel> {
        let mut levels: Vec<StockLevel> = self.read(|stock| {
            stock
                .iter()
                .filter(|(_, q)| **q <= threshold)
                .map(|(item, &quantity)| StockLevel {
                    item: item.clone(),
                    quantity,
                })
                .collect()
        });
        levels.sort_by(|a, b| a.item.cmp(&b.item));
        levels
    }

    /// Pantry joined against the food catalog.
    ///
    /// Includes every ledger key and every catalog id; foods the ledger has
    /// never seen show a zero quantity.
    pub fn pantry_view(&self, foods: &FoodCatalog) -> Vec<PantryRow> {
        let stock = self.snapshot();
        let mut keys: Vec<String> = stock.keys().cloned().collect();
        for id in foods.ids() {
            if !stock.contains_key(&id) {
                keys.push(id);
            }
        }
        keys.sort_by(|a, b| compare_keys(a, b));

        keys.into_iter()
            .map(|key| PantryRow {
                name: foods.display_name(&key),
                quantity: stock.get(&key).copied().unwrap_or(Quantity::ZERO),
                id: key,
            })
            .collect()
    }

    /// Map requested ingredient names onto keys already in the pantry.
    pub fn match_names<'a>(
        &self,
        names: impl IntoIterator<Item = &'a str>,
    ) -> IndexMap<String, Option<String>> {
        let stock = self.snapshot();
        let existing: Vec<&str> = stock.keys().map(String::as_str).collect();
        names
            .into_iter()
            .map(|name| {
                let hit = matching::resolve(name, &existing).map(str::to_string);
                (name.to_string(), hit)
            })
            .collect()
    }
}

fn validate(amounts: &Stock) -> Result<()> {
    match amounts.iter().find(|(_, q)| !q.is_valid()) {
        Some((key, q)) => Err(LedgerError::InvalidQuantity {
            key: key.clone(),
            quantity: q.value(),
        }),
        None => Ok(()),
    }
}

/// Zero any quantity that is negative or not finite.
fn repair(stock: &mut Stock, path: &Path) {
    for (key, quantity) in stock.iter_mut() {
        if !quantity.is_valid() {
            tracing::warn!(
                path = %path.display(),
                item = %key,
                quantity = %quantity,
                "invalid stock quantity on disk, treating as zero"
            );
            *quantity = Quantity::ZERO;
        }
    }
}

/// Numeric keys in numeric order ahead of names in lexical order.
fn compare_keys(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
