//! Shared ledger store for the restaurant tool servers.
//!
//! Every ledger is a JSON file that several independent processes read and
//! write. Nothing is cached between operations; the file on disk is the only
//! source of truth.

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod matching;
pub mod orders;
pub mod quantity;
pub mod store;

pub use catalog::{Catalog, CatalogEntry, FoodCatalog, MenuCatalog, RecipeCatalog};
pub use error::{LedgerError, Result, Shortage};
pub use inventory::{InventoryLedger, PantryRow, Stock, StockCheck, StockLevel};
pub use orders::{CustomerOrder, CustomerOrders, KitchenOrder, KitchenOrders, OrderStatus};
pub use quantity::Quantity;
pub use store::{LockMode, RecordStore};
