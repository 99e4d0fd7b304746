use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use super::{OrderBook, OrderDocument, now};
use crate::error::{LedgerError, Result};
use crate::store::{LockMode, RecordStore};

/// Lifecycle of a customer order. `Served` is terminal for listing purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    Received,
    Cooking,
    Ready,
    Served,
}

impl OrderStatus {
    pub const NAMES: &'static [&'static str] = &["RECEIVED", "COOKING", "READY", "SERVED"];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Received => "RECEIVED",
            OrderStatus::Cooking => "COOKING",
            OrderStatus::Ready => "READY",
            OrderStatus::Served => "SERVED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "RECEIVED" => Ok(OrderStatus::Received),
            "COOKING" => Ok(OrderStatus::Cooking),
            "READY" => Ok(OrderStatus::Ready),
            "SERVED" => Ok(OrderStatus::Served),
            _ => Err(LedgerError::InvalidStatus {
                status: s.to_string(),
                allowed: Self::NAMES,
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub order_id: u64,
    pub name: String,
    pub order_details: String,
    pub estimated_wait_time: String,
    pub status: OrderStatus,
    pub created_at: String,
    pub updated_at: String,
}

/// Orders taken from customers by the front of house.
pub struct CustomerOrders {
    book: OrderBook<CustomerOrder>,
}

impl CustomerOrders {
    const KIND: &'static str = "Order";

    pub fn open(path: impl Into<PathBuf>, lock_mode: LockMode) -> Self {
        Self {
            book: OrderBook::open(path, lock_mode, Self::KIND),
        }
    }

    pub fn store(&self) -> &RecordStore<OrderDocument<CustomerOrder>> {
        self.book.store()
    }

    /// Record a new order in `RECEIVED`.
    pub fn create(
        &self,
        name: &str,
        order_details: &str,
        estimated_wait_time: &str,
    ) -> CustomerOrder {
        let order = self.book.create(|order_id| {
            let stamp = now();
            CustomerOrder {
                order_id,
                name: name.to_string(),
                order_details: order_details.to_string(),
                estimated_wait_time: estimated_wait_time.to_string(),
                status: OrderStatus::Received,
                created_at: stamp.clone(),
                updated_at: stamp,
            }
        });
        tracing::info!(order_id = order.order_id, customer = %order.name, "saved customer order");
        order
    }

    /// Every order not yet served, oldest first.
    pub fn list_outstanding(&self) -> Vec<CustomerOrder> {
        self.book
            .all()
            .into_iter()
            .filter(|o| o.status != OrderStatus::Served)
            .collect()
    }

    pub fn list_all(&self) -> Vec<CustomerOrder> {
        self.book.all()
    }

    /// Move an order to `status`. Any transition among the four is allowed.
    pub fn set_status(&self, order_id: u64, status: &str) -> Result<CustomerOrder> {
        let updated = self.book.update(order_id, |order| {
            order.status = status.parse()?;
            order.updated_at = now();
            Ok(order.clone())
        })?;
        tracing::info!(order_id, status = %updated.status, "customer order status changed");
        Ok(updated)
    }

    pub fn get_status(&self, order_id: u64) -> Result<OrderStatus> {
        self.book.get(order_id).map(|o| o.status)
    }

    pub fn get(&self, order_id: u64) -> Result<CustomerOrder> {
        self.book.get(order_id)
    }
}
