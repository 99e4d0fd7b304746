use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::{OrderBook, OrderDocument, now};
use crate::error::Result;
use crate::store::{LockMode, RecordStore};

pub const READY: &str = "ready";
pub const DELIVERED: &str = "delivered";

/// A dish the kitchen has accepted. Preparation is simulated, so orders are
/// born `ready`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KitchenOrder {
    pub order_id: u64,
    pub recipe: String,
    pub prep_time_minutes: u32,
    pub cook_time_minutes: u32,
    pub total_time_minutes: u32,
    pub status: String,
    pub accepted_at: String,
    pub completed_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivered_at: Option<String>,
}

pub struct KitchenOrders {
    book: OrderBook<KitchenOrder>,
}

impl KitchenOrders {
    const KIND: &'static str = "Order";

    pub fn open(path: impl Into<PathBuf>, lock_mode: LockMode) -> Self {
        Self {
            book: OrderBook::open(path, lock_mode, Self::KIND),
        }
    }

    pub fn store(&self) -> &RecordStore<OrderDocument<KitchenOrder>> {
        self.book.store()
    }

    pub fn accept(&self, recipe: &str, prep_time: u32, cook_time: u32) -> KitchenOrder {
        let order = self.book.create(|order_id| {
            let stamp = now();
            KitchenOrder {
                order_id,
                recipe: recipe.to_string(),
                prep_time_minutes: prep_time,
                cook_time_minutes: cook_time,
                total_time_minutes: prep_time.saturating_add(cook_time),
                status: READY.to_string(),
                accepted_at: stamp.clone(),
                completed_at: stamp,
                delivered_at: None,
            }
        });
        tracing::info!(order_id = order.order_id, recipe = %order.recipe, "accepted kitchen order");
        order
    }

    pub fn list_all(&self) -> Vec<KitchenOrder> {
        self.book.all()
    }

    pub fn list_ready(&self) -> Vec<KitchenOrder> {
        self.book
            .all()
            .into_iter()
            .filter(|o| o.status == READY)
            .collect()
    }

    pub fn get(&self, order_id: u64) -> Result<KitchenOrder> {
        self.book.get(order_id)
    }

    pub fn get_status(&self, order_id: u64) -> Result<String> {
        self.book.get(order_id).map(|o| o.status)
    }

    /// Hand the dish to the front of house.
    pub fn mark_delivered(&self, order_id: u64) -> Result<KitchenOrder> {
        let order = self.book.update(order_id, |order| {
            order.status = DELIVERED.to_string();
            order.delivered_at = Some(now());
            Ok(order.clone())
        })?;
        tracing::info!(order_id, recipe = %order.recipe, "kitchen order delivered");
        Ok(order)
    }

    /// Overwrite the status verbatim. Kitchen statuses are free-form.
    pub fn set_status(&self, order_id: u64, status: &str) -> Result<KitchenOrder> {
        self.book.update(order_id, |order| {
            order.status = status.to_string();
            Ok(order.clone())
        })
    }
}
