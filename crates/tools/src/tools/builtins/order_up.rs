//! Kitchen pass tools: the chef accepts dishes, the waiter collects them.

use async_trait::async_trait;
use orderup_ledger::KitchenOrder;
use orderup_ledger::orders::READY;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::orders::OrderIdArgs;
use super::{Empty, failure, parse_args};
use crate::tools::{Tool, ToolContext, ToolDefinition, ToolError};

fn default_prep_time() -> u32 {
    10
}

#[derive(Debug, Deserialize, JsonSchema)]
struct AcceptOrderArgs {
    /// Name of the dish being prepared.
    recipe: String,
    /// Preparation time in minutes.
    #[serde(default = "default_prep_time")]
    prep_time: u32,
    /// Cooking time in minutes.
    #[serde(default)]
    cook_time: u32,
}

/// Row of the ready list; the full record is available from `get_order_status`.
#[derive(Debug, Serialize)]
struct ReadyRow<'a> {
    order_id: u64,
    recipe: &'a str,
    status: &'a str,
    total_time_minutes: u32,
    accepted_at: &'a str,
    completed_at: &'a str,
}

impl<'a> From<&'a KitchenOrder> for ReadyRow<'a> {
    fn from(order: &'a KitchenOrder) -> Self {
        Self {
            order_id: order.order_id,
            recipe: &order.recipe,
            status: &order.status,
            total_time_minutes: order.total_time_minutes,
            accepted_at: &order.accepted_at,
            completed_at: &order.completed_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct AcceptOrderTool;

impl AcceptOrderTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for AcceptOrderTool {
    fn name(&self) -> &str {
        "accept_order"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<AcceptOrderArgs>(
            self.name(),
            "Accept a dish into the kitchen queue. The order id is generated and the dish is \
             ready immediately.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: AcceptOrderArgs = parse_args(args)?;
        let order = context
            .kitchen()
            .chef_orders
            .accept(&args.recipe, args.prep_time, args.cook_time);
        Ok(json!({
            "success": true,
            "order_id": order.order_id,
            "recipe": order.recipe,
            "status": order.status,
            "message": format!(
                "Order #{} for {} is ready! (prep: {}min, cook: {}min)",
                order.order_id, order.recipe, order.prep_time_minutes, order.cook_time_minutes
            ),
            "total_time_minutes": order.total_time_minutes,
        }))
    }
}

#[derive(Debug, Default)]
pub struct ListReadyOrdersTool;

impl ListReadyOrdersTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListReadyOrdersTool {
    fn name(&self) -> &str {
        "list_ready_orders"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<Empty>(
            self.name(),
            "List kitchen orders that are ready to be picked up, with the total number of orders \
             the kitchen has accepted.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let _: Empty = parse_args(args)?;
        // One read, so the count and the rows come from the same snapshot.
        let all = context.kitchen().chef_orders.list_all();
        let rows: Vec<ReadyRow<'_>> = all
            .iter()
            .filter(|o| o.status == READY)
            .map(ReadyRow::from)
            .collect();
        Ok(json!({
            "total_orders": all.len(),
            "ready_orders": rows,
            "ready_count": rows.len(),
        }))
    }
}

/// `get_order_status` on the order-up server.
#[derive(Debug, Default)]
pub struct KitchenOrderStatusTool;

impl KitchenOrderStatusTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for KitchenOrderStatusTool {
    fn name(&self) -> &str {
        "get_order_status"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<OrderIdArgs>(
            self.name(),
            "Get the full record of a kitchen order.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: OrderIdArgs = parse_args(args)?;
        match context.kitchen().chef_orders.get(args.order_id) {
            Ok(order) => Ok(json!({
                "success": true,
                "order": order,
            })),
            Err(e) => Ok(failure(e)),
        }
    }
}

#[derive(Debug, Default)]
pub struct MarkOrderDeliveredTool;

impl MarkOrderDeliveredTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for MarkOrderDeliveredTool {
    fn name(&self) -> &str {
        "mark_order_delivered"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<OrderIdArgs>(
            self.name(),
            "Mark a kitchen order as delivered once it has been served.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: OrderIdArgs = parse_args(args)?;
        match context.kitchen().chef_orders.mark_delivered(args.order_id) {
            Ok(order) => Ok(json!({
                "success": true,
                "order_id": order.order_id,
                "status": order.status,
                "message": format!("Order #{} has been marked as delivered", order.order_id),
            })),
            Err(e) => Ok(failure(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kitchen::ServerKind;
    use crate::tools::builtins::test_support::context;
    use tempfile::TempDir;

    #[tokio::test]
    async fn pancakes_from_pass_to_table() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::OrderUp);

        let accepted = AcceptOrderTool::new()
            .call(json!({"recipe": "Pancakes"}), &ctx)
            .await
            .unwrap();
        assert_eq!(accepted["order_id"], json!(1));
        assert_eq!(accepted["status"], json!("ready"));
        assert_eq!(accepted["total_time_minutes"], json!(10));
        assert_eq!(
            accepted["message"],
            json!("Order #1 for Pancakes is ready! (prep: 10min, cook: 0min)")
        );

        let status = KitchenOrderStatusTool::new()
            .call(json!({"order_id": 1}), &ctx)
            .await
            .unwrap();
        assert_eq!(status["order"]["recipe"], json!("Pancakes"));

        let delivered = MarkOrderDeliveredTool::new()
            .call(json!({"order_id": 1}), &ctx)
            .await
            .unwrap();
        assert_eq!(delivered["status"], json!("delivered"));

        let status = KitchenOrderStatusTool::new()
            .call(json!({"order_id": 1}), &ctx)
            .await
            .unwrap();
        assert!(status["order"]["delivered_at"].is_string());

        let missing = MarkOrderDeliveredTool::new()
            .call(json!({"order_id": 99}), &ctx)
            .await
            .unwrap();
        assert_eq!(missing, json!({"success": false, "message": "Order #99 not found"}));
    }

    #[tokio::test]
    async fn cook_time_adds_to_the_total() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::OrderUp);

        let accepted = AcceptOrderTool::new()
            .call(json!({"recipe": "Pancakes", "prep_time": 10, "cook_time": 10}), &ctx)
            .await
            .unwrap();
        assert_eq!(accepted["order_id"], json!(1));
        assert_eq!(accepted["status"], json!("ready"));
        assert_eq!(accepted["total_time_minutes"], json!(20));
    }

    #[tokio::test]
    async fn ready_list_counts_every_order() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::OrderUp);
        let accept = AcceptOrderTool::new();
        accept
            .call(json!({"recipe": "Greek Salad", "prep_time": 12}), &ctx)
            .await
            .unwrap();
        accept
            .call(json!({"recipe": "Beef Stir Fry", "prep_time": 15, "cook_time": 10}), &ctx)
            .await
            .unwrap();
        MarkOrderDeliveredTool::new()
            .call(json!({"order_id": 1}), &ctx)
            .await
            .unwrap();

        let listed = ListReadyOrdersTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(listed["total_orders"], json!(2));
        assert_eq!(listed["ready_count"], json!(1));
        assert_eq!(listed["ready_orders"][0]["recipe"], json!("Beef Stir Fry"));
        assert_eq!(listed["ready_orders"][0]["total_time_minutes"], json!(25));
    }
}
