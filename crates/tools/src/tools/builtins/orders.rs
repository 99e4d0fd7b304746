//! Front-of-house order tools used by the waiter.

use async_trait::async_trait;
use orderup_ledger::OrderStatus;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Empty, failure, parse_args};
use crate::tools::{Tool, ToolContext, ToolDefinition, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
struct SaveOrderArgs {
    /// Customer name.
    name: String,
    /// What was ordered, free-form.
    order_details: String,
    /// Wait time quoted to the customer, e.g. "15 minutes".
    estimated_wait_time: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SetOrderStatusArgs {
    order_id: u64,
    /// One of RECEIVED, COOKING, READY, SERVED.
    status: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
pub(crate) struct OrderIdArgs {
    pub(crate) order_id: u64,
}

#[derive(Debug, Default)]
pub struct SaveOrderTool;

impl SaveOrderTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for SaveOrderTool {
    fn name(&self) -> &str {
        "save_order"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<SaveOrderArgs>(
            self.name(),
            "Save a customer's order. Returns the new order_id; the order starts as RECEIVED.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: SaveOrderArgs = parse_args(args)?;
        let order = context.kitchen().orders.create(
            &args.name,
            &args.order_details,
            &args.estimated_wait_time,
        );
        Ok(json!({
            "success": true,
            "order_id": order.order_id,
            "status": order.status,
        }))
    }
}

#[derive(Debug, Default)]
pub struct ListOrdersTool;

impl ListOrdersTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListOrdersTool {
    fn name(&self) -> &str {
        "list_orders"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<Empty>(
            self.name(),
            "List every outstanding order (RECEIVED, COOKING or READY), oldest first.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let _: Empty = parse_args(args)?;
        let outstanding = context.kitchen().orders.list_outstanding();
        Ok(serde_json::to_value(outstanding)?)
    }
}

#[derive(Debug, Default)]
pub struct SetOrderStatusTool;

impl SetOrderStatusTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for SetOrderStatusTool {
    fn name(&self) -> &str {
        "set_order_status"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<SetOrderStatusArgs>(
            self.name(),
            &format!(
                "Set the status of an order. Valid statuses are {}.",
                OrderStatus::NAMES.join(", ")
            ),
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: SetOrderStatusArgs = parse_args(args)?;
        match context
            .kitchen()
            .orders
            .set_status(args.order_id, &args.status)
        {
            Ok(order) => Ok(json!({
                "success": true,
                "order_id": order.order_id,
                "status": order.status,
                "message": format!("Order {} status updated to {}", order.order_id, order.status),
            })),
            Err(e) => Ok(failure(e)),
        }
    }
}

/// `get_order_status` on the orders server.
#[derive(Debug, Default)]
pub struct CustomerOrderStatusTool;

impl CustomerOrderStatusTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for CustomerOrderStatusTool {
    fn name(&self) -> &str {
        "get_order_status"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<OrderIdArgs>(self.name(), "Get the status of a customer order.")
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: OrderIdArgs = parse_args(args)?;
        match context.kitchen().orders.get_status(args.order_id) {
            Ok(status) => Ok(json!({
                "success": true,
                "order_id": args.order_id,
                "status": status,
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
    async fn alice_order_walkthrough() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::Orders);

        let saved = SaveOrderTool::new()
            .call(
                json!({"name": "Alice", "order_details": "1x Pancakes", "estimated_wait_time": "15 minutes"}),
                &ctx,
            )
            .await
            .unwrap();
        assert_eq!(saved, json!({"success": true, "order_id": 1, "status": "RECEIVED"}));

        let listed = ListOrdersTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(listed[0]["name"], json!("Alice"));

        let updated = SetOrderStatusTool::new()
            .call(json!({"order_id": 1, "status": "COOKING"}), &ctx)
            .await
            .unwrap();
        assert_eq!(updated["message"], json!("Order 1 status updated to COOKING"));

        let status = CustomerOrderStatusTool::new()
            .call(json!({"order_id": 1}), &ctx)
            .await
            .unwrap();
        assert_eq!(status["status"], json!("COOKING"));

        SetOrderStatusTool::new()
            .call(json!({"order_id": 1, "status": "SERVED"}), &ctx)
            .await
            .unwrap();
        let listed = ListOrdersTool::new().call(json!({}), &ctx).await.unwrap();
        assert_eq!(listed, json!([]));
    }

    #[tokio::test]
    async fn refusals_are_payloads() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::Orders);

        let missing = CustomerOrderStatusTool::new()
            .call(json!({"order_id": 5}), &ctx)
            .await
            .unwrap();
        assert_eq!(missing, json!({"success": false, "message": "Order #5 not found"}));

        SaveOrderTool::new()
            .call(
                json!({"name": "Bob", "order_details": "soup", "estimated_wait_time": "5 minutes"}),
                &ctx,
            )
            .await
            .unwrap();
        let invalid = SetOrderStatusTool::new()
            .call(json!({"order_id": 1, "status": "EATEN"}), &ctx)
            .await
            .unwrap();
        assert_eq!(invalid["success"], json!(false));
        assert!(invalid["message"].as_str().unwrap().contains("EATEN"));
    }

    #[tokio::test]
    async fn order_id_must_be_a_number() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir, ServerKind::Orders);
        let err = CustomerOrderStatusTool::new()
            .call(json!({"order_id": "first"}), &ctx)
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidRequest(_)));
    }
}
