pub mod menu;
pub mod order_up;
pub mod orders;
pub mod pantry;
pub mod recipes;

pub use menu::{GetMenuItemTool, ListCategoriesTool, ListMenuTool, SearchMenuTool};
pub use order_up::{
    AcceptOrderTool, KitchenOrderStatusTool, ListReadyOrdersTool, MarkOrderDeliveredTool,
};
pub use orders::{CustomerOrderStatusTool, ListOrdersTool, SaveOrderTool, SetOrderStatusTool};
pub use pantry::{
    AddIngredientsTool, CheckPantryTool, GetLowStockItemsTool, ListFoodsTool, ListPantryTool,
    MatchIngredientsTool, TakeIngredientsTool,
};
pub use recipes::{GetRecipeTool, ListRecipesTool};

use schemars::JsonSchema;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt::Display;
use std::sync::Arc;

use crate::kitchen::ServerKind;
use crate::tools::{Tool, ToolError};

/// The tools served by one server kind, in listing order.
pub fn tools_for(kind: ServerKind) -> Vec<Arc<dyn Tool>> {
    match kind {
        ServerKind::Pantry => vec![
            Arc::new(CheckPantryTool::new()),
            Arc::new(TakeIngredientsTool::new()),
            Arc::new(AddIngredientsTool::new()),
            Arc::new(GetLowStockItemsTool::new()),
            Arc::new(ListPantryTool::new()),
            Arc::new(ListFoodsTool::new()),
            Arc::new(MatchIngredientsTool::new()),
        ],
        ServerKind::Orders => vec![
            Arc::new(SaveOrderTool::new()),
            Arc::new(ListOrdersTool::new()),
            Arc::new(SetOrderStatusTool::new()),
            Arc::new(CustomerOrderStatusTool::new()),
        ],
        ServerKind::OrderUp => vec![
            Arc::new(AcceptOrderTool::new()),
            Arc::new(ListReadyOrdersTool::new()),
            Arc::new(KitchenOrderStatusTool::new()),
            Arc::new(MarkOrderDeliveredTool::new()),
        ],
        ServerKind::Menu => vec![
            Arc::new(ListMenuTool::new()),
            Arc::new(GetMenuItemTool::new()),
            Arc::new(ListCategoriesTool::new()),
            Arc::new(SearchMenuTool::new()),
        ],
        ServerKind::Recipes => vec![
            Arc::new(ListRecipesTool::new()),
            Arc::new(GetRecipeTool::new()),
        ],
    }
}

/// Deserialize a tool's arguments. A missing arguments object counts as `{}`.
pub(crate) fn parse_args<A: DeserializeOwned>(args: Value) -> Result<A, ToolError> {
    let args = match args {
        Value::Null => json!({}),
        other => other,
    };
    serde_json::from_value(args)
        .map_err(|e| ToolError::InvalidRequest(format!("Invalid arguments: {}", e)))
}

/// Argument object for tools that take none.
#[derive(Debug, Default, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct Empty {}

/// Payload for a call the ledger refused.
pub(crate) fn failure(message: impl Display) -> Value {
    json!({
        "success": false,
        "message": message.to_string(),
    })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::config::Config;
    use crate::kitchen::{Kitchen, ServerKind};
    use crate::tools::KitchenToolContext;

    /// Context over an empty data directory, catalogs loaded for `kind`.
    pub fn context(dir: &TempDir, kind: ServerKind) -> KitchenToolContext {
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            ..Config::default()
        };
        KitchenToolContext::new(kind, Arc::new(Kitchen::open(&config, kind)))
    }

    pub fn write(dir: &TempDir, file: &str, value: serde_json::Value) {
        std::fs::write(dir.path().join(file), serde_json::to_vec_pretty(&value).unwrap()).unwrap();
    }
}
