//! Menu lookups for the waiter.

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Value, json};

use super::{Empty, parse_args};
use crate::tools::{Tool, ToolContext, ToolDefinition, ToolError};

#[derive(Debug, Deserialize, JsonSchema)]
struct ListMenuArgs {
    /// Only list items in this category, e.g. "Salads".
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct MenuItemArgs {
    /// Name of the menu item, e.g. "Greek Salad".
    item_name: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchMenuArgs {
    /// Search term matched against item names and descriptions.
    query: String,
}

#[derive(Debug, Default)]
pub struct ListMenuTool;

impl ListMenuTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListMenuTool {
    fn name(&self) -> &str {
        "list_menu"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<ListMenuArgs>(
            self.name(),
            "List menu items with descriptions, prices and dietary tags, optionally filtered by category.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: ListMenuArgs = parse_args(args)?;
        let items = context.kitchen().menu.sorted(args.category.as_deref());
        Ok(json!({
            "items": items,
            "count": items.len(),
        }))
    }
}

#[derive(Debug, Default)]
pub struct GetMenuItemTool;

impl GetMenuItemTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for GetMenuItemTool {
    fn name(&self) -> &str {
        "get_menu_item"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<MenuItemArgs>(
            self.name(),
            "Get full details of one menu item by name.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: MenuItemArgs = parse_args(args)?;
        match context.kitchen().menu.get(&args.item_name) {
            Some(item) => Ok(json!({
                "success": true,
                "item": item,
            })),
            None => Ok(json!({
                "success": false,
                "message": format!("Menu item '{}' not found", args.item_name),
            })),
        }
    }
}

#[derive(Debug, Default)]
pub struct ListCategoriesTool;

impl ListCategoriesTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for ListCategoriesTool {
    fn name(&self) -> &str {
        "list_categories"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<Empty>(self.name(), "List the menu categories.")
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let _: Empty = parse_args(args)?;
        let categories = context.kitchen().menu.categories();
        Ok(json!({
            "categories": categories,
            "count": categories.len(),
        }))
    }
}

#[derive(Debug, Default)]
pub struct SearchMenuTool;

impl SearchMenuTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for SearchMenuTool {
    fn name(&self) -> &str {
        "search_menu"
    }

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::function::<SearchMenuArgs>(
            self.name(),
            "Search menu items by keyword in name or description.",
        )
    }

    async fn call(&self, args: Value, context: &dyn ToolContext) -> Result<Value, ToolError> {
        let args: SearchMenuArgs = parse_args(args)?;
        let matches = context.kitchen().menu.search(&args.query);
        Ok(json!({
            "matches": matches,
            "count": matches.len(),
            "query": args.query,
        }))
    }
}
